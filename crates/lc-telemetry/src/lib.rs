//! Logging setup shared by the loan console front ends.
//!
//! Native binaries log through `tracing-subscriber` (human-readable or JSON).
//! The browser build forwards `tracing` events to the devtools console via
//! `tracing-wasm`.

pub mod logging;
