pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod mutation;
pub mod notice;
pub mod resource;
pub mod session;
pub mod transport;
pub mod widgets;

pub use client::ApiClient;
pub use config::{ConfigError, ConsoleConfig};
pub use error::{ApiError, ValidationError};
pub use notice::{Notice, NoticeBoard, NoticeLevel};
pub use resource::{FetchTicket, Resource, ResourceState};
pub use session::{Session, StaticSession};
pub use transport::{ApiRequest, ApiResponse, Transport, TransportError};
