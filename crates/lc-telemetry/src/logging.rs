/// Output format for native logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

impl LogFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            LogFormat::Json
        } else {
            LogFormat::Human
        }
    }
}

/// Filter directive used when `RUST_LOG` is unset.
///
/// A bare level such as `"debug"` is scoped to the console crates and
/// everything else stays at `warn`, so HTTP client internals do not drown the
/// output. Anything containing `=` or `,` is taken verbatim.
pub fn default_directive(level: &str) -> String {
    let level = level.trim();
    if level.is_empty() {
        return "warn,lc_core=info,lc_cli=info".to_string();
    }
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }
    format!("warn,lc_core={level},lc_cli={level},lc_telemetry={level}")
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use tracing_subscriber::{fmt, EnvFilter};

    use super::default_directive;

    fn filter(default_level: &str) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(default_level)))
    }

    /// Initialize logging with human-readable output on stderr.
    ///
    /// Uses `RUST_LOG` if set, otherwise `default_level`. Safe to call more
    /// than once; later calls are no-ops.
    pub fn init_logging(service_name: &str, default_level: &str) {
        fmt()
            .with_env_filter(filter(default_level))
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(false)
            .with_level(true)
            .try_init()
            .ok();

        tracing::debug!(service = service_name, "logging initialised (human-readable)");
    }

    /// Initialize logging with one JSON object per line on stderr.
    pub fn init_logging_json(service_name: &str, default_level: &str) {
        fmt()
            .json()
            .with_env_filter(filter(default_level))
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_level(true)
            .try_init()
            .ok();

        tracing::debug!(service = service_name, "logging initialised (json)");
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::{init_logging, init_logging_json};

#[cfg(not(target_arch = "wasm32"))]
pub fn init(service_name: &str, default_level: &str, format: LogFormat) {
    match format {
        LogFormat::Human => init_logging(service_name, default_level),
        LogFormat::Json => init_logging_json(service_name, default_level),
    }
}

/// Route `tracing` events to the browser console. Call once at startup.
#[cfg(target_arch = "wasm32")]
pub fn init_browser_logging(service_name: &str) {
    tracing_wasm::set_as_global_default();
    tracing::info!(service = service_name, "logging initialised (browser console)");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_is_scoped() {
        let d = default_directive("debug");
        assert!(d.starts_with("warn,"));
        assert!(d.contains("lc_core=debug"));
        assert!(d.contains("lc_cli=debug"));
    }

    #[test]
    fn explicit_directive_is_verbatim() {
        assert_eq!(default_directive("lc_core=trace"), "lc_core=trace");
        assert_eq!(default_directive("info,hyper=warn"), "info,hyper=warn");
    }

    #[test]
    fn empty_level_falls_back() {
        assert_eq!(default_directive("  "), "warn,lc_core=info,lc_cli=info");
    }

    #[test]
    fn json_flag_maps_to_format() {
        assert_eq!(LogFormat::from_json_flag(true), LogFormat::Json);
        assert_eq!(LogFormat::from_json_flag(false), LogFormat::Human);
    }
}
