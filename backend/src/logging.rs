//! Logger initialization.
//!
//! Everything goes through the `log` facade; `env_logger` is the only backend
//! and writes to stderr, which is where shader and link logs end up. The
//! filter comes from `LoggingConfig` alone, never from the environment.

use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "backend=debug,triangle=info"). `None` means `info`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

fn builder(config: &LoggingConfig) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();

    match &config.env_filter {
        Some(filter) => {
            builder.parse_filters(filter);
        }
        None => {
            builder.filter_level(log::LevelFilter::Info);
        }
    }

    builder
        .write_style(config.write_style)
        .target(env_logger::Target::Stderr);
    builder
}

/// Initializes the global logger once; later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        // try_init: a test harness may already have installed a logger
        if builder(&config).try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
