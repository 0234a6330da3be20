/// Unified logger for centralized logging configuration

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logger configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Include thread IDs
    pub include_thread_ids: bool,

    /// Include target module paths
    pub include_targets: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            include_thread_ids: false,
            include_targets: true,
        }
    }
}

/// Unified logger
pub struct UnifiedLogger;

impl UnifiedLogger {
    /// Initialize the global logger
    pub fn init(config: LoggerConfig) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.level))?;

        let console_layer = fmt::layer()
            .with_target(config.include_targets)
            .with_thread_ids(config.include_thread_ids)
            .with_ansi(true);

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(console_layer);

        tracing::subscriber::set_global_default(subscriber)?;

        tracing::info!("logging initialized with level: {}", config.level);

        Ok(())
    }

    /// Initialize with default configuration
    pub fn init_default() -> std::result::Result<(), Box<dyn std::error::Error>> {
        Self::init(LoggerConfig::default())
    }
}
