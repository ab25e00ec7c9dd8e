// Configuration module entry point
// Loads resolver configuration from file, environment and defaults

mod types;

pub use types::{BootstrapConfig, Config, LoggingConfig};

use crate::handler::WARMUP_HANDLER_ID;

/// Default config file, without extension
pub const DEFAULT_CONFIG_PATH: &str = "resolver";

impl Config {
    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("RESOLVER").separator("__"))
            .set_default("task_root", ".")?
            .set_default("special_handler", WARMUP_HANDLER_ID)?
            .set_default("bootstrap.relative_path", "bootstrap/app.toml")?
            .set_default("bootstrap.install_depth", 1)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "text")?
            .build()?;

        settings.try_deserialize()
    }
}
