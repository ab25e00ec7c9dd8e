// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Directory file-backed handler identifiers are relative to
    pub task_root: PathBuf,
    /// Identifier reserved for the keep-warm handler
    pub special_handler: String,
    pub bootstrap: BootstrapConfig,
    pub logging: LoggingConfig,
}

/// Bootstrap file search configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    /// Bootstrap file, relative to an application root
    pub relative_path: PathBuf,
    /// Where the executable is installed; defaults to its directory
    #[serde(default)]
    pub install_dir: Option<PathBuf>,
    /// Levels from `install_dir` up to the application root
    pub install_depth: usize,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// `text`, `json`, or a custom `$variable` pattern
    pub format: String,
    #[serde(default)]
    pub log_file: Option<String>,
    #[serde(default)]
    pub error_log_file: Option<String>,
}

impl LoggingConfig {
    pub fn is_debug(&self) -> bool {
        self.level.eq_ignore_ascii_case("debug") || self.level.eq_ignore_ascii_case("trace")
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            log_file: None,
            error_log_file: None,
        }
    }
}
