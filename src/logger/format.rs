//! Resolution log format module
//!
//! Supports multiple log formats:
//! - `text` (single human-readable line)
//! - `json` (JSON structured logging)
//! - Custom patterns with variables

use chrono::Local;
use serde_json::json;
use std::fmt;

/// Which lookup path answered an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    File,
    Special,
    Container,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Special => write!(f, "special"),
            Self::Container => write!(f, "container"),
        }
    }
}

/// Lookup outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Hit,
    Miss,
    Error,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit => write!(f, "hit"),
            Self::Miss => write!(f, "miss"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Resolution log entry containing one `has`/`get` lookup
#[derive(Debug, Clone)]
pub struct ResolutionLogEntry {
    /// Lookup timestamp
    pub time: chrono::DateTime<Local>,
    /// `has` or `get`
    pub operation: &'static str,
    /// Requested identifier
    pub id: String,
    /// Source that answered, if any
    pub source: Option<ResolutionSource>,
    pub outcome: Outcome,
    /// Lookup time in microseconds, bootstrap included
    pub elapsed_us: u64,
}

impl ResolutionLogEntry {
    /// Create a new entry with current timestamp
    pub fn new(operation: &'static str, id: &str) -> Self {
        Self {
            time: Local::now(),
            operation,
            id: id.to_string(),
            source: None,
            outcome: Outcome::Miss,
            elapsed_us: 0,
        }
    }

    /// Format the log entry according to the specified format
    pub fn format(&self, format: &str) -> String {
        match format {
            "text" => self.format_text(),
            "json" => self.format_json(),
            custom => self.format_custom(custom),
        }
    }

    fn source_label(&self) -> String {
        self.source
            .map_or_else(|| "-".to_string(), |s| s.to_string())
    }

    /// `[Resolve] $operation $id -> $source ($outcome) ${elapsed_us}us`
    fn format_text(&self) -> String {
        format!(
            "[Resolve] {} {} -> {} ({}) {}us",
            self.operation,
            self.id,
            self.source_label(),
            self.outcome,
            self.elapsed_us,
        )
    }

    /// JSON structured log format
    fn format_json(&self) -> String {
        json!({
            "time": self.time.to_rfc3339(),
            "operation": self.operation,
            "id": self.id,
            "source": self.source.map(|s| s.to_string()),
            "outcome": self.outcome.to_string(),
            "elapsed_us": self.elapsed_us,
        })
        .to_string()
    }

    /// Custom format with variable substitution
    ///
    /// Supported variables:
    /// - `$time_local` - Local time in Common Log Format
    /// - `$time_iso8601` - ISO 8601 timestamp
    /// - `$operation` - `has` or `get`
    /// - `$id` - Requested identifier
    /// - `$source` - `file`, `special`, `container` or `-`
    /// - `$outcome` - `hit`, `miss` or `error`
    /// - `$elapsed_us` - Lookup time in microseconds
    /// - `$elapsed` - Lookup time in seconds (3 decimal places)
    fn format_custom(&self, pattern: &str) -> String {
        let mut result = pattern.to_string();

        result = result.replace(
            "$time_local",
            &self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string(),
        );
        result = result.replace("$time_iso8601", &self.time.to_rfc3339());
        result = result.replace("$operation", self.operation);
        // $elapsed_us must come before $elapsed
        result = result.replace("$elapsed_us", &self.elapsed_us.to_string());
        #[allow(clippy::cast_precision_loss)]
        let elapsed = self.elapsed_us as f64 / 1_000_000.0;
        result = result.replace("$elapsed", &format!("{elapsed:.3}"));
        result = result.replace("$outcome", &self.outcome.to_string());
        result = result.replace("$source", &self.source_label());
        // Identifier last so its content is never substituted
        result = result.replace("$id", &self.id);

        result
    }
}
