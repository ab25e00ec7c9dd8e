//! Logger module
//!
//! Provides logging utilities for the resolver including:
//! - Startup logging
//! - Bootstrap lifecycle logging
//! - Per-lookup resolution logging (debug level) in several formats
//! - File-based logging support

mod format;
pub mod writer;

pub use format::{Outcome, ResolutionLogEntry, ResolutionSource};

use crate::config::{Config, LoggingConfig};
use crate::error::ResolveError;
use std::error::Error;
use std::path::Path;
use std::time::Duration;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &LoggingConfig) -> std::io::Result<()> {
    writer::init(
        config.log_file.as_deref(),
        config.error_log_file.as_deref(),
        &config.format,
        config.is_debug(),
    )
}

/// Write to info log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_resolver_ready(config: &Config) {
    write_info(&format!(
        "[Resolver] Task root: {}",
        config.task_root.display()
    ));
    write_info(&format!(
        "[Resolver] Special handler: {}",
        config.special_handler
    ));
    write_info(&format!(
        "[Resolver] Bootstrap file: {} (install depth {})",
        config.bootstrap.relative_path.display(),
        config.bootstrap.install_depth
    ));
    write_info(&format!("[Resolver] Log level: {}", config.logging.level));
}

pub fn log_bootstrap_started(path: &Path) {
    write_info(&format!("[Bootstrap] Loading application from {}", path.display()));
}

pub fn log_kernel_booted(base_path: &Path) {
    write_info(&format!("[Bootstrap] Kernel booted for {}", base_path.display()));
}

pub fn log_bootstrap_completed(path: &Path, elapsed: Duration) {
    write_info(&format!(
        "[Bootstrap] ✓ Application ready from {} in {}ms",
        path.display(),
        elapsed.as_millis()
    ));
}

pub fn log_bootstrap_failed(err: &ResolveError) {
    write_error(&format!("[Bootstrap] ✗ {err}"));
    let mut source = err.source();
    while let Some(cause) = source {
        write_error(&format!("            caused by: {cause}"));
        source = cause.source();
    }
}

/// Log a lookup; only emitted at debug level
pub fn log_resolution(entry: &ResolutionLogEntry) {
    if let Some(w) = writer::get().filter(|w| w.debug()) {
        w.write_info(&entry.format(w.format()));
    }
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}
