//! Handler module
//!
//! Defines what a resolved handler is and the two-method lookup capability
//! (`HandlerSource`) shared by the file locator, the application container
//! and the resolver itself.

pub mod definition;
pub mod warmup;

pub use definition::{DefinitionHandler, HandlerDefinition};
pub use warmup::{WarmupHandler, WARMUP_HANDLER_ID};

use crate::error::{HandlerError, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// An invocable unit the runtime dispatches events to
pub trait Handler: Send + Sync + fmt::Debug {
    fn handle(&self, event: Value, context: &InvocationContext) -> Result<Value, HandlerError>;
}

/// Handler instance as handed out by a `HandlerSource`
pub type SharedHandler = Arc<dyn Handler>;

/// Key-to-handler lookup
///
/// `has` answers `Ok(false)` for identifiers that are merely unknown; an
/// `Err` means the source itself could not be consulted.
pub trait HandlerSource {
    fn has(&self, id: &str) -> Result<bool>;

    fn get(&self, id: &str) -> Result<SharedHandler>;
}

/// Per-invocation metadata passed to handlers
#[derive(Debug, Clone)]
pub struct InvocationContext {
    pub request_id: String,
    /// Identifier the handler was resolved from
    pub handler: String,
    pub received_at: DateTime<Utc>,
}

impl InvocationContext {
    pub fn new(request_id: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            handler: handler.into(),
            received_at: Utc::now(),
        }
    }
}
