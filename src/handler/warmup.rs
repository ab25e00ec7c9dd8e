//! Keep-warm handler
//!
//! Pre-built handler that is never managed by the application container. The
//! resolver constructs a new instance for every lookup of its identifier.

use super::{Handler, InvocationContext};
use crate::error::HandlerError;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

/// Default reserved identifier
pub const WARMUP_HANDLER_ID: &str = "warmup";

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Answers scheduler pings that keep an execution environment warm
#[derive(Debug)]
pub struct WarmupHandler {
    instance: u64,
}

impl WarmupHandler {
    pub fn new() -> Self {
        Self {
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub const fn instance(&self) -> u64 {
        self.instance
    }
}

impl Default for WarmupHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if an event is a keep-warm ping (`{"warmer": true}`)
pub fn is_warmup_event(event: &Value) -> bool {
    event.get("warmer").and_then(Value::as_bool).unwrap_or(false)
}

impl Handler for WarmupHandler {
    fn handle(&self, event: Value, context: &InvocationContext) -> Result<Value, HandlerError> {
        if !is_warmup_event(&event) {
            return Err(HandlerError::UnsupportedEvent(format!(
                "`{}` only answers warmer events",
                context.handler
            )));
        }
        Ok(json!({
            "status": "warm",
            "instance": self.instance,
        }))
    }
}
