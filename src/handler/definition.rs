//! Declarative handlers
//!
//! Handler files on disk and `[services]` entries of a bootstrap manifest
//! both describe handlers with the same TOML shape.

use super::{Handler, InvocationContext};
use crate::error::HandlerError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Handler definition types
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HandlerDefinition {
    /// Always answer with a fixed payload
    Static { response: Value },
    /// Answer with the incoming event and invocation metadata
    Echo,
}

impl HandlerDefinition {
    /// Parse a definition from TOML text
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }
}

/// Handler backed by a `HandlerDefinition`
#[derive(Debug, Clone)]
pub struct DefinitionHandler {
    definition: HandlerDefinition,
}

impl DefinitionHandler {
    pub const fn new(definition: HandlerDefinition) -> Self {
        Self { definition }
    }
}

impl Handler for DefinitionHandler {
    fn handle(&self, event: Value, context: &InvocationContext) -> Result<Value, HandlerError> {
        match &self.definition {
            HandlerDefinition::Static { response } => Ok(response.clone()),
            HandlerDefinition::Echo => Ok(json!({
                "handler": context.handler,
                "request_id": context.request_id,
                "event": event,
            })),
        }
    }
}
