//! File-based handler lookup
//!
//! Identifiers are paths relative to the task root. A file that exists there
//! is a handler; its contents are a TOML `HandlerDefinition`.

use crate::error::{ResolveError, Result};
use crate::handler::{DefinitionHandler, HandlerDefinition, HandlerSource, SharedHandler};
use crate::logger;
use std::path::PathBuf;
use std::sync::Arc;

/// Resolves handler identifiers that name files below the task root
#[derive(Debug, Clone)]
pub struct FileHandlerLocator {
    root: PathBuf,
}

impl FileHandlerLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute ids are taken relative to the root; nothing outside the
    /// root's canonical path is ever a candidate
    fn candidate(&self, id: &str) -> Option<PathBuf> {
        let relative = id.trim_start_matches('/');
        if relative.is_empty() {
            return None;
        }

        let root = self.root.canonicalize().ok()?;
        let path = self.root.join(relative).canonicalize().ok()?;
        if !path.starts_with(&root) {
            logger::log_warning(&format!(
                "Handler id escapes the task root: {id} -> {}",
                path.display()
            ));
            return None;
        }
        path.is_file().then_some(path)
    }

    fn load(path: PathBuf) -> Result<SharedHandler> {
        let source = std::fs::read_to_string(&path).map_err(|source| ResolveError::ReadHandler {
            path: path.clone(),
            source,
        })?;
        let definition = HandlerDefinition::from_toml(&source)
            .map_err(|source| ResolveError::InvalidHandler { path, source })?;
        Ok(Arc::new(DefinitionHandler::new(definition)))
    }
}

impl HandlerSource for FileHandlerLocator {
    fn has(&self, id: &str) -> Result<bool> {
        Ok(self.candidate(id).is_some())
    }

    fn get(&self, id: &str) -> Result<SharedHandler> {
        let path = self
            .candidate(id)
            .ok_or_else(|| ResolveError::not_found(id))?;
        Self::load(path)
    }
}
