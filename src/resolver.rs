//! Handler resolution
//!
//! Lookup order is fixed: file-backed handlers, then the reserved special
//! identifier, then the application container. The container is built on
//! first use and kept for the lifetime of the resolver.

use crate::app::Application;
use crate::bootstrap::{
    BootstrapLoader, FactoryRegistry, FileSystem, ManifestLoader, OsFileSystem, SearchPolicy,
};
use crate::config::Config;
use crate::error::{BootstrapError, Result};
use crate::handler::{HandlerSource, SharedHandler, WarmupHandler, WARMUP_HANDLER_ID};
use crate::locator::FileHandlerLocator;
use crate::logger::{self, Outcome, ResolutionLogEntry, ResolutionSource};
use std::cell::OnceCell;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Resolves handler identifiers for the serverless runtime
///
/// The application slot is a two-state cell: uninitialized until the first
/// lookup that reaches the container succeeds in bootstrapping, then ready
/// for good. Failed bootstraps leave it uninitialized, so the next lookup
/// runs the loader again.
pub struct HandlerResolver {
    files: Box<dyn HandlerSource>,
    loader: Box<dyn BootstrapLoader>,
    search: SearchPolicy,
    fs: Box<dyn FileSystem>,
    special_id: String,
    application: OnceCell<Box<dyn Application>>,
}

impl HandlerResolver {
    pub fn new(
        files: impl HandlerSource + 'static,
        loader: impl BootstrapLoader + 'static,
        search: SearchPolicy,
    ) -> Self {
        Self {
            files: Box::new(files),
            loader: Box::new(loader),
            search,
            fs: Box::new(OsFileSystem),
            special_id: WARMUP_HANDLER_ID.to_string(),
            application: OnceCell::new(),
        }
    }

    /// Resolver over `task_root` files and manifest bootstrap files
    ///
    /// Relative paths in the configuration are taken from `cwd`.
    pub fn from_config(config: &Config, registry: FactoryRegistry, cwd: &Path) -> Self {
        Self::new(
            FileHandlerLocator::new(cwd.join(&config.task_root)),
            ManifestLoader::new(registry),
            SearchPolicy::from_config(&config.bootstrap, cwd),
        )
        .with_special_id(config.special_handler.clone())
    }

    /// Probe bootstrap candidates through another filesystem
    #[must_use]
    pub fn with_filesystem(mut self, fs: impl FileSystem + 'static) -> Self {
        self.fs = Box::new(fs);
        self
    }

    /// Reserve a different identifier for the special handler
    #[must_use]
    pub fn with_special_id(mut self, id: impl Into<String>) -> Self {
        self.special_id = id.into();
        self
    }

    pub fn special_id(&self) -> &str {
        &self.special_id
    }

    /// Whether the application has been bootstrapped
    pub fn is_bootstrapped(&self) -> bool {
        self.application.get().is_some()
    }

    /// The application, bootstrapping it on first use
    ///
    /// A kernel bootstrap failure leaves nothing cached; the next call starts over.
    pub fn application(&self) -> Result<&dyn Application> {
        if let Some(app) = self.application.get() {
            return Ok(app.as_ref());
        }

        let app = self.bootstrap().inspect_err(logger::log_bootstrap_failed)?;
        Ok(self.application.get_or_init(|| app).as_ref())
    }

    /// Locate, load and kernel-bootstrap a new application
    fn bootstrap(&self) -> Result<Box<dyn Application>> {
        let path = self.search.locate(self.fs.as_ref())?;
        logger::log_bootstrap_started(&path);
        let started = Instant::now();

        let mut app = self.loader.load(&path)?;
        app.kernel()?
            .bootstrap()
            .map_err(|source| BootstrapError::Kernel {
                path: path.clone(),
                source,
            })?;

        logger::log_bootstrap_completed(&path, started.elapsed());
        Ok(app)
    }

    fn source_of(&self, id: &str) -> Result<Option<ResolutionSource>> {
        if self.files.has(id)? {
            return Ok(Some(ResolutionSource::File));
        }
        if id == self.special_id {
            return Ok(Some(ResolutionSource::Special));
        }
        if self.application()?.has(id)? {
            return Ok(Some(ResolutionSource::Container));
        }
        Ok(None)
    }

    fn resolve(&self, id: &str) -> Result<(ResolutionSource, SharedHandler)> {
        // File handlers win even when a container service shares the name
        if self.files.has(id)? {
            return Ok((ResolutionSource::File, self.files.get(id)?));
        }

        // The special handler is not created by the container
        if id == self.special_id {
            let handler: SharedHandler = Arc::new(WarmupHandler::new());
            return Ok((ResolutionSource::Special, handler));
        }

        Ok((ResolutionSource::Container, self.application()?.get(id)?))
    }
}

impl HandlerSource for HandlerResolver {
    fn has(&self, id: &str) -> Result<bool> {
        let started = Instant::now();
        let mut entry = ResolutionLogEntry::new("has", id);
        let result = self.source_of(id);
        match &result {
            Ok(Some(source)) => {
                entry.source = Some(*source);
                entry.outcome = Outcome::Hit;
            }
            Ok(None) => entry.outcome = Outcome::Miss,
            Err(_) => entry.outcome = Outcome::Error,
        }
        entry.elapsed_us = elapsed_us(started);
        logger::log_resolution(&entry);
        result.map(|source| source.is_some())
    }

    fn get(&self, id: &str) -> Result<SharedHandler> {
        let started = Instant::now();
        let mut entry = ResolutionLogEntry::new("get", id);
        let result = self.resolve(id);
        match &result {
            Ok((source, _)) => {
                entry.source = Some(*source);
                entry.outcome = Outcome::Hit;
            }
            Err(e) if e.is_not_found() => entry.outcome = Outcome::Miss,
            Err(_) => entry.outcome = Outcome::Error,
        }
        entry.elapsed_us = elapsed_us(started);
        logger::log_resolution(&entry);
        result.map(|(_, handler)| handler)
    }
}

impl fmt::Debug for HandlerResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerResolver")
            .field("search", &self.search)
            .field("special_id", &self.special_id)
            .field("bootstrapped", &self.is_bootstrapped())
            .finish_non_exhaustive()
    }
}

fn elapsed_us(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX)
}
