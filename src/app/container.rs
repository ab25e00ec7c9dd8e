use super::{Application, ConsoleKernel, Kernel};
use crate::error::{HandlerError, KernelError, ResolveError, Result};
use crate::handler::{HandlerSource, SharedHandler};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

type Factory = Box<dyn Fn(&ServiceContainer) -> Result<SharedHandler, HandlerError>>;

enum Binding {
    Instance(SharedHandler),
    Factory(Factory),
}

/// Registers bindings into a container during kernel bootstrap
pub trait ServiceProvider {
    fn name(&self) -> &str;

    fn register(&self, container: &mut ServiceContainer) -> Result<(), KernelError>;

    /// Runs after every provider has registered
    fn boot(&self, _container: &ServiceContainer) -> Result<(), KernelError> {
        Ok(())
    }
}

/// Default `Application` implementation
pub struct ServiceContainer {
    base_path: PathBuf,
    settings: toml::Table,
    config: config::Config,
    bindings: HashMap<String, Binding>,
    providers: Vec<Box<dyn ServiceProvider>>,
    booted: bool,
}

impl ServiceContainer {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            settings: toml::Table::new(),
            config: config::Config::default(),
            bindings: HashMap::new(),
            providers: Vec::new(),
            booted: false,
        }
    }

    /// Application root the bootstrap file was found under
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Base settings, overridden by `config/app.toml` and `APP__*` at bootstrap
    #[must_use]
    pub fn with_settings(mut self, settings: toml::Table) -> Self {
        self.settings = settings;
        self
    }

    pub const fn settings(&self) -> &toml::Table {
        &self.settings
    }

    /// Configuration loaded by the kernel; empty before bootstrap
    pub const fn config(&self) -> &config::Config {
        &self.config
    }

    pub(super) fn set_config(&mut self, config: config::Config) {
        self.config = config;
    }

    pub const fn is_booted(&self) -> bool {
        self.booted
    }

    pub(super) fn mark_booted(&mut self) {
        self.booted = true;
    }

    /// Bind a handler built on every lookup
    pub fn bind<F>(&mut self, id: impl Into<String>, factory: F)
    where
        F: Fn(&Self) -> Result<SharedHandler, HandlerError> + 'static,
    {
        self.bindings
            .insert(id.into(), Binding::Factory(Box::new(factory)));
    }

    /// Bind an already built handler
    pub fn instance(&mut self, id: impl Into<String>, handler: SharedHandler) {
        self.bindings.insert(id.into(), Binding::Instance(handler));
    }

    pub fn register(&mut self, provider: impl ServiceProvider + 'static) {
        self.providers.push(Box::new(provider));
    }

    pub(super) fn take_providers(&mut self) -> Vec<Box<dyn ServiceProvider>> {
        std::mem::take(&mut self.providers)
    }

    /// Put providers back ahead of any registered while they were taken
    pub(super) fn restore_providers(&mut self, mut providers: Vec<Box<dyn ServiceProvider>>) {
        providers.append(&mut self.providers);
        self.providers = providers;
    }
}

impl fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&String> = self.bindings.keys().collect();
        ids.sort();
        f.debug_struct("ServiceContainer")
            .field("base_path", &self.base_path)
            .field("bindings", &ids)
            .field("providers", &self.providers.len())
            .field("booted", &self.booted)
            .finish()
    }
}

impl HandlerSource for ServiceContainer {
    fn has(&self, id: &str) -> Result<bool> {
        Ok(self.bindings.contains_key(id))
    }

    fn get(&self, id: &str) -> Result<SharedHandler> {
        match self.bindings.get(id) {
            Some(Binding::Instance(handler)) => Ok(handler.clone()),
            Some(Binding::Factory(factory)) => {
                factory(self).map_err(|source| ResolveError::Service {
                    id: id.to_string(),
                    source,
                })
            }
            None => Err(ResolveError::not_found(id)),
        }
    }
}

impl Application for ServiceContainer {
    fn kernel(&mut self) -> Result<Box<dyn Kernel + '_>> {
        Ok(Box::new(ConsoleKernel::new(self)))
    }
}
