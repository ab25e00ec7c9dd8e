use super::BootstrapLoader;
use crate::app::{Application, ServiceContainer, ServiceProvider};
use crate::error::{BootstrapError, KernelError};
use crate::handler::{DefinitionHandler, HandlerDefinition};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Factory that builds a container from `[services]` in the manifest
pub const MANIFEST_FACTORY: &str = "manifest";

/// Bootstrap manifest (`bootstrap/app.toml`)
///
/// ```toml
/// [application]
/// factory = "manifest"
///
/// [config]
/// name = "orders"
///
/// [services."App\\Handler"]
/// type = "echo"
/// ```
#[derive(Debug, Deserialize, Clone)]
pub struct BootstrapManifest {
    pub application: ApplicationSection,
    /// Base settings handed to the application configuration
    #[serde(default)]
    pub config: toml::Table,
    /// Handlers bound by the built-in manifest factory
    #[serde(default)]
    pub services: BTreeMap<String, HandlerDefinition>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationSection {
    /// Name of a factory in the `FactoryRegistry`
    pub factory: String,
    /// Application root, relative to the manifest's directory
    #[serde(default)]
    pub base_path: Option<PathBuf>,
}

impl BootstrapManifest {
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }
}

/// What a factory gets to build the application from
#[derive(Debug)]
pub struct BootstrapContext<'a> {
    /// Canonical path of the bootstrap file
    pub path: &'a Path,
    pub base_path: PathBuf,
    pub manifest: &'a BootstrapManifest,
}

impl<'a> BootstrapContext<'a> {
    /// `bootstrap/app.toml` sits one directory below the application root
    /// unless the manifest says otherwise
    pub fn new(path: &'a Path, manifest: &'a BootstrapManifest) -> Self {
        let manifest_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let base_path = match &manifest.application.base_path {
            Some(base) => manifest_dir.join(base),
            None => manifest_dir
                .parent()
                .unwrap_or(manifest_dir)
                .to_path_buf(),
        };
        Self {
            path,
            base_path,
            manifest,
        }
    }
}

pub type ApplicationFactory =
    Box<dyn Fn(&BootstrapContext<'_>) -> Result<Box<dyn Application>, BootstrapError>>;

/// Application factories registered by the host at startup
#[derive(Default)]
pub struct FactoryRegistry {
    factories: HashMap<String, ApplicationFactory>,
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in `manifest` factory
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(MANIFEST_FACTORY, build_manifest_application);
        registry
    }

    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&BootstrapContext<'_>) -> Result<Box<dyn Application>, BootstrapError> + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn get(&self, name: &str) -> Option<&ApplicationFactory> {
        self.factories.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryRegistry")
            .field("factories", &self.names())
            .finish()
    }
}

#[allow(clippy::unnecessary_wraps)]
fn build_manifest_application(
    ctx: &BootstrapContext<'_>,
) -> Result<Box<dyn Application>, BootstrapError> {
    let mut container =
        ServiceContainer::new(ctx.base_path.clone()).with_settings(ctx.manifest.config.clone());
    container.register(ManifestServiceProvider::new(ctx.manifest.services.clone()));
    Ok(Box::new(container))
}

/// Binds manifest-declared handlers during kernel bootstrap
#[derive(Debug, Clone)]
pub struct ManifestServiceProvider {
    services: BTreeMap<String, HandlerDefinition>,
}

impl ManifestServiceProvider {
    pub const fn new(services: BTreeMap<String, HandlerDefinition>) -> Self {
        Self { services }
    }
}

impl ServiceProvider for ManifestServiceProvider {
    fn name(&self) -> &str {
        MANIFEST_FACTORY
    }

    fn register(&self, container: &mut ServiceContainer) -> Result<(), KernelError> {
        for (id, definition) in &self.services {
            container.instance(id.clone(), Arc::new(DefinitionHandler::new(definition.clone())));
        }
        Ok(())
    }
}

/// Loads TOML manifests and dispatches to a registered factory
#[derive(Debug, Default)]
pub struct ManifestLoader {
    registry: FactoryRegistry,
}

impl ManifestLoader {
    pub const fn new(registry: FactoryRegistry) -> Self {
        Self { registry }
    }
}

impl BootstrapLoader for ManifestLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn Application>, BootstrapError> {
        let source = std::fs::read_to_string(path).map_err(|source| BootstrapError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest =
            BootstrapManifest::from_toml(&source).map_err(|source| BootstrapError::Manifest {
                path: path.to_path_buf(),
                source,
            })?;

        let name = &manifest.application.factory;
        let factory = self
            .registry
            .get(name)
            .ok_or_else(|| BootstrapError::UnknownFactory {
                path: path.to_path_buf(),
                expected: "application",
                actual: name.clone(),
            })?;

        factory(&BootstrapContext::new(path, &manifest))
    }
}
