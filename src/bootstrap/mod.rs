//! Bootstrap module
//!
//! Locates the application's bootstrap file and turns it into a ready
//! `Application`:
//! - `search`: ordered candidate paths probed through a `FileSystem`
//! - `loader`: the `BootstrapLoader` seam
//! - `manifest`: TOML bootstrap manifests dispatched to registered factories

mod loader;
mod manifest;
mod search;

pub use loader::BootstrapLoader;
pub use manifest::{
    ApplicationFactory, ApplicationSection, BootstrapContext, BootstrapManifest, FactoryRegistry,
    ManifestLoader, ManifestServiceProvider, MANIFEST_FACTORY,
};
pub use search::{FileSystem, OsFileSystem, SearchPolicy};
