//! Serverless handler resolution backed by an application container
//!
//! `HandlerResolver` answers `has`/`get` for handler identifiers by checking
//! file-backed handlers, then the reserved keep-warm handler, then the
//! application's service container, which is bootstrapped lazily from
//! `bootstrap/app.toml` the first time it is needed.

pub mod app;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod handler;
pub mod locator;
pub mod logger;
pub mod resolver;

pub use crate::config::Config;

pub use app::{Application, ConsoleKernel, Kernel, ServiceContainer, ServiceProvider};
pub use bootstrap::{BootstrapLoader, FactoryRegistry, FileSystem, ManifestLoader, SearchPolicy};
pub use error::{BootstrapError, HandlerError, KernelError, ResolveError, Result};
pub use handler::{Handler, HandlerSource, InvocationContext, SharedHandler};
pub use locator::FileHandlerLocator;
pub use resolver::HandlerResolver;
