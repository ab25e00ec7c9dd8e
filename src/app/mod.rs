//! Application container module
//!
//! The application is the lazily built service container that resolves
//! handlers the file locator does not know about. It is only usable after
//! its kernel has been bootstrapped once.

mod container;
mod kernel;

pub use container::{ServiceContainer, ServiceProvider};
pub use kernel::ConsoleKernel;

use crate::error::{KernelError, Result};
use crate::handler::HandlerSource;

/// Service container of the hosted application
pub trait Application: HandlerSource {
    /// Resolve the framework kernel bound to this application
    fn kernel(&mut self) -> Result<Box<dyn Kernel + '_>>;
}

/// One-time framework initialization
pub trait Kernel {
    fn bootstrap(&mut self) -> Result<(), KernelError>;
}
