use crate::app::Application;
use crate::error::BootstrapError;
use std::path::Path;

/// Builds the application from a located bootstrap file
///
/// Implementations return a fresh, not yet bootstrapped application on each
/// call; the resolver takes care of running the kernel and caching.
pub trait BootstrapLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn Application>, BootstrapError>;
}

impl<F> BootstrapLoader for F
where
    F: Fn(&Path) -> Result<Box<dyn Application>, BootstrapError>,
{
    fn load(&self, path: &Path) -> Result<Box<dyn Application>, BootstrapError> {
        self(path)
    }
}
