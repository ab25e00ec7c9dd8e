use super::{Kernel, ServiceContainer};
use crate::error::KernelError;
use crate::logger;

/// Kernel of a `ServiceContainer`
///
/// Bootstrapping loads configuration, then registers and boots every service
/// provider. A container is only bootstrapped once; later calls do nothing.
pub struct ConsoleKernel<'a> {
    app: &'a mut ServiceContainer,
}

impl<'a> ConsoleKernel<'a> {
    pub fn new(app: &'a mut ServiceContainer) -> Self {
        Self { app }
    }

    /// Layer `[config]` settings, `config/app.toml` and `APP__*` variables
    fn load_configuration(&mut self) -> Result<(), KernelError> {
        let settings = toml::to_string(self.app.settings())
            .map_err(|e| KernelError::Configuration(e.to_string()))?;
        let app_config = self.app.base_path().join("config").join("app");

        let config = config::Config::builder()
            .add_source(config::File::from_str(&settings, config::FileFormat::Toml))
            .add_source(config::File::with_name(&app_config.to_string_lossy()).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()
            .map_err(|e| KernelError::Configuration(e.to_string()))?;

        self.app.set_config(config);
        Ok(())
    }

    /// Providers added by another provider's `register` are registered too
    fn register_providers(&mut self) -> Result<(), KernelError> {
        let mut registered = Vec::new();
        loop {
            let pending = self.app.take_providers();
            if pending.is_empty() {
                break;
            }
            let result = pending
                .iter()
                .try_for_each(|provider| provider.register(self.app));
            registered.extend(pending);
            if let Err(e) = result {
                self.app.restore_providers(registered);
                return Err(e);
            }
        }
        self.app.restore_providers(registered);
        Ok(())
    }

    fn boot_providers(&mut self) -> Result<(), KernelError> {
        let providers = self.app.take_providers();
        let result = providers
            .iter()
            .try_for_each(|provider| provider.boot(self.app));
        self.app.restore_providers(providers);
        result
    }
}

impl Kernel for ConsoleKernel<'_> {
    fn bootstrap(&mut self) -> Result<(), KernelError> {
        if self.app.is_booted() {
            return Ok(());
        }

        self.load_configuration()?;
        self.register_providers()?;
        self.boot_providers()?;
        self.app.mark_booted();
        logger::log_kernel_booted(self.app.base_path());
        Ok(())
    }
}
