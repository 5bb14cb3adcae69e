use crate::binder::EnvBinder;
use crate::config::{InjectorConfig, Stage};
use crate::environment::{Environment, ROOT};
use crate::error::{InjectorError, InjectorErrorExt};
use crate::injector::Injector;
use bindery_core::{Binder, Module, ModuleContainer};
use std::mem;
use tracing::{debug, info};

/// Collects modules and assembles them into an [`Injector`].
///
/// Modules are added with [`ModuleContainer::module`] chains or
/// [`ModuleContainer::add_module`], and installed in the order they were added.
#[derive(Debug, Default)]
pub struct InjectorBuilder {
    modules: Vec<Module>,
    config: InjectorConfig,
}

impl InjectorBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    #[must_use]
    pub fn config(mut self, config: InjectorConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub const fn stage(mut self, stage: Stage) -> Self {
        self.config.stage = stage;
        self
    }

    #[must_use]
    pub const fn allow_overrides(mut self, allow: bool) -> Self {
        self.config.allow_overrides = allow;
        self
    }

    /// Installs every pending module and builds eager singletons.
    ///
    /// Pending modules are drained, so a second call without new modules produces an
    /// empty injector.
    ///
    /// # Errors
    /// * [`InjectorError::Declaration`] when a declaration fails its checks.
    /// * [`InjectorError::DuplicateBinding`], [`InjectorError::UnboundExposure`] or
    ///   [`InjectorError::InvalidBinding`] when the modules conflict.
    /// * [`InjectorError::Resolve`] when an eager singleton cannot be built.
    pub fn build(&mut self) -> Result<Injector, InjectorError> {
        let modules = mem::take(&mut self.modules);
        let mut envs = vec![Environment::default()];

        debug!(modules = modules.len(), stage = ?self.config.stage, "Assembling injector");
        {
            let mut root = EnvBinder::new(&mut envs, ROOT, &self.config);
            for module in modules {
                root.install(module)?;
            }
        }

        let bindings: usize = envs.iter().map(|env| env.entries.len()).sum();
        let environments = envs.len();
        let injector = Injector::new(envs, self.config.clone());
        let eager = injector.create_eager_singletons().context("Creating eager singletons")?;

        info!(environments, bindings, eager, "Injector created");
        Ok(injector)
    }
}

impl ModuleContainer for InjectorBuilder {
    fn add_module(mut self, module: Module) -> Self {
        self.modules.push(module);
        self
    }
}
