//! # Modules
//!
//! [`ModuleBuilder`] accumulates declarations and nested modules, then drains them once
//! into an installable [`Module`]. A builder with at least one exposure produces a
//! [`PrivateModule`]; otherwise it produces a [`PublicModule`].

use crate::binder::{Binder, PrivateBinder};
use crate::chain::{BindingBuilder, ConstantBuilder, ExposureBuilder, Injection, Qualified, Unqualified};
use crate::declaration::{Binding, ConstantBinding, ExposedBinding, Exposure, TypeBinding, TypeExposing};
use crate::key::Key;
use std::any::Any;
use std::mem;
use tracing::{debug, trace};

/// Parent of a free-standing [`ModuleBuilder`] created with [`ModuleBuilder::new`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Detached;

/// Anything that collects built modules.
pub trait ModuleContainer: Sized {
    /// Enqueues an already built module.
    #[must_use]
    fn add_module(self, module: Module) -> Self;

    /// Starts a nested builder whose `inject()` builds it into this container.
    fn module(self) -> ModuleBuilder<Self> {
        ModuleBuilder::with_parent(self)
    }
}

/// Accumulates pending exposures, bindings and nested modules.
///
/// `P` is the value `inject()` returns to once the module is built.
#[derive(Debug)]
pub struct ModuleBuilder<P = Detached> {
    parent: P,
    exposures: Vec<Exposure>,
    bindings: Vec<Binding>,
    modules: Vec<Module>,
}

impl ModuleBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self::with_parent(Detached)
    }
}

impl Default for ModuleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> ModuleBuilder<P> {
    pub(crate) const fn with_parent(parent: P) -> Self {
        Self { parent, exposures: Vec::new(), bindings: Vec::new(), modules: Vec::new() }
    }

    /// Starts a type binding for `T`.
    pub fn bind<T: ?Sized + Send + Sync + 'static>(self) -> BindingBuilder<T, P> {
        BindingBuilder::new(self, TypeBinding::of::<T>())
    }

    /// Starts a type binding of an existing key, qualifier included.
    ///
    /// `key` must be a key of `T`; a mismatch is reported when the module is installed.
    pub fn bind_key<T: ?Sized + Send + Sync + 'static>(self, key: Key) -> BindingBuilder<T, P, Qualified> {
        BindingBuilder::keyed(self, TypeBinding::for_key(key))
    }

    /// Starts a constant binding.
    pub fn bind_constant(self) -> ConstantBuilder<P> {
        ConstantBuilder::new(self, ConstantBinding::new())
    }

    /// Starts an exposure of `T`; makes the module private.
    pub fn expose<T: ?Sized + 'static>(self) -> ExposureBuilder<T, P> {
        ExposureBuilder::new(self, TypeExposing::of::<T>())
    }

    /// Starts an exposure of an existing key; makes the module private.
    pub fn expose_key(self, key: Key) -> ExposureBuilder<dyn Any, P, Qualified> {
        ExposureBuilder::keyed(self, TypeExposing::for_key(key))
    }

    /// Starts a binding of `T` that is exposed under the same key; makes the module private.
    pub fn expose_and_bind<T: ?Sized + Send + Sync + 'static>(
        self,
    ) -> BindingBuilder<T, P, Unqualified, ExposedBinding> {
        BindingBuilder::new(self, ExposedBinding::of::<T>())
    }

    /// Keyed variant of [`ModuleBuilder::expose_and_bind`].
    pub fn expose_and_bind_key<T: ?Sized + Send + Sync + 'static>(
        self,
        key: Key,
    ) -> BindingBuilder<T, P, Qualified, ExposedBinding> {
        BindingBuilder::keyed(self, ExposedBinding::for_key(key))
    }

    /// Enqueues a binding declaration directly.
    #[must_use]
    pub fn add_binding(mut self, binding: impl Into<Binding>) -> Self {
        let binding = binding.into();
        trace!(?binding, "Enqueued binding");
        self.bindings.push(binding);
        self
    }

    /// Enqueues an exposure declaration directly.
    #[must_use]
    pub fn add_exposure(mut self, exposure: impl Into<Exposure>) -> Self {
        let exposure = exposure.into();
        trace!(?exposure, "Enqueued exposure");
        self.exposures.push(exposure);
        self
    }

    /// Drains every pending list into a [`Module`].
    ///
    /// The lists are left empty, so building again without new declarations yields an
    /// empty module.
    pub fn build(&mut self) -> Module {
        let exposures = mem::take(&mut self.exposures);
        let bindings = mem::take(&mut self.bindings);
        let modules = mem::take(&mut self.modules);

        debug!(
            exposures = exposures.len(),
            bindings = bindings.len(),
            modules = modules.len(),
            "Built module"
        );

        if exposures.is_empty() {
            Module::Public(PublicModule { bindings, modules })
        } else {
            Module::Private(PrivateModule { exposures, bindings, modules })
        }
    }
}

impl<P> ModuleContainer for ModuleBuilder<P> {
    fn add_module(mut self, module: Module) -> Self {
        self.modules.push(module);
        self
    }
}

impl<P: ModuleContainer> Injection<P> for ModuleBuilder<P> {
    fn inject(mut self) -> P {
        let module = self.build();
        self.parent.add_module(module)
    }
}

/// A built, installable configuration unit.
#[derive(Debug)]
pub enum Module {
    Public(PublicModule),
    Private(PrivateModule),
}

impl Module {
    #[must_use]
    pub const fn is_private(&self) -> bool {
        matches!(self, Self::Private(_))
    }

    /// `true` when installing the module has no effect.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Public(m) => m.bindings.is_empty() && m.modules.is_empty(),
            Self::Private(m) => m.exposures.is_empty() && m.bindings.is_empty() && m.modules.is_empty(),
        }
    }
}

/// A module whose bindings land in the environment it is installed into.
#[derive(Debug, Default)]
pub struct PublicModule {
    bindings: Vec<Binding>,
    modules: Vec<Module>,
}

impl PublicModule {
    /// Applies every binding in order, then installs every nested module.
    ///
    /// # Errors
    /// Stops at the first failing declaration or binder call.
    pub fn configure<B: Binder + ?Sized>(self, binder: &mut B) -> Result<(), B::Error> {
        for binding in self.bindings {
            binding.apply(binder)?;
        }
        for module in self.modules {
            binder.install(module)?;
        }
        Ok(())
    }
}

/// A module with its own environment; only exposed keys are visible outside it.
#[derive(Debug)]
pub struct PrivateModule {
    exposures: Vec<Exposure>,
    bindings: Vec<Binding>,
    modules: Vec<Module>,
}

impl PrivateModule {
    /// Applies every exposure, then every binding, then installs every nested module,
    /// all on the same private binder.
    ///
    /// # Errors
    /// Stops at the first failing declaration or binder call.
    pub fn configure<B: PrivateBinder + ?Sized>(self, binder: &mut B) -> Result<(), B::Error> {
        for exposure in self.exposures {
            exposure.apply(binder)?;
        }
        for binding in self.bindings {
            binding.apply(binder)?;
        }
        for module in self.modules {
            binder.install(module)?;
        }
        Ok(())
    }
}
