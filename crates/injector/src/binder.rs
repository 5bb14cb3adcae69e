//! Install-time adapters: [`EnvBinder`] writes into one environment and
//! [`PrivateEnvBinder`] adds exposure tracking for a private module's environment.

use crate::config::InjectorConfig;
use crate::environment::{EnvId, Entry, Environment, Source};
use crate::error::InjectorError;
use bindery_core::{Binder, BindingTarget, ConstantValue, Key, Module, PrivateBinder, Qualifier, Scope};
use std::collections::hash_map::Entry as Slot;
use tracing::{debug, trace, warn};

pub(crate) struct EnvBinder<'a> {
    envs: &'a mut Vec<Environment>,
    env: EnvId,
    config: &'a InjectorConfig,
}

impl<'a> EnvBinder<'a> {
    pub(crate) const fn new(envs: &'a mut Vec<Environment>, env: EnvId, config: &'a InjectorConfig) -> Self {
        Self { envs, env, config }
    }

    fn insert(&mut self, key: Key, entry: Entry) -> Result<(), InjectorError> {
        let allow_overrides = self.config.allow_overrides;
        let env = self.env;
        match self.envs[env].entries.entry(key) {
            Slot::Vacant(slot) => {
                trace!(env, key = %slot.key(), kind = entry.kind(), "Registered binding");
                slot.insert(entry);
                Ok(())
            },
            Slot::Occupied(mut slot) if allow_overrides => {
                warn!(env, key = %slot.key(), "Overriding existing binding");
                slot.insert(entry);
                Ok(())
            },
            Slot::Occupied(slot) => Err(InjectorError::DuplicateBinding {
                message: format!("{} is already bound in environment {env}", slot.key()).into(),
                context: None,
            }),
        }
    }

    fn install_private(&mut self, module: bindery_core::PrivateModule) -> Result<(), InjectorError> {
        let child = self.envs.len();
        self.envs.push(Environment::child_of(self.env));
        debug!(parent = self.env, env = child, "Installing private module");

        let mut binder = PrivateEnvBinder {
            inner: EnvBinder::new(self.envs, child, self.config),
            exposed: Vec::new(),
        };
        module.configure(&mut binder)?;
        let exposed = binder.exposed;

        for key in exposed {
            if !self.envs[child].entries.contains_key(&key) {
                return Err(InjectorError::UnboundExposure {
                    message: format!("{key} is exposed but not bound in environment {child}").into(),
                    context: None,
                });
            }
            self.insert(key, Entry::Exposed(child))?;
        }
        Ok(())
    }
}

impl Binder for EnvBinder<'_> {
    type Error = InjectorError;

    fn bind_type(&mut self, key: Key, target: BindingTarget) -> Result<(), Self::Error> {
        let entry = match target {
            BindingTarget::Implementation(implementation) => Entry::provider(Source::Implementation(implementation)),
            BindingTarget::Instance(instance) => Entry::Instance(instance),
            BindingTarget::Linked(target) => Entry::provider(Source::Linked(target)),
        };
        self.insert(key, entry)
    }

    fn scope(&mut self, key: &Key, scope: Scope) -> Result<(), Self::Error> {
        match self.envs[self.env].entries.get_mut(key) {
            Some(Entry::Provider { scope: current, .. }) => {
                *current = scope;
                Ok(())
            },
            _ => Err(InjectorError::InvalidBinding {
                message: format!("{key} has no implementation or linked binding to scope").into(),
                context: None,
            }),
        }
    }

    fn bind_constant(
        &mut self,
        qualifier: Option<Qualifier>,
        value: ConstantValue,
    ) -> Result<(), Self::Error> {
        let Some(qualifier) = qualifier else {
            return Err(InjectorError::InvalidBinding {
                message: format!("{} constant has no qualifier", value.kind()).into(),
                context: None,
            });
        };
        let key = Key::new(value.type_ref(), Some(qualifier));
        self.insert(key, Entry::Instance(value.into_instance()))
    }

    fn install(&mut self, module: Module) -> Result<(), Self::Error> {
        match module {
            Module::Public(module) => {
                debug!(env = self.env, "Installing public module");
                module.configure(self)
            },
            Module::Private(module) => self.install_private(module),
        }
    }
}

/// Binder for a private module; remembers which keys to expose once it is configured.
pub(crate) struct PrivateEnvBinder<'a> {
    inner: EnvBinder<'a>,
    exposed: Vec<Key>,
}

impl Binder for PrivateEnvBinder<'_> {
    type Error = InjectorError;

    fn bind_type(&mut self, key: Key, target: BindingTarget) -> Result<(), Self::Error> {
        self.inner.bind_type(key, target)
    }

    fn scope(&mut self, key: &Key, scope: Scope) -> Result<(), Self::Error> {
        self.inner.scope(key, scope)
    }

    fn bind_constant(
        &mut self,
        qualifier: Option<Qualifier>,
        value: ConstantValue,
    ) -> Result<(), Self::Error> {
        self.inner.bind_constant(qualifier, value)
    }

    fn install(&mut self, module: Module) -> Result<(), Self::Error> {
        self.inner.install(module)
    }
}

impl PrivateBinder for PrivateEnvBinder<'_> {
    fn expose(&mut self, key: Key) -> Result<(), Self::Error> {
        trace!(env = self.inner.env, %key, "Exposing key");
        self.exposed.push(key);
        Ok(())
    }
}
