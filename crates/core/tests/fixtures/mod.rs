use bindery_core::prelude::*;
use std::sync::Arc;

/// One call observed by [`RecordingBinder`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Expose(Key),
    BindImplementation(Key),
    BindInstance(Key),
    Link(Key, Key),
    Scope(Key, Scope),
    Constant(Option<Qualifier>, ConstantValue),
    Install { private: bool },
}

#[derive(Debug)]
pub enum RecorderError {
    Declaration(DeclarationError),
    Rejected(&'static str),
}

impl From<DeclarationError> for RecorderError {
    fn from(err: DeclarationError) -> Self {
        Self::Declaration(err)
    }
}

/// A binder that records every call and configures nested modules into itself.
#[derive(Debug, Default)]
pub struct RecordingBinder {
    pub events: Vec<Event>,
    pub reject_constants: bool,
}

impl RecordingBinder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rejecting_constants() -> Self {
        Self { events: Vec::new(), reject_constants: true }
    }

    /// Installs `module` and returns the recorded events.
    /// # Panics
    /// * If installation fails.
    pub fn record(module: Module) -> Vec<Event> {
        let mut binder = Self::new();
        binder.configure(module).expect("Installation failed");
        binder.events
    }

    /// Configures `module` directly, without recording an install event.
    /// # Errors
    /// Any declaration or binder failure.
    pub fn configure(&mut self, module: Module) -> Result<(), RecorderError> {
        match module {
            Module::Public(module) => module.configure(self),
            Module::Private(module) => module.configure(self),
        }
    }
}

impl Binder for RecordingBinder {
    type Error = RecorderError;

    fn bind_type(&mut self, key: Key, target: BindingTarget) -> Result<(), Self::Error> {
        self.events.push(match target {
            BindingTarget::Implementation(_) => Event::BindImplementation(key),
            BindingTarget::Instance(_) => Event::BindInstance(key),
            BindingTarget::Linked(target) => Event::Link(key, target),
        });
        Ok(())
    }

    fn scope(&mut self, key: &Key, scope: Scope) -> Result<(), Self::Error> {
        self.events.push(Event::Scope(key.clone(), scope));
        Ok(())
    }

    fn bind_constant(
        &mut self,
        qualifier: Option<Qualifier>,
        value: ConstantValue,
    ) -> Result<(), Self::Error> {
        if self.reject_constants {
            return Err(RecorderError::Rejected("constants are not accepted"));
        }
        self.events.push(Event::Constant(qualifier, value));
        Ok(())
    }

    fn install(&mut self, module: Module) -> Result<(), Self::Error> {
        self.events.push(Event::Install { private: module.is_private() });
        self.configure(module)
    }
}

impl PrivateBinder for RecordingBinder {
    fn expose(&mut self, key: Key) -> Result<(), Self::Error> {
        self.events.push(Event::Expose(key));
        Ok(())
    }
}

pub trait Motor: Send + Sync {
    fn rpm(&self) -> u32;
}

#[derive(Debug, Injectable)]
pub struct Diesel;

impl Motor for Diesel {
    fn rpm(&self) -> u32 {
        1800
    }
}

implements!(Diesel => dyn Motor);

#[must_use]
pub fn motor_instance() -> Arc<dyn Motor> {
    Arc::new(Diesel)
}
