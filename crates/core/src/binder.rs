//! # Binding targets
//!
//! The capabilities a [`Module`] is installed into. A plain [`Binder`] accepts
//! bindings and nested modules; a [`PrivateBinder`] is a scope-bounded binder that can
//! additionally expose keys to its enclosing environment.

use crate::constant::ConstantValue;
use crate::error::DeclarationError;
use crate::key::{Key, Qualifier};
use crate::module::Module;
use crate::value::{Implementation, Instance, Scope};

/// What a type key is bound to.
#[derive(Debug)]
pub enum BindingTarget {
    Implementation(Implementation),
    Instance(Instance),
    /// Another key of the same type; resolving the bound key resolves this one.
    Linked(Key),
}

/// A target that accepts bindings.
///
/// Declaration failures are converted into [`Binder::Error`], so the target's own
/// errors and the declarations' errors travel through the same channel unchanged.
pub trait Binder {
    type Error: From<DeclarationError>;

    /// Binds `key` to an implementation, a prebuilt instance or another key.
    ///
    /// # Errors
    /// Target specific.
    fn bind_type(&mut self, key: Key, target: BindingTarget) -> Result<(), Self::Error>;

    /// Applies `scope` to the implementation or linked binding of `key`.
    ///
    /// # Errors
    /// Target specific.
    fn scope(&mut self, key: &Key, scope: Scope) -> Result<(), Self::Error>;

    /// Binds a constant under `qualifier`.
    ///
    /// # Errors
    /// Target specific.
    fn bind_constant(
        &mut self,
        qualifier: Option<Qualifier>,
        value: ConstantValue,
    ) -> Result<(), Self::Error>;

    /// Installs a nested module.
    ///
    /// # Errors
    /// Propagates failures from the module's declarations.
    fn install(&mut self, module: Module) -> Result<(), Self::Error>;
}

/// A scope-bounded target; everything bound inside stays private unless exposed.
pub trait PrivateBinder: Binder {
    /// Makes `key` visible to the enclosing environment.
    ///
    /// # Errors
    /// Target specific.
    fn expose(&mut self, key: Key) -> Result<(), Self::Error>;
}
