//! # Declarations
//!
//! Deferred configuration commands. Each declaration is plain data until it is applied
//! to a [`Binder`]; all validation happens then.

mod annotated;
mod constant;
mod exposing;
mod type_binding;

pub use annotated::{Annotated, Declared};
pub use constant::ConstantBinding;
pub use exposing::{ExposedBinding, TypeExposing};
pub use type_binding::TypeBinding;

use crate::binder::{Binder, PrivateBinder};

/// A declaration applied in a module's binding phase.
#[derive(Debug)]
pub enum Binding {
    Type(TypeBinding),
    Constant(ConstantBinding),
}

impl Binding {
    /// # Errors
    /// Propagates the declaration's own checks and binder failures.
    pub fn apply<B: Binder + ?Sized>(self, binder: &mut B) -> Result<(), B::Error> {
        match self {
            Self::Type(binding) => binding.apply(binder),
            Self::Constant(binding) => binding.apply(binder),
        }
    }
}

impl From<TypeBinding> for Binding {
    fn from(binding: TypeBinding) -> Self {
        Self::Type(binding)
    }
}

impl From<ConstantBinding> for Binding {
    fn from(binding: ConstantBinding) -> Self {
        Self::Constant(binding)
    }
}

/// A declaration applied in a private module's exposure phase.
#[derive(Debug)]
pub enum Exposure {
    Type(TypeExposing),
    Bound(ExposedBinding),
}

impl Exposure {
    /// # Errors
    /// Propagates the declaration's own checks and binder failures.
    pub fn apply<B: PrivateBinder + ?Sized>(self, binder: &mut B) -> Result<(), B::Error> {
        match self {
            Self::Type(exposing) => exposing.apply(binder),
            Self::Bound(exposed) => exposed.apply(binder),
        }
    }
}

impl From<TypeExposing> for Exposure {
    fn from(exposing: TypeExposing) -> Self {
        Self::Type(exposing)
    }
}

impl From<ExposedBinding> for Exposure {
    fn from(exposed: ExposedBinding) -> Self {
        Self::Bound(exposed)
    }
}
