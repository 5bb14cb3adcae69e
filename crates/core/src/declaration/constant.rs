use super::Annotated;
use crate::binder::Binder;
use crate::constant::ConstantValue;
use crate::error::DeclarationError;
use crate::key::Qualifier;
use std::any::Any;
use tracing::trace;

#[derive(Debug)]
enum StoredConstant {
    Typed(ConstantValue),
    Dynamic(Box<dyn Any + Send + Sync>),
}

/// Binds a qualifier to a single constant.
#[derive(Debug, Default)]
pub struct ConstantBinding {
    annotated: Annotated,
    value: Option<StoredConstant>,
}

impl ConstantBinding {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn annotated_with(mut self, qualifier: impl Into<Qualifier>) -> Self {
        self.annotated.annotate(qualifier.into());
        self
    }

    #[must_use]
    pub fn to(mut self, value: impl Into<ConstantValue>) -> Self {
        self.value = Some(StoredConstant::Typed(value.into()));
        self
    }

    /// Stores a value whose kind is checked when the binding is applied.
    #[must_use]
    pub fn to_dynamic(mut self, value: Box<dyn Any + Send + Sync>) -> Self {
        self.value = Some(StoredConstant::Dynamic(value));
        self
    }

    #[must_use]
    pub const fn qualifier(&self) -> Option<&Qualifier> {
        self.annotated.qualifier()
    }

    /// Applies the binding to `binder` with a single `bind_constant` call.
    ///
    /// # Errors
    /// Returns [`DeclarationError::UnsupportedOperation`] when no value was set or the
    /// dynamic value has an unsupported kind. Binder failures propagate as is.
    pub fn apply<B: Binder + ?Sized>(self, binder: &mut B) -> Result<(), B::Error> {
        let value = match self.value {
            Some(StoredConstant::Typed(value)) => value,
            Some(StoredConstant::Dynamic(value)) => ConstantValue::from_dynamic(value)
                .map_err(|_| DeclarationError::unsupported("constant value has an unsupported kind"))?,
            None => return Err(DeclarationError::unsupported("constant binding has no value").into()),
        };

        let qualifier = self.annotated.into_qualifier();
        trace!(?qualifier, kind = value.kind(), "Applying constant binding");
        binder.bind_constant(qualifier, value)
    }
}
