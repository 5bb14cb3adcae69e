use super::{Declared, TypeBinding};
use crate::binder::PrivateBinder;
use crate::key::{Key, Qualifier, TypeRef};
use crate::value::{Implementation, Instance, Scope};
use tracing::trace;

/// Exposes a key bound inside a private module to the enclosing environment.
#[derive(Clone, Debug)]
pub struct TypeExposing {
    declared: Declared,
}

impl TypeExposing {
    #[must_use]
    pub fn new(ty: TypeRef) -> Self {
        Self { declared: Declared::new(ty) }
    }

    /// An exposure of `key`, qualifier included.
    #[must_use]
    pub fn for_key(key: Key) -> Self {
        Self { declared: Declared::from_key(key) }
    }

    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::new(TypeRef::of::<T>())
    }

    #[must_use]
    pub fn annotated_with(mut self, qualifier: impl Into<Qualifier>) -> Self {
        self.declared.annotate(qualifier.into());
        self
    }

    #[must_use]
    pub fn key(&self) -> Key {
        self.declared.key()
    }

    /// # Errors
    /// Binder failures propagate as is.
    pub fn apply<B: PrivateBinder + ?Sized>(self, binder: &mut B) -> Result<(), B::Error> {
        let key = self.declared.key();
        trace!(%key, "Applying exposure");
        binder.expose(key)
    }
}

/// Exposes and binds the same key in one declaration.
///
/// Qualifiers are applied to both halves, so the exposed key always equals the bound key.
#[derive(Debug)]
pub struct ExposedBinding {
    exposing: TypeExposing,
    binding: TypeBinding,
}

impl ExposedBinding {
    #[must_use]
    pub fn new(ty: TypeRef) -> Self {
        Self { exposing: TypeExposing::new(ty), binding: TypeBinding::new(ty) }
    }

    #[must_use]
    pub fn for_key(key: Key) -> Self {
        Self { exposing: TypeExposing::for_key(key.clone()), binding: TypeBinding::for_key(key) }
    }

    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::new(TypeRef::of::<T>())
    }

    #[must_use]
    pub fn annotated_with(self, qualifier: impl Into<Qualifier>) -> Self {
        let qualifier = qualifier.into();
        Self {
            exposing: self.exposing.annotated_with(qualifier.clone()),
            binding: self.binding.annotated_with(qualifier),
        }
    }

    #[must_use]
    pub fn to(self, implementation: Implementation) -> Self {
        Self { binding: self.binding.to(implementation), ..self }
    }

    #[must_use]
    pub fn to_key(self, target: Key) -> Self {
        Self { binding: self.binding.to_key(target), ..self }
    }

    #[must_use]
    pub fn to_instance(self, instance: Instance) -> Self {
        Self { binding: self.binding.to_instance(instance), ..self }
    }

    #[must_use]
    pub fn in_scope(self, scope: Scope) -> Self {
        Self { binding: self.binding.in_scope(scope), ..self }
    }

    #[must_use]
    pub fn key(&self) -> Key {
        self.exposing.key()
    }

    /// Exposes the key, then applies the binding, on the same target.
    ///
    /// # Errors
    /// See [`TypeBinding::apply`].
    pub fn apply<B: PrivateBinder + ?Sized>(self, binder: &mut B) -> Result<(), B::Error> {
        self.exposing.apply(binder)?;
        self.binding.apply(binder)
    }
}
