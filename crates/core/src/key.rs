//! Binding keys: a declared type plus an optional qualifier.

use std::any::{TypeId, type_name};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A runtime handle to a declared type.
///
/// Equality and hashing use the [`TypeId`] only; the name is kept for diagnostics.
#[derive(Clone, Copy)]
pub struct TypeRef {
    id: TypeId,
    name: &'static str,
}

impl TypeRef {
    /// Captures the type `T`. Unsized types such as `dyn Trait` are allowed.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self { id: TypeId::of::<T>(), name: type_name::<T>() }
    }

    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` when this handle refers to `T`.
    #[must_use]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeRef").field(&self.name).finish()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Discriminates between several bindings of the same declared type.
///
/// Qualifiers compare structurally: two `Named` qualifiers are equal when their names
/// are equal, two `Marker` qualifiers when they point at the same marker type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Qualifier {
    /// A string name, e.g. `named("primary")`.
    Named(Cow<'static, str>),
    /// A zero-sized marker type used as an annotation.
    Marker(TypeRef),
}

impl Qualifier {
    /// Qualifier identified by the marker type `M`.
    #[must_use]
    pub fn marker<M: 'static>() -> Self {
        Self::Marker(TypeRef::of::<M>())
    }
}

/// Shorthand for [`Qualifier::Named`].
pub fn named(name: impl Into<Cow<'static, str>>) -> Qualifier {
    Qualifier::Named(name.into())
}

impl From<&'static str> for Qualifier {
    fn from(name: &'static str) -> Self {
        Self::Named(Cow::Borrowed(name))
    }
}

impl From<String> for Qualifier {
    fn from(name: String) -> Self {
        Self::Named(Cow::Owned(name))
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "@Named(\"{name}\")"),
            Self::Marker(marker) => write!(f, "@{marker}"),
        }
    }
}

/// The identity of a binding: declared type plus optional qualifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Key {
    ty: TypeRef,
    qualifier: Option<Qualifier>,
}

impl Key {
    #[must_use]
    pub const fn new(ty: TypeRef, qualifier: Option<Qualifier>) -> Self {
        Self { ty, qualifier }
    }

    /// Unqualified key of `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::new(TypeRef::of::<T>(), None)
    }

    /// Returns the same key carrying `qualifier`, replacing any previous one.
    #[must_use]
    pub fn qualified(mut self, qualifier: impl Into<Qualifier>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    #[must_use]
    pub const fn type_ref(&self) -> TypeRef {
        self.ty
    }

    #[must_use]
    pub const fn qualifier(&self) -> Option<&Qualifier> {
        self.qualifier.as_ref()
    }

    pub(crate) fn into_parts(self) -> (TypeRef, Option<Qualifier>) {
        (self.ty, self.qualifier)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(qualifier) => write!(f, "{} {}", qualifier, self.ty),
            None => write!(f, "{}", self.ty),
        }
    }
}
