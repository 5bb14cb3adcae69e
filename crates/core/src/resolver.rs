//! # Resolution
//!
//! The read side of a dependency graph. An engine implements [`Resolver`] over
//! type-erased [`Instance`]s; [`ResolverExt`] adds the typed accessors callers use.

use crate::key::{Key, Qualifier};
use crate::value::Instance;
use std::any::type_name;
use std::borrow::Cow;
use std::sync::Arc;

/// Errors raised while resolving a key.
#[bindery_derive::bindery_error]
pub enum ResolveError {
    /// Nothing is bound to the key in the current environment or any parent.
    #[error("Missing binding{}: {key}", format_context(.context))]
    MissingBinding { key: Key, context: Option<Cow<'static, str>> },

    /// The key depends on itself, directly or transitively.
    #[error("Circular dependency{}: {message}", format_context(.context))]
    CircularDependency { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The bound value does not have the requested type.
    #[error("Type mismatch{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A user provider failed.
    #[error("Provider failed{}: {source}", format_context(.context))]
    Provider {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
        context: Option<Cow<'static, str>>,
    },

    /// Internal fallback for unexpected issues.
    #[error("Internal resolution error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ResolveError {
    #[must_use]
    pub const fn missing(key: Key) -> Self {
        Self::MissingBinding { key, context: None }
    }

    /// Wraps a failure raised inside a provider closure.
    pub fn provider(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Provider { source: source.into(), context: None }
    }

    /// Builds the cycle error from the keys on the resolution path, closing the loop on `key`.
    pub fn circular<'a>(path: impl IntoIterator<Item = &'a Key>, key: &Key) -> Self {
        let mut message: String =
            path.into_iter().map(|k| format!("{k} -> ")).collect();
        message.push_str(&key.to_string());
        Self::CircularDependency { message: message.into(), context: None }
    }

    /// Returns the key when this is a [`ResolveError::MissingBinding`].
    #[must_use]
    pub const fn missing_key(&self) -> Option<&Key> {
        match self {
            Self::MissingBinding { key, .. } => Some(key),
            _ => None,
        }
    }
}

/// Resolves keys to type-erased instances.
pub trait Resolver {
    /// Produces the value bound to `key`.
    ///
    /// # Errors
    /// Returns [`ResolveError::MissingBinding`] when nothing is bound, or any failure
    /// raised while constructing the value.
    fn resolve(&self, key: &Key) -> Result<Instance, ResolveError>;
}

/// Typed accessors over any [`Resolver`], including `dyn Resolver`.
pub trait ResolverExt: Resolver {
    /// Resolves the unqualified key of `T`.
    ///
    /// # Errors
    /// See [`ResolverExt::get_key`].
    fn get<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>, ResolveError> {
        self.get_key(&Key::of::<T>())
    }

    /// Resolves the key of `T` qualified with `qualifier`.
    ///
    /// # Errors
    /// See [`ResolverExt::get_key`].
    fn get_qualified<T: ?Sized + Send + Sync + 'static>(
        &self,
        qualifier: impl Into<Qualifier>,
    ) -> Result<Arc<T>, ResolveError> {
        self.get_key(&Key::of::<T>().qualified(qualifier))
    }

    /// Like [`ResolverExt::get`], but a missing binding of `T` itself yields `None`.
    ///
    /// # Errors
    /// Missing dependencies of `T` are still reported.
    fn find<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Option<Arc<T>>, ResolveError> {
        self.find_key(&Key::of::<T>())
    }

    /// Resolves `key` and downcasts the result to `T`.
    ///
    /// # Errors
    /// Returns [`ResolveError::TypeMismatch`] when the bound value is not a `T`, and
    /// propagates every resolution failure.
    fn get_key<T: ?Sized + Send + Sync + 'static>(&self, key: &Key) -> Result<Arc<T>, ResolveError> {
        let instance = self.resolve(key)?;
        instance.downcast::<T>().ok_or_else(|| ResolveError::TypeMismatch {
            message: format!(
                "{key} holds `{}`, requested `{}`",
                instance.type_ref(),
                type_name::<T>()
            )
            .into(),
            context: None,
        })
    }

    /// Optional variant of [`ResolverExt::get_key`].
    ///
    /// # Errors
    /// Every failure except a missing binding of `key` itself.
    fn find_key<T: ?Sized + Send + Sync + 'static>(
        &self,
        key: &Key,
    ) -> Result<Option<Arc<T>>, ResolveError> {
        match self.get_key::<T>(key) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.missing_key() == Some(key) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

impl<R: Resolver + ?Sized> ResolverExt for R {}
