//! Type-erased values flowing between declarations and engines.

use crate::inject::{Implements, Injectable};
use crate::key::TypeRef;
use crate::resolver::{ResolveError, Resolver};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A resolved value: an `Arc<T>` erased behind [`Any`], tagged with `T`.
///
/// `T` may be unsized (`dyn Trait`), so the erased payload is the `Arc<T>` itself.
#[derive(Clone)]
pub struct Instance {
    ty: TypeRef,
    value: Arc<dyn Any + Send + Sync>,
}

impl Instance {
    pub fn new<T: ?Sized + Send + Sync + 'static>(value: Arc<T>) -> Self {
        Self { ty: TypeRef::of::<T>(), value: Arc::new(value) }
    }

    pub fn of<T: Send + Sync + 'static>(value: T) -> Self {
        Self::new(Arc::new(value))
    }

    #[must_use]
    pub const fn type_ref(&self) -> TypeRef {
        self.ty
    }

    /// Returns the shared value when this instance was created for `T`.
    #[must_use]
    pub fn downcast<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.value.downcast_ref::<Arc<T>>().cloned()
    }

    /// Returns `true` when both handles share the same allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance").field("type", &self.ty).finish_non_exhaustive()
    }
}

type Factory = dyn Fn(&dyn Resolver) -> Result<Instance, ResolveError> + Send + Sync;

/// A recipe for building values of a bound key on demand.
#[derive(Clone)]
pub struct Implementation {
    ty: TypeRef,
    provides: TypeRef,
    factory: Arc<Factory>,
}

impl Implementation {
    /// Constructs `I` through [`Injectable`] and exposes it as `T`.
    #[must_use]
    pub fn of<T, I>() -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        I: Injectable + Implements<T>,
    {
        Self {
            ty: TypeRef::of::<I>(),
            provides: TypeRef::of::<T>(),
            factory: Arc::new(|resolver: &dyn Resolver| -> Result<Instance, ResolveError> {
                let value = Arc::new(I::inject(resolver)?);
                Ok(Instance::new::<T>(<I as Implements<T>>::upcast(value)))
            }),
        }
    }

    /// Wraps a closure provider.
    pub fn from_provider<T, F>(provider: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&dyn Resolver) -> Result<Arc<T>, ResolveError> + Send + Sync + 'static,
    {
        Self {
            ty: TypeRef::of::<F>(),
            provides: TypeRef::of::<T>(),
            factory: Arc::new(move |resolver: &dyn Resolver| {
                provider(resolver).map(Instance::new::<T>)
            }),
        }
    }

    /// The implementation type, or the provider closure type.
    #[must_use]
    pub const fn type_ref(&self) -> TypeRef {
        self.ty
    }

    /// The type of the values the factory returns.
    #[must_use]
    pub const fn provides(&self) -> TypeRef {
        self.provides
    }

    /// Runs the factory against `resolver`.
    ///
    /// # Errors
    /// Propagates failures from resolving dependencies or from the provider.
    pub fn provide(&self, resolver: &dyn Resolver) -> Result<Instance, ResolveError> {
        (self.factory)(resolver)
    }
}

impl fmt::Debug for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Implementation")
            .field("type", &self.ty)
            .field("provides", &self.provides)
            .finish_non_exhaustive()
    }
}

/// Lifetime policy for values built from an [`Implementation`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scope {
    /// A new value on every resolution.
    #[default]
    NoScope,
    /// One shared value, built on first resolution.
    Singleton,
    /// One shared value, built while the engine is assembled.
    EagerSingleton,
}

impl Scope {
    #[must_use]
    pub const fn is_singleton(self) -> bool {
        matches!(self, Self::Singleton | Self::EagerSingleton)
    }
}
