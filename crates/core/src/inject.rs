//! Constructor injection and implementation-to-interface upcasting.

use crate::resolver::{ResolveError, Resolver};
use std::sync::Arc;

/// A type the engine can construct by resolving its dependencies.
///
/// Usually derived with `#[derive(Injectable)]`.
pub trait Injectable: Sized + Send + Sync + 'static {
    /// Builds `Self` from values resolved through `resolver`.
    ///
    /// # Errors
    /// Propagates any failure resolving a dependency.
    fn inject(resolver: &dyn Resolver) -> Result<Self, ResolveError>;
}

/// Marks `Self` as usable wherever a `T` is bound.
///
/// Every type implements this for itself; trait objects are declared with
/// [`implements!`](crate::implements).
pub trait Implements<T: ?Sized>: Send + Sync + 'static {
    fn upcast(self: Arc<Self>) -> Arc<T>;
}

impl<T: Send + Sync + 'static> Implements<T> for T {
    fn upcast(self: Arc<Self>) -> Arc<T> {
        self
    }
}

/// Declares that an implementation type can be bound to one or more trait objects.
///
/// ```rust
/// use bindery_core::implements;
///
/// trait Clock: Send + Sync {}
/// trait Ticker: Send + Sync {}
/// struct SystemClock;
/// impl Clock for SystemClock {}
/// impl Ticker for SystemClock {}
///
/// implements!(SystemClock => dyn Clock, dyn Ticker);
/// ```
#[macro_export]
macro_rules! implements {
    ($implementation:ty => $($interface:ty),+ $(,)?) => {
        $(
            impl $crate::Implements<$interface> for $implementation {
                fn upcast(self: ::std::sync::Arc<Self>) -> ::std::sync::Arc<$interface> {
                    self
                }
            }
        )+
    };
}
