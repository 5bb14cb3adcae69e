//! Facade crate for bindery.
//! Re-exports the declaration DSL and, behind features, the reference engine and the
//! logging setup. Keep this crate thin: it composes the other crates.
//!
//! ## Usage
//! - `injector` (default): [`Injector`] and its configuration.
//! - `logger`: `bindery::logger` for installing a tracing subscriber.
//!
//! ```rust
//! use bindery::prelude::*;
//!
//! let injector = Injector::builder()
//!     .module()
//!     .bind_constant()
//!     .annotated_with("greeting")
//!     .to("hello")
//!     .inject()
//!     .inject()
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(*injector.get_qualified::<String>("greeting").unwrap(), "hello");
//! ```

pub use bindery_core as dsl;
pub use bindery_core::{
    Binder, BindingTarget, ConstantValue, DeclarationError, Implementation, Implements, Injectable,
    Injection, Instance, Key, Module, ModuleBuilder, ModuleContainer, PrivateBinder, Qualifier,
    ResolveError, Resolver, ResolverExt, Scope, TypeRef, implements, named,
};
#[cfg(feature = "injector")]
pub use bindery_injector::{Injector, InjectorBuilder, InjectorConfig, InjectorError, Stage, config};
#[cfg(feature = "logger")]
pub use bindery_logger as logger;

pub mod prelude {
    pub use bindery_core::prelude::*;
    #[cfg(feature = "injector")]
    pub use bindery_injector::{Injector, InjectorBuilder, InjectorConfig, InjectorError, Stage};
}

/// Build-time enabled features (by Cargo feature).
pub const ENABLED: &[&str] = &[
    #[cfg(feature = "injector")]
    "injector",
    #[cfg(feature = "logger")]
    "logger",
];

#[must_use]
pub fn is_enabled(name: &str) -> bool {
    ENABLED.contains(&name)
}
