//! Deferred, chainable binding declarations.
//!
//! A [`ModuleBuilder`] records bindings and exposures as plain data through type-state
//! chains, then drains them once into a [`Module`]. Installing the module applies every
//! declaration, in enqueue order, to a [`Binder`] supplied by a resolution engine.
//!
//! ## Layers
//!
//! * [`key`]: declared types, qualifiers and binding keys.
//! * [`declaration`]: the deferred commands and their installation checks.
//! * [`chain`]: the fluent builders producing declarations.
//! * [`module`]: builders, containers and installable modules.
//! * [`binder`] and [`resolver`]: the two sides an engine implements.
//!
//! ## Example
//!
//! ```rust
//! use bindery_core::prelude::*;
//!
//! let mut builder = ModuleBuilder::new()
//!     .expose::<String>()
//!     .annotated_with("motd")
//!     .inject()
//!     .bind_constant()
//!     .annotated_with("motd")
//!     .to("welcome")
//!     .inject();
//!
//! assert!(builder.build().is_private());
//! assert!(builder.build().is_empty());
//! ```

pub mod binder;
pub mod chain;
mod constant;
pub mod declaration;
mod error;
mod inject;
pub mod key;
pub mod module;
pub mod resolver;
mod value;

pub use binder::{Binder, BindingTarget, PrivateBinder};
pub use bindery_derive::Injectable;
pub use chain::Injection;
pub use constant::{ConstantValue, EnumConstant};
pub use error::{DeclarationError, DeclarationErrorExt};
pub use inject::{Implements, Injectable};
pub use key::{Key, Qualifier, TypeRef, named};
pub use module::{Detached, Module, ModuleBuilder, ModuleContainer, PrivateModule, PublicModule};
pub use resolver::{ResolveError, ResolveErrorExt, Resolver, ResolverExt};
pub use value::{Implementation, Instance, Scope};

pub mod prelude {
    pub use crate::binder::{Binder, BindingTarget, PrivateBinder};
    pub use crate::chain::Injection;
    pub use crate::constant::{ConstantValue, EnumConstant};
    pub use crate::error::{DeclarationError, DeclarationErrorExt};
    pub use crate::implements;
    pub use crate::inject::{Implements, Injectable};
    pub use crate::key::{Key, Qualifier, TypeRef, named};
    pub use crate::module::{Module, ModuleBuilder, ModuleContainer};
    pub use crate::resolver::{ResolveError, ResolveErrorExt, Resolver, ResolverExt};
    pub use crate::value::{Implementation, Instance, Scope};
    pub use bindery_derive::Injectable;
}
