//! # Declaration chains
//!
//! Fluent, type-state builders that produce declarations. Every step consumes the
//! previous value and returns a new one whose state type decides which calls come next:
//!
//! ```text
//! Unqualified --annotated_with--> Qualified
//! Unqualified | Qualified --to / to_provider / to_key--> Linked --in_scope--> Finished
//! Unqualified | Qualified --to_instance--> Finished
//! ```
//!
//! Chains started from an existing [`Key`](crate::Key) (`bind_key`, `expose_key`,
//! `expose_and_bind_key`) begin in `Qualified`, since the key already decides the
//! qualifier.
//!
//! `inject()` is available in every state. It enqueues the declaration into the owning
//! [`ModuleBuilder`](crate::ModuleBuilder) and hands that builder back; since it consumes
//! the chain, a declaration can only be enqueued once.
//!
//! ```rust
//! use bindery_core::prelude::*;
//! use std::sync::Arc;
//!
//! let module = ModuleBuilder::new()
//!     .bind::<String>()
//!     .annotated_with(named("greeting"))
//!     .to_instance(Arc::new("hello".to_owned()))
//!     .inject()
//!     .bind_constant()
//!     .annotated_with("port")
//!     .to(8080_u16)
//!     .inject()
//!     .build();
//! assert!(!module.is_private());
//! ```
//!
//! Illegal sequences are rejected by the compiler. A scope cannot follow an instance:
//!
//! ```compile_fail
//! use bindery_core::prelude::*;
//! use std::sync::Arc;
//!
//! let _ = ModuleBuilder::new()
//!     .bind::<String>()
//!     .to_instance(Arc::new(String::new()))
//!     .in_scope(Scope::Singleton);
//! ```
//!
//! A qualifier can only be set once:
//!
//! ```compile_fail
//! use bindery_core::prelude::*;
//!
//! let _ = ModuleBuilder::new().bind_constant().annotated_with("a").annotated_with("b");
//! ```
//!
//! A scope needs a target first:
//!
//! ```compile_fail
//! use bindery_core::prelude::*;
//!
//! let _ = ModuleBuilder::new().bind::<String>().in_scope(Scope::Singleton);
//! ```

mod binding;
mod constant;
mod exposure;

pub use binding::BindingBuilder;
pub use constant::ConstantBuilder;
pub use exposure::ExposureBuilder;

use crate::declaration::{ExposedBinding, TypeBinding};
use crate::key::{Key, Qualifier};
use crate::module::ModuleBuilder;
use crate::value::{Implementation, Instance, Scope};

mod private {
    pub trait Sealed {}
}

/// Completes a chain and returns to its parent.
pub trait Injection<P> {
    fn inject(self) -> P;
}

/// A fresh chain; no qualifier or target yet.
#[derive(Debug, Clone, Copy)]
pub struct Unqualified;
/// A qualifier was set.
#[derive(Debug, Clone, Copy)]
pub struct Qualified;
/// An implementation, provider or linked key was set; a scope may follow.
#[derive(Debug, Clone, Copy)]
pub struct Linked;
/// Nothing but `inject()` remains.
#[derive(Debug, Clone, Copy)]
pub struct Finished;

impl private::Sealed for Unqualified {}
impl private::Sealed for Qualified {}
impl private::Sealed for Linked {}
impl private::Sealed for Finished {}

/// Any chain state.
pub trait ChainState: private::Sealed {}

impl ChainState for Unqualified {}
impl ChainState for Qualified {}
impl ChainState for Linked {}
impl ChainState for Finished {}

/// States in which a target can still be chosen.
pub trait Unlinked: ChainState {}

impl Unlinked for Unqualified {}
impl Unlinked for Qualified {}

/// The declaration a [`BindingBuilder`] fills in: a plain [`TypeBinding`] or an
/// [`ExposedBinding`].
pub trait BindingDeclaration: private::Sealed + Sized {
    #[doc(hidden)]
    fn annotate(self, qualifier: Qualifier) -> Self;
    #[doc(hidden)]
    fn link(self, implementation: Implementation) -> Self;
    #[doc(hidden)]
    fn link_key(self, target: Key) -> Self;
    #[doc(hidden)]
    fn link_instance(self, instance: Instance) -> Self;
    #[doc(hidden)]
    fn scope(self, scope: Scope) -> Self;
    #[doc(hidden)]
    fn enqueue<P>(self, module: ModuleBuilder<P>) -> ModuleBuilder<P>;
}

impl private::Sealed for TypeBinding {}
impl private::Sealed for ExposedBinding {}

impl BindingDeclaration for TypeBinding {
    fn annotate(self, qualifier: Qualifier) -> Self {
        self.annotated_with(qualifier)
    }

    fn link(self, implementation: Implementation) -> Self {
        self.to(implementation)
    }

    fn link_key(self, target: Key) -> Self {
        self.to_key(target)
    }

    fn link_instance(self, instance: Instance) -> Self {
        self.to_instance(instance)
    }

    fn scope(self, scope: Scope) -> Self {
        self.in_scope(scope)
    }

    fn enqueue<P>(self, module: ModuleBuilder<P>) -> ModuleBuilder<P> {
        module.add_binding(self)
    }
}

impl BindingDeclaration for ExposedBinding {
    fn annotate(self, qualifier: Qualifier) -> Self {
        self.annotated_with(qualifier)
    }

    fn link(self, implementation: Implementation) -> Self {
        self.to(implementation)
    }

    fn link_key(self, target: Key) -> Self {
        self.to_key(target)
    }

    fn link_instance(self, instance: Instance) -> Self {
        self.to_instance(instance)
    }

    fn scope(self, scope: Scope) -> Self {
        self.in_scope(scope)
    }

    fn enqueue<P>(self, module: ModuleBuilder<P>) -> ModuleBuilder<P> {
        module.add_exposure(self)
    }
}
