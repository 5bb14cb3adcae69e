//! # Injector Errors
//!
//! Failures raised while modules are installed into the engine.

use bindery_core::{DeclarationError, ResolveError};
use std::borrow::Cow;

/// Errors produced while assembling an [`Injector`](crate::Injector).
#[bindery_derive::bindery_error]
pub enum InjectorError {
    /// A declaration failed its own installation checks.
    #[error("Declaration error{}: {source}", format_context(.context))]
    Declaration { source: DeclarationError, context: Option<Cow<'static, str>> },

    /// An eager singleton could not be built.
    #[error("Resolution error{}: {source}", format_context(.context))]
    Resolve { source: ResolveError, context: Option<Cow<'static, str>> },

    /// The same key was bound twice in one environment.
    #[error("Duplicate binding{}: {message}", format_context(.context))]
    DuplicateBinding { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A private module exposed a key it never bound.
    #[error("Unbound exposure{}: {message}", format_context(.context))]
    UnboundExposure { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A binding the engine cannot honour, such as a scope without an implementation.
    #[error("Invalid binding{}: {message}", format_context(.context))]
    InvalidBinding { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues.
    #[error("Internal injector error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
