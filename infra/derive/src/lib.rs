#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the bindery workspace.
//! This crate provides the error attribute shared by every crate and the
//! constructor-injection derive used by implementation types.
//!
//! ## Usage
//! Consumers normally reach these macros through `bindery-core` (or the `bindery`
//! facade), which re-exports them:
//! ```toml
//! [dependencies]
//! bindery-core = { path = "../crates/core" }
//! ```
//!
//! Generated code refers to `::bindery_core`, so the crate must be a direct dependency
//! of anything deriving [`Injectable`](macro@Injectable).

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// A high-level attribute macro for defining domain-specific error enums.
///
/// This macro reduces boilerplate by transforming a standard enum into a fully-featured
/// error type integrated with the bindery infrastructure.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `#[source]` field,
///   enabling the use of the `?` operator for upstream errors.
/// * **Internal Fallback**: Provides specialized `From<&str>` and `From<String>` implementations
///   if an `Internal` variant is present.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping external errors must include a `source: T` field or a field marked
///    with `#[source]`/`#[from]` (compatible with `thiserror`).
/// 4. Tuple or unit variants are rejected to keep error wiring explicit and reliable.
///
/// A private `format_context` helper is emitted next to the enum, so declare one error
/// enum per module.
///
/// # Example
///
/// ```rust,ignore
/// use bindery_derive::bindery_error;
/// use std::borrow::Cow;
///
/// #[bindery_error]
/// pub enum LoaderError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io {
///         #[source]
///         source: std::io::Error,
///         context: Option<Cow<'static, str>>,
///     },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read() -> Result<String, LoaderError> {
///     std::fs::read_to_string("modules.toml").context("Reading module manifest")
/// }
/// ```
#[proc_macro_attribute]
pub fn bindery_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Derives `bindery_core::Injectable` for a struct by resolving every field.
///
/// # Field rules
///
/// * `Arc<T>` is resolved with the key of `T` (`T` may be a trait object).
/// * `Option<Arc<T>>` is optional injection: a missing binding yields `None`.
/// * `#[inject(named = "...")]` qualifies the key with a named qualifier.
/// * `#[inject(default)]` skips resolution and uses `Default::default()`.
///
/// Any other field type is rejected at compile time.
///
/// # Example
///
/// ```rust,ignore
/// use bindery_core::Injectable;
/// use std::sync::Arc;
///
/// #[derive(Injectable)]
/// struct Checkout {
///     #[inject(named = "primary")]
///     payments: Arc<dyn Payments>,
///     audit: Option<Arc<AuditLog>>,
///     #[inject(default)]
///     retries: u32,
/// }
/// ```
#[proc_macro_derive(Injectable, attributes(inject))]
pub fn derive_injectable(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::injectable::expand_derive(input).into()
}
