//! # Declaration Errors
//!
//! Failures raised while a deferred declaration is applied to a [`Binder`](crate::Binder).
//! Nothing is validated while a chain is being written; every check here runs at
//! installation time.

use std::borrow::Cow;

/// Errors produced by declarations during installation.
#[bindery_derive::bindery_error]
pub enum DeclarationError {
    /// A type binding reached installation in a contradictory or incomplete state.
    ///
    /// Raised when an instance is combined with an implementation or a scope, or when
    /// neither an implementation nor an instance was ever set.
    #[error("Invalid declaration state{}: {message}", format_context(.context))]
    InvalidState { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A constant binding holds no value, or a value outside the supported kinds.
    #[error("Unsupported operation{}: {message}", format_context(.context))]
    UnsupportedOperation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues.
    #[error("Internal declaration error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl DeclarationError {
    pub(crate) fn invalid_state(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidState { message: message.into(), context: None }
    }

    pub(crate) fn unsupported(message: impl Into<Cow<'static, str>>) -> Self {
        Self::UnsupportedOperation { message: message.into(), context: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_is_rendered_in_display() {
        let result: Result<(), DeclarationError> =
            Err(DeclarationError::invalid_state("no target"));
        let err = result.context("bind Repository").unwrap_err();
        assert_eq!(err.to_string(), "Invalid declaration state (bind Repository): no target");
    }

    #[test]
    fn strings_convert_into_internal() {
        let err: DeclarationError = "unexpected".into();
        assert!(matches!(err, DeclarationError::Internal { .. }));
    }
}
