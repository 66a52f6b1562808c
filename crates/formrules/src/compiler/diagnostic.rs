//! Non-fatal compile reports.

use thiserror::Error;

use crate::error::ResolveError;

/// Something about one field's rule could not be honored.
///
/// [`Diagnostic::Unresolved`] means the field was dropped from the compiled
/// form. Every other variant leaves the field compiled with the offending
/// constraint skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    #[error(transparent)]
    Unresolved(#[from] ResolveError),

    #[error("Field '{field}' has invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        field: String,
        pattern: String,
        reason: String,
    },

    #[error("Field '{field}' has type '{kind}' with no dedicated checks; only presence is enforced")]
    UnsupportedKind { field: String, kind: String },

    #[error("Field '{field}' names unknown custom rule '{rule}'")]
    UnknownCustomRule { field: String, rule: String },

    #[error("Field '{field}' has minDate '{value}' which is neither 'today' nor a valid date")]
    InvalidMinDate { field: String, value: String },

    #[error("Field '{field}' has message template '{key}' which matches no constraint")]
    UnknownMessageKey { field: String, key: String },
}

impl Diagnostic {
    /// The field the diagnostic is about.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Unresolved(err) => err.field(),
            Self::InvalidPattern { field, .. }
            | Self::UnsupportedKind { field, .. }
            | Self::UnknownCustomRule { field, .. }
            | Self::InvalidMinDate { field, .. }
            | Self::UnknownMessageKey { field, .. } => field,
        }
    }

    /// Returns true if the field was left out of the compiled form.
    #[must_use]
    pub fn drops_field(&self) -> bool {
        matches!(self, Self::Unresolved(_))
    }
}
