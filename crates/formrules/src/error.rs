//! Error types for loading and resolving rule documents.
//!
//! Only [`ConfigurationError`] aborts a compile. [`ResolveError`] is scoped to
//! one field: the compiler drops that field and records a diagnostic.

use std::path::PathBuf;

use thiserror::Error;

/// Fetching or parsing a rule document failed.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// No rule document exists for the form id.
    #[error("Unknown form: {form}")]
    UnknownForm { form: String },

    /// Reading a rule file failed.
    #[error("Failed to read rule file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A rule document is not valid JSON or does not have the rule shape.
    #[error("Failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// A rule document parsed but is structurally wrong.
    #[error("Malformed rule document: {message}")]
    Malformed { message: String },
}

impl ConfigurationError {
    /// Create an unknown form error
    pub fn unknown_form(form: impl Into<String>) -> Self {
        Self::UnknownForm { form: form.into() }
    }

    /// Create an I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a parse error
    pub fn parse(origin: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            origin: origin.into(),
            source,
        }
    }

    /// Create a malformed document error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

/// A single field rule could not be resolved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// `$ref` names a definition that does not exist.
    #[error("Field '{field}' references unknown definition '{reference}'")]
    MissingDefinition { field: String, reference: String },

    /// `$ref` is not of the form `#/definitions/<name>`.
    #[error("Field '{field}' has malformed reference '{reference}', expected '#/definitions/<name>'")]
    MalformedReference { field: String, reference: String },

    /// Neither the rule nor its definition declares a `type`.
    #[error("Field '{field}' does not declare a type")]
    MissingKind { field: String },

    /// The field's rule object has the wrong shape.
    #[error("Field '{field}' has a malformed rule: {reason}")]
    MalformedRule { field: String, reason: String },

    /// `$ref` names a definition whose rule object has the wrong shape.
    #[error("Field '{field}' references malformed definition '{reference}': {reason}")]
    MalformedDefinition {
        field: String,
        reference: String,
        reason: String,
    },
}

impl ResolveError {
    /// The field whose rule failed to resolve.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::MissingDefinition { field, .. }
            | Self::MalformedReference { field, .. }
            | Self::MissingKind { field }
            | Self::MalformedRule { field, .. }
            | Self::MalformedDefinition { field, .. } => field,
        }
    }
}
