//! Compiled per-field validators.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use super::strategy::Strategy;
use crate::foundation::ValidationFailure;
use crate::rules::ValueKind;
use crate::template::MessageTemplates;

/// Executable check for one field.
///
/// `Value::Null` and a missing value are the same thing to a validator.
/// What else counts as "no value" depends on the kind: whitespace-only text
/// for strings, `""` for numbers and dates.
#[derive(Debug)]
pub struct CompiledValidator {
    field: String,
    kind: ValueKind,
    required: bool,
    messages: MessageTemplates,
    strategy: Strategy,
}

impl CompiledValidator {
    pub(crate) fn new(
        field: impl Into<String>,
        kind: ValueKind,
        required: bool,
        messages: MessageTemplates,
        strategy: Strategy,
    ) -> Self {
        Self {
            field: field.into(),
            kind,
            required,
            messages,
            strategy,
        }
    }

    /// The field this validator guards.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The resolved value kind.
    #[must_use]
    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    /// Returns true if an absent value fails.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Number of constraint checks run after the type check.
    #[must_use]
    pub fn constraint_count(&self) -> usize {
        self.strategy.constraint_count()
    }

    /// Validates a candidate value.
    ///
    /// # Errors
    ///
    /// Returns the first failing constraint, with the field set and the
    /// rule's message template (if any) rendered into the message.
    pub fn validate(&self, value: &Value) -> Result<(), ValidationFailure> {
        self.check(value).map_err(|failure| self.finish(failure))
    }

    /// Validates a value that may be missing altogether.
    ///
    /// # Errors
    ///
    /// See [`CompiledValidator::validate`].
    pub fn validate_opt(&self, value: Option<&Value>) -> Result<(), ValidationFailure> {
        self.validate(value.unwrap_or(&Value::Null))
    }

    /// Like [`CompiledValidator::validate`], as a serializable outcome.
    #[must_use]
    pub fn outcome(&self, value: &Value) -> ValidationOutcome {
        self.validate(value).into()
    }

    fn check(&self, value: &Value) -> Result<(), ValidationFailure> {
        if self.is_absent(value) {
            return if self.required {
                Err(ValidationFailure::required(&self.field))
            } else {
                Ok(())
            };
        }
        self.strategy.check(value)
    }

    fn is_absent(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(text) => match self.kind {
                ValueKind::Number | ValueKind::Date => text.is_empty(),
                _ => text.trim().is_empty(),
            },
            _ => false,
        }
    }

    fn finish(&self, failure: ValidationFailure) -> ValidationFailure {
        let failure = match self.messages.render(&failure, &self.field) {
            Some(message) => failure.with_message(message),
            None => failure,
        };
        failure.with_field(self.field.clone())
    }
}

// ============================================================================
// OUTCOME
// ============================================================================

/// Result of validating one value, in the shape a form runtime consumes:
/// `{"ok": true}` or `{"ok": false, "kind": ..., "message": ...}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(ValidationFailure),
}

impl ValidationOutcome {
    /// Returns true for [`ValidationOutcome::Valid`].
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The failure, if invalid.
    #[must_use]
    pub fn failure(&self) -> Option<&ValidationFailure> {
        match self {
            Self::Valid => None,
            Self::Invalid(failure) => Some(failure),
        }
    }
}

impl From<Result<(), ValidationFailure>> for ValidationOutcome {
    fn from(result: Result<(), ValidationFailure>) -> Self {
        match result {
            Ok(()) => Self::Valid,
            Err(failure) => Self::Invalid(failure),
        }
    }
}

impl Serialize for ValidationOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Valid => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("ok", &true)?;
                map.end()
            }
            Self::Invalid(failure) => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("ok", &false)?;
                map.serialize_entry("kind", &failure.kind)?;
                map.serialize_entry("message", &failure.message)?;
                map.end()
            }
        }
    }
}
