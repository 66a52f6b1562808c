//! Structured validation failures.
//!
//! A [`ValidationFailure`] names the constraint that failed, carries the
//! rendered human-readable message, and keeps the literal constraint values
//! used to render it so callers can re-render or localize.

use std::borrow::Cow;
use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ============================================================================
// FAILURE KIND
// ============================================================================

/// Which constraint rejected a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    /// A required value was absent.
    Required,
    /// The value had the wrong shape for the declared kind.
    Type,
    /// Trimmed string shorter than `minLength`.
    MinLength,
    /// Trimmed string longer than `maxLength`.
    MaxLength,
    /// Trimmed string did not match `pattern`.
    Pattern,
    /// Trimmed string not in `allowedValues`.
    AllowedValues,
    /// Number below `minValue`.
    MinValue,
    /// Number above `maxValue`.
    MaxValue,
    /// Date earlier than `minDate`.
    MinDate,
    /// A named business rule rejected the value.
    CustomRule,
}

impl FailureKind {
    /// Every kind, in constraint-chain order.
    pub const ALL: [FailureKind; 10] = [
        FailureKind::Required,
        FailureKind::Type,
        FailureKind::MinLength,
        FailureKind::MaxLength,
        FailureKind::Pattern,
        FailureKind::AllowedValues,
        FailureKind::MinValue,
        FailureKind::MaxValue,
        FailureKind::MinDate,
        FailureKind::CustomRule,
    ];

    /// Wire code, identical to the rule attribute it guards.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            FailureKind::Required => "required",
            FailureKind::Type => "type",
            FailureKind::MinLength => "minLength",
            FailureKind::MaxLength => "maxLength",
            FailureKind::Pattern => "pattern",
            FailureKind::AllowedValues => "allowedValues",
            FailureKind::MinValue => "minValue",
            FailureKind::MaxValue => "maxValue",
            FailureKind::MinDate => "minDate",
            FailureKind::CustomRule => "customRule",
        }
    }

    /// Rule attribute holding the custom message template for this kind.
    #[must_use]
    pub const fn message_key(self) -> &'static str {
        match self {
            FailureKind::Required => "errorMessageRequired",
            FailureKind::Type => "errorMessageType",
            FailureKind::MinLength => "errorMessageMinLength",
            FailureKind::MaxLength => "errorMessageMaxLength",
            FailureKind::Pattern => "errorMessagePattern",
            FailureKind::AllowedValues => "errorMessageAllowedValues",
            FailureKind::MinValue => "errorMessageMinValue",
            FailureKind::MaxValue => "errorMessageMaxValue",
            FailureKind::MinDate => "errorMessageMinDate",
            FailureKind::CustomRule => "errorMessageCustomRule",
        }
    }

    /// Placeholders a template for this kind may reference besides `{field}`.
    #[must_use]
    pub const fn placeholders(self) -> &'static [&'static str] {
        match self {
            FailureKind::Required => &[],
            FailureKind::Type => &["type"],
            FailureKind::MinLength => &["minLength"],
            FailureKind::MaxLength => &["maxLength"],
            FailureKind::Pattern => &["pattern"],
            FailureKind::AllowedValues => &["allowedValues"],
            FailureKind::MinValue => &["minValue"],
            FailureKind::MaxValue => &["maxValue"],
            FailureKind::MinDate => &["minDate"],
            FailureKind::CustomRule => &["customRule"],
        }
    }

    /// Looks up a kind from its template key (`errorMessageMaxLength` etc).
    #[must_use]
    pub fn from_message_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.message_key() == key)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// VALIDATION FAILURE
// ============================================================================

/// Constraint parameters, keyed by placeholder name. Typically 0-1 entries.
pub type FailureParams = SmallVec<[(&'static str, String); 2]>;

/// A per-value validation outcome describing the first failed constraint.
///
/// # Examples
///
/// ```rust,ignore
/// use formrules::foundation::ValidationFailure;
///
/// let failure = ValidationFailure::max_length(100).with_field("memo");
/// assert_eq!(failure.param("maxLength"), Some("100"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    /// Which constraint failed.
    pub kind: FailureKind,

    /// Fully rendered message.
    pub message: Cow<'static, str>,

    /// Field the failure belongs to, set once the failure leaves its field
    /// validator.
    pub field: Option<String>,

    /// Literal constraint values used for `{placeholder}` substitution.
    pub params: FailureParams,
}

impl ValidationFailure {
    /// Creates a failure with a kind and message.
    pub fn new(kind: FailureKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            field: None,
            params: SmallVec::new(),
        }
    }

    /// Sets the field this failure belongs to.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds a constraint parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.params.push((key, value.into()));
        self
    }

    /// Replaces the message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationFailure {
    /// A required value was absent.
    pub fn required(field: &str) -> Self {
        Self::new(FailureKind::Required, format!("{field} is required"))
    }

    /// The value is not a valid `expected`.
    pub fn type_mismatch(expected: &'static str) -> Self {
        Self::new(FailureKind::Type, format!("Must be a valid {expected}"))
            .with_param("type", expected)
    }

    /// Trimmed length below `min`.
    pub fn min_length(min: usize) -> Self {
        Self::new(
            FailureKind::MinLength,
            format!("Must be at least {min} characters"),
        )
        .with_param("minLength", min.to_string())
    }

    /// Trimmed length above `max`.
    pub fn max_length(max: usize) -> Self {
        Self::new(
            FailureKind::MaxLength,
            format!("Must be at most {max} characters"),
        )
        .with_param("maxLength", max.to_string())
    }

    /// Value did not match `pattern`.
    pub fn pattern(pattern: &str) -> Self {
        Self::new(FailureKind::Pattern, "Invalid format").with_param("pattern", pattern)
    }

    /// Value is not one of `allowed`.
    pub fn not_allowed(allowed: &[String]) -> Self {
        let joined = allowed.join(", ");
        Self::new(
            FailureKind::AllowedValues,
            format!("Must be one of: {joined}"),
        )
        .with_param("allowedValues", joined)
    }

    /// Number below `min`.
    pub fn min_value(min: f64) -> Self {
        Self::new(FailureKind::MinValue, format!("Must be at least {min}"))
            .with_param("minValue", min.to_string())
    }

    /// Number above `max`.
    pub fn max_value(max: f64) -> Self {
        Self::new(FailureKind::MaxValue, format!("Must be at most {max}"))
            .with_param("maxValue", max.to_string())
    }

    /// Date earlier than the bound; `literal` is the rule's `minDate` text.
    pub fn min_date(literal: &str) -> Self {
        let message = if literal == "today" {
            Cow::Borrowed("Date cannot be in the past")
        } else {
            Cow::Owned(format!("Date cannot be earlier than {literal}"))
        };
        Self::new(FailureKind::MinDate, message).with_param("minDate", literal)
    }

    /// A named business rule rejected the value.
    pub fn custom_rule(rule: &str, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(FailureKind::CustomRule, message).with_param("customRule", rule)
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "[{}] {}: {}", field, self.kind, self.message)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

impl std::error::Error for ValidationFailure {}

impl Serialize for ValidationFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("kind", &self.kind)?;
        map.serialize_entry("message", &self.message)?;
        if let Some(field) = &self.field {
            map.serialize_entry("field", field)?;
        }
        if !self.params.is_empty() {
            let params: indexmap::IndexMap<&str, &str> = self
                .params
                .iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            map.serialize_entry("params", &params)?;
        }
        map.end()
    }
}

// ============================================================================
// ERROR COLLECTION
// ============================================================================

/// Failures collected across the fields of one form submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationFailure>,
}

impl ValidationErrors {
    /// Creates a new empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Adds a failure.
    pub fn add(&mut self, error: ValidationFailure) {
        self.errors.push(error);
    }

    /// Returns true if there are any failures.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Number of failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// All failures, in field order.
    #[must_use]
    pub fn errors(&self) -> &[ValidationFailure] {
        &self.errors
    }

    /// The failure recorded for `field`, if any.
    #[must_use]
    pub fn for_field(&self, field: &str) -> Option<&ValidationFailure> {
        self.errors
            .iter()
            .find(|e| e.field.as_deref() == Some(field))
    }

    /// Converts to a Result.
    #[must_use = "result must be used"]
    pub fn into_result<T>(self, ok_value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(ok_value)
        } else {
            Err(self)
        }
    }
}

impl FromIterator<ValidationFailure> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationFailure>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// TESTS
// ============================================================================
