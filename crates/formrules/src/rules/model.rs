//! Wire model for field rules.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::template::MessageTemplates;

// ============================================================================
// VALUE KIND
// ============================================================================

/// Declared value kind of a field.
///
/// Unrecognized `type` strings are kept verbatim in [`ValueKind::Unsupported`]
/// so the compiler can report them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ValueKind {
    String,
    Number,
    Date,
    Boolean,
    Unsupported(String),
}

impl ValueKind {
    /// The `type` attribute text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Date => "date",
            ValueKind::Boolean => "boolean",
            ValueKind::Unsupported(other) => other,
        }
    }

    /// Returns true if the compiler has a dedicated strategy for this kind.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        matches!(self, ValueKind::String | ValueKind::Number | ValueKind::Date)
    }
}

impl From<String> for ValueKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "string" => ValueKind::String,
            "number" => ValueKind::Number,
            "date" => ValueKind::Date,
            "boolean" => ValueKind::Boolean,
            _ => ValueKind::Unsupported(value),
        }
    }
}

impl From<&str> for ValueKind {
    fn from(value: &str) -> Self {
        ValueKind::from(value.to_owned())
    }
}

impl From<ValueKind> for String {
    fn from(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Unsupported(other) => other,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// FIELD RULE
// ============================================================================

/// One field's rule exactly as written in a rule document.
///
/// Every attribute is optional so that resolution can tell "explicitly set on
/// the field" apart from "inherit from the definition".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRule {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ValueKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,

    /// `"today"` or a date string in the compiler's date format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_rule: Option<String>,

    /// `#/definitions/<name>`.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// `errorMessage<Constraint>` templates.
    #[serde(flatten)]
    pub messages: MessageTemplates,
}

impl FieldRule {
    /// Creates an empty rule of the given kind.
    pub fn of_kind(kind: impl Into<ValueKind>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    /// Creates a rule that only references a definition.
    pub fn reference(name: &str) -> Self {
        Self {
            reference: Some(format!("{}{name}", super::DEFINITIONS_PREFIX)),
            ..Self::default()
        }
    }

    /// `self` layered over `base`: attributes set here win, the rest are
    /// inherited. The result never carries a reference.
    #[must_use]
    pub fn merged_over(&self, base: &FieldRule) -> FieldRule {
        FieldRule {
            kind: self.kind.clone().or_else(|| base.kind.clone()),
            required: self.required.or(base.required),
            min_length: self.min_length.or(base.min_length),
            max_length: self.max_length.or(base.max_length),
            pattern: self.pattern.clone().or_else(|| base.pattern.clone()),
            allowed_values: self
                .allowed_values
                .clone()
                .or_else(|| base.allowed_values.clone()),
            min_value: self.min_value.or(base.min_value),
            max_value: self.max_value.or(base.max_value),
            min_date: self.min_date.clone().or_else(|| base.min_date.clone()),
            custom_rule: self.custom_rule.clone().or_else(|| base.custom_rule.clone()),
            reference: None,
            messages: self.messages.merged_over(&base.messages),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::FailureKind;
    use serde_json::json;

    #[test]
    fn value_kind_round_trips_through_strings() {
        let kinds: Vec<ValueKind> =
            serde_json::from_value(json!(["string", "number", "date", "boolean", "currency"]))
                .unwrap();
        assert_eq!(
            kinds,
            vec![
                ValueKind::String,
                ValueKind::Number,
                ValueKind::Date,
                ValueKind::Boolean,
                ValueKind::Unsupported("currency".into()),
            ]
        );
        assert_eq!(
            serde_json::to_value(&kinds).unwrap(),
            json!(["string", "number", "date", "boolean", "currency"])
        );
        assert!(!ValueKind::Boolean.is_supported());
    }

    #[test]
    fn field_rule_reads_wire_shape() {
        let rule: FieldRule = serde_json::from_value(json!({
            "type": "string",
            "required": true,
            "maxLength": 100,
            "allowedValues": ["a", "b"],
            "errorMessageMaxLength": "cannot exceed {maxLength} characters"
        }))
        .unwrap();

        assert_eq!(rule.kind, Some(ValueKind::String));
        assert_eq!(rule.required, Some(true));
        assert_eq!(rule.max_length, Some(100));
        assert_eq!(rule.allowed_values, Some(vec!["a".into(), "b".into()]));
        assert_eq!(
            rule.messages.get(FailureKind::MaxLength),
            Some("cannot exceed {maxLength} characters")
        );
    }

    #[test]
    fn reference_attribute_uses_dollar_ref() {
        let rule: FieldRule =
            serde_json::from_value(json!({"$ref": "#/definitions/accountNumber"})).unwrap();
        assert_eq!(rule.reference.as_deref(), Some("#/definitions/accountNumber"));
        assert_eq!(rule, FieldRule::reference("accountNumber"));
    }

    #[test]
    fn merge_overrides_and_inherits() {
        let base = FieldRule {
            pattern: Some("^[0-9]{8,17}$".into()),
            required: Some(true),
            ..FieldRule::of_kind("string")
        };
        let over = FieldRule {
            max_length: Some(100),
            required: Some(false),
            ..FieldRule::reference("accountNumber")
        };

        let merged = over.merged_over(&base);
        assert_eq!(merged.kind, Some(ValueKind::String));
        assert_eq!(merged.pattern.as_deref(), Some("^[0-9]{8,17}$"));
        assert_eq!(merged.max_length, Some(100));
        assert_eq!(merged.required, Some(false));
        assert_eq!(merged.reference, None);
    }
}
