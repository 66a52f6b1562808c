//! `$ref` expansion.

use indexmap::IndexMap;
use tracing::warn;

use super::model::{FieldRule, ValueKind};
use crate::error::ResolveError;
use crate::template::MessageTemplates;

/// Prefix every `$ref` must carry.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// A field rule with its reference expanded and its kind known.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRule {
    pub kind: ValueKind,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<String>,
    pub allowed_values: Option<Vec<String>>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub min_date: Option<String>,
    pub custom_rule: Option<String>,
    pub messages: MessageTemplates,
}

impl ResolvedRule {
    fn from_merged(field: &str, rule: FieldRule) -> Result<Self, ResolveError> {
        let kind = rule.kind.ok_or_else(|| ResolveError::MissingKind {
            field: field.to_owned(),
        })?;

        Ok(Self {
            kind,
            required: rule.required.unwrap_or(false),
            min_length: rule.min_length,
            max_length: rule.max_length,
            pattern: rule.pattern,
            allowed_values: rule.allowed_values,
            min_value: rule.min_value,
            max_value: rule.max_value,
            min_date: rule.min_date,
            custom_rule: rule.custom_rule,
            messages: rule.messages,
        })
    }
}

/// Resolves one field rule against the shared definitions.
///
/// Without a `$ref` the rule is taken as-is. With one, the named definition
/// supplies every attribute the field does not set itself. A definition's own
/// `$ref` is never followed.
///
/// # Errors
///
/// - [`ResolveError::MalformedReference`] if `$ref` lacks the
///   `#/definitions/` prefix
/// - [`ResolveError::MissingDefinition`] if the named definition is absent
/// - [`ResolveError::MissingKind`] if neither side declares a `type`
pub fn resolve(
    field: &str,
    raw: &FieldRule,
    definitions: &IndexMap<String, FieldRule>,
) -> Result<ResolvedRule, ResolveError> {
    let Some(reference) = raw.reference.as_deref() else {
        return ResolvedRule::from_merged(field, raw.clone());
    };

    let name = reference
        .strip_prefix(DEFINITIONS_PREFIX)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ResolveError::MalformedReference {
            field: field.to_owned(),
            reference: reference.to_owned(),
        })?;

    let definition = definitions
        .get(name)
        .ok_or_else(|| ResolveError::MissingDefinition {
            field: field.to_owned(),
            reference: reference.to_owned(),
        })?;

    if let Some(nested) = &definition.reference {
        warn!(
            field,
            definition = name,
            nested = %nested,
            "Definition carries its own $ref, which is not followed"
        );
    }

    ResolvedRule::from_merged(field, raw.merged_over(definition))
}
