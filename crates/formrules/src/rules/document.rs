//! Rule documents and the shared definitions file.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use super::model::FieldRule;
use super::resolve::{DEFINITIONS_PREFIX, ResolvedRule, resolve};
use crate::error::{ConfigurationError, ResolveError};

/// Field rules for one form plus the definitions they may reference.
///
/// Field order is the declaration order of the rule object. Entries whose
/// rule object has the wrong shape are kept aside with the parse error so a
/// single bad rule never costs the rest of the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleDocument {
    pub fields: IndexMap<String, FieldRule>,
    pub definitions: IndexMap<String, FieldRule>,
    /// Field name to parse error.
    pub malformed_fields: IndexMap<String, String>,
    /// Definition name to parse error.
    pub malformed_definitions: IndexMap<String, String>,
}

impl RuleDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a field rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.fields.insert(name.into(), rule);
        self
    }

    /// Adds or replaces a definition.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_definition(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.definitions.insert(name.into(), rule);
        self
    }

    /// Builds a document from a raw rule object and a raw definitions
    /// document (`{"definitions": {...}}`). A `null` definitions value means
    /// "no definitions".
    ///
    /// Each field rule and each definition is parsed on its own; one that has
    /// the wrong shape lands in [`RuleDocument::malformed_fields`] or
    /// [`RuleDocument::malformed_definitions`] instead of failing the
    /// document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Malformed`] if either document, or its
    /// `definitions` member, is not an object.
    pub fn from_json(rules: &Value, definitions: &Value) -> Result<Self, ConfigurationError> {
        let Value::Object(raw_fields) = rules else {
            return Err(ConfigurationError::malformed(format!(
                "rule document must be an object, found {}",
                json_kind(rules)
            )));
        };
        let (fields, malformed_fields) = parse_rules(raw_fields);

        let (definitions, malformed_definitions) = match definitions {
            Value::Null => (IndexMap::new(), IndexMap::new()),
            Value::Object(document) => match document.get("definitions") {
                None | Some(Value::Null) => (IndexMap::new(), IndexMap::new()),
                Some(Value::Object(raw_definitions)) => parse_rules(raw_definitions),
                Some(other) => {
                    return Err(ConfigurationError::malformed(format!(
                        "'definitions' must be an object, found {}",
                        json_kind(other)
                    )));
                }
            },
            other => {
                return Err(ConfigurationError::malformed(format!(
                    "definitions document must be an object, found {}",
                    json_kind(other)
                )));
            }
        };

        for (name, reason) in &malformed_definitions {
            warn!(definition = %name, %reason, "Skipping malformed definition");
        }

        Ok(Self {
            fields,
            definitions,
            malformed_fields,
            malformed_definitions,
        })
    }

    /// Resolves the rule declared for `field` against this document's
    /// definitions.
    ///
    /// # Errors
    ///
    /// Everything [`resolve`] reports, plus
    /// [`ResolveError::MalformedDefinition`] when the referenced definition
    /// failed to parse.
    pub fn resolve_field(&self, field: &str, raw: &FieldRule) -> Result<ResolvedRule, ResolveError> {
        resolve(field, raw, &self.definitions).map_err(|err| match err {
            ResolveError::MissingDefinition { field, reference } => {
                let reason = reference
                    .strip_prefix(DEFINITIONS_PREFIX)
                    .and_then(|name| self.malformed_definitions.get(name));
                match reason {
                    Some(reason) => ResolveError::MalformedDefinition {
                        field,
                        reason: reason.clone(),
                        reference,
                    },
                    None => ResolveError::MissingDefinition { field, reference },
                }
            }
            other => other,
        })
    }

    /// Parses a document from JSON text.
    ///
    /// # Errors
    ///
    /// See [`RuleDocument::from_json`]; invalid JSON text yields
    /// [`ConfigurationError::Parse`].
    pub fn from_json_str(rules: &str, definitions: Option<&str>) -> Result<Self, ConfigurationError> {
        let rules: Value =
            serde_json::from_str(rules).map_err(|e| ConfigurationError::parse("rule document", e))?;
        let definitions = match definitions {
            Some(text) => serde_json::from_str(text)
                .map_err(|e| ConfigurationError::parse("definitions document", e))?,
            None => Value::Null,
        };
        Self::from_json(&rules, &definitions)
    }

    /// Number of well-formed field rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the document declares no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn parse_rules(raw: &Map<String, Value>) -> (IndexMap<String, FieldRule>, IndexMap<String, String>) {
    let mut rules = IndexMap::with_capacity(raw.len());
    let mut malformed = IndexMap::new();
    for (name, value) in raw {
        match FieldRule::deserialize(value) {
            Ok(rule) => {
                rules.insert(name.clone(), rule);
            }
            Err(err) => {
                malformed.insert(name.clone(), err.to_string());
            }
        }
    }
    (rules, malformed)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ValueKind;
    use serde_json::json;

    #[test]
    fn preserves_field_order() {
        let doc = RuleDocument::from_json(
            &json!({
                "zeta": {"type": "string"},
                "alpha": {"type": "number"},
                "mid": {"type": "date"}
            }),
            &Value::Null,
        )
        .unwrap();

        assert_eq!(
            doc.fields.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["zeta", "alpha", "mid"]
        );
        assert!(doc.definitions.is_empty());
    }

    #[test]
    fn reads_definitions_document() {
        let doc = RuleDocument::from_json(
            &json!({"account": {"$ref": "#/definitions/accountNumber"}}),
            &json!({"definitions": {"accountNumber": {"type": "string", "pattern": "^[0-9]{8,17}$"}}}),
        )
        .unwrap();

        let def = &doc.definitions["accountNumber"];
        assert_eq!(def.kind, Some(ValueKind::String));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn rejects_non_object_documents() {
        let err = RuleDocument::from_json(&json!([1, 2]), &Value::Null).unwrap_err();
        assert!(matches!(err, ConfigurationError::Malformed { .. }));

        let err = RuleDocument::from_json(&json!({}), &json!("nope")).unwrap_err();
        assert!(matches!(err, ConfigurationError::Malformed { .. }));
    }

    #[test]
    fn badly_shaped_rules_are_set_aside() {
        let doc = RuleDocument::from_json(
            &json!({
                "routingNumber": {"type": "string", "pattern": "^[0-9]{9}$"},
                "amount": {"type": "number", "minValue": "0.01"},
                "memo": null,
                "code": {"type": 5},
                "agree": {"type": "boolean", "required": "yes"}
            }),
            &Value::Null,
        )
        .unwrap();

        assert_eq!(doc.fields.keys().collect::<Vec<_>>(), vec!["routingNumber"]);
        assert_eq!(
            doc.malformed_fields.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["amount", "memo", "code", "agree"]
        );
    }

    #[test]
    fn malformed_definition_only_affects_its_references() {
        let doc = RuleDocument::from_json(
            &json!({
                "account": {"$ref": "#/definitions/accountNumber"},
                "routing": {"$ref": "#/definitions/routingNumber"}
            }),
            &json!({"definitions": {
                "accountNumber": {"type": "string", "maxLength": "100"},
                "routingNumber": {"type": "string", "pattern": "^[0-9]{9}$"}
            }}),
        )
        .unwrap();

        assert!(doc.malformed_definitions.contains_key("accountNumber"));
        assert!(doc.resolve_field("routing", &doc.fields["routing"]).is_ok());
        assert!(matches!(
            doc.resolve_field("account", &doc.fields["account"]),
            Err(ResolveError::MalformedDefinition { ref reference, .. })
                if reference == "#/definitions/accountNumber"
        ));
    }

    #[test]
    fn definitions_member_must_be_an_object() {
        let err = RuleDocument::from_json(&json!({}), &json!({"definitions": [1]})).unwrap_err();
        assert!(matches!(err, ConfigurationError::Malformed { .. }));
        assert!(RuleDocument::from_json(&json!({}), &json!({})).is_ok());
    }

    #[test]
    fn parses_from_text() {
        let doc = RuleDocument::from_json_str(r#"{"memo": {"type": "string"}}"#, None).unwrap();
        assert_eq!(doc.len(), 1);
        assert!(RuleDocument::from_json_str("{", None).is_err());
    }
}
