//! Error-message templates with `{placeholder}` substitution.
//!
//! A rule may carry one template per constraint under its
//! `errorMessage<Constraint>` key. Rendering substitutes only the placeholders
//! whitelisted for the failed constraint (see
//! [`FailureKind::placeholders`]) plus `{field}`; anything else, including
//! unbalanced braces, passes through literally.
//!
//! ```rust,ignore
//! use formrules::template::render;
//!
//! let msg = render("cannot exceed {maxLength} characters", &[("maxLength", "100")]);
//! assert_eq!(msg, "cannot exceed 100 characters");
//! ```

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::Value;

use crate::foundation::{FailureKind, ValidationFailure};

/// Prefix shared by every template key.
pub const MESSAGE_KEY_PREFIX: &str = "errorMessage";

/// Replaces `{name}` tokens found in `params`; unknown tokens are kept as-is.
#[must_use]
pub fn render(template: &str, params: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let name = &after[..close];
        match params.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

// ============================================================================
// MESSAGE TEMPLATES
// ============================================================================

/// The `errorMessage*` attributes of one rule, keyed by attribute name.
///
/// Deserializes from the leftover keys of a rule object: string values under
/// an `errorMessage` prefix are kept, everything else is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTemplates(IndexMap<String, String>);

impl MessageTemplates {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the template for `kind`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, kind: FailureKind, template: impl Into<String>) -> Self {
        self.0.insert(kind.message_key().to_owned(), template.into());
        self
    }

    /// The template for `kind`, if declared.
    #[must_use]
    pub fn get(&self, kind: FailureKind) -> Option<&str> {
        self.0.get(kind.message_key()).map(String::as_str)
    }

    /// Template entries whose key names no known constraint.
    pub fn unknown_keys(&self) -> impl Iterator<Item = &str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|key| FailureKind::from_message_key(key).is_none())
    }

    /// Returns true if no templates are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of declared templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `self` layered over `base`: every key present here wins.
    #[must_use]
    pub fn merged_over(&self, base: &MessageTemplates) -> MessageTemplates {
        let mut merged = base.0.clone();
        for (key, template) in &self.0 {
            merged.insert(key.clone(), template.clone());
        }
        MessageTemplates(merged)
    }

    /// Renders the declared template for `failure`, if there is one.
    #[must_use]
    pub fn render(&self, failure: &ValidationFailure, field: &str) -> Option<String> {
        let template = self.get(failure.kind)?;
        let allowed = failure.kind.placeholders();

        let mut params: Vec<(&str, &str)> = failure
            .params
            .iter()
            .filter(|(key, _)| allowed.contains(key))
            .map(|(key, value)| (*key, value.as_str()))
            .collect();
        params.push(("field", field));

        Some(render(template, &params))
    }
}

impl<'de> Deserialize<'de> for MessageTemplates {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .filter(|(key, _)| key.starts_with(MESSAGE_KEY_PREFIX))
                .filter_map(|(key, value)| match value {
                    Value::String(template) => Some((key, template)),
                    _ => None,
                })
                .collect(),
        ))
    }
}

impl Serialize for MessageTemplates {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
