//! The compiled validator set for one rule document.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::diagnostic::Diagnostic;
use super::validator::{CompiledValidator, ValidationOutcome};
use crate::foundation::{ValidationErrors, ValidationFailure};

/// Validators for every field that compiled, in declaration order, plus the
/// diagnostics recorded while compiling.
#[derive(Debug, Default)]
pub struct CompiledForm {
    validators: IndexMap<String, CompiledValidator>,
    diagnostics: Vec<Diagnostic>,
}

impl CompiledForm {
    pub(crate) fn new(
        validators: IndexMap<String, CompiledValidator>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            validators,
            diagnostics,
        }
    }

    /// The validator for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&CompiledValidator> {
        self.validators.get(field)
    }

    /// Returns true if `field` compiled.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.validators.contains_key(field)
    }

    /// Validates one field's value. Fields without a validator accept
    /// anything.
    ///
    /// # Errors
    ///
    /// Returns the field's first failing constraint.
    pub fn validate_field(&self, field: &str, value: &Value) -> Result<(), ValidationFailure> {
        match self.validators.get(field) {
            Some(validator) => validator.validate(value),
            None => Ok(()),
        }
    }

    /// Validates a whole submission. Keys missing from `values` are absent.
    ///
    /// # Errors
    ///
    /// Returns one failure per failing field, in declaration order.
    pub fn validate_form(&self, values: &Map<String, Value>) -> Result<(), ValidationErrors> {
        self.validators
            .iter()
            .filter_map(|(name, validator)| validator.validate_opt(values.get(name)).err())
            .collect::<ValidationErrors>()
            .into_result(())
    }

    /// Per-field outcomes for a submission, in declaration order.
    #[must_use]
    pub fn outcomes(&self, values: &Map<String, Value>) -> IndexMap<String, ValidationOutcome> {
        self.validators
            .iter()
            .map(|(name, validator)| {
                (
                    name.clone(),
                    validator.validate_opt(values.get(name)).into(),
                )
            })
            .collect()
    }

    /// Compiled field names, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.validators.keys().map(String::as_str)
    }

    /// Diagnostics recorded while compiling.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics about `field`.
    pub fn diagnostics_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.field() == field)
    }

    /// Number of compiled fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Returns true if no field compiled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}
