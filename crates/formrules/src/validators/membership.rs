//! Set-membership check.

use crate::foundation::ValidationFailure;

crate::validator! {
    /// Validates that a string is one of a fixed set of values (case-sensitive).
    #[derive(PartialEq, Eq)]
    pub AllowedValues { values: Vec<String> } for str;
    rule(self, input) { self.values.iter().any(|v| v == input) }
    error(self, input) { ValidationFailure::not_allowed(&self.values) }
    fn allowed_values(values: Vec<String>);
}
