//! Rule compiler
//!
//! Turns a [`RuleDocument`] into a [`CompiledForm`]. Every field compiles on
//! its own: a rule that cannot be resolved drops only that field, and a
//! constraint that cannot be honored is skipped. Both leave a
//! [`Diagnostic`] on the form.
//!
//! ```rust,ignore
//! use formrules::prelude::*;
//!
//! let compiler = Compiler::builder()
//!     .config(CompilerConfig::default().with_length_mode(LengthMode::Bytes))
//!     .clock(FixedClock::new(today))
//!     .build();
//!
//! let form = compiler.compile(&document);
//! for diagnostic in form.diagnostics() {
//!     eprintln!("{diagnostic}");
//! }
//! ```

pub mod config;
pub mod diagnostic;
pub mod form;
mod strategy;
pub mod validator;

use std::sync::Arc;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::calendar::BusinessCalendar;
use crate::clock::{Clock, SystemClock};
use crate::combinators::Chain;
use crate::custom::{CustomRuleRegistry, DateRule, NO_WEEKEND_OR_HOLIDAY, NoWeekendOrHoliday};
use crate::error::{ConfigurationError, ResolveError};
use crate::rules::{ResolvedRule, RuleDocument, ValueKind};
use crate::validators::{
    AllowedValues, CustomDate, DateBound, MaxLength, MaxValue, MinLength, MinValue, NotBefore,
    Pattern,
};

pub use config::{CompilerConfig, DEFAULT_DATE_FORMAT};
pub use diagnostic::Diagnostic;
pub use form::CompiledForm;
pub use validator::{CompiledValidator, ValidationOutcome};

use strategy::{Strategy, parse_date};

/// `minDate` value meaning "the clock's current date".
pub const MIN_DATE_TODAY: &str = "today";

// ============================================================================
// COMPILER
// ============================================================================

/// Compiles rule documents. Cheap to clone and safe to share.
#[derive(Debug, Clone)]
pub struct Compiler {
    config: CompilerConfig,
    clock: Arc<dyn Clock>,
    registry: Arc<CustomRuleRegistry>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Compiler {
    /// Starts a builder with default settings, the system clock, and the
    /// built-in custom rules.
    #[must_use]
    pub fn builder() -> CompilerBuilder {
        CompilerBuilder::default()
    }

    /// Settings this compiler applies.
    #[must_use]
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Custom rules available to `customRule`.
    #[must_use]
    pub fn registry(&self) -> &CustomRuleRegistry {
        &self.registry
    }

    /// Compiles every field of `document`.
    #[must_use]
    pub fn compile(&self, document: &RuleDocument) -> CompiledForm {
        let mut validators = IndexMap::with_capacity(document.fields.len());
        let mut diagnostics = Vec::new();

        for (field, reason) in &document.malformed_fields {
            report(
                &mut diagnostics,
                Diagnostic::Unresolved(ResolveError::MalformedRule {
                    field: field.clone(),
                    reason: reason.clone(),
                }),
            );
        }

        for (field, raw) in &document.fields {
            match document.resolve_field(field, raw) {
                Ok(rule) => {
                    let validator = self.compile_rule(field, &rule, &mut diagnostics);
                    debug!(
                        field = %field,
                        kind = %validator.kind(),
                        required = validator.is_required(),
                        constraints = validator.constraint_count(),
                        "Compiled field validator"
                    );
                    validators.insert(field.clone(), validator);
                }
                Err(err) => report(&mut diagnostics, Diagnostic::Unresolved(err)),
            }
        }

        info!(
            fields = validators.len(),
            dropped = diagnostics.iter().filter(|d| d.drops_field()).count(),
            diagnostics = diagnostics.len(),
            "Compiled rule document"
        );

        CompiledForm::new(validators, diagnostics)
    }

    /// Parses raw rule and definitions documents, then compiles them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if either document is malformed.
    pub fn compile_json(
        &self,
        rules: &Value,
        definitions: &Value,
    ) -> Result<CompiledForm, ConfigurationError> {
        let document = RuleDocument::from_json(rules, definitions)?;
        Ok(self.compile(&document))
    }

    fn compile_rule(
        &self,
        field: &str,
        rule: &ResolvedRule,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> CompiledValidator {
        let strategy = match &rule.kind {
            ValueKind::String => Strategy::Text {
                chain: self.text_chain(field, rule, diagnostics),
                trim: self.config.trim_strings,
            },
            ValueKind::Number => Strategy::Number {
                chain: number_chain(rule),
            },
            ValueKind::Date => Strategy::Date {
                chain: self.date_chain(field, rule, diagnostics),
                format: self.config.date_format.clone(),
            },
            other @ (ValueKind::Boolean | ValueKind::Unsupported(_)) => {
                report(
                    diagnostics,
                    Diagnostic::UnsupportedKind {
                        field: field.to_owned(),
                        kind: other.to_string(),
                    },
                );
                Strategy::Presence
            }
        };

        for key in rule.messages.unknown_keys() {
            report(
                diagnostics,
                Diagnostic::UnknownMessageKey {
                    field: field.to_owned(),
                    key: key.to_owned(),
                },
            );
        }

        CompiledValidator::new(
            field,
            rule.kind.clone(),
            rule.required,
            rule.messages.clone(),
            strategy,
        )
    }

    fn text_chain(
        &self,
        field: &str,
        rule: &ResolvedRule,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Chain<str> {
        let mode = self.config.length_mode;
        let mut chain = Chain::new();

        if let Some(min) = rule.min_length {
            chain.push(MinLength::new(min).with_mode(mode));
        }
        if let Some(max) = rule.max_length {
            chain.push(MaxLength::new(max).with_mode(mode));
        }
        if let Some(source) = &rule.pattern {
            match Pattern::new(source) {
                Ok(pattern) => chain.push(pattern),
                Err(err) => report(
                    diagnostics,
                    Diagnostic::InvalidPattern {
                        field: field.to_owned(),
                        pattern: source.clone(),
                        reason: err.to_string(),
                    },
                ),
            }
        }
        if let Some(values) = &rule.allowed_values {
            chain.push(AllowedValues::new(values.clone()));
        }

        chain
    }

    fn date_chain(
        &self,
        field: &str,
        rule: &ResolvedRule,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Chain<NaiveDate> {
        let mut chain = Chain::new();

        if let Some(literal) = &rule.min_date {
            let bound = if literal == MIN_DATE_TODAY {
                Some(DateBound::Today(Arc::clone(&self.clock)))
            } else {
                parse_date(literal, &self.config.date_format).map(DateBound::Fixed)
            };
            match bound {
                Some(bound) => chain.push(NotBefore::new(bound, literal.as_str())),
                None => report(
                    diagnostics,
                    Diagnostic::InvalidMinDate {
                        field: field.to_owned(),
                        value: literal.clone(),
                    },
                ),
            }
        }

        if let Some(name) = &rule.custom_rule {
            match self.registry.get(name) {
                Some(custom) => chain.push(CustomDate::new(name.as_str(), custom)),
                None => report(
                    diagnostics,
                    Diagnostic::UnknownCustomRule {
                        field: field.to_owned(),
                        rule: name.clone(),
                    },
                ),
            }
        }

        chain
    }
}

fn number_chain(rule: &ResolvedRule) -> Chain<f64> {
    let mut chain = Chain::new();
    if let Some(min) = rule.min_value {
        chain.push(MinValue::new(min));
    }
    if let Some(max) = rule.max_value {
        chain.push(MaxValue::new(max));
    }
    chain
}

fn report(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    warn!(field = diagnostic.field(), "{diagnostic}");
    diagnostics.push(diagnostic);
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for [`Compiler`].
#[derive(Debug)]
pub struct CompilerBuilder {
    config: CompilerConfig,
    clock: Arc<dyn Clock>,
    registry: CustomRuleRegistry,
}

impl Default for CompilerBuilder {
    fn default() -> Self {
        Self {
            config: CompilerConfig::default(),
            clock: Arc::new(SystemClock),
            registry: CustomRuleRegistry::default(),
        }
    }
}

impl CompilerBuilder {
    /// Replaces the settings.
    #[must_use = "builder methods must be chained or built"]
    pub fn config(mut self, config: CompilerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the clock used for `minDate: "today"`.
    #[must_use = "builder methods must be chained or built"]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Rebinds the built-in `noWeekendOrHoliday` rule to `calendar`.
    #[must_use = "builder methods must be chained or built"]
    pub fn calendar(mut self, calendar: Arc<dyn BusinessCalendar>) -> Self {
        self.registry
            .register(NO_WEEKEND_OR_HOLIDAY, NoWeekendOrHoliday::new(calendar));
        self
    }

    /// Registers a custom date rule, replacing any rule of the same name.
    #[must_use = "builder methods must be chained or built"]
    pub fn custom_rule(mut self, name: impl Into<String>, rule: impl DateRule + 'static) -> Self {
        self.registry.register(name, rule);
        self
    }

    /// Replaces the whole custom-rule registry.
    #[must_use = "builder methods must be chained or built"]
    pub fn registry(mut self, registry: CustomRuleRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Builds the compiler.
    #[must_use]
    pub fn build(self) -> Compiler {
        Compiler {
            config: self.config,
            clock: self.clock,
            registry: Arc::new(self.registry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::HolidayCalendar;
    use crate::clock::FixedClock;
    use crate::foundation::FailureKind;
    use crate::validators::LengthMode;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn compiler() -> Compiler {
        Compiler::builder()
            .clock(FixedClock::new(date(2025, 6, 2)))
            .build()
    }

    #[test]
    fn compiles_each_kind() {
        let form = compiler()
            .compile_json(
                &json!({
                    "payee": {"type": "string", "required": true, "maxLength": 40},
                    "amount": {"type": "number", "minValue": 0.01},
                    "paymentDate": {"type": "date", "minDate": "today"},
                    "agree": {"type": "boolean", "required": true}
                }),
                &Value::Null,
            )
            .unwrap();

        assert_eq!(form.len(), 4);
        assert_eq!(
            form.fields().collect::<Vec<_>>(),
            vec!["payee", "amount", "paymentDate", "agree"]
        );
        assert_eq!(form.get("amount").unwrap().kind(), &ValueKind::Number);
        assert_eq!(form.diagnostics().len(), 1);
        assert!(matches!(
            form.diagnostics()[0],
            Diagnostic::UnsupportedKind { ref kind, .. } if kind == "boolean"
        ));
    }

    #[test]
    fn unresolved_field_is_dropped() {
        let form = compiler()
            .compile_json(
                &json!({
                    "payee": {"$ref": "#/definitions/doesNotExist"},
                    "memo": {"type": "string"}
                }),
                &json!({"definitions": {}}),
            )
            .unwrap();

        assert!(!form.contains("payee"));
        assert!(form.contains("memo"));
        assert!(form.diagnostics_for("payee").all(Diagnostic::drops_field));
        assert!(form.validate_field("payee", &json!("anything")).is_ok());
    }

    #[test]
    fn badly_typed_rule_drops_only_that_field() {
        let form = compiler()
            .compile_json(
                &json!({
                    "routingNumber": {"type": "string", "pattern": "^[0-9]{9}$"},
                    "amount": {"type": "number", "minValue": "0.01"}
                }),
                &Value::Null,
            )
            .unwrap();

        assert_eq!(form.fields().collect::<Vec<_>>(), vec!["routingNumber"]);
        assert!(form.validate_field("routingNumber", &json!("123456789")).is_ok());
        assert_eq!(
            form.validate_field("routingNumber", &json!("12345")).unwrap_err().kind,
            FailureKind::Pattern
        );

        assert!(matches!(
            form.diagnostics(),
            [Diagnostic::Unresolved(ResolveError::MalformedRule { field, .. })] if field == "amount"
        ));
        assert!(form.diagnostics()[0].drops_field());
    }

    #[test]
    fn malformed_definition_drops_its_references() {
        let form = compiler()
            .compile_json(
                &json!({
                    "accountNumber": {"$ref": "#/definitions/accountNumber"},
                    "routingNumber": {"$ref": "#/definitions/routingNumber"}
                }),
                &json!({"definitions": {
                    "accountNumber": {"type": "string", "maxLength": "17"},
                    "routingNumber": {"type": "string", "pattern": "^[0-9]{9}$"}
                }}),
            )
            .unwrap();

        assert!(!form.contains("accountNumber"));
        assert!(form.contains("routingNumber"));
        assert!(matches!(
            form.diagnostics(),
            [Diagnostic::Unresolved(ResolveError::MalformedDefinition { field, .. })]
                if field == "accountNumber"
        ));
    }

    #[test]
    fn unknown_message_key_is_reported() {
        let form = compiler()
            .compile_json(
                &json!({"name": {
                    "type": "string",
                    "maxLength": 3,
                    "errorMessageMaxlength": "too long",
                    "errorMessageMaxLength": "at most {maxLength}"
                }}),
                &Value::Null,
            )
            .unwrap();

        assert_eq!(
            form.diagnostics(),
            &[Diagnostic::UnknownMessageKey {
                field: "name".into(),
                key: "errorMessageMaxlength".into(),
            }]
        );
        assert!(!form.diagnostics()[0].drops_field());
        assert_eq!(
            form.validate_field("name", &json!("abcd")).unwrap_err().message,
            "at most 3"
        );
    }

    #[test]
    fn min_date_literal_must_be_fixed_width() {
        let form = compiler()
            .compile_json(
                &json!({
                    "loose": {"type": "date", "minDate": "2025-6-7"},
                    "strict": {"type": "date", "minDate": "2025-06-07"}
                }),
                &Value::Null,
            )
            .unwrap();

        assert!(matches!(
            form.diagnostics(),
            [Diagnostic::InvalidMinDate { field, .. }] if field == "loose"
        ));
        assert_eq!(form.get("strict").unwrap().constraint_count(), 1);
        assert_eq!(
            form.validate_field("strict", &json!("2025-6-9")).unwrap_err().kind,
            FailureKind::Type
        );
    }

    #[test]
    fn invalid_pattern_skips_only_that_check() {
        let form = compiler()
            .compile_json(
                &json!({"code": {"type": "string", "pattern": "([0-9", "maxLength": 3}}),
                &Value::Null,
            )
            .unwrap();

        assert!(matches!(
            form.diagnostics(),
            [Diagnostic::InvalidPattern { .. }]
        ));
        assert!(form.validate_field("code", &json!("abc")).is_ok());
        assert_eq!(
            form.validate_field("code", &json!("abcd")).unwrap_err().kind,
            FailureKind::MaxLength
        );
    }

    #[test]
    fn unknown_custom_rule_and_bad_min_date_are_reported() {
        let form = compiler()
            .compile_json(
                &json!({"d": {"type": "date", "minDate": "yesterday", "customRule": "noFullMoon"}}),
                &Value::Null,
            )
            .unwrap();

        assert_eq!(form.diagnostics().len(), 2);
        assert_eq!(form.get("d").unwrap().constraint_count(), 0);
        assert!(form.validate_field("d", &json!("2000-01-01")).is_ok());
    }

    #[test]
    fn constraints_for_other_kinds_are_ignored() {
        let form = compiler()
            .compile_json(
                &json!({"amount": {"type": "number", "pattern": "^x$", "maxLength": 1}}),
                &Value::Null,
            )
            .unwrap();
        assert!(form.diagnostics().is_empty());
        assert!(form.validate_field("amount", &json!(12345)).is_ok());
    }

    #[test]
    fn byte_length_mode_applies() {
        let compiler = Compiler::builder()
            .config(CompilerConfig::default().with_length_mode(LengthMode::Bytes))
            .build();
        let form = compiler
            .compile_json(&json!({"name": {"type": "string", "maxLength": 5}}), &Value::Null)
            .unwrap();
        assert!(form.validate_field("name", &json!("héllo")).is_err());
    }

    #[test]
    fn untrimmed_strings_count_whitespace() {
        let compiler = Compiler::builder()
            .config(CompilerConfig::default().with_trim_strings(false))
            .build();
        let form = compiler
            .compile_json(&json!({"name": {"type": "string", "maxLength": 3}}), &Value::Null)
            .unwrap();
        assert!(form.validate_field("name", &json!(" abc ")).is_err());
    }

    #[test]
    fn custom_date_format() {
        let compiler = Compiler::builder()
            .config(CompilerConfig::default().with_date_format("%m/%d/%Y"))
            .build();
        let form = compiler
            .compile_json(
                &json!({"d": {"type": "date", "minDate": "01/01/2025"}}),
                &Value::Null,
            )
            .unwrap();
        assert!(form.diagnostics().is_empty());
        assert!(form.validate_field("d", &json!("06/02/2025")).is_ok());
        assert_eq!(
            form.validate_field("d", &json!("2025-06-02")).unwrap_err().kind,
            FailureKind::Type
        );
        assert_eq!(
            form.validate_field("d", &json!("12/31/2024")).unwrap_err().kind,
            FailureKind::MinDate
        );
    }

    #[test]
    fn injected_calendar_rebinds_builtin_rule() {
        let calendar = Arc::new(HolidayCalendar::from_dates(
            "company",
            [date(2025, 6, 3)],
        ));
        let compiler = Compiler::builder().calendar(calendar).build();
        let form = compiler
            .compile_json(
                &json!({"d": {"type": "date", "customRule": "noWeekendOrHoliday"}}),
                &Value::Null,
            )
            .unwrap();

        assert_eq!(
            form.validate_field("d", &json!("2025-06-03")).unwrap_err().kind,
            FailureKind::CustomRule
        );
        // July 4th is not a holiday in the injected calendar.
        assert!(form.validate_field("d", &json!("2025-07-04")).is_ok());
    }

    #[test]
    fn compiler_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Compiler>();
        assert_send_sync::<CompiledForm>();
        assert_send_sync::<CompiledValidator>();
    }
}
