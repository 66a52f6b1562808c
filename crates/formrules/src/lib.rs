//! # formrules
//!
//! Compiles declarative, JSON-described field rules into executable per-field
//! validators with parameterized error messages.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use formrules::prelude::*;
//! use serde_json::json;
//!
//! let rules = json!({
//!     "routingNumber": {
//!         "type": "string",
//!         "required": true,
//!         "pattern": "^[0-9]{9}$",
//!         "errorMessagePattern": "Routing number must be 9 digits"
//!     }
//! });
//!
//! let form = Compiler::default().compile_json(&rules, &json!({}))?;
//! assert!(form.validate_field("routingNumber", &json!("123456789")).is_ok());
//! ```
//!
//! ## Pipeline
//!
//! - [`source::RuleSource`] supplies a [`rules::RuleDocument`] for a form id.
//! - [`rules::resolve`] expands `$ref` rules against the document's definitions.
//! - [`compiler::Compiler`] turns every resolved rule into a
//!   [`compiler::CompiledValidator`], dispatching on the declared value kind.
//! - Date fields consult the [`custom::CustomRuleRegistry`], whose built-in
//!   `noWeekendOrHoliday` rule is backed by a [`calendar::BusinessCalendar`].
//!
//! Malformed rules never abort a compile: the offending field is dropped or
//! degraded and a [`compiler::Diagnostic`] is recorded instead.

// ValidationFailure is the Err type of every check.
#![allow(clippy::result_large_err)]

pub mod calendar;
pub mod clock;
pub mod combinators;
pub mod compiler;
pub mod custom;
pub mod error;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod rules;
pub mod source;
pub mod template;
pub mod validators;
