//! Common imports for compiling and running form rules.
//!
//! ```rust,ignore
//! use formrules::prelude::*;
//! ```

pub use crate::calendar::{BusinessCalendar, HolidayCalendar};
pub use crate::clock::{Clock, FixedClock, SystemClock};
pub use crate::compiler::{
    CompiledForm, CompiledValidator, Compiler, CompilerBuilder, CompilerConfig, Diagnostic,
    ValidationOutcome,
};
pub use crate::custom::{CustomRuleRegistry, DateRule, NoWeekendOrHoliday};
pub use crate::error::{ConfigurationError, ResolveError};
pub use crate::foundation::{
    FailureKind, Validate, ValidateExt, ValidationErrors, ValidationFailure,
};
pub use crate::rules::{FieldRule, ResolvedRule, RuleDocument, ValueKind, resolve};
pub use crate::source::{FileSource, InMemorySource, RuleSource, load_form};
pub use crate::template::MessageTemplates;
pub use crate::validators::LengthMode;
