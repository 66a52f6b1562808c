//! Core validation types and traits
//!
//! - **Traits**: [`Validate`], [`ValidateExt`]
//! - **Failures**: [`ValidationFailure`], [`ValidationErrors`], [`FailureKind`]
//!
//! Every constraint a rule can declare is a small [`Validate`] implementation
//! over an already type-checked value (`str`, `f64` or
//! [`NaiveDate`](chrono::NaiveDate)). Compiled field validators chain them in
//! declaration order and stop at the first failure.

pub mod error;
pub mod traits;

pub use error::{FailureKind, FailureParams, ValidationErrors, ValidationFailure};
pub use traits::{Validate, ValidateExt};
