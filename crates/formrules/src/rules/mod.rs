//! Rule documents, field rules, and reference resolution.

pub mod document;
pub mod model;
pub mod resolve;

pub use document::RuleDocument;
pub use model::{FieldRule, ValueKind};
pub use resolve::{DEFINITIONS_PREFIX, ResolvedRule, resolve};
