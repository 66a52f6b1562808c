//! Built-in constraint checks
//!
//! One check per constraint a field rule can declare:
//!
//! - **String**: [`MinLength`], [`MaxLength`], [`Pattern`], [`AllowedValues`]
//! - **Numeric**: [`MinValue`], [`MaxValue`]
//! - **Date**: [`NotBefore`], [`CustomDate`]
//!
//! Checks assume their input already passed the field's type check; the
//! compiler is responsible for trimming, coercion, and date parsing.

pub mod date;
pub mod length;
pub mod membership;
pub mod pattern;
pub mod range;

pub use date::{CustomDate, DateBound, NotBefore};
pub use length::{LengthMode, MaxLength, MinLength, max_length, min_length};
pub use membership::{AllowedValues, allowed_values};
pub use pattern::{Pattern, pattern};
pub use range::{MaxValue, MinValue, max_value, min_value};
