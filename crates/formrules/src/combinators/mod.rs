//! Combinators for composing constraint checks.

pub mod chain;

pub use chain::Chain;
