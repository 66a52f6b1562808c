//! Core traits for constraint checks.

use crate::combinators::Chain;
use crate::foundation::ValidationFailure;

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// A single constraint check over an already type-checked value.
///
/// Implementations are pure: the same input always yields the same result,
/// except for checks that read a [`Clock`](crate::clock::Clock).
///
/// # Examples
///
/// ```rust,ignore
/// use formrules::foundation::{Validate, ValidationFailure};
///
/// struct NonZero;
///
/// impl Validate for NonZero {
///     type Input = f64;
///
///     fn validate(&self, input: &f64) -> Result<(), ValidationFailure> {
///         if *input != 0.0 {
///             Ok(())
///         } else {
///             Err(ValidationFailure::min_value(f64::MIN_POSITIVE))
///         }
///     }
/// }
/// ```
pub trait Validate {
    /// The type of input being validated.
    ///
    /// `?Sized` so string checks can take `str`.
    type Input: ?Sized;

    /// Validates the input value.
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationFailure>;
}

// ============================================================================
// VALIDATOR EXTENSION TRAIT
// ============================================================================

/// Extension methods available on every [`Validate`] implementation.
pub trait ValidateExt: Validate + Sized {
    /// Chains another check after this one. The first failure wins.
    ///
    /// ```rust,ignore
    /// let length = min_length(8).then(max_length(17));
    /// assert!(length.validate("12345678").is_ok());
    /// ```
    fn then<V>(self, other: V) -> Chain<Self::Input>
    where
        Self: Send + Sync + 'static,
        V: Validate<Input = Self::Input> + Send + Sync + 'static,
    {
        Chain::new().then(self).then(other)
    }

    /// Boxes the check for storage in a heterogeneous chain.
    fn boxed(self) -> Box<dyn Validate<Input = Self::Input> + Send + Sync>
    where
        Self: Send + Sync + 'static,
    {
        Box::new(self)
    }
}

impl<T: Validate> ValidateExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::FailureKind;

    struct AlwaysValid;

    impl Validate for AlwaysValid {
        type Input = str;

        fn validate(&self, _input: &Self::Input) -> Result<(), ValidationFailure> {
            Ok(())
        }
    }

    struct AlwaysFails(FailureKind);

    impl Validate for AlwaysFails {
        type Input = str;

        fn validate(&self, _input: &Self::Input) -> Result<(), ValidationFailure> {
            Err(ValidationFailure::new(self.0, "fails"))
        }
    }

    #[test]
    fn then_short_circuits_on_first_failure() {
        let chain = AlwaysFails(FailureKind::MinLength).then(AlwaysFails(FailureKind::Pattern));
        let err = chain.validate("x").unwrap_err();
        assert_eq!(err.kind, FailureKind::MinLength);
    }

    #[test]
    fn then_runs_second_when_first_passes() {
        let chain = AlwaysValid.then(AlwaysFails(FailureKind::Pattern));
        assert_eq!(chain.validate("x").unwrap_err().kind, FailureKind::Pattern);
    }

    #[test]
    fn boxed_keeps_behavior() {
        let boxed = AlwaysValid.boxed();
        assert!(boxed.validate("anything").is_ok());
    }
}
