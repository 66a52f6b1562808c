//! CHAIN combinator - ordered conjunction of boxed checks
//!
//! A compiled field validator does not know its constraints until the rule
//! document is read, so the checks are boxed and stored in declaration order.
//! The first failing check wins and later checks are not run.
//!
//! # Examples
//!
//! ```rust,ignore
//! use formrules::combinators::Chain;
//! use formrules::foundation::Validate;
//!
//! let chain = Chain::new().then(min_length(8)).then(max_length(17));
//! assert!(chain.validate("12345678").is_ok());
//! assert!(chain.validate("1234").is_err()); // fails min_length, max_length never runs
//! ```

use std::fmt;

use crate::foundation::{Validate, ValidationFailure};

type Link<I> = Box<dyn Validate<Input = I> + Send + Sync>;

/// An ordered list of checks over the same input type.
pub struct Chain<I: ?Sized> {
    links: Vec<Link<I>>,
}

impl<I: ?Sized> Chain<I> {
    /// Creates an empty chain, which accepts every input.
    #[must_use]
    pub fn new() -> Self {
        Self { links: Vec::new() }
    }

    /// Appends a check.
    pub fn push<V>(&mut self, check: V)
    where
        V: Validate<Input = I> + Send + Sync + 'static,
    {
        self.links.push(Box::new(check));
    }

    /// Appends a check, builder style.
    #[must_use = "builder methods must be chained or built"]
    pub fn then<V>(mut self, check: V) -> Self
    where
        V: Validate<Input = I> + Send + Sync + 'static,
    {
        self.push(check);
        self
    }

    /// Number of checks in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns true if the chain holds no checks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl<I: ?Sized> Default for Chain<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ?Sized> fmt::Debug for Chain<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("links", &self.links.len())
            .finish()
    }
}

impl<I: ?Sized> Validate for Chain<I> {
    type Input = I;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationFailure> {
        for link in &self.links {
            link.validate(input)?;
        }
        Ok(())
    }
}
