#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Literals as signed integers.
//!
//! A literal wraps a nonzero `i32`: `v` asserts variable `v` true and `-v`
//! asserts it false. This is the same convention DIMACS uses, and the one the
//! Sudoku encoder numbers its variables in.

use core::fmt;
use core::ops::{Neg, Not};

/// A propositional variable, numbered from 1.
pub type Variable = u32;

/// A signed literal over a [`Variable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal(i32);

impl Literal {
    /// Creates the literal for `var` with the given polarity (`true` for the
    /// positive literal).
    ///
    /// # Panics
    ///
    /// If `var` is zero or does not fit in an `i32`.
    #[must_use]
    pub fn new(var: Variable, polarity: bool) -> Self {
        assert!(var != 0, "variable 0 has no literal");
        let var = i32::try_from(var).expect("literal variable overflowed");

        if polarity { Self(var) } else { Self(-var) }
    }

    /// Wraps a signed integer in DIMACS convention.
    ///
    /// # Panics
    ///
    /// If `value` is zero.
    #[must_use]
    pub const fn from_i32(value: i32) -> Self {
        assert!(value != 0, "0 is not a literal");
        Self(value)
    }

    #[must_use]
    pub const fn to_i32(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn variable(self) -> Variable {
        self.0.unsigned_abs()
    }

    /// `true` for a positive literal.
    #[must_use]
    pub const fn polarity(self) -> bool {
        self.0.is_positive()
    }

    #[must_use]
    pub const fn negated(self) -> Self {
        Self(-self.0)
    }

    /// Two literals are complementary iff one is the negation of the other.
    #[must_use]
    pub const fn is_complement_of(self, other: Self) -> bool {
        self.0 == -other.0
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Self::from_i32(value)
    }
}

impl From<Literal> for i32 {
    fn from(lit: Literal) -> Self {
        lit.0
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_neg() {
        assert_eq!(Literal::new(1, false).negated(), Literal::new(1, true));
        assert_eq!(-Literal::new(1, true), Literal::new(1, false));
        assert_eq!(!Literal::from(-7), Literal::from(7));
    }

    #[test]
    fn test_variable_and_polarity() {
        let lit = Literal::from(-42);
        assert_eq!(lit.variable(), 42);
        assert!(!lit.polarity());
        assert!(Literal::from(42).polarity());
    }

    #[test]
    fn test_complement() {
        assert!(Literal::from(3).is_complement_of(Literal::from(-3)));
        assert!(!Literal::from(3).is_complement_of(Literal::from(3)));
        assert!(!Literal::from(3).is_complement_of(Literal::from(-4)));
    }

    #[test]
    #[should_panic(expected = "0 is not a literal")]
    fn test_zero_is_rejected() {
        let _ = Literal::from(0);
    }
}
