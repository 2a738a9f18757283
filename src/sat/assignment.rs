#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Partial truth assignments.
//!
//! An [`Assignment`] is the ordered sequence of literals made true so far,
//! plus a per-variable lookup table so membership tests are O(1). It is small
//! and cheap to clone, which is how DPLL gives each branch its own copy.

use crate::sat::literal::{Literal, Variable};
use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Copy, Default, Hash, PartialOrd, Ord)]
pub enum VarState {
    #[default]
    Unassigned,
    Assigned(bool),
}

impl VarState {
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        matches!(self, Self::Assigned(_))
    }

    #[must_use]
    pub const fn is_unassigned(self) -> bool {
        !self.is_assigned()
    }

    #[must_use]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::Assigned(true))
    }

    #[must_use]
    pub const fn is_false(self) -> bool {
        matches!(self, Self::Assigned(false))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    trail: Vec<Literal>,
    values: Vec<VarState>,
}

impl Assignment {
    /// An empty assignment with room for variables `1..=num_vars`. Larger
    /// variables are still accepted; the table grows on demand.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            trail: Vec::new(),
            values: vec![VarState::Unassigned; num_vars + 1],
        }
    }

    /// Appends `lit` to the assignment.
    ///
    /// Returns `false`, leaving the assignment unchanged, if the variable of
    /// `lit` already has a value.
    pub fn assign(&mut self, lit: Literal) -> bool {
        let var = lit.variable() as usize;
        if var >= self.values.len() {
            self.values.resize(var + 1, VarState::Unassigned);
        }
        if self.values[var].is_assigned() {
            return false;
        }
        self.values[var] = VarState::Assigned(lit.polarity());
        self.trail.push(lit);
        true
    }

    #[must_use]
    pub fn var_state(&self, var: Variable) -> VarState {
        self.values
            .get(var as usize)
            .copied()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn var_value(&self, var: Variable) -> Option<bool> {
        match self.var_state(var) {
            VarState::Assigned(b) => Some(b),
            VarState::Unassigned => None,
        }
    }

    #[must_use]
    pub fn literal_value(&self, lit: Literal) -> Option<bool> {
        self.var_value(lit.variable())
            .map(|b| b == lit.polarity())
    }

    /// `true` if `lit` itself is part of the assignment.
    #[must_use]
    pub fn contains(&self, lit: Literal) -> bool {
        self.literal_value(lit) == Some(true)
    }

    /// Literals in the order they were assigned.
    #[must_use]
    pub fn literals(&self) -> &[Literal] {
        &self.trail
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.trail.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.trail.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trail.is_empty()
    }

    /// Variables assigned true, ascending.
    #[must_use]
    pub fn true_variables(&self) -> Vec<Variable> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_true())
            .filter_map(|(i, _)| Variable::try_from(i).ok())
            .collect()
    }
}

impl FromIterator<Literal> for Assignment {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        let mut assignment = Self::default();
        for lit in iter {
            assignment.assign(lit);
        }
        assignment
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for lit in &self.trail {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{lit}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_and_lookup() {
        let mut a = Assignment::new(3);
        assert!(a.assign(Literal::from(2)));
        assert!(a.assign(Literal::from(-3)));

        assert!(a.contains(Literal::from(2)));
        assert!(a.contains(Literal::from(-3)));
        assert!(!a.contains(Literal::from(-2)));
        assert_eq!(a.literal_value(Literal::from(3)), Some(false));
        assert_eq!(a.var_value(1), None);
        assert_eq!(a.literals(), &[Literal::from(2), Literal::from(-3)]);
    }

    #[test]
    fn test_reassign_is_rejected() {
        let mut a = Assignment::new(1);
        assert!(a.assign(Literal::from(1)));
        assert!(!a.assign(Literal::from(-1)));
        assert_eq!(a.len(), 1);
        assert_eq!(a.literals(), &[Literal::from(1)]);
        assert_eq!(a.literal_value(Literal::from(-1)), Some(false));
    }

    #[test]
    fn test_grows_past_initial_size() {
        let mut a = Assignment::new(0);
        assert!(a.assign(Literal::from(-100)));
        assert_eq!(a.var_value(100), Some(false));
    }

    #[test]
    fn test_true_variables_and_display() {
        let a: Assignment = [5, -1, 3].into_iter().map(Literal::from).collect();
        assert_eq!(a.true_variables(), vec![3, 5]);
        assert_eq!(a.to_string(), "5 -1 3");
    }
}
