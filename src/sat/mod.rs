#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Formulas and the three procedures that decide them.
//!
//! [`simplify`] and [`propagation`] are the shared building blocks;
//! [`dpll`], [`dp`] and [`resolution`] are the solvers, all driven through
//! the [`solver::Solver`] trait.

pub mod assignment;
pub mod clause;
pub mod cnf;
pub mod dp;
pub mod dpll;
pub mod literal;
pub mod propagation;
pub mod resolution;
pub mod simplify;
pub mod solver;

#[cfg(test)]
pub(crate) mod brute_force;
