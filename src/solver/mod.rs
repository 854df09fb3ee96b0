//! A self-contained boolean constraint solver: domains, propagators, and a
//! deadline-bounded backtracking search.
//!
//! The solver knows nothing about rosters. It consumes a set of boolean
//! variables with initial domains and a list of [`constraint::Constraint`]
//! objects, and answers whether a complete assignment satisfying all of
//! them exists within a wall-clock budget.

pub mod constraint;
pub mod constraints;
pub mod domain;
pub mod engine;
pub mod heuristics;
pub mod strategy;
pub mod work_list;
