//! The solver facade: variables, outcomes, statistics, and the engine that
//! ties a search strategy to a wall-clock budget.

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use crate::{
    error::Result,
    solver::{
        constraint::Constraint,
        domain::DomainStore,
        heuristics::{
            value::{PreferValueHeuristic, ValueOrderingHeuristic},
            variable::{SelectFirstHeuristic, VariableSelectionHeuristic},
        },
        strategy::{BacktrackingSearch, SearchStrategy},
    },
};

pub type VariableId = u32;
pub type ConstraintId = usize;

/// How a bounded solve ended.
///
/// `Exhausted` is a proof of unsatisfiability; `DeadlineReached` only says
/// the budget ran out first.
#[derive(Debug)]
pub enum SearchOutcome {
    /// Every variable is assigned and every constraint holds.
    Satisfied(DomainStore),
    /// The whole search space was explored or pruned; no assignment exists.
    Exhausted,
    /// The wall-clock budget elapsed before either of the above.
    DeadlineReached,
}

#[derive(Debug, Clone, Default)]
pub struct PerConstraintStats {
    pub revisions: u64,
    pub prunings: u64,
    pub time_spent_micros: u64,
}

#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    pub nodes_visited: u64,
    pub backtracks: u64,
    pub constraint_stats: HashMap<ConstraintId, PerConstraintStats>,
}

/// The main engine for solving a boolean constraint satisfaction problem.
///
/// Takes a problem definition (variable domains plus a list of constraints)
/// and runs its [`SearchStrategy`] against it under a time budget.
pub struct SolverEngine {
    strategy: Box<dyn SearchStrategy>,
}

impl SolverEngine {
    pub fn new(strategy: Box<dyn SearchStrategy>) -> Self {
        Self { strategy }
    }

    /// A backtracking engine with the given heuristics.
    pub fn backtracking(
        variable_heuristic: Box<dyn VariableSelectionHeuristic>,
        value_heuristic: Box<dyn ValueOrderingHeuristic>,
    ) -> Self {
        Self::new(Box::new(BacktrackingSearch::new(
            variable_heuristic,
            value_heuristic,
        )))
    }

    /// Attempts to solve the problem within `budget`.
    ///
    /// A zero (or elapsed) budget yields `DeadlineReached` immediately
    /// rather than blocking.
    pub fn solve(
        &self,
        constraints: &[Box<dyn Constraint>],
        initial_store: DomainStore,
        budget: Duration,
    ) -> Result<(SearchOutcome, SearchStats)> {
        let now = Instant::now();
        let deadline = now
            .checked_add(budget)
            .unwrap_or_else(|| now + Duration::from_secs(60 * 60 * 24 * 365));
        self.strategy.solve(constraints, initial_store, deadline)
    }
}

impl Default for SolverEngine {
    /// Chronological variable order with rest-first value order; the
    /// deterministic defaults used by [`crate::solve`].
    fn default() -> Self {
        Self::backtracking(
            Box::new(SelectFirstHeuristic),
            Box::new(PreferValueHeuristic(false)),
        )
    }
}
