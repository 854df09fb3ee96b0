//! Rota is a constraint-based work/rest roster planner.
//!
//! Given a fixed set of people and a fixed planning horizon, it decides for
//! every (person, day) pair whether that person works or rests, such that a
//! set of hard scheduling rules holds simultaneously, or reports that no
//! such schedule exists within a wall-clock budget.
//!
//! # Core Concepts
//!
//! - **[`Roster`]**: the immutable problem description: people with exact
//!   rest targets and mandatory off-days, per-day rest quotas, the
//!   consecutive-work limit, and an optional [`ExceptionPolicy`].
//! - **Constraint builder**: [`builder::build_model`] compiles a roster
//!   into boolean decision variables and propagating constraints.
//! - **[`solver`]**: a self-contained boolean CSP engine, propagation plus
//!   backtracking search, bounded by the roster's time budget.
//! - **[`SolveOutcome`]**: `Feasible` with a complete [`Assignment`],
//!   `Infeasible` (proven), or `TimedOut` (budget elapsed; not a proof).
//!
//! # Example
//!
//! Two people over six days, each resting exactly twice, with one mandatory
//! off-day each and at most one person resting per day:
//!
//! ```
//! use std::time::Duration;
//!
//! use rota::{solve, Person, Roster, ScheduleGrid, SolveOutcome};
//!
//! let roster = Roster::new(
//!     vec![Person::new("ana", 2, [1]), Person::new("bo", 2, [2])],
//!     6,
//!     vec![1; 6],
//!     4,
//!     None,
//!     Duration::from_secs(5),
//! )?;
//!
//! match solve(&roster)? {
//!     SolveOutcome::Feasible(assignment) => {
//!         assert!(!assignment.is_working(0, 1)); // mandatory off-day
//!         let rest = (1..=6).filter(|&d| !assignment.is_working(0, d)).count();
//!         assert_eq!(rest, 2);
//!
//!         let grid = ScheduleGrid::extract(&roster, &assignment);
//!         println!("{}", rota::render::render_schedule_table(&grid));
//!     }
//!     other => panic!("expected a feasible roster, got {other:?}"),
//! }
//! # Ok::<(), rota::Error>(())
//! ```

pub mod builder;
pub mod error;
pub mod model;
pub mod render;
pub mod schedule;
pub mod solver;

use tracing::info;

pub use crate::{
    error::{Error, Result},
    model::{ExceptionPolicy, ExceptionScope, Person, Roster},
    schedule::{Assignment, DayState, ScheduleGrid, SolveOutcome},
};

use crate::solver::engine::{SearchOutcome, SearchStats, SolverEngine};

/// Validates the roster and solves it with the default deterministic
/// engine.
pub fn solve(roster: &Roster) -> Result<SolveOutcome> {
    let (outcome, _) = solve_with(roster, &SolverEngine::default())?;
    Ok(outcome)
}

/// Validates the roster and solves it with a caller-supplied engine,
/// returning the search statistics alongside the outcome.
pub fn solve_with(
    roster: &Roster,
    engine: &SolverEngine,
) -> Result<(SolveOutcome, SearchStats)> {
    roster.validate()?;

    let model = builder::build_model(roster);
    let (search_outcome, stats) =
        engine.solve(&model.constraints, model.store, roster.time_budget)?;

    let outcome = match search_outcome {
        SearchOutcome::Satisfied(store) => {
            SolveOutcome::Feasible(Assignment::from_store(&model.layout, &store))
        }
        SearchOutcome::Exhausted => SolveOutcome::Infeasible,
        SearchOutcome::DeadlineReached => SolveOutcome::TimedOut,
    };

    info!(
        people = roster.num_people(),
        horizon = roster.horizon,
        nodes = stats.nodes_visited,
        backtracks = stats.backtracks,
        outcome = match &outcome {
            SolveOutcome::Feasible(_) => "feasible",
            SolveOutcome::Infeasible => "infeasible",
            SolveOutcome::TimedOut => "timed out",
        },
        "roster solve finished"
    );

    Ok((outcome, stats))
}
