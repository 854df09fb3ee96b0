//! Solve outcomes and the presentation-neutral schedule grid.
//!
//! The solver reasons over work/rest booleans only. The three-way
//! [`DayState`] labelling (mandatory rest vs chosen rest vs working) is
//! derived here, after the fact, from the assignment plus the roster's
//! mandatory-off sets; it is never solver state.

use serde::{Deserialize, Serialize};

use crate::{
    builder::VariableLayout,
    model::Roster,
    solver::domain::DomainStore,
};

/// The result of one solve: a schedule, a proof that none exists, or an
/// elapsed budget.
///
/// `TimedOut` is not evidence of infeasibility; retrying with a larger
/// budget is the caller's prerogative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveOutcome {
    Feasible(Assignment),
    Infeasible,
    TimedOut,
}

/// A complete work/rest decision for every (person, day) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    horizon: u32,
    /// Person-major rows of per-day work flags.
    working: Vec<Vec<bool>>,
}

impl Assignment {
    /// Reads the solved grid out of a complete domain store.
    pub(crate) fn from_store(layout: &VariableLayout, store: &DomainStore) -> Self {
        let working = (0..layout.num_people())
            .map(|person| {
                (0..layout.horizon())
                    .map(|day0| {
                        store
                            .get(layout.work(person, day0))
                            .singleton_value()
                            .expect("satisfied store must be complete")
                    })
                    .collect()
            })
            .collect();
        Self {
            horizon: layout.horizon(),
            working,
        }
    }

    pub fn num_people(&self) -> usize {
        self.working.len()
    }

    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    /// Whether `person` works on 1-based `day`.
    pub fn is_working(&self, person: usize, day: u32) -> bool {
        self.working[person][(day - 1) as usize]
    }
}

/// Presentation-facing label for one (person, day) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayState {
    Working,
    ChosenRest,
    MandatoryRest,
}

impl std::fmt::Display for DayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayState::Working => write!(f, "work"),
            DayState::ChosenRest => write!(f, "rest"),
            DayState::MandatoryRest => write!(f, "rest*"),
        }
    }
}

/// The neutral schedule grid handed to external presentation layers,
/// together with the echoed daily rest quota row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleGrid {
    pub people: Vec<String>,
    pub horizon: u32,
    pub daily_rest_quota: Vec<u32>,
    /// Person-major rows of day states.
    pub states: Vec<Vec<DayState>>,
}

impl ScheduleGrid {
    /// Derives the three-way grid from a solved assignment. Pure: calling
    /// it twice on the same inputs yields identical grids.
    pub fn extract(roster: &Roster, assignment: &Assignment) -> Self {
        let states = roster
            .people
            .iter()
            .enumerate()
            .map(|(person, member)| {
                (1..=roster.horizon)
                    .map(|day| {
                        if member.mandatory_off.contains(&day) {
                            DayState::MandatoryRest
                        } else if assignment.is_working(person, day) {
                            DayState::Working
                        } else {
                            DayState::ChosenRest
                        }
                    })
                    .collect()
            })
            .collect();
        Self {
            people: roster.people.iter().map(|p| p.name.clone()).collect(),
            horizon: roster.horizon,
            daily_rest_quota: roster.daily_rest_quota.clone(),
            states,
        }
    }

    /// The state of `person` on 1-based `day`.
    pub fn state(&self, person: usize, day: u32) -> DayState {
        self.states[person][(day - 1) as usize]
    }
}
