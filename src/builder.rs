//! Translates a validated [`Roster`] into the solver's terms: a variable
//! layout, initial domains, and the constraint list.
//!
//! One boolean variable exists per (person, day), `true` meaning working.
//! Work variables are laid out day-major (`day * people + person`) so that
//! the default smallest-id-first branching walks the roster chronologically.
//! When an exception policy is configured, one selector boolean per full
//! normal-length window follows the work variables.

use crate::{
    model::{ExceptionScope, Roster},
    solver::{
        constraint::Constraint,
        constraints::{
            bounded_count::BoundedCountConstraint, gated_window::GatedWindowConstraint,
            implies_any::ImpliesAnyConstraint,
        },
        domain::{BoolDomain, DomainStore},
        engine::VariableId,
    },
};

/// Maps (person, day) pairs and exception windows to variable ids.
#[derive(Debug, Clone)]
pub struct VariableLayout {
    num_people: usize,
    horizon: u32,
    /// Full windows of `consecutive_work_limit + 1` days per person.
    windows_per_person: u32,
    has_selectors: bool,
}

impl VariableLayout {
    fn for_roster(roster: &Roster) -> Self {
        Self {
            num_people: roster.num_people(),
            horizon: roster.horizon,
            windows_per_person: roster.horizon.saturating_sub(roster.consecutive_work_limit),
            has_selectors: roster.exception.is_some(),
        }
    }

    /// The work variable for `person` on 0-based day `day0`.
    pub fn work(&self, person: usize, day0: u32) -> VariableId {
        debug_assert!(person < self.num_people && day0 < self.horizon);
        day0 * self.num_people as u32 + person as u32
    }

    /// The exception selector for `person`'s window starting at 0-based day
    /// `window`. Only valid when the roster carries an exception policy.
    pub fn selector(&self, person: usize, window: u32) -> VariableId {
        debug_assert!(self.has_selectors && window < self.windows_per_person);
        self.num_people as u32 * self.horizon
            + person as u32 * self.windows_per_person
            + window
    }

    pub fn num_people(&self) -> usize {
        self.num_people
    }

    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    pub fn windows_per_person(&self) -> u32 {
        self.windows_per_person
    }

    /// All work variables of one person, in day order.
    fn person_row(&self, person: usize) -> Vec<VariableId> {
        (0..self.horizon).map(|d| self.work(person, d)).collect()
    }

    /// All work variables of one day, in person order.
    fn day_column(&self, day0: u32) -> Vec<VariableId> {
        (0..self.num_people).map(|p| self.work(p, day0)).collect()
    }
}

/// The compiled problem: everything [`crate::solver::engine::SolverEngine`]
/// needs, plus the layout to read an assignment back out.
pub struct BuiltModel {
    pub layout: VariableLayout,
    pub store: DomainStore,
    pub constraints: Vec<Box<dyn Constraint>>,
}

/// Compiles the roster. The roster is assumed validated.
pub fn build_model(roster: &Roster) -> BuiltModel {
    let layout = VariableLayout::for_roster(roster);
    let limit = roster.consecutive_work_limit;
    let horizon = roster.horizon;

    let mut store = DomainStore::new();
    for (person, member) in roster.people.iter().enumerate() {
        for day0 in 0..horizon {
            // Mandatory off-days are pre-assigned rather than constrained.
            let domain = if member.mandatory_off.contains(&(day0 + 1)) {
                BoolDomain::fixed(false)
            } else {
                BoolDomain::BOTH
            };
            store.insert(layout.work(person, day0), domain);
        }
    }
    if roster.exception.is_some() {
        for person in 0..layout.num_people() {
            for window in 0..layout.windows_per_person() {
                store.insert(layout.selector(person, window), BoolDomain::BOTH);
            }
        }
    }

    let mut constraints: Vec<Box<dyn Constraint>> = Vec::new();

    // Exact rest count per person.
    for (person, member) in roster.people.iter().enumerate() {
        constraints.push(Box::new(BoundedCountConstraint::exactly(
            layout.person_row(person),
            false,
            member.rest_target,
        )));
    }

    // Bounded consecutive work: every full window of limit + 1 days holds
    // at most `limit` working days, either directly or gated behind an
    // exception selector.
    for person in 0..layout.num_people() {
        for start in 0..layout.windows_per_person() {
            let window: Vec<VariableId> = (0..=limit)
                .map(|i| layout.work(person, start + i))
                .collect();
            if roster.exception.is_some() {
                constraints.push(Box::new(GatedWindowConstraint::new(
                    layout.selector(person, start),
                    window,
                    limit,
                )));
            } else {
                constraints.push(Box::new(BoundedCountConstraint::at_most(
                    window, true, limit,
                )));
            }
        }
    }

    if let Some(policy) = roster.exception {
        // Absolute ceiling: even a relaxed window never admits a run longer
        // than limit + 1 working days.
        let ceiling_windows = horizon.saturating_sub(limit + 1);
        for person in 0..layout.num_people() {
            for start in 0..ceiling_windows {
                let window: Vec<VariableId> = (0..=limit + 1)
                    .map(|i| layout.work(person, start + i))
                    .collect();
                constraints.push(Box::new(BoundedCountConstraint::at_most(
                    window,
                    true,
                    limit + 1,
                )));
            }
        }

        // Cap how many windows may actually be relaxed.
        match policy.scope {
            ExceptionScope::Global => {
                let selectors: Vec<VariableId> = (0..layout.num_people())
                    .flat_map(|p| {
                        (0..layout.windows_per_person()).map(move |w| (p, w))
                    })
                    .map(|(p, w)| layout.selector(p, w))
                    .collect();
                constraints.push(Box::new(BoundedCountConstraint::at_most(
                    selectors,
                    true,
                    policy.budget,
                )));
            }
            ExceptionScope::PerPerson => {
                for person in 0..layout.num_people() {
                    let selectors: Vec<VariableId> = (0..layout.windows_per_person())
                        .map(|w| layout.selector(person, w))
                        .collect();
                    constraints.push(Box::new(BoundedCountConstraint::at_most(
                        selectors,
                        true,
                        policy.budget,
                    )));
                }
            }
        }
    }

    // No isolated working day on interior days.
    for person in 0..layout.num_people() {
        for day0 in 1..horizon.saturating_sub(1) {
            constraints.push(Box::new(ImpliesAnyConstraint::new(
                layout.work(person, day0),
                vec![layout.work(person, day0 - 1), layout.work(person, day0 + 1)],
            )));
        }
    }

    // Daily rest capacity, tightened from below: the horizon's total rest
    // is fixed by the targets, so a day must absorb whatever the other
    // days' quotas cannot.
    let total_targets: i64 = roster.people.iter().map(|p| i64::from(p.rest_target)).sum();
    let total_quota: i64 = roster.daily_rest_quota.iter().map(|&q| i64::from(q)).sum();
    for day0 in 0..horizon {
        let quota = roster.daily_rest_quota[day0 as usize];
        let min_rest = (total_targets - (total_quota - i64::from(quota))).max(0) as u32;
        constraints.push(Box::new(BoundedCountConstraint::new(
            layout.day_column(day0),
            false,
            min_rest,
            quota,
        )));
    }

    BuiltModel {
        layout,
        store,
        constraints,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{ExceptionPolicy, Person};

    fn roster(exception: Option<ExceptionPolicy>) -> Roster {
        Roster::new(
            vec![Person::new("ana", 3, [2]), Person::new("bo", 3, [])],
            8,
            vec![1; 8],
            4,
            exception,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn layout_is_day_major() {
        let model = build_model(&roster(None));
        assert_eq!(model.layout.work(0, 0), 0);
        assert_eq!(model.layout.work(1, 0), 1);
        assert_eq!(model.layout.work(0, 1), 2);
        assert_eq!(model.layout.work(1, 7), 15);
    }

    #[test]
    fn selectors_follow_the_work_variables() {
        let model = build_model(&roster(Some(ExceptionPolicy {
            scope: ExceptionScope::PerPerson,
            budget: 1,
        })));
        // 8 days, limit 4: four full windows per person.
        assert_eq!(model.layout.windows_per_person(), 4);
        assert_eq!(model.layout.selector(0, 0), 16);
        assert_eq!(model.layout.selector(1, 3), 23);
        assert_eq!(model.store.len(), 16 + 8);
    }

    #[test]
    fn mandatory_off_days_are_pre_assigned() {
        let model = build_model(&roster(None));
        assert_eq!(model.store.get(model.layout.work(0, 1)), BoolDomain::fixed(false));
        assert_eq!(model.store.get(model.layout.work(1, 1)), BoolDomain::BOTH);
    }

    #[test]
    fn simple_variant_emits_all_five_families() {
        let model = build_model(&roster(None));
        // 2 rest counts + 2 * 4 windows + 2 * 6 interior days + 8 daily caps.
        assert_eq!(model.constraints.len(), 2 + 8 + 12 + 8);
    }

    #[test]
    fn exception_variant_adds_ceilings_and_budgets() {
        let model = build_model(&roster(Some(ExceptionPolicy {
            scope: ExceptionScope::Global,
            budget: 1,
        })));
        // As above, plus 2 * 3 ceiling windows and one global budget cap.
        assert_eq!(model.constraints.len(), 2 + 8 + 12 + 8 + 6 + 1);
    }

    #[test]
    fn short_horizons_emit_no_windows() {
        let tiny = Roster::new(
            vec![Person::new("solo", 1, [])],
            2,
            vec![1, 1],
            4,
            None,
            Duration::from_secs(1),
        )
        .unwrap();
        let model = build_model(&tiny);
        assert_eq!(model.layout.windows_per_person(), 0);
        // One rest count, no windows, no interior days, two daily caps.
        assert_eq!(model.constraints.len(), 3);
    }
}
