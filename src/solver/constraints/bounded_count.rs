//! A cardinality constraint over boolean variables:
//! `min <= #{v in vars : v == counted} <= max`.
//!
//! This single propagator covers most of the roster rules: exact rest
//! counts (`min == max`), bounded work windows and absolute ceilings
//! (`min == 0`), daily rest capacity, and exception budgets.

use crate::{
    error::Result,
    solver::{
        constraint::{Constraint, ConstraintDescriptor},
        constraints::tally_others,
        domain::DomainStore,
        engine::VariableId,
    },
};

#[derive(Debug, Clone)]
pub struct BoundedCountConstraint {
    vars: Vec<VariableId>,
    counted: bool,
    min: u32,
    max: u32,
}

impl BoundedCountConstraint {
    pub fn new(vars: Vec<VariableId>, counted: bool, min: u32, max: u32) -> Self {
        Self {
            vars,
            counted,
            min,
            max,
        }
    }

    /// `#{v == counted} <= max`.
    pub fn at_most(vars: Vec<VariableId>, counted: bool, max: u32) -> Self {
        Self::new(vars, counted, 0, max)
    }

    /// `#{v == counted} == count`.
    pub fn exactly(vars: Vec<VariableId>, counted: bool, count: u32) -> Self {
        Self::new(vars, counted, count, count)
    }
}

impl Constraint for BoundedCountConstraint {
    fn variables(&self) -> &[VariableId] {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "BoundedCountConstraint".to_string(),
            description: format!(
                "{} <= #{{v == {} : {} vars}} <= {}",
                self.min,
                self.counted,
                self.vars.len(),
                self.max
            ),
        }
    }

    fn revise(&self, target_var: VariableId, store: &DomainStore) -> Result<Option<DomainStore>> {
        if !self.vars.contains(&target_var) {
            return Ok(None);
        }

        let (fixed_matches, undecided) = tally_others(&self.vars, store, self.counted, target_var);

        // A value for the target is consistent iff the count can still land
        // in [min, max]: the count is at least the fixed matches (plus the
        // target itself, if it matches) and at most that plus the undecided.
        let old = store.get(target_var);
        let new = old.retain(|value| {
            let matches = fixed_matches + u32::from(value == self.counted);
            matches <= self.max && matches + undecided >= self.min
        });

        if new == old {
            Ok(None)
        } else {
            Ok(Some(store.with(target_var, new)))
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::domain::BoolDomain;

    fn store(domains: &[BoolDomain]) -> DomainStore {
        let mut store = DomainStore::new();
        for (var, &dom) in domains.iter().enumerate() {
            store.insert(var as VariableId, dom);
        }
        store
    }

    #[test]
    fn saturated_upper_bound_forces_remaining_vars_off() {
        // Two of three may be true; two already are.
        let constraint = BoundedCountConstraint::at_most(vec![0, 1, 2], true, 2);
        let store = store(&[
            BoolDomain::fixed(true),
            BoolDomain::fixed(true),
            BoolDomain::BOTH,
        ]);

        let revised = constraint.revise(2, &store).unwrap().unwrap();
        assert_eq!(revised.get(2), BoolDomain::fixed(false));
    }

    #[test]
    fn unreachable_lower_bound_forces_remaining_vars_on() {
        // Exactly two of three must be false; one is already true.
        let constraint = BoundedCountConstraint::exactly(vec![0, 1, 2], false, 2);
        let store = store(&[
            BoolDomain::fixed(true),
            BoolDomain::BOTH,
            BoolDomain::BOTH,
        ]);

        let revised = constraint.revise(1, &store).unwrap().unwrap();
        assert_eq!(revised.get(1), BoolDomain::fixed(false));
    }

    #[test]
    fn violated_bound_empties_the_target_domain() {
        let constraint = BoundedCountConstraint::at_most(vec![0, 1], true, 0);
        let store = store(&[BoolDomain::fixed(true), BoolDomain::BOTH]);

        let revised = constraint.revise(1, &store).unwrap().unwrap();
        assert!(revised.get(1).is_empty());
    }

    #[test]
    fn slack_leaves_domains_untouched() {
        let constraint = BoundedCountConstraint::at_most(vec![0, 1, 2], true, 2);
        let store = store(&[
            BoolDomain::fixed(true),
            BoolDomain::BOTH,
            BoolDomain::BOTH,
        ]);

        assert!(constraint.revise(1, &store).unwrap().is_none());
    }

    #[test]
    fn ignores_foreign_variables() {
        let constraint = BoundedCountConstraint::at_most(vec![0, 1], true, 1);
        let store = store(&[
            BoolDomain::fixed(true),
            BoolDomain::BOTH,
            BoolDomain::BOTH,
        ]);

        assert!(constraint.revise(2, &store).unwrap().is_none());
    }
}
