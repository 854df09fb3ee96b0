//! A reified implication: `guard => (A1 OR A2 OR ...)`.
//!
//! The disjunction only fires when the guard is true; a false guard leaves
//! the alternatives unconstrained. The roster model uses this for the
//! no-isolated-working-day rule, with the day's own variable as the guard
//! and its neighbours as the alternatives.

use crate::{
    error::Result,
    solver::{
        constraint::{Constraint, ConstraintDescriptor},
        domain::DomainStore,
        engine::VariableId,
    },
};

#[derive(Debug, Clone)]
pub struct ImpliesAnyConstraint {
    guard: VariableId,
    alternatives: Vec<VariableId>,
    all_vars: Vec<VariableId>,
}

impl ImpliesAnyConstraint {
    pub fn new(guard: VariableId, alternatives: Vec<VariableId>) -> Self {
        let mut all_vars = vec![guard];
        all_vars.extend_from_slice(&alternatives);
        Self {
            guard,
            alternatives,
            all_vars,
        }
    }
}

impl Constraint for ImpliesAnyConstraint {
    fn variables(&self) -> &[VariableId] {
        &self.all_vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        let alts = self
            .alternatives
            .iter()
            .map(|v| format!("?{v}"))
            .collect::<Vec<_>>()
            .join(" OR ");
        ConstraintDescriptor {
            name: "ImpliesAnyConstraint".to_string(),
            description: format!("?{} => ({})", self.guard, alts),
        }
    }

    fn revise(&self, target_var: VariableId, store: &DomainStore) -> Result<Option<DomainStore>> {
        let old = store.get(target_var);

        let new = if target_var == self.guard {
            // The guard may be true only while some alternative can still
            // be true.
            let any_possible = self
                .alternatives
                .iter()
                .any(|&alt| store.get(alt).contains(true));
            old.retain(|value| !value || any_possible)
        } else if self.alternatives.contains(&target_var) {
            // An alternative may be false only if the guard can be false or
            // another alternative can still be true.
            let guard_can_be_false = store.get(self.guard).contains(false);
            let other_possible = self
                .alternatives
                .iter()
                .any(|&alt| alt != target_var && store.get(alt).contains(true));
            old.retain(|value| value || guard_can_be_false || other_possible)
        } else {
            return Ok(None);
        };

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
    fn guard_is_forced_false_when_all_alternatives_fail() {
        let constraint = ImpliesAnyConstraint::new(0, vec![1, 2]);
        let store = store(&[
            BoolDomain::BOTH,
            BoolDomain::fixed(false),
            BoolDomain::fixed(false),
        ]);

        let revised = constraint.revise(0, &store).unwrap().unwrap();
        assert_eq!(revised.get(0), BoolDomain::fixed(false));
    }

    #[test]
    fn last_alternative_is_forced_true_under_a_true_guard() {
        let constraint = ImpliesAnyConstraint::new(0, vec![1, 2]);
        let store = store(&[
            BoolDomain::fixed(true),
            BoolDomain::fixed(false),
            BoolDomain::BOTH,
        ]);

        let revised = constraint.revise(2, &store).unwrap().unwrap();
        assert_eq!(revised.get(2), BoolDomain::fixed(true));
    }

    #[test]
    fn contradiction_empties_the_guard_domain() {
        let constraint = ImpliesAnyConstraint::new(0, vec![1]);
        let store = store(&[BoolDomain::fixed(true), BoolDomain::fixed(false)]);

        let revised = constraint.revise(0, &store).unwrap().unwrap();
        assert!(revised.get(0).is_empty());
    }

    #[test]
    fn a_false_guard_leaves_alternatives_free() {
        let constraint = ImpliesAnyConstraint::new(0, vec![1, 2]);
        let store = store(&[
            BoolDomain::fixed(false),
            BoolDomain::BOTH,
            BoolDomain::fixed(false),
        ]);

        assert!(constraint.revise(1, &store).unwrap().is_none());
    }

    #[test]
    fn an_ambiguous_guard_leaves_alternatives_free() {
        let constraint = ImpliesAnyConstraint::new(0, vec![1, 2]);
        let store = store(&[
            BoolDomain::BOTH,
            BoolDomain::BOTH,
            BoolDomain::fixed(false),
        ]);

        assert!(constraint.revise(1, &store).unwrap().is_none());
    }
}
