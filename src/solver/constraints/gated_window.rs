//! A selector-reified window bound: `!selector => #{true in window} <= limit`.
//!
//! The exception policy hinges on this constraint. Each full window of
//! `limit + 1` days carries one selector boolean; while the selector is
//! false the window obeys the normal bound, and a true selector relaxes it.
//! The number of true selectors is capped elsewhere by a
//! [`BoundedCountConstraint`](super::bounded_count::BoundedCountConstraint),
//! as is the absolute run-length ceiling, so this propagator only has to
//! encode the conditional bound itself.

use crate::{
    error::Result,
    solver::{
        constraint::{Constraint, ConstraintDescriptor},
        constraints::tally_others,
        domain::{BoolDomain, DomainStore},
        engine::VariableId,
    },
};

#[derive(Debug, Clone)]
pub struct GatedWindowConstraint {
    selector: VariableId,
    window: Vec<VariableId>,
    limit: u32,
    all_vars: Vec<VariableId>,
}

impl GatedWindowConstraint {
    pub fn new(selector: VariableId, window: Vec<VariableId>, limit: u32) -> Self {
        let mut all_vars = vec![selector];
        all_vars.extend_from_slice(&window);
        Self {
            selector,
            window,
            limit,
            all_vars,
        }
    }
}

impl Constraint for GatedWindowConstraint {
    fn variables(&self) -> &[VariableId] {
        &self.all_vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "GatedWindowConstraint".to_string(),
            description: format!(
                "!?{} => #{{true : {} vars}} <= {}",
                self.selector,
                self.window.len(),
                self.limit
            ),
        }
    }

    fn revise(&self, target_var: VariableId, store: &DomainStore) -> Result<Option<DomainStore>> {
        let old = store.get(target_var);

        let new = if target_var == self.selector {
            // The selector may stay false only while the normal bound is
            // still reachable.
            let (fixed_true, _) = tally_others(&self.window, store, true, target_var);
            old.retain(|value| value || fixed_true <= self.limit)
        } else if self.window.contains(&target_var) {
            // Window variables are only constrained once the selector is
            // known to be false.
            if store.get(self.selector) != BoolDomain::fixed(false) {
                return Ok(None);
            }
            let (fixed_true, _) = tally_others(&self.window, store, true, target_var);
            old.retain(|value| fixed_true + u32::from(value) <= self.limit)
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
