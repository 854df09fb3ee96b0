//! Strategies for selecting which variable to branch on next.

use std::cell::RefCell;

use rand::{seq::IteratorRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::solver::{domain::DomainStore, engine::VariableId};

/// A strategy for choosing the next unassigned variable to branch on.
pub trait VariableSelectionHeuristic {
    /// Selects the next variable to be assigned, or `None` when every
    /// domain is already a singleton.
    fn select_variable(&self, store: &DomainStore) -> Option<VariableId>;
}

/// Selects the unassigned variable with the smallest [`VariableId`].
///
/// With the builder's day-major variable layout this walks the roster
/// chronologically, day by day across all people, which keeps the daily
/// quota and window constraints propagating close behind the search
/// frontier. Deterministic.
pub struct SelectFirstHeuristic;

impl VariableSelectionHeuristic for SelectFirstHeuristic {
    fn select_variable(&self, store: &DomainStore) -> Option<VariableId> {
        store.unassigned().min()
    }
}

/// Selects an unassigned variable uniformly at random from a seedable
/// generator, for randomized (non-deterministic) search orders.
pub struct RandomVariableHeuristic {
    rng: RefCell<ChaCha8Rng>,
}

impl RandomVariableHeuristic {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: RefCell::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: RefCell::new(ChaCha8Rng::from_entropy()),
        }
    }
}

impl VariableSelectionHeuristic for RandomVariableHeuristic {
    fn select_variable(&self, store: &DomainStore) -> Option<VariableId> {
        store.unassigned().choose(&mut *self.rng.borrow_mut())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::domain::BoolDomain;

    fn store() -> DomainStore {
        let mut store = DomainStore::new();
        store.insert(0, BoolDomain::fixed(true));
        store.insert(1, BoolDomain::BOTH);
        store.insert(2, BoolDomain::BOTH);
        store
    }

    #[test]
    fn select_first_picks_the_smallest_unassigned_id() {
        assert_eq!(SelectFirstHeuristic.select_variable(&store()), Some(1));
    }

    #[test]
    fn select_first_returns_none_when_complete() {
        let mut store = DomainStore::new();
        store.insert(0, BoolDomain::fixed(false));
        assert_eq!(SelectFirstHeuristic.select_variable(&store), None);
    }

    #[test]
    fn random_selection_is_reproducible_for_a_seed() {
        let a = RandomVariableHeuristic::from_seed(7).select_variable(&store());
        let b = RandomVariableHeuristic::from_seed(7).select_variable(&store());
        assert_eq!(a, b);
        assert!(matches!(a, Some(1) | Some(2)));
    }
}
