//! The propagators the roster model compiles down to.

pub mod bounded_count;
pub mod gated_window;
pub mod implies_any;

use crate::solver::{domain::DomainStore, engine::VariableId};

/// Counts, over `vars` minus `exclude`, how many variables are fixed to
/// `counted` and how many are still undecided.
pub(crate) fn tally_others(
    vars: &[VariableId],
    store: &DomainStore,
    counted: bool,
    exclude: VariableId,
) -> (u32, u32) {
    let mut fixed_matches = 0;
    let mut undecided = 0;
    for &var in vars {
        if var == exclude {
            continue;
        }
        match store.get(var).singleton_value() {
            Some(v) if v == counted => fixed_matches += 1,
            Some(_) => {}
            None => undecided += 1,
        }
    }
    (fixed_matches, undecided)
}
