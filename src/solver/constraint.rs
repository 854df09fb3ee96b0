use crate::{
    error::Result,
    solver::{domain::DomainStore, engine::VariableId},
};

/// Human-readable identification of a constraint, used by the statistics
/// table and debug output.
#[derive(Debug, Clone)]
pub struct ConstraintDescriptor {
    pub name: String,
    pub description: String,
}

/// A rule that must hold in any returned assignment.
///
/// Constraints participate in propagation through [`Constraint::revise`]:
/// given the current store, a revision computes which values of one target
/// variable are still consistent with the constraint and the other
/// variables' domains, and prunes the rest. The engine detects a
/// contradiction when a revision empties the target's domain.
pub trait Constraint: std::fmt::Debug {
    /// The variables this constraint ranges over.
    fn variables(&self) -> &[VariableId];

    fn descriptor(&self) -> ConstraintDescriptor;

    /// Narrows the domain of `target_var` to the values consistent with
    /// this constraint.
    ///
    /// Returns `Ok(Some(store))` with only `target_var` changed when the
    /// domain shrank, `Ok(None)` when nothing could be pruned. A returned
    /// empty domain signals inconsistency.
    fn revise(&self, target_var: VariableId, store: &DomainStore) -> Result<Option<DomainStore>>;
}
