use crate::solver::domain::BoolDomain;

/// A strategy for the order in which a branched variable's values are tried.
pub trait ValueOrderingHeuristic {
    /// Returns the values of `domain` in the order they should be tried.
    fn order_values(&self, domain: BoolDomain) -> Vec<bool>;
}

/// Tries values in the domain's natural iteration order (`false`, `true`).
pub struct IdentityValueHeuristic;

impl ValueOrderingHeuristic for IdentityValueHeuristic {
    fn order_values(&self, domain: BoolDomain) -> Vec<bool> {
        domain.iter().collect()
    }
}

/// Tries a preferred value first when the domain still allows it.
///
/// The roster solve defaults to preferring `false` (resting): trying rest
/// first saturates the daily quota early, at which point the quota
/// constraint fixes everyone else on that day to working in one propagation
/// pass.
pub struct PreferValueHeuristic(pub bool);

impl ValueOrderingHeuristic for PreferValueHeuristic {
    fn order_values(&self, domain: BoolDomain) -> Vec<bool> {
        let mut values: Vec<bool> = domain.iter().collect();
        values.sort_by_key(|&v| v != self.0);
        values
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn identity_order_is_false_then_true() {
        assert_eq!(
            IdentityValueHeuristic.order_values(BoolDomain::BOTH),
            vec![false, true]
        );
    }

    #[test]
    fn preferred_value_comes_first() {
        assert_eq!(
            PreferValueHeuristic(true).order_values(BoolDomain::BOTH),
            vec![true, false]
        );
        assert_eq!(
            PreferValueHeuristic(true).order_values(BoolDomain::fixed(false)),
            vec![false]
        );
    }
}
