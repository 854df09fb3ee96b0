//! The search procedure: AC-3 style constraint propagation interleaved with
//! depth-first backtracking, bounded by a wall-clock deadline.

use std::{collections::HashMap, time::Instant};

use tracing::debug;

use crate::{
    error::Result,
    solver::{
        constraint::Constraint,
        domain::{BoolDomain, DomainStore},
        engine::{ConstraintId, SearchOutcome, SearchStats, VariableId},
        heuristics::{value::ValueOrderingHeuristic, variable::VariableSelectionHeuristic},
        work_list::WorkList,
    },
};

pub trait SearchStrategy {
    /// Runs the search until a satisfying assignment is found, the search
    /// space is exhausted, or the deadline passes.
    fn solve(
        &self,
        constraints: &[Box<dyn Constraint>],
        initial_store: DomainStore,
        deadline: Instant,
    ) -> Result<(SearchOutcome, SearchStats)>;
}

/// Complete depth-first search with propagation at every node.
///
/// `Exhausted` from this strategy is a proof: every branch of the search
/// tree was either explored or pruned by a sound propagator.
pub struct BacktrackingSearch {
    variable_heuristic: Box<dyn VariableSelectionHeuristic>,
    value_heuristic: Box<dyn ValueOrderingHeuristic>,
}

enum Propagation {
    Consistent(DomainStore),
    Contradiction,
    DeadlineReached,
}

enum Seed {
    /// Revise every arc; used once at the root.
    AllArcs,
    /// Revise the arcs of the constraints touching one just-assigned
    /// variable; further arcs cascade from there.
    From(VariableId),
}

struct SearchContext<'a> {
    constraints: &'a [Box<dyn Constraint>],
    /// Which constraints mention each variable.
    dependents: HashMap<VariableId, Vec<ConstraintId>>,
    deadline: Instant,
}

impl BacktrackingSearch {
    pub fn new(
        variable_heuristic: Box<dyn VariableSelectionHeuristic>,
        value_heuristic: Box<dyn ValueOrderingHeuristic>,
    ) -> Self {
        Self {
            variable_heuristic,
            value_heuristic,
        }
    }

    fn search(
        &self,
        ctx: &SearchContext<'_>,
        store: DomainStore,
        stats: &mut SearchStats,
    ) -> Result<SearchOutcome> {
        stats.nodes_visited += 1;

        if Instant::now() >= ctx.deadline {
            return Ok(SearchOutcome::DeadlineReached);
        }

        let Some(var_to_branch) = self.variable_heuristic.select_variable(&store) else {
            // Every domain is a singleton; propagation already reached a
            // fixpoint without contradiction, so the assignment satisfies
            // every constraint.
            return Ok(SearchOutcome::Satisfied(store));
        };

        for value in self.value_heuristic.order_values(store.get(var_to_branch)) {
            let guess = store.with(var_to_branch, BoolDomain::fixed(value));

            match self.propagate(ctx, guess, Seed::From(var_to_branch), stats)? {
                Propagation::Consistent(propagated) => {
                    match self.search(ctx, propagated, stats)? {
                        SearchOutcome::Exhausted => {}
                        finished => return Ok(finished),
                    }
                }
                Propagation::Contradiction => {}
                Propagation::DeadlineReached => return Ok(SearchOutcome::DeadlineReached),
            }
            stats.backtracks += 1;
        }

        Ok(SearchOutcome::Exhausted)
    }

    fn propagate(
        &self,
        ctx: &SearchContext<'_>,
        initial_store: DomainStore,
        seed: Seed,
        stats: &mut SearchStats,
    ) -> Result<Propagation> {
        let mut store = initial_store;

        let mut worklist = WorkList::new();
        match seed {
            Seed::AllArcs => {
                for (constraint_id, constraint) in ctx.constraints.iter().enumerate() {
                    for &var_id in constraint.variables() {
                        worklist.push_back(var_id, constraint_id);
                    }
                }
            }
            Seed::From(assigned) => {
                if let Some(touching) = ctx.dependents.get(&assigned) {
                    for &constraint_id in touching {
                        for &var_id in ctx.constraints[constraint_id].variables() {
                            worklist.push_back(var_id, constraint_id);
                        }
                    }
                }
            }
        }

        while let Some((target_var, constraint_id)) = worklist.pop_front() {
            let start_time = Instant::now();
            if start_time >= ctx.deadline {
                return Ok(Propagation::DeadlineReached);
            }

            let constraint = &ctx.constraints[constraint_id];
            let constraint_stats = stats.constraint_stats.entry(constraint_id).or_default();
            constraint_stats.revisions += 1;

            if let Some(new_store) = constraint.revise(target_var, &store)? {
                constraint_stats.prunings += 1;
                constraint_stats.time_spent_micros += start_time.elapsed().as_micros() as u64;

                if new_store.get(target_var).is_empty() {
                    return Ok(Propagation::Contradiction);
                }
                store = new_store;

                // The domain of `target_var` shrank; re-check every other
                // arc of the constraints that involve it.
                if let Some(dependent_constraints) = ctx.dependents.get(&target_var) {
                    for &dep_constraint_id in dependent_constraints {
                        for &neighbor_var in ctx.constraints[dep_constraint_id].variables() {
                            if neighbor_var != target_var {
                                worklist.push_back(neighbor_var, dep_constraint_id);
                            }
                        }
                    }
                }
            } else {
                constraint_stats.time_spent_micros += start_time.elapsed().as_micros() as u64;
            }
        }

        Ok(Propagation::Consistent(store))
    }
}

fn dependency_graph(constraints: &[Box<dyn Constraint>]) -> HashMap<VariableId, Vec<ConstraintId>> {
    let mut graph: HashMap<VariableId, Vec<ConstraintId>> = HashMap::new();
    for (constraint_id, constraint) in constraints.iter().enumerate() {
        for &var_id in constraint.variables() {
            graph.entry(var_id).or_default().push(constraint_id);
        }
    }
    graph
}

impl SearchStrategy for BacktrackingSearch {
    fn solve(
        &self,
        constraints: &[Box<dyn Constraint>],
        initial_store: DomainStore,
        deadline: Instant,
    ) -> Result<(SearchOutcome, SearchStats)> {
        let mut stats = SearchStats::default();

        if Instant::now() >= deadline {
            return Ok((SearchOutcome::DeadlineReached, stats));
        }

        let ctx = SearchContext {
            constraints,
            dependents: dependency_graph(constraints),
            deadline,
        };

        let outcome = match self.propagate(&ctx, initial_store, Seed::AllArcs, &mut stats)? {
            Propagation::Contradiction => SearchOutcome::Exhausted,
            Propagation::DeadlineReached => SearchOutcome::DeadlineReached,
            Propagation::Consistent(store) => self.search(&ctx, store, &mut stats)?,
        };

        debug!(
            nodes = stats.nodes_visited,
            backtracks = stats.backtracks,
            "search finished"
        );
        Ok((outcome, stats))
    }
}
