//! Shared inputs of the move operators.

use std::collections::HashMap;
use std::time::Instant;

use crate::evaluation::RouteEvaluator;
use crate::routing::RoutingModel;

/// Arc penalties added on top of the model's arc costs.
///
/// Each penalized arc costs `lambda × count` extra while searching.
#[derive(Debug, Clone, Default)]
pub struct ArcPenalties {
    counts: HashMap<(usize, usize), i64>,
    lambda: i64,
}

impl ArcPenalties {
    /// Sets the weight of one penalty unit.
    pub fn set_lambda(&mut self, lambda: i64) {
        self.lambda = lambda;
    }

    /// Weight of one penalty unit.
    pub fn lambda(&self) -> i64 {
        self.lambda
    }

    /// Number of times `from -> to` was penalized.
    pub fn count(&self, from: usize, to: usize) -> i64 {
        self.counts.get(&(from, to)).copied().unwrap_or(0)
    }

    /// Penalizes one arc once more.
    pub fn penalize(&mut self, from: usize, to: usize) {
        *self.counts.entry((from, to)).or_insert(0) += 1;
    }

    /// Extra cost of `from -> to`.
    pub fn extra(&self, from: usize, to: usize) -> i64 {
        self.lambda.saturating_mul(self.count(from, to))
    }
}

/// For each node, its `k` closest other non-depot nodes by arc cost in
/// either direction.
pub fn nearest_neighbors(model: &RoutingModel<'_>, k: usize) -> Vec<Vec<usize>> {
    let depot = model.depot();
    let n = model.num_nodes();
    (0..n)
        .map(|u| {
            if u == depot {
                return Vec::new();
            }
            let mut others: Vec<(i64, usize)> = (0..n)
                .filter(|&v| v != u && v != depot)
                .map(|v| (model.arc_cost(u, v).min(model.arc_cost(v, u)), v))
                .collect();
            others.sort_unstable();
            others.into_iter().take(k).map(|(_, v)| v).collect()
        })
        .collect()
}

/// Everything an operator needs besides the plan it modifies.
pub struct SearchContext<'c, 'a> {
    model: &'c RoutingModel<'a>,
    evaluator: RouteEvaluator<'c, 'a>,
    penalties: &'c ArcPenalties,
    neighbors: &'c [Vec<usize>],
    deadline: Instant,
}

impl<'c, 'a> SearchContext<'c, 'a> {
    /// Bundles the search inputs.
    pub fn new(
        model: &'c RoutingModel<'a>,
        penalties: &'c ArcPenalties,
        neighbors: &'c [Vec<usize>],
        deadline: Instant,
    ) -> Self {
        Self {
            model,
            evaluator: RouteEvaluator::new(model),
            penalties,
            neighbors,
            deadline,
        }
    }

    /// The model being searched.
    pub fn model(&self) -> &'c RoutingModel<'a> {
        self.model
    }

    /// Arc cost as seen by the search, penalties included.
    pub fn arc_cost(&self, from: usize, to: usize) -> i64 {
        self.model
            .arc_cost(from, to)
            .saturating_add(self.penalties.extra(from, to))
    }

    /// Penalized cost of a closed route.
    pub fn route_cost(&self, visits: &[usize]) -> i64 {
        let depot = self.model.depot();
        let mut prev = depot;
        let mut cost = 0i64;
        for &node in visits.iter().chain(std::iter::once(&depot)) {
            cost = cost.saturating_add(self.arc_cost(prev, node));
            prev = node;
        }
        cost
    }

    /// Returns `true` if the closed route satisfies every dimension.
    pub fn is_feasible(&self, visits: &[usize]) -> bool {
        self.evaluator.is_feasible(visits)
    }

    /// Closest nodes of `node`.
    pub fn neighbors(&self, node: usize) -> &'c [usize] {
        match self.neighbors.get(node) {
            Some(list) => list,
            None => &[],
        }
    }

    /// Returns `true` once the time budget is spent.
    pub fn timed_out(&self) -> bool {
        Instant::now() >= self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model<'a>() -> RoutingModel<'a> {
        let mut model = RoutingModel::new(4, 1, 0).expect("valid");
        let cost = model.register_transit_callback(|i, j| (i as i64 - j as i64).abs());
        model.set_arc_cost_evaluator_of_all_vehicles(cost).expect("valid");
        model
    }

    #[test]
    fn test_penalties_raise_arc_cost() {
        let m = model();
        let mut penalties = ArcPenalties::default();
        penalties.set_lambda(3);
        penalties.penalize(1, 2);
        penalties.penalize(1, 2);
        let ctx = SearchContext::new(&m, &penalties, &[], Instant::now());
        assert_eq!(ctx.arc_cost(1, 2), 1 + 6);
        assert_eq!(ctx.arc_cost(2, 1), 1);
        // 0->1 (1) + 1->2 (7) + 2->0 (2)
        assert_eq!(ctx.route_cost(&[1, 2]), 10);
        assert!(ctx.timed_out());
    }

    #[test]
    fn test_nearest_neighbors() {
        let m = model();
        let neighbors = nearest_neighbors(&m, 1);
        assert!(neighbors[0].is_empty());
        assert_eq!(neighbors[1], vec![2]);
        assert_eq!(neighbors[3], vec![2]);
        assert_eq!(nearest_neighbors(&m, 5)[2], vec![1, 3]);
    }
}
