//! Guided local search.
//!
//! # Algorithm
//!
//! 1. Descend to a local optimum of the true objective.
//! 2. Penalize the arcs of the current solution with maximal utility
//!    `cost / (1 + penalty)`.
//! 3. Descend again on arc costs augmented by `λ × penalty`, where λ is a
//!    tenth of the average arc cost of the first local optimum.
//! 4. Keep the best solution under the true objective; repeat from 2 until
//!    the deadline or until too many rounds pass without improvement.
//!
//! # Reference
//!
//! Voudouris, C. & Tsang, E. (1999). "Guided local search and its
//! application to the traveling salesman problem", *European Journal of
//! Operational Research* 113(2), 469-499.

use std::time::Instant;

use rand::Rng;
use tracing::debug;

use crate::evaluation::RouteEvaluator;
use crate::routing::RoutingModel;

use super::{descend, ArcPenalties, Plan, SearchContext};

const LAMBDA_FACTOR: f64 = 0.1;

/// Guided local search driver.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, Instant};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_shipping::local_search::{nearest_neighbors, GuidedLocalSearch, Plan};
/// use u_shipping::routing::RoutingModel;
///
/// let mut model = RoutingModel::new(4, 1, 0).unwrap();
/// let cost = model.register_transit_callback(|i, j| (i as i64 - j as i64).abs());
/// model.set_arc_cost_evaluator_of_all_vehicles(cost).unwrap();
///
/// let start = Plan::new(&model, vec![vec![3, 1, 2]], |_| 0);
/// let neighbors = nearest_neighbors(&model, 3);
/// let mut rng = StdRng::seed_from_u64(1);
/// let best = GuidedLocalSearch::new()
///     .with_max_idle_iterations(20)
///     .run(&model, start, &neighbors, Instant::now() + Duration::from_secs(1), &mut rng);
/// assert_eq!(best.objective(&model), 6);
/// ```
#[derive(Debug, Clone)]
pub struct GuidedLocalSearch {
    max_idle_iterations: usize,
}

impl Default for GuidedLocalSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl GuidedLocalSearch {
    /// Creates a driver that gives up after 200 rounds without improvement.
    pub fn new() -> Self {
        Self {
            max_idle_iterations: 200,
        }
    }

    /// Sets the number of penalization rounds allowed without improvement.
    pub fn with_max_idle_iterations(mut self, n: usize) -> Self {
        self.max_idle_iterations = n;
        self
    }

    /// Improves `plan` until `deadline` and returns the best plan found.
    ///
    /// Route costs of the returned plan are the model's true arc costs.
    pub fn run<R: Rng>(
        &self,
        model: &RoutingModel<'_>,
        plan: Plan,
        neighbors: &[Vec<usize>],
        deadline: Instant,
        rng: &mut R,
    ) -> Plan {
        let evaluator = RouteEvaluator::new(model);
        let mut penalties = ArcPenalties::default();
        let mut current = plan;

        {
            let ctx = SearchContext::new(model, &penalties, neighbors, deadline);
            current.reprice(|r| ctx.route_cost(r));
            descend(&mut current, &ctx, rng);
        }
        let mut best = current.clone();
        let mut best_objective = best.objective(model);
        debug!(objective = best_objective, "first local optimum");

        penalties.set_lambda(initial_lambda(model, &current));
        let mut idle = 0;
        let mut round = 0usize;
        while Instant::now() < deadline && idle < self.max_idle_iterations {
            let arcs = current.arcs(model.depot());
            if arcs.is_empty() {
                break;
            }
            let utility = |&(from, to): &(usize, usize)| {
                model.arc_cost(from, to) as f64 / (1 + penalties.count(from, to)) as f64
            };
            let max_utility = arcs.iter().map(utility).fold(f64::MIN, f64::max);
            let chosen: Vec<(usize, usize)> = arcs
                .iter()
                .filter(|&arc| utility(arc) >= max_utility)
                .copied()
                .collect();
            for (from, to) in chosen {
                penalties.penalize(from, to);
            }

            let ctx = SearchContext::new(model, &penalties, neighbors, deadline);
            current.reprice(|r| ctx.route_cost(r));
            descend(&mut current, &ctx, rng);
            round += 1;

            let objective = current
                .routes()
                .iter()
                .map(|r| evaluator.route_cost(r))
                .fold(current.drop_penalty(model), |acc, c| acc.saturating_add(c));
            if objective < best_objective {
                best = current.clone();
                best.reprice(|r| evaluator.route_cost(r));
                best_objective = objective;
                idle = 0;
                debug!(round, objective, "guided local search improved");
            } else {
                idle += 1;
            }
        }
        debug!(round, objective = best_objective, "guided local search finished");
        best
    }
}

/// A tenth of the average arc cost of `plan`, at least 1.
fn initial_lambda(model: &RoutingModel<'_>, plan: &Plan) -> i64 {
    let arcs = plan.arcs(model.depot());
    if arcs.is_empty() {
        return 1;
    }
    let total: i64 = arcs.iter().map(|&(i, j)| model.arc_cost(i, j)).sum();
    let lambda = (LAMBDA_FACTOR * total as f64 / arcs.len() as f64).round() as i64;
    lambda.max(1)
}
