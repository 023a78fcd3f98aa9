//! Built-in engine: cheapest-arc construction plus local search.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::constructive::path_cheapest_arc;
use crate::evaluation::RouteEvaluator;
use crate::local_search::{
    descend, nearest_neighbors, ArcPenalties, GuidedLocalSearch, Plan, SearchContext,
};
use crate::routing::{Assignment, RoutingModel};

use super::{
    EngineError, FirstSolutionStrategy, LocalSearchMetaheuristic, RoutingEngine, SearchParameters,
};

/// In-process engine built on this crate's heuristics.
///
/// Runs are reproducible for a given seed as long as the time limit is not
/// what ends the search.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_shipping::engine::{LocalSearchEngine, RoutingEngine, SearchParameters};
/// use u_shipping::routing::RoutingModel;
///
/// let mut model = RoutingModel::new(4, 2, 0).unwrap();
/// let cost = model.register_transit_callback(|i, j| (i as i64 - j as i64).abs());
/// model.set_arc_cost_evaluator_of_all_vehicles(cost).unwrap();
///
/// let engine = LocalSearchEngine::new().with_seed(7);
/// let params = SearchParameters::default().with_time_limit(Duration::from_millis(200));
/// let assignment = engine.solve(&model, &params).unwrap().unwrap();
/// assert_eq!(assignment.objective(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct LocalSearchEngine {
    seed: u64,
    max_idle_iterations: usize,
    neighbors: usize,
}

impl Default for LocalSearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalSearchEngine {
    /// Creates an engine with seed 0, 200 idle rounds, and 8 neighbors.
    pub fn new() -> Self {
        Self {
            seed: 0,
            max_idle_iterations: 200,
            neighbors: 8,
        }
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets how many guided rounds may pass without improvement.
    pub fn with_max_idle_iterations(mut self, n: usize) -> Self {
        self.max_idle_iterations = n;
        self
    }

    /// Sets the neighbor list length used by insertion and swap moves.
    pub fn with_neighbors(mut self, k: usize) -> Self {
        self.neighbors = k;
        self
    }
}

impl RoutingEngine for LocalSearchEngine {
    fn solve(
        &self,
        model: &RoutingModel<'_>,
        params: &SearchParameters,
    ) -> Result<Option<Assignment>, EngineError> {
        let deadline = Instant::now() + params.time_limit;
        let evaluator = RouteEvaluator::new(model);
        if let Some(violation) = evaluator.first_violation(&[]) {
            warn!(
                dimension = %violation.dimension,
                "an idle vehicle is already infeasible"
            );
            return Ok(None);
        }

        let routes = match params.first_solution_strategy {
            FirstSolutionStrategy::PathCheapestArc => path_cheapest_arc(model),
        };
        let plan = Plan::new(model, routes, |r| evaluator.route_cost(r));
        debug!(
            objective = plan.objective(model),
            unperformed = plan.unperformed().len(),
            "first solution built"
        );

        let neighbors = nearest_neighbors(model, self.neighbors);
        let mut rng = StdRng::seed_from_u64(self.seed);
        let best = match params.local_search_metaheuristic {
            LocalSearchMetaheuristic::GreedyDescent => {
                let penalties = ArcPenalties::default();
                let ctx = SearchContext::new(model, &penalties, &neighbors, deadline);
                let mut plan = plan;
                let moves = descend(&mut plan, &ctx, &mut rng);
                debug!(moves, "greedy descent finished");
                plan
            }
            LocalSearchMetaheuristic::GuidedLocalSearch => GuidedLocalSearch::new()
                .with_max_idle_iterations(self.max_idle_iterations)
                .run(model, plan, &neighbors, deadline, &mut rng),
        };

        let missing = best.missing_mandatory(model);
        if missing > 0 {
            warn!(missing, "mandatory nodes left unvisited");
            return Ok(None);
        }
        Ok(Some(model.evaluate_routes(best.into_routes())?))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn params() -> SearchParameters {
        SearchParameters::default().with_time_limit(Duration::from_millis(500))
    }

    #[test]
    fn test_drops_unprofitable_node() {
        let mut model = RoutingModel::new(3, 1, 0).expect("valid");
        let cost = model.register_transit_callback(|i, j| if i == 2 || j == 2 { 50 } else { 1 });
        model.set_arc_cost_evaluator_of_all_vehicles(cost).expect("valid");
        model.add_disjunction(&[1], 10).expect("valid");
        model.add_disjunction(&[2], 10).expect("valid");

        let a = LocalSearchEngine::new()
            .solve(&model, &params())
            .expect("solves")
            .expect("feasible");
        assert!(a.is_active(1));
        assert!(!a.is_active(2));
        assert_eq!(a.objective(), 2 + 10);
    }

    #[test]
    fn test_unreachable_mandatory_node_has_no_solution() {
        let mut model = RoutingModel::new(2, 1, 0).expect("valid");
        let time = model.register_transit_callback(|_, _| 100);
        model.add_dimension(time, 0, 50, true, "Time").expect("valid");

        let result = LocalSearchEngine::new().solve(&model, &params()).expect("runs");
        assert!(result.is_none());
    }

    #[test]
    fn test_infeasible_depot_has_no_solution() {
        let mut model = RoutingModel::new(2, 1, 0).expect("valid");
        let time = model.register_transit_callback(|_, _| 0);
        let dim = model.add_dimension(time, 0, 50, true, "Time").expect("valid");
        model.set_cumul_range(dim, 0, 10, 20).expect("valid");
        model.add_disjunction(&[1], 1).expect("valid");

        let result = LocalSearchEngine::new().solve(&model, &params()).expect("runs");
        assert!(result.is_none());
    }

    #[test]
    fn test_greedy_descent_and_guided_agree_on_easy_model() {
        let mut model = RoutingModel::new(5, 2, 0).expect("valid");
        let cost = model.register_transit_callback(|i, j| (i as i64 - j as i64).abs());
        model.set_arc_cost_evaluator_of_all_vehicles(cost).expect("valid");

        let greedy = LocalSearchEngine::new()
            .solve(
                &model,
                &params().with_local_search_metaheuristic(LocalSearchMetaheuristic::GreedyDescent),
            )
            .expect("solves")
            .expect("feasible");
        let guided = LocalSearchEngine::new()
            .with_max_idle_iterations(20)
            .solve(&model, &params())
            .expect("solves")
            .expect("feasible");
        assert_eq!(greedy.objective(), 8);
        assert_eq!(guided.objective(), 8);
    }
}
