//! Path-cheapest-arc construction over a [`RoutingModel`].
//!
//! # Algorithm
//!
//! Routes are built one vehicle at a time. From the last node of the current
//! route, the unvisited node reached by the cheapest arc is appended,
//! provided the partial route stays feasible in every dimension and its
//! disjunction has no visited member yet. Ties go to the lower node index.
//! When no extension is possible, the route is cut back to its longest
//! prefix that can return to the depot; the removed nodes stay available
//! for the next vehicle.
//!
//! # Complexity
//!
//! O(V·n²·log n) in the worst case where n = number of nodes and
//! V = number of vehicles.

use crate::evaluation::RouteEvaluator;
use crate::routing::RoutingModel;

/// Builds one route per vehicle by greedy cheapest-arc extension.
///
/// Returns `routes[v]` as the nodes visited by vehicle `v`, depot excluded.
/// Nodes that fit no route are left out; mandatory ones among them make the
/// result incomplete, which the caller has to handle.
///
/// # Examples
///
/// ```
/// use u_shipping::constructive::path_cheapest_arc;
/// use u_shipping::routing::RoutingModel;
///
/// let mut model = RoutingModel::new(4, 1, 0).unwrap();
/// let cost = model.register_transit_callback(|i, j| (i as i64 - j as i64).abs());
/// model.set_arc_cost_evaluator_of_all_vehicles(cost).unwrap();
///
/// let routes = path_cheapest_arc(&model);
/// assert_eq!(routes, vec![vec![1, 2, 3]]);
/// ```
pub fn path_cheapest_arc(model: &RoutingModel<'_>) -> Vec<Vec<usize>> {
    let evaluator = RouteEvaluator::new(model);
    let depot = model.depot();
    let n = model.num_nodes();

    let mut visited = vec![false; n];
    visited[depot] = true;
    let mut disjunction_used = vec![false; model.disjunctions().len()];

    let mut routes = Vec::with_capacity(model.num_vehicles());
    for _ in 0..model.num_vehicles() {
        let mut route: Vec<usize> = Vec::new();
        let mut closable = 0;
        let mut current = depot;

        loop {
            let mut candidates: Vec<(i64, usize)> = (0..n)
                .filter(|&node| {
                    !visited[node]
                        && model
                            .disjunction_of(node)
                            .is_none_or(|d| !disjunction_used[d])
                })
                .map(|node| (model.arc_cost(current, node), node))
                .collect();
            candidates.sort_unstable();

            let next = candidates.into_iter().map(|(_, node)| node).find(|&node| {
                route.push(node);
                let ok = evaluator.is_partial_feasible(&route);
                route.pop();
                ok
            });

            let Some(next) = next else { break };
            route.push(next);
            visited[next] = true;
            if let Some(d) = model.disjunction_of(next) {
                disjunction_used[d] = true;
            }
            if evaluator.is_feasible(&route) {
                closable = route.len();
            }
            current = next;
        }

        for node in route.drain(closable..) {
            visited[node] = false;
            if let Some(d) = model.disjunction_of(node) {
                disjunction_used[d] = false;
            }
        }
        routes.push(route);
    }
    routes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_cost(model: &mut RoutingModel<'_>) {
        let cost = model.register_transit_callback(|i, j| (i as i64 - j as i64).abs());
        model.set_arc_cost_evaluator_of_all_vehicles(cost).expect("valid");
    }

    #[test]
    fn test_single_node_model() {
        let model = RoutingModel::new(1, 2, 0).expect("valid");
        assert_eq!(path_cheapest_arc(&model), vec![Vec::<usize>::new(); 2]);
    }

    #[test]
    fn test_capacity_splits_routes() {
        let mut model = RoutingModel::new(5, 2, 0).expect("valid");
        line_cost(&mut model);
        let load = model.register_unary_transit_callback(|node| if node == 0 { 0 } else { 1 });
        model.add_dimension(load, 0, 2, true, "Boxes").expect("valid");

        let routes = path_cheapest_arc(&model);
        assert_eq!(routes, vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn test_prefix_cut_back() {
        // node 2 can be reached but never left (return leg too long)
        let mut model = RoutingModel::new(3, 1, 0).expect("valid");
        line_cost(&mut model);
        let time = model.register_transit_callback(|i, j| if (i, j) == (2, 0) { 100 } else { 1 });
        model.add_dimension(time, 0, 10, true, "Time").expect("valid");
        model.add_disjunction(&[2], 5).expect("valid");

        let routes = path_cheapest_arc(&model);
        assert_eq!(routes, vec![vec![1]]);
    }

    #[test]
    fn test_disjunction_visited_once() {
        let mut model = RoutingModel::new(4, 1, 0).expect("valid");
        line_cost(&mut model);
        model.add_disjunction(&[1, 2], 10).expect("valid");

        let routes = path_cheapest_arc(&model);
        assert_eq!(routes, vec![vec![1, 3]]);
    }

    #[test]
    fn test_skips_infeasible_cheap_arc() {
        // node 1 is cheapest but its window is already closed
        let mut model = RoutingModel::new(3, 1, 0).expect("valid");
        line_cost(&mut model);
        let time = model.register_transit_callback(|_, _| 5);
        let dim = model.add_dimension(time, 0, 100, true, "Time").expect("valid");
        model.set_cumul_range(dim, 1, 0, 2).expect("valid");
        model.add_disjunction(&[1], 3).expect("valid");

        let routes = path_cheapest_arc(&model);
        assert_eq!(routes, vec![vec![2]]);
    }
}
