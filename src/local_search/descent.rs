//! Greedy descent over all move operators.

use rand::Rng;

use super::{
    exchange_nodes, insert_unperformed, relocate_segment, remove_segment, swap_unperformed,
    two_opt, Plan, SearchContext,
};

/// Applies improving moves until none is left or time runs out.
///
/// Operators are tried in a fixed order and the scan restarts from the
/// first one after every applied move. Returns the number of moves applied.
pub fn descend<R: Rng>(plan: &mut Plan, ctx: &SearchContext, rng: &mut R) -> usize {
    let mut moves = 0;
    while !ctx.timed_out() {
        let improved = insert_unperformed(plan, ctx, rng)
            || swap_unperformed(plan, ctx, rng)
            || relocate_segment(plan, ctx, rng)
            || exchange_nodes(plan, ctx, rng)
            || two_opt(plan, ctx, rng)
            || remove_segment(plan, ctx, rng);
        if !improved {
            break;
        }
        moves += 1;
    }
    moves
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::constructive::path_cheapest_arc;
    use crate::local_search::{nearest_neighbors, ArcPenalties};
    use crate::routing::RoutingModel;

    #[test]
    fn test_descent_never_worsens() {
        // a ring of 8 nodes around the depot
        let mut model = RoutingModel::new(9, 2, 0).expect("valid");
        let cost = model.register_transit_callback(|i, j| {
            if i == j {
                return 0;
            }
            if i == 0 || j == 0 {
                return 10;
            }
            let d = (i as i64 - j as i64).rem_euclid(8);
            d.min(8 - d) * 3
        });
        model.set_arc_cost_evaluator_of_all_vehicles(cost).expect("valid");
        for node in 1..9 {
            model.add_disjunction(&[node], 15).expect("valid");
        }

        let penalties = ArcPenalties::default();
        let neighbors = nearest_neighbors(&model, 4);
        let ctx = SearchContext::new(&model, &penalties, &neighbors, Instant::now() + Duration::from_secs(60));
        let mut plan = Plan::new(&model, path_cheapest_arc(&model), |r| ctx.route_cost(r));
        let before = plan.objective(&model);

        let mut rng = StdRng::seed_from_u64(42);
        descend(&mut plan, &ctx, &mut rng);
        assert!(plan.objective(&model) <= before);
        // every node is worth visiting: 8 stops on one loop cost 10 + 7×3 + 10
        assert!(plan.unperformed().is_empty());
    }

    #[test]
    fn test_descent_stops_at_deadline() {
        let model = RoutingModel::new(3, 1, 0).expect("valid");
        let penalties = ArcPenalties::default();
        let ctx = SearchContext::new(&model, &penalties, &[], Instant::now());
        let mut plan = Plan::new(&model, vec![vec![]], |r| ctx.route_cost(r));
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(descend(&mut plan, &ctx, &mut rng), 0);
        assert_eq!(plan.missing_mandatory(&model), 2);
    }
}
