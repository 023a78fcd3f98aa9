//! Intra-route 2-opt improvement.
//!
//! # Algorithm
//!
//! For each route and each pair of positions `i < j`, reverses the visits
//! between them. Arc costs may be asymmetric, so the whole candidate route
//! is re-priced and re-checked rather than using the classic two-edge delta.
//!
//! # Complexity
//!
//! O(L³) per route and pass where L = route length.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A Method for Solving Traveling-Salesman Problems",
//! *Operations Research* 6(6), 791-812.

use rand::seq::SliceRandom;
use rand::Rng;

use super::{Plan, SearchContext};

/// Applies the first improving segment reversal. Returns `true` if a move
/// was made.
pub fn two_opt<R: Rng>(plan: &mut Plan, ctx: &SearchContext, rng: &mut R) -> bool {
    let mut routes: Vec<usize> = (0..plan.num_routes())
        .filter(|&r| plan.route(r).len() >= 2)
        .collect();
    routes.shuffle(rng);

    for r in routes {
        if ctx.timed_out() {
            return false;
        }
        let len = plan.route(r).len();
        for i in 0..len - 1 {
            for j in (i + 1)..len {
                let mut candidate = plan.route(r).to_vec();
                candidate[i..=j].reverse();
                let cost = ctx.route_cost(&candidate);
                if cost >= plan.cost(r) || !ctx.is_feasible(&candidate) {
                    continue;
                }
                plan.replace_route(ctx.model(), r, candidate, cost);
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::local_search::ArcPenalties;
    use crate::routing::RoutingModel;

    fn line_model<'a>() -> RoutingModel<'a> {
        let mut model = RoutingModel::new(5, 1, 0).expect("valid");
        let cost = model.register_transit_callback(|i, j| (i as i64 - j as i64).abs());
        model.set_arc_cost_evaluator_of_all_vehicles(cost).expect("valid");
        model
    }

    #[test]
    fn test_uncrosses_route() {
        let model = line_model();
        let penalties = ArcPenalties::default();
        let ctx = SearchContext::new(&model, &penalties, &[], Instant::now() + Duration::from_secs(60));
        let mut plan = Plan::new(&model, vec![vec![1, 3, 2, 4]], |r| ctx.route_cost(r));
        assert_eq!(plan.cost(0), 1 + 2 + 1 + 2 + 4);

        let mut rng = StdRng::seed_from_u64(9);
        assert!(two_opt(&mut plan, &ctx, &mut rng));
        assert_eq!(plan.route(0), &[1, 2, 3, 4]);
        assert_eq!(plan.cost(0), 8);
        assert!(!two_opt(&mut plan, &ctx, &mut rng));
    }

    #[test]
    fn test_reversal_keeps_window_node_first() {
        // node 4 must be reached by time 5; one unit of service per stop
        let mut model = line_model();
        let time = model.register_transit_callback(|i, j| {
            if i == j {
                0
            } else {
                (i as i64 - j as i64).abs() + 1
            }
        });
        let dim = model.add_dimension(time, 0, 100, true, "Time").expect("valid");
        model.set_cumul_range(dim, 4, 0, 5).expect("valid");
        let penalties = ArcPenalties::default();
        let ctx = SearchContext::new(&model, &penalties, &[], Instant::now() + Duration::from_secs(60));
        let mut plan = Plan::new(&model, vec![vec![4, 1, 2, 3]], |r| ctx.route_cost(r));
        assert_eq!(plan.cost(0), 12);

        let mut rng = StdRng::seed_from_u64(9);
        while two_opt(&mut plan, &ctx, &mut rng) {}
        assert_eq!(plan.route(0), &[4, 3, 2, 1]);
        assert_eq!(plan.cost(0), 8);
    }
}
