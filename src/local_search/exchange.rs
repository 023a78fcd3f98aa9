//! Inter-route node exchange operator.
//!
//! # Algorithm
//!
//! Swaps one visit of a route with one visit of another route. Both routes
//! must stay feasible. The first swap that lowers their summed cost is
//! applied.
//!
//! # Complexity
//!
//! O(n² × L) per pass where n = visited nodes, L = route length.
//!
//! # Reference
//!
//! Osman, I.H. (1993). "Metastrategy simulated annealing and tabu search
//! algorithms for the vehicle routing problem", *Annals of Operations
//! Research* 41, 421-451.

use rand::seq::SliceRandom;
use rand::Rng;

use super::{Plan, SearchContext};

/// Applies the first improving inter-route swap. Returns `true` if a move
/// was made.
pub fn exchange_nodes<R: Rng>(plan: &mut Plan, ctx: &SearchContext, rng: &mut R) -> bool {
    let mut used: Vec<usize> = (0..plan.num_routes())
        .filter(|&r| !plan.route(r).is_empty())
        .collect();
    if used.len() < 2 {
        return false;
    }
    used.shuffle(rng);

    for (a, &r1) in used.iter().enumerate() {
        if ctx.timed_out() {
            return false;
        }
        for &r2 in &used[a + 1..] {
            let before = plan.cost(r1) + plan.cost(r2);
            for i in 0..plan.route(r1).len() {
                for j in 0..plan.route(r2).len() {
                    let mut first = plan.route(r1).to_vec();
                    let mut second = plan.route(r2).to_vec();
                    std::mem::swap(&mut first[i], &mut second[j]);

                    let cost1 = ctx.route_cost(&first);
                    let cost2 = ctx.route_cost(&second);
                    if cost1 + cost2 >= before
                        || !ctx.is_feasible(&first)
                        || !ctx.is_feasible(&second)
                    {
                        continue;
                    }
                    plan.replace_route(ctx.model(), r1, first, cost1);
                    plan.replace_route(ctx.model(), r2, second, cost2);
                    return true;
                }
            }
        }
    }
    false
}
