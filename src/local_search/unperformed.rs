//! Moves that change which nodes are visited.
//!
//! # Algorithm
//!
//! - Insertion tries every unvisited node, alone or followed by one of its
//!   nearest unvisited neighbors, at every position of every route.
//! - Swapping replaces a visited node with one of its unvisited neighbors
//!   in place.
//! - Removal drops a segment of up to [`MAX_SEGMENT`] consecutive visits.
//!
//! A move is applied when the route cost change plus the change in drop
//! penalties is negative and the new route is feasible. The first improving
//! move wins.
//!
//! # Complexity
//!
//! Insertion: O(u·k·n·L) per pass where u = unvisited nodes, k = neighbors,
//! n = visited nodes, L = route length (feasibility check).

use rand::seq::SliceRandom;
use rand::Rng;

use super::{spliced, Plan, SearchContext, MAX_SEGMENT};

/// Inserts one unvisited node, or an adjacent pair of them, where it pays.
pub fn insert_unperformed<R: Rng>(plan: &mut Plan, ctx: &SearchContext, rng: &mut R) -> bool {
    let model = ctx.model();
    let mut nodes = plan.unperformed();
    nodes.shuffle(rng);

    for &node in &nodes {
        if ctx.timed_out() {
            return false;
        }
        if let Some(gain) = plan.insertion_gain(model, &[node]) {
            if try_insert(plan, ctx, &[node], gain) {
                return true;
            }
        }
        for &next in ctx.neighbors(node) {
            if plan.is_active(next) {
                continue;
            }
            let Some(gain) = plan.insertion_gain(model, &[node, next]) else {
                continue;
            };
            if try_insert(plan, ctx, &[node, next], gain) {
                return true;
            }
        }
    }
    false
}

fn try_insert(plan: &mut Plan, ctx: &SearchContext, segment: &[usize], gain: i64) -> bool {
    for r in plan.candidate_routes() {
        let route = plan.route(r);
        for pos in 0..=route.len() {
            let candidate = spliced(route, pos, segment);
            let cost = ctx.route_cost(&candidate);
            if cost - plan.cost(r) - gain >= 0 || !ctx.is_feasible(&candidate) {
                continue;
            }
            plan.replace_route(ctx.model(), r, candidate, cost);
            return true;
        }
    }
    false
}

/// Replaces a visited node with an unvisited neighbor where it pays.
pub fn swap_unperformed<R: Rng>(plan: &mut Plan, ctx: &SearchContext, rng: &mut R) -> bool {
    let model = ctx.model();
    let mut routes: Vec<usize> = (0..plan.num_routes()).collect();
    routes.shuffle(rng);

    for r in routes {
        if ctx.timed_out() {
            return false;
        }
        for pos in 0..plan.route(r).len() {
            let outgoing = plan.route(r)[pos];
            for &incoming in ctx.neighbors(outgoing) {
                if plan.is_active(incoming) {
                    continue;
                }
                let Some(penalty) = plan.swap_penalty_delta(model, outgoing, incoming) else {
                    continue;
                };
                let mut candidate = plan.route(r).to_vec();
                candidate[pos] = incoming;
                let cost = ctx.route_cost(&candidate);
                if cost - plan.cost(r) + penalty >= 0 || !ctx.is_feasible(&candidate) {
                    continue;
                }
                plan.replace_route(model, r, candidate, cost);
                return true;
            }
        }
    }
    false
}

/// Drops a segment of visits when its penalty is below what it costs.
pub fn remove_segment<R: Rng>(plan: &mut Plan, ctx: &SearchContext, rng: &mut R) -> bool {
    let model = ctx.model();
    let mut routes: Vec<usize> = (0..plan.num_routes()).collect();
    routes.shuffle(rng);

    for r in routes {
        if ctx.timed_out() {
            return false;
        }
        let len = plan.route(r).len();
        for start in 0..len {
            for seg in 1..=MAX_SEGMENT.min(len - start) {
                let route = plan.route(r);
                let penalty = plan.removal_cost(model, &route[start..start + seg]);
                let mut candidate = Vec::with_capacity(len - seg);
                candidate.extend_from_slice(&route[..start]);
                candidate.extend_from_slice(&route[start + seg..]);
                let cost = ctx.route_cost(&candidate);
                if cost - plan.cost(r) + penalty >= 0 || !ctx.is_feasible(&candidate) {
                    continue;
                }
                plan.replace_route(model, r, candidate, cost);
                return true;
            }
        }
    }
    false
}
