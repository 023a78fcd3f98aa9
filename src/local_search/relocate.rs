//! Segment relocation within and between routes.
//!
//! # Algorithm
//!
//! Moves a segment of 1 to [`MAX_SEGMENT`] consecutive visits to another
//! position of the same route (Or-opt) or of another route, including one
//! empty route. Both touched routes must stay feasible. The first move that
//! lowers the summed cost of the touched routes is applied.
//!
//! # Complexity
//!
//! O(n² × S × L) per pass where n = visited nodes, S = max segment length,
//! L = route length (feasibility check).
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use rand::seq::SliceRandom;
use rand::Rng;

use super::{spliced, Plan, SearchContext, MAX_SEGMENT};

/// Applies the first improving segment relocation. Returns `true` if a
/// move was made.
pub fn relocate_segment<R: Rng>(plan: &mut Plan, ctx: &SearchContext, rng: &mut R) -> bool {
    let mut sources: Vec<usize> = (0..plan.num_routes())
        .filter(|&r| !plan.route(r).is_empty())
        .collect();
    sources.shuffle(rng);
    let targets = plan.candidate_routes();

    for r1 in sources {
        if ctx.timed_out() {
            return false;
        }
        let len = plan.route(r1).len();
        for start in 0..len {
            for seg in 1..=MAX_SEGMENT.min(len - start) {
                if try_relocate(plan, ctx, &targets, r1, start, seg) {
                    return true;
                }
            }
        }
    }
    false
}

fn try_relocate(
    plan: &mut Plan,
    ctx: &SearchContext,
    targets: &[usize],
    r1: usize,
    start: usize,
    seg: usize,
) -> bool {
    let route = plan.route(r1);
    let segment = route[start..start + seg].to_vec();
    let mut reduced = Vec::with_capacity(route.len() - seg);
    reduced.extend_from_slice(&route[..start]);
    reduced.extend_from_slice(&route[start + seg..]);
    let reduced_cost = ctx.route_cost(&reduced);
    let mut reduced_feasible: Option<bool> = None;

    'targets: for &r2 in targets {
        if r2 == r1 {
            for pos in 0..=reduced.len() {
                if pos == start {
                    continue;
                }
                let candidate = spliced(&reduced, pos, &segment);
                let cost = ctx.route_cost(&candidate);
                if cost >= plan.cost(r1) || !ctx.is_feasible(&candidate) {
                    continue;
                }
                plan.replace_route(ctx.model(), r1, candidate, cost);
                return true;
            }
            continue;
        }

        let target = plan.route(r2);
        let before = plan.cost(r1) + plan.cost(r2);
        for pos in 0..=target.len() {
            let candidate = spliced(target, pos, &segment);
            let cost = ctx.route_cost(&candidate);
            if reduced_cost + cost >= before {
                continue;
            }
            if !*reduced_feasible.get_or_insert_with(|| ctx.is_feasible(&reduced)) {
                continue 'targets;
            }
            if !ctx.is_feasible(&candidate) {
                continue;
            }
            plan.replace_route(ctx.model(), r2, candidate, cost);
            plan.replace_route(ctx.model(), r1, reduced, reduced_cost);
            return true;
        }
    }
    false
}
