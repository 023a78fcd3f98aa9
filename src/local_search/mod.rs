//! Local search over routing plans.
//!
//! - [`insert_unperformed`] / [`swap_unperformed`] / [`remove_segment`]:
//!   change which optional nodes are visited
//! - [`relocate_segment`]: Or-opt and inter-route segment moves
//! - [`exchange_nodes`]: Inter-route node swap
//! - [`two_opt`]: Intra-route segment reversal
//! - [`descend`]: First-improvement descent over all of the above
//! - [`GuidedLocalSearch`]: Arc-penalty metaheuristic (Voudouris & Tsang, 1999)

mod context;
mod descent;
mod exchange;
mod guided;
mod plan;
mod relocate;
mod two_opt;
mod unperformed;

pub use context::{nearest_neighbors, ArcPenalties, SearchContext};
pub use descent::descend;
pub use exchange::exchange_nodes;
pub use guided::GuidedLocalSearch;
pub use plan::{Plan, MANDATORY_DROP_PENALTY};
pub use relocate::relocate_segment;
pub use two_opt::two_opt;
pub use unperformed::{insert_unperformed, remove_segment, swap_unperformed};

/// Longest run of consecutive visits moved or removed at once.
pub const MAX_SEGMENT: usize = 3;

/// `route` with `segment` inserted before position `pos`.
fn spliced(route: &[usize], pos: usize, segment: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(route.len() + segment.len());
    out.extend_from_slice(&route[..pos]);
    out.extend_from_slice(segment);
    out.extend_from_slice(&route[pos..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spliced() {
        assert_eq!(spliced(&[1, 2], 0, &[9]), vec![9, 1, 2]);
        assert_eq!(spliced(&[1, 2], 1, &[8, 9]), vec![1, 8, 9, 2]);
        assert_eq!(spliced(&[1, 2], 2, &[9]), vec![1, 2, 9]);
        assert_eq!(spliced(&[], 0, &[9]), vec![9]);
    }
}
