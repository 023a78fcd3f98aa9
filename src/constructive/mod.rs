//! Constructive heuristics for building initial routing solutions.
//!
//! - [`path_cheapest_arc`]: Greedy cheapest-arc path extension with
//!   feasibility checks, O(V·n² log n)

mod path_cheapest_arc;

pub use path_cheapest_arc::path_cheapest_arc;
