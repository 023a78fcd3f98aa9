//! Travel distances and durations.
//!
//! Provides a sparse, directed table with an explicit unreachable fallback
//! for business data, and a dense integer matrix for precomputed transits.

mod matrix;
mod table;

pub use matrix::ArcMatrix;
pub use table::{Edge, TravelTable, UNREACHABLE_DISTANCE_KM, UNREACHABLE_DURATION};
