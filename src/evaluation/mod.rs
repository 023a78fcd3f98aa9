//! Route feasibility and cumul computation.

mod evaluator;

pub use evaluator::{RouteEvaluator, RouteSchedule, Violation};
