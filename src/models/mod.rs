//! Domain model types for depot delivery routing.
//!
//! Provides location codes and unit-tagged measures, orders with delivery
//! windows, route nodes, the problem view consumed by the formulation, and
//! the decoded routes and solution handed back to callers.

mod location;
mod measure;
mod node;
mod order;
mod problem;
mod route;
mod solution;

pub use location::{LocationCode, LocationError};
pub use measure::{Distance, DistanceUnit, Weight, WeightUnit};
pub use node::RouteNode;
pub use order::{Order, TimeWindow};
pub use problem::{DeliveryData, DeliveryProblem, ProblemError};
pub use route::{Route, Visit};
pub use solution::RoutingSolution;
