//! Constraint model of a vehicle routing problem.
//!
//! A [`RoutingModel`] holds nodes and vehicles, transit callbacks, cumulative
//! [`Dimension`]s with per-node cumul ranges, optional-node
//! [`Disjunction`]s, and the arc cost. Submitting routes through
//! [`RoutingModel::evaluate_routes`] yields an [`Assignment`] carrying the
//! cumul value of every dimension at every stop.

mod assignment;
mod dimension;
mod model;

pub use assignment::{Assignment, VehiclePath};
pub use dimension::{CallbackId, Dimension, DimensionId};
pub use model::{Disjunction, ModelError, RoutingModel, TransitFn, UnaryTransitFn};
