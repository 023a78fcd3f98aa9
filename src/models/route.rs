//! Route and visit types.

use chrono::{NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use super::{Distance, LocationCode, Order, RouteNode, Weight};

/// A single stop of a route together with its scheduled time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    /// Node visited.
    pub node: RouteNode,
    /// Time of day the vehicle leaves this node.
    pub departure_time: NaiveTime,
}

/// The decoded route of one vehicle.
///
/// A route always starts and ends at the depot, so `visits` holds the
/// depot at both ends, even when the vehicle serves no order. Aggregates
/// such as boxes and weight are computed from the visits on every call.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use u_shipping::models::{Distance, LocationCode, Route, RouteNode, Visit};
///
/// let depot = LocationCode::parse("1000").unwrap();
/// let at = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
/// let route = Route::new(
///     0,
///     depot.clone(),
///     vec![
///         Visit { node: RouteNode::Depot(depot.clone()), departure_time: at(8) },
///         Visit { node: RouteNode::Depot(depot), departure_time: at(8) },
///     ],
///     0,
///     Distance::of_meters(0.0),
/// );
/// assert!(!route.is_used());
/// assert_eq!(route.number_of_stops(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    vehicle_id: usize,
    depot: LocationCode,
    visits: Vec<Visit>,
    monetary_cost: i64,
    total_distance: Distance,
}

impl Route {
    /// Creates a route from its visits (depot included at both ends).
    pub fn new(
        vehicle_id: usize,
        depot: LocationCode,
        visits: Vec<Visit>,
        monetary_cost: i64,
        total_distance: Distance,
    ) -> Self {
        Self {
            vehicle_id,
            depot,
            visits,
            monetary_cost,
            total_distance,
        }
    }

    /// Vehicle driving this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Depot the route starts and ends at.
    pub fn depot(&self) -> &LocationCode {
        &self.depot
    }

    /// Visits in driving order.
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Nodes in driving order.
    pub fn nodes(&self) -> impl Iterator<Item = &RouteNode> + '_ {
        self.visits.iter().map(|v| &v.node)
    }

    /// Departure times, one per node.
    pub fn departure_times(&self) -> impl Iterator<Item = NaiveTime> + '_ {
        self.visits.iter().map(|v| v.departure_time)
    }

    /// Orders delivered on this route, in driving order.
    pub fn orders(&self) -> impl Iterator<Item = &Order> + '_ {
        self.visits.iter().filter_map(|v| v.node.order())
    }

    /// Time the vehicle leaves the depot.
    pub fn start_time(&self) -> NaiveTime {
        self.visits
            .first()
            .map_or(NaiveTime::MIN, |v| v.departure_time)
    }

    /// Time the vehicle is back at the depot.
    pub fn end_time(&self) -> NaiveTime {
        self.visits
            .last()
            .map_or(NaiveTime::MIN, |v| v.departure_time)
    }

    /// Time between leaving and returning to the depot.
    pub fn total_duration(&self) -> TimeDelta {
        self.end_time() - self.start_time()
    }

    /// Operating cost charged for driving this route.
    pub fn monetary_cost(&self) -> i64 {
        self.monetary_cost
    }

    /// Distance driven.
    pub fn total_distance(&self) -> Distance {
        self.total_distance
    }

    /// Number of nodes, both depot ends included.
    pub fn number_of_stops(&self) -> usize {
        self.visits.len()
    }

    /// Number of orders delivered.
    pub fn number_of_orders(&self) -> usize {
        self.orders().count()
    }

    /// Returns `true` if the vehicle delivers at least one order.
    pub fn is_used(&self) -> bool {
        self.orders().next().is_some()
    }

    /// Boxes carried.
    pub fn total_number_boxes(&self) -> u32 {
        self.orders().map(Order::number_boxes).sum()
    }

    /// Weight carried.
    pub fn total_weight(&self) -> Weight {
        Weight::of_kilograms(self.orders().map(|o| o.weight().kilograms()).sum())
    }
}
