//! Decoded routing solution.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::{Distance, Order, Route};

/// A complete answer to a delivery problem: one route per vehicle plus the
/// orders handed to the hub.
///
/// Every aggregate is computed from the routes on demand, so the values
/// always agree with the underlying data.
///
/// # Examples
///
/// ```
/// use u_shipping::models::RoutingSolution;
///
/// let sol = RoutingSolution::new(Vec::new(), Vec::new());
/// assert_eq!(sol.total_monetary_cost(), 0.0);
/// assert_eq!(sol.number_of_direct_delivered_orders(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingSolution {
    routes: Vec<Route>,
    dropped_orders: Vec<Order>,
}

impl RoutingSolution {
    /// Creates a solution from decoded routes and dropped orders.
    pub fn new(routes: Vec<Route>, dropped_orders: Vec<Order>) -> Self {
        Self {
            routes,
            dropped_orders,
        }
    }

    /// Routes, indexed by vehicle.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Orders not delivered by any vehicle.
    pub fn dropped_orders(&self) -> &[Order] {
        &self.dropped_orders
    }

    /// Hub cost of every order, whether routed or dropped.
    ///
    /// This is what the whole order set would cost without direct delivery,
    /// so it does not depend on the routing outcome.
    pub fn total_cost_without_direct_delivery(&self) -> f64 {
        let routed: f64 = self
            .routes
            .iter()
            .flat_map(Route::orders)
            .map(Order::total_hub_delivery_cost)
            .sum();
        routed + self.dropped_hub_cost()
    }

    /// Route operating costs plus the hub cost of the dropped orders.
    pub fn total_monetary_cost(&self) -> f64 {
        let routes: i64 = self.routes.iter().map(Route::monetary_cost).sum();
        routes as f64 + self.dropped_hub_cost()
    }

    /// Savings of this solution compared to sending everything to the hub.
    pub fn profit(&self) -> f64 {
        self.total_cost_without_direct_delivery() - self.total_monetary_cost()
    }

    /// Latest return to the depot, midnight if there are no routes.
    pub fn last_route_end_time(&self) -> NaiveTime {
        self.routes
            .iter()
            .map(Route::end_time)
            .max()
            .unwrap_or(NaiveTime::MIN)
    }

    /// Distance driven by the whole fleet.
    pub fn total_distance(&self) -> Distance {
        self.routes
            .iter()
            .fold(Distance::zero(), |acc, r| acc.add(&r.total_distance()))
    }

    /// Number of orders delivered by a vehicle.
    pub fn number_of_direct_delivered_orders(&self) -> usize {
        self.routes.iter().map(Route::number_of_orders).sum()
    }

    /// Number of orders handed to the hub.
    pub fn number_of_dropped_orders(&self) -> usize {
        self.dropped_orders.len()
    }

    /// Number of vehicles that deliver at least one order.
    pub fn number_of_used_vehicles(&self) -> usize {
        self.routes.iter().filter(|r| r.is_used()).count()
    }

    /// Share of the fleet that is used, in `[0, 1]`.
    pub fn vehicle_utilization(&self) -> f64 {
        if self.routes.is_empty() {
            return 0.0;
        }
        self.number_of_used_vehicles() as f64 / self.routes.len() as f64
    }

    fn dropped_hub_cost(&self) -> f64 {
        self.dropped_orders
            .iter()
            .map(Order::total_hub_delivery_cost)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LocationCode, RouteNode, TimeWindow, Visit, Weight};

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
    }

    fn depot() -> LocationCode {
        LocationCode::parse("1000").expect("valid")
    }

    fn order(id: &str, boxes: u32, per_box: f64) -> Order {
        Order::new(
            id,
            LocationCode::parse("2000").expect("valid"),
            boxes,
            TimeWindow::of(8, 0, 18, 0).expect("valid"),
            Weight::of_kilograms(1.0),
            per_box,
        )
    }

    fn route(vehicle: usize, orders: Vec<Order>, cost: i64, km: f64, end: NaiveTime) -> Route {
        let mut visits = vec![Visit {
            node: RouteNode::Depot(depot()),
            departure_time: at(8, 0),
        }];
        visits.extend(orders.into_iter().map(|o| Visit {
            node: RouteNode::Order(o),
            departure_time: at(9, 0),
        }));
        visits.push(Visit {
            node: RouteNode::Depot(depot()),
            departure_time: end,
        });
        Route::new(vehicle, depot(), visits, cost, Distance::of_kilometers(km))
    }

    fn sample() -> RoutingSolution {
        RoutingSolution::new(
            vec![
                route(0, vec![order("a", 1, 10.0), order("b", 1, 10.0)], 13, 3.0, at(9, 30)),
                route(1, vec![order("c", 2, 10.0)], 8, 2.5, at(10, 15)),
                route(2, Vec::new(), 0, 0.0, at(8, 0)),
            ],
            vec![order("d", 11, 10.0)],
        )
    }

    #[test]
    fn test_cost_aggregates() {
        let sol = sample();
        assert_eq!(sol.total_cost_without_direct_delivery(), 150.0);
        assert_eq!(sol.total_monetary_cost(), 21.0 + 110.0);
        assert_eq!(sol.profit(), 150.0 - 131.0);
    }

    #[test]
    fn test_counts() {
        let sol = sample();
        assert_eq!(sol.number_of_direct_delivered_orders(), 3);
        assert_eq!(sol.number_of_dropped_orders(), 1);
        assert_eq!(sol.number_of_used_vehicles(), 2);
        assert!((sol.vehicle_utilization() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_time_and_distance() {
        let sol = sample();
        assert_eq!(sol.last_route_end_time(), at(10, 15));
        assert!((sol.total_distance().kilometers() - 5.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_solution() {
        let sol = RoutingSolution::new(Vec::new(), Vec::new());
        assert_eq!(sol.last_route_end_time(), NaiveTime::MIN);
        assert_eq!(sol.total_distance().kilometers(), 0.0);
        assert_eq!(sol.vehicle_utilization(), 0.0);
        assert_eq!(sol.profit(), 0.0);
    }

    #[test]
    fn test_aggregates_are_idempotent() {
        let sol = sample();
        assert_eq!(sol.total_monetary_cost(), sol.total_monetary_cost());
        assert_eq!(sol.total_distance(), sol.total_distance());
        assert_eq!(sol.clone(), sol);
    }
}
