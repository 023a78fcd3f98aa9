//! Translation of a delivery problem into a [`RoutingModel`].
//!
//! # Model
//!
//! Node 0 is the depot; node `k + 1` is the `k`-th order. Every transit is
//! precomputed into an [`ArcMatrix`] once, so callbacks are table lookups.
//!
//! | Dimension | Transit | Capacity | Start |
//! |-----------|---------|----------|-------|
//! | `Distance` | meters | 1 000 000 | 0 |
//! | `Time` | minutes, service included on arrival at an order | 1440 | free |
//! | `Boxes` | boxes of the node being left | per vehicle | 0 |
//! | `Weight` | grams of the node being left | per vehicle | 0 |
//! | `MonetaryCost` | `hourly cost × minutes / 60` | 8 hours of cost | 0 |
//!
//! Order cumuls in `Time` are limited to the order's delivery window and the
//! depot cumul to `[0, 1439]`, so every route leaves and returns within the
//! day. Each order is optional, dropping it costs its total hub delivery
//! cost. The monetary transit is also the arc cost.

use tracing::debug;

use crate::config::{ConfigError, RoutingConfig};
use crate::distance::ArcMatrix;
use crate::engine::{FirstSolutionStrategy, LocalSearchMetaheuristic, SearchParameters};
use crate::models::{DeliveryProblem, RouteNode};
use crate::routing::{ModelError, RoutingModel};

/// Name of the travelled-distance dimension (meters).
pub const DISTANCE: &str = "Distance";
/// Name of the time-of-day dimension (minutes).
pub const TIME: &str = "Time";
/// Name of the box-load dimension.
pub const BOXES: &str = "Boxes";
/// Name of the weight-load dimension (grams).
pub const WEIGHT: &str = "Weight";
/// Name of the accumulated vehicle cost dimension.
pub const MONETARY_COST: &str = "MonetaryCost";

/// Upper bound of the distance travelled by one vehicle, in meters.
pub const MAX_ROUTE_METERS: i64 = 1_000_000;
/// Length of the planning day, in minutes.
pub const DAY_MINUTES: i64 = 24 * 60;
/// Working hours covered by the monetary cost cap.
pub const COST_CAP_HOURS: f64 = 8.0;

/// Problem data that cannot be turned into a model.
#[derive(Debug, thiserror::Error)]
pub enum FormulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Model(#[from] ModelError),
    /// The problem reports a node it cannot return.
    #[error("route node {0} is missing from the problem")]
    MissingNode(usize),
    /// Node 0 is not the depot, or an order sits at node 0.
    #[error("node {0} has the wrong kind (node 0 must be the only depot)")]
    NodeKind(usize),
}

/// Builds the routing model of `problem`.
///
/// # Examples
///
/// ```
/// use u_shipping::config::RoutingConfig;
/// use u_shipping::distance::TravelTable;
/// use u_shipping::formulation::{build_model, TIME};
/// use u_shipping::models::{DeliveryData, LocationCode};
///
/// let config = RoutingConfig::default()
///     .with_number_vehicles(3)
///     .with_depot(LocationCode::parse("1000").unwrap());
/// let data = DeliveryData::new(Vec::new(), TravelTable::new(), config).unwrap();
///
/// let model = build_model(&data).unwrap();
/// assert_eq!(model.num_nodes(), 1);
/// assert_eq!(model.num_vehicles(), 3);
/// assert!(model.dimension_by_name(TIME).is_some());
/// ```
pub fn build_model<P>(problem: &P) -> Result<RoutingModel<'static>, FormulationError>
where
    P: DeliveryProblem + ?Sized,
{
    let config = problem.config();
    config.validate()?;

    let n = problem.number_route_nodes();
    let nodes = (0..n)
        .map(|i| problem.route_node_at(i).ok_or(FormulationError::MissingNode(i)))
        .collect::<Result<Vec<&RouteNode>, _>>()?;
    if let Some(i) = (0..n).find(|&i| nodes[i].is_depot() != (i == 0)) {
        return Err(FormulationError::NodeKind(i));
    }

    let distance = ArcMatrix::from_fn(n, |i, j| {
        round(problem.distance(nodes[i], nodes[j]).meters())
    });
    let service = config.service_time.as_secs();
    let time = ArcMatrix::from_fn(n, |i, j| {
        let mut seconds = problem.duration(nodes[i], nodes[j]).as_secs();
        if !nodes[j].is_depot() {
            seconds = seconds.saturating_add(service);
        }
        round(seconds as f64 / 60.0)
    });
    let hourly = config.hourly_vehicle_cost;
    let monetary = ArcMatrix::from_fn(n, |i, j| round(hourly * time.get(i, j) as f64 / 60.0));
    let boxes: Vec<i64> = nodes
        .iter()
        .map(|node| node.order().map_or(0, |o| i64::from(o.number_boxes())))
        .collect();
    let grams: Vec<i64> = nodes
        .iter()
        .map(|node| node.order().map_or(0, |o| round(o.weight().grams())))
        .collect();

    let mut model = RoutingModel::new(n, config.number_vehicles, 0)?;

    let distance_cb = model.register_transit_callback(move |i, j| distance.get(i, j));
    model.add_dimension(distance_cb, 0, MAX_ROUTE_METERS, true, DISTANCE)?;

    let windows: Vec<(usize, i64, i64)> = nodes
        .iter()
        .enumerate()
        .filter_map(|(i, node)| {
            node.order().map(|o| {
                let window = o.time_window();
                (i, window.start_minutes(), window.end_minutes())
            })
        })
        .collect();
    let time_cb = model.register_transit_callback(move |i, j| time.get(i, j));
    let time_dim = model.add_dimension(time_cb, 0, DAY_MINUTES, false, TIME)?;
    // departures and returns must be a time of day, so 24:00 is excluded
    model.set_cumul_range(time_dim, 0, 0, DAY_MINUTES - 1)?;
    for (node, start, end) in windows {
        model.set_cumul_range(time_dim, node, start, end)?;
    }

    let boxes_cb = model.register_unary_transit_callback(move |i| boxes[i]);
    model.add_dimension(
        boxes_cb,
        0,
        i64::from(config.max_boxes_per_vehicle),
        true,
        BOXES,
    )?;
    let weight_cb = model.register_unary_transit_callback(move |i| grams[i]);
    model.add_dimension(
        weight_cb,
        0,
        round(config.max_weight_per_vehicle.grams()),
        true,
        WEIGHT,
    )?;

    for (i, node) in nodes.iter().enumerate() {
        if let Some(order) = node.order() {
            model.add_disjunction(&[i], round(order.total_hub_delivery_cost()))?;
        }
    }

    let monetary_cb = model.register_transit_callback(move |i, j| monetary.get(i, j));
    model.set_arc_cost_evaluator_of_all_vehicles(monetary_cb)?;
    model.add_dimension(
        monetary_cb,
        0,
        round(COST_CAP_HOURS * hourly),
        true,
        MONETARY_COST,
    )?;

    debug!(
        nodes = n,
        vehicles = config.number_vehicles,
        "routing model built"
    );
    Ok(model)
}

/// Search parameters for a run with `config`.
pub fn search_parameters(config: &RoutingConfig) -> SearchParameters {
    SearchParameters {
        first_solution_strategy: FirstSolutionStrategy::PathCheapestArc,
        local_search_metaheuristic: LocalSearchMetaheuristic::GuidedLocalSearch,
        time_limit: config.solver_time_limit,
    }
}

/// Rounds half away from zero, saturating at the `i64` range.
fn round(value: f64) -> i64 {
    value.round() as i64
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::distance::TravelTable;
    use crate::models::{DeliveryData, Distance, LocationCode, Order, TimeWindow, Weight};

    fn loc(code: &str) -> LocationCode {
        LocationCode::parse(code).expect("valid")
    }

    /// Depot 1000 and two orders at 2000 and 3000.
    fn data() -> DeliveryData {
        let mut table = TravelTable::new();
        let km = Distance::of_kilometers;
        table.set(&loc("1000"), &loc("2000"), km(1.5), Duration::from_secs(15 * 60));
        table.set(&loc("2000"), &loc("3000"), km(2.0), Duration::from_secs(20 * 60 + 29));
        table.set(&loc("3000"), &loc("1000"), km(1.0), Duration::from_secs(25 * 60));
        let orders = vec![
            Order::new(
                "a",
                loc("2000"),
                3,
                TimeWindow::of(8, 0, 12, 0).expect("valid"),
                Weight::of_kilograms(2.5),
                10.0,
            ),
            Order::new(
                "b",
                loc("3000"),
                1,
                TimeWindow::of(9, 30, 18, 0).expect("valid"),
                Weight::of_grams(400.4),
                7.25,
            ),
        ];
        let config = RoutingConfig::default()
            .with_number_vehicles(2)
            .with_depot(loc("1000"))
            .with_hourly_vehicle_cost(10.0)
            .with_max_boxes_per_vehicle(10)
            .with_max_weight_per_vehicle(Weight::of_kilograms(10.0));
        DeliveryData::new(orders, table, config).expect("valid")
    }

    #[test]
    fn test_dimensions_registered() {
        let model = build_model(&data()).expect("builds");
        let names: Vec<&str> = model.dimensions().iter().map(|d| d.name()).collect();
        assert_eq!(names, vec![DISTANCE, TIME, BOXES, WEIGHT, MONETARY_COST]);
        assert_eq!(model.num_nodes(), 3);
        assert_eq!(model.num_vehicles(), 2);
    }

    #[test]
    fn test_time_transit_includes_service() {
        let model = build_model(&data()).expect("builds");
        let time = model.dimension_by_name(TIME).expect("time");
        let dim = model.dimension(time).expect("time");
        // 15 min travel + 10 min service
        assert_eq!(model.transit(dim.callback(), 0, 1), 25);
        // 20 min 29 s + 10 min rounds down to 30
        assert_eq!(model.transit(dim.callback(), 1, 2), 30);
        // back to the depot: no service
        assert_eq!(model.transit(dim.callback(), 2, 0), 25);
        assert_eq!(model.transit(dim.callback(), 0, 0), 0);
        assert!(!dim.fix_start_cumul_to_zero());
        assert_eq!(dim.capacity(), DAY_MINUTES);
        assert_eq!(dim.cumul_range(1), (480, 720));
        assert_eq!(dim.cumul_range(2), (570, 1080));
        assert_eq!(dim.cumul_range(0), (0, DAY_MINUTES - 1));
    }

    #[test]
    fn test_unreachable_arc_is_huge() {
        let model = build_model(&data()).expect("builds");
        let time = model.dimension_by_name(TIME).expect("time");
        let dim = model.dimension(time).expect("time");
        // 1 000 000 s + 600 s service
        assert_eq!(model.transit(dim.callback(), 2, 1), 16677);
        let distance = model.dimension_by_name(DISTANCE).expect("distance");
        let dim = model.dimension(distance).expect("distance");
        assert_eq!(model.transit(dim.callback(), 2, 1), 100_000_000);
        assert_eq!(model.transit(dim.callback(), 0, 1), 1500);
    }

    #[test]
    fn test_loads_counted_at_departure() {
        let model = build_model(&data()).expect("builds");
        let boxes = model.dimension_by_name(BOXES).expect("boxes");
        let dim = model.dimension(boxes).expect("boxes");
        assert_eq!(model.transit(dim.callback(), 0, 1), 0);
        assert_eq!(model.transit(dim.callback(), 1, 2), 3);
        assert_eq!(dim.capacity(), 10);
        let weight = model.dimension_by_name(WEIGHT).expect("weight");
        let dim = model.dimension(weight).expect("weight");
        assert_eq!(model.transit(dim.callback(), 1, 0), 2500);
        assert_eq!(model.transit(dim.callback(), 2, 0), 400);
        assert_eq!(dim.capacity(), 10_000);
    }

    #[test]
    fn test_cost_and_penalties() {
        let model = build_model(&data()).expect("builds");
        // 10/h over 25 min = 4.17
        assert_eq!(model.arc_cost(0, 1), 4);
        // 30 min
        assert_eq!(model.arc_cost(1, 2), 5);
        assert_eq!(model.penalty_of(1), Some(30));
        // 7.25 rounds to 7
        assert_eq!(model.penalty_of(2), Some(7));
        assert_eq!(model.penalty_of(0), None);
        let cost = model.dimension_by_name(MONETARY_COST).expect("cost");
        assert_eq!(model.dimension(cost).expect("cost").capacity(), 80);
    }

    #[test]
    fn test_search_parameters_follow_config() {
        let config = RoutingConfig::default().with_solver_time_limit(Duration::from_secs(3));
        let params = search_parameters(&config);
        assert_eq!(params.time_limit, Duration::from_secs(3));
        assert_eq!(params.first_solution_strategy, FirstSolutionStrategy::PathCheapestArc);
        assert_eq!(
            params.local_search_metaheuristic,
            LocalSearchMetaheuristic::GuidedLocalSearch
        );
    }
}
