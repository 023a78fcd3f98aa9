//! Reads business routes back out of an [`Assignment`].

use chrono::NaiveTime;

use crate::formulation::{DISTANCE, TIME};
use crate::models::{DeliveryProblem, Distance, Route, RoutingSolution, Visit};
use crate::routing::{Assignment, RoutingModel};

use super::SolveError;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Decodes `assignment` into one [`Route`] per vehicle plus the dropped
/// orders.
///
/// - visits run from the depot back to the depot, also for idle vehicles;
/// - departure times are the `Time` cumuls read as minutes of the day;
/// - the monetary cost is the sum of the model's arc costs along the path;
/// - the distance is the `Distance` cumul at the end, in meters;
/// - dropped orders are the inactive nodes, in node order.
pub fn decode<P>(
    problem: &P,
    model: &RoutingModel<'_>,
    assignment: &Assignment,
) -> Result<RoutingSolution, SolveError>
where
    P: DeliveryProblem + ?Sized,
{
    let time = model
        .dimension_by_name(TIME)
        .ok_or(SolveError::MissingDimension(TIME))?;
    let distance = model
        .dimension_by_name(DISTANCE)
        .ok_or(SolveError::MissingDimension(DISTANCE))?;
    let depot = problem
        .route_node_at(model.depot())
        .ok_or(SolveError::UnknownNode(model.depot()))?
        .location()
        .clone();

    let mut routes = Vec::with_capacity(assignment.paths().len());
    for (vehicle, path) in assignment.paths().iter().enumerate() {
        let mut visits = Vec::with_capacity(path.path().len());
        for (position, &node) in path.path().iter().enumerate() {
            let route_node = problem
                .route_node_at(node)
                .ok_or(SolveError::UnknownNode(node))?;
            visits.push(Visit {
                node: route_node.clone(),
                departure_time: time_of_day(path.cumul(time, position))?,
            });
        }

        let cost = path
            .path()
            .windows(2)
            .map(|arc| model.arc_cost(arc[0], arc[1]))
            .sum();
        let end = path.path().len() - 1;
        let meters = path.cumul(distance, end);
        routes.push(Route::new(
            vehicle,
            depot.clone(),
            visits,
            cost,
            Distance::of_meters(meters as f64),
        ));
    }

    let mut dropped = Vec::new();
    for node in assignment.unperformed() {
        let order = problem
            .route_node_at(node)
            .and_then(|n| n.order())
            .ok_or(SolveError::UnknownNode(node))?;
        dropped.push(order.clone());
    }

    Ok(RoutingSolution::new(routes, dropped))
}

/// Time of day `minutes` after midnight.
fn time_of_day(minutes: i64) -> Result<NaiveTime, SolveError> {
    let seconds = minutes.saturating_mul(60);
    if !(0..SECONDS_PER_DAY).contains(&seconds) {
        return Err(SolveError::TimeOutOfDay { minutes });
    }
    NaiveTime::from_num_seconds_from_midnight_opt(seconds as u32, 0)
        .ok_or(SolveError::TimeOutOfDay { minutes })
}
