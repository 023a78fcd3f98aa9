//! Delivery problem trait and its table-backed implementation.

use std::collections::HashSet;
use std::time::Duration;

use crate::config::{ConfigError, RoutingConfig};
use crate::distance::TravelTable;

use super::{Distance, Order, RouteNode};

/// Invalid problem data.
#[derive(Debug, thiserror::Error)]
pub enum ProblemError {
    /// The configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Two orders share the same identifier.
    #[error("order `{0}` appears more than once")]
    DuplicateOrder(String),
}

/// Read-only view of a delivery problem as the formulation sees it.
///
/// Node 0 is the depot; nodes `1..number_route_nodes()` are the orders.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_shipping::config::RoutingConfig;
/// use u_shipping::distance::TravelTable;
/// use u_shipping::models::{DeliveryData, DeliveryProblem, Distance, RouteNode};
///
/// let data = DeliveryData::new(Vec::new(), TravelTable::new(), RoutingConfig::default()).unwrap();
/// assert_eq!(data.number_route_nodes(), 1);
///
/// let depot = data.route_node_at(0).unwrap();
/// assert!(depot.is_depot());
/// // depot to depot is free even without a table entry
/// assert_eq!(data.duration(depot, depot), Duration::ZERO);
/// ```
pub trait DeliveryProblem: Send + Sync {
    /// Routing configuration of this run.
    fn config(&self) -> &RoutingConfig;

    /// Number of nodes, depot included.
    fn number_route_nodes(&self) -> usize;

    /// The node at `index`, or `None` if out of range.
    fn route_node_at(&self, index: usize) -> Option<&RouteNode>;

    /// Travel distance between two nodes.
    fn distance(&self, from: &RouteNode, to: &RouteNode) -> Distance;

    /// Travel time between two nodes.
    fn duration(&self, from: &RouteNode, to: &RouteNode) -> Duration;

    /// Number of orders (nodes other than the depot).
    fn number_orders(&self) -> usize {
        self.number_route_nodes().saturating_sub(1)
    }
}

/// Orders, travel table, and configuration of one run.
#[derive(Debug, Clone)]
pub struct DeliveryData {
    nodes: Vec<RouteNode>,
    table: TravelTable,
    config: RoutingConfig,
}

impl DeliveryData {
    /// Bundles validated input data.
    ///
    /// Orders keep their input order: order `k` becomes node `k + 1`.
    pub fn new(
        orders: Vec<Order>,
        table: TravelTable,
        config: RoutingConfig,
    ) -> Result<Self, ProblemError> {
        config.validate()?;

        let mut seen = HashSet::with_capacity(orders.len());
        for order in &orders {
            if !seen.insert(order.id()) {
                return Err(ProblemError::DuplicateOrder(order.id().to_owned()));
            }
        }

        let mut nodes = Vec::with_capacity(orders.len() + 1);
        nodes.push(RouteNode::Depot(config.depot.clone()));
        nodes.extend(orders.into_iter().map(RouteNode::Order));

        Ok(Self {
            nodes,
            table,
            config,
        })
    }

    /// The travel table.
    pub fn table(&self) -> &TravelTable {
        &self.table
    }

    /// Orders in node order.
    pub fn orders(&self) -> impl Iterator<Item = &Order> + '_ {
        self.nodes.iter().filter_map(RouteNode::order)
    }
}

impl DeliveryProblem for DeliveryData {
    fn config(&self) -> &RoutingConfig {
        &self.config
    }

    fn number_route_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn route_node_at(&self, index: usize) -> Option<&RouteNode> {
        self.nodes.get(index)
    }

    fn distance(&self, from: &RouteNode, to: &RouteNode) -> Distance {
        if from.is_depot() && to.is_depot() {
            return Distance::zero();
        }
        self.table.distance(from.location(), to.location())
    }

    fn duration(&self, from: &RouteNode, to: &RouteNode) -> Duration {
        if from.is_depot() && to.is_depot() {
            return Duration::ZERO;
        }
        self.table.duration(from.location(), to.location())
    }
}
