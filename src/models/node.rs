//! Route nodes: the depot or an order stop.

use serde::{Deserialize, Serialize};

use super::{LocationCode, Order};

/// A stop on a vehicle route.
///
/// Two depot nodes are equal when their locations match; two order nodes are
/// equal when their orders match. A depot never equals an order stop.
///
/// # Examples
///
/// ```
/// use u_shipping::models::{LocationCode, RouteNode};
///
/// let a = RouteNode::Depot(LocationCode::parse("1000").unwrap());
/// let b = RouteNode::Depot(LocationCode::parse("1000").unwrap());
/// assert_eq!(a, b);
/// assert!(a.is_depot());
/// assert!(a.order().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RouteNode {
    /// The depot every route starts and ends at.
    Depot(LocationCode),
    /// A delivery stop.
    Order(Order),
}

impl RouteNode {
    /// Returns `true` for the depot.
    pub fn is_depot(&self) -> bool {
        matches!(self, RouteNode::Depot(_))
    }

    /// The order served at this node, if any.
    pub fn order(&self) -> Option<&Order> {
        match self {
            RouteNode::Depot(_) => None,
            RouteNode::Order(order) => Some(order),
        }
    }

    /// The location of this node.
    pub fn location(&self) -> &LocationCode {
        match self {
            RouteNode::Depot(location) => location,
            RouteNode::Order(order) => order.location(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TimeWindow, Weight};

    fn order(id: &str, loc: &str) -> Order {
        Order::new(
            id,
            LocationCode::parse(loc).expect("valid"),
            1,
            TimeWindow::of(8, 0, 18, 0).expect("valid"),
            Weight::of_kilograms(1.0),
            5.0,
        )
    }

    #[test]
    fn test_depot_equality_by_location() {
        let a = RouteNode::Depot(LocationCode::parse("1000").expect("valid"));
        let b = RouteNode::Depot(LocationCode::parse("1000").expect("valid"));
        let c = RouteNode::Depot(LocationCode::parse("2000").expect("valid"));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_order_equality_by_order() {
        let a = RouteNode::Order(order("1", "2000"));
        let b = RouteNode::Order(order("1", "2000"));
        let c = RouteNode::Order(order("2", "2000"));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_depot_never_equals_order() {
        // Same location, different kind.
        let depot = RouteNode::Depot(LocationCode::parse("2000").expect("valid"));
        let stop = RouteNode::Order(order("1", "2000"));
        assert_ne!(depot, stop);
        assert_eq!(depot.location(), stop.location());
    }

    #[test]
    fn test_accessors() {
        let stop = RouteNode::Order(order("7", "4000"));
        assert!(!stop.is_depot());
        assert_eq!(stop.order().map(Order::id), Some("7"));
        assert_eq!(stop.location().as_str(), "4000");
    }
}
