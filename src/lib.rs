//! # u-shipping
//!
//! Depot delivery routing: a fleet leaves one depot, delivers orders within
//! their time windows under box and weight capacities, and hands any order
//! it cannot deliver profitably to a hub at a per-box cost.
//!
//! ## Modules
//!
//! - [`config`]: Run configuration (fleet, depot, costs, capacities, time limit)
//! - [`models`]: Domain types (locations, measures, orders, routes, solution, problem trait)
//! - [`distance`]: Travel table between location codes and dense arc matrices
//! - [`routing`]: Abstract routing model (callbacks, dimensions, disjunctions, assignments)
//! - [`formulation`]: Translation of a delivery problem into a routing model
//! - [`engine`]: Engine seam and the built-in local search engine
//! - [`evaluation`]: Cumul propagation and route feasibility
//! - [`constructive`]: Path-cheapest-arc first solution
//! - [`local_search`]: Move operators, greedy descent, and guided local search
//! - [`solver`]: Facade that solves a problem and decodes the routes
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use u_shipping::config::RoutingConfig;
//! use u_shipping::distance::TravelTable;
//! use u_shipping::models::{DeliveryData, Distance, LocationCode, Order, TimeWindow, Weight};
//! use u_shipping::solver::RoutingSolver;
//!
//! let depot = LocationCode::parse("1000").unwrap();
//! let shop = LocationCode::parse("2000").unwrap();
//!
//! let mut table = TravelTable::new();
//! table.set(&depot, &shop, Distance::of_kilometers(1.0), Duration::from_secs(15 * 60));
//! table.set(&shop, &depot, Distance::of_kilometers(1.0), Duration::from_secs(15 * 60));
//!
//! let order = Order::new(
//!     "o1",
//!     shop,
//!     2,
//!     TimeWindow::of(8, 0, 18, 0).unwrap(),
//!     Weight::of_kilograms(1.0),
//!     10.0,
//! );
//! let config = RoutingConfig::default()
//!     .with_number_vehicles(1)
//!     .with_depot(depot)
//!     .with_hourly_vehicle_cost(10.0)
//!     .with_solver_time_limit(Duration::from_millis(200));
//! let data = DeliveryData::new(vec![order], table, config).unwrap();
//!
//! let mut solver = RoutingSolver::with_default_engine(&data);
//! solver.solve().unwrap();
//! let solution = solver.solution().unwrap();
//!
//! // 40 minutes on the road cost 7, the hub would charge 20
//! assert_eq!(solution.number_of_direct_delivered_orders(), 1);
//! assert_eq!(solution.total_monetary_cost(), 7.0);
//! ```

pub mod config;
pub mod constructive;
pub mod distance;
pub mod engine;
pub mod evaluation;
pub mod formulation;
pub mod local_search;
pub mod models;
pub mod routing;
pub mod solver;
