//! The routing model: nodes, vehicles, transits, dimensions, disjunctions.

use super::{Assignment, CallbackId, Dimension, DimensionId};

/// Transit between two nodes, indexed by node.
pub type TransitFn<'a> = Box<dyn Fn(usize, usize) -> i64 + Send + Sync + 'a>;

/// Transit depending only on the node being left.
pub type UnaryTransitFn<'a> = Box<dyn Fn(usize) -> i64 + Send + Sync + 'a>;

enum Transit<'a> {
    Binary(TransitFn<'a>),
    Unary(UnaryTransitFn<'a>),
}

/// A set of optional nodes of which at most one may be visited.
///
/// If none is visited the penalty is added to the objective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disjunction {
    nodes: Vec<usize>,
    penalty: i64,
}

impl Disjunction {
    /// Nodes of this disjunction.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Objective penalty paid when no node of the set is visited.
    pub fn penalty(&self) -> i64 {
        self.penalty
    }
}

/// Invalid model construction or route submission.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("a routing model needs at least one node")]
    NoNodes,
    #[error("a routing model needs at least one vehicle")]
    NoVehicles,
    #[error("node {node} is out of range (model has {num_nodes} nodes)")]
    NodeOutOfRange { node: usize, num_nodes: usize },
    #[error("unknown transit callback {0}")]
    UnknownCallback(usize),
    #[error("unknown dimension {0}")]
    UnknownDimension(usize),
    #[error("dimension `{0}` is already registered")]
    DuplicateDimension(String),
    #[error("dimension `{name}` has negative capacity or slack")]
    NegativeBound { name: String },
    #[error("empty cumul range [{min}, {max}] at node {node}")]
    EmptyCumulRange { node: usize, min: i64, max: i64 },
    #[error("the depot cannot be part of a disjunction")]
    DepotInDisjunction,
    #[error("node {0} already belongs to a disjunction")]
    NodeInSeveralDisjunctions(usize),
    #[error("a disjunction needs at least one node")]
    EmptyDisjunction,
    #[error("disjunction penalty must be non-negative, got {0}")]
    NegativePenalty(i64),
    #[error("expected {expected} routes, got {actual}")]
    RouteCount { expected: usize, actual: usize },
    #[error("node {0} cannot be visited inside a route")]
    InvalidVisit(usize),
    #[error("node {0} is visited more than once")]
    NodeVisitedTwice(usize),
    #[error("more than one node of disjunction {0} is visited")]
    DisjunctionOverfilled(usize),
    #[error("mandatory node {0} is not visited")]
    MandatoryNodeUnvisited(usize),
    #[error("route of vehicle {vehicle} violates dimension `{dimension}` at position {position}")]
    InfeasibleRoute {
        vehicle: usize,
        dimension: String,
        position: usize,
    },
}

/// Declarative model of a single-depot vehicle routing problem.
///
/// Nodes are `0..num_nodes`; every vehicle starts and ends at the depot node.
/// Non-depot nodes are mandatory unless they belong to a disjunction. The
/// objective is the sum of arc costs over all routes plus the penalties of
/// disjunctions left unvisited.
///
/// The model only describes the problem. Searching is left to a
/// [`RoutingEngine`](crate::engine::RoutingEngine).
///
/// # Examples
///
/// ```
/// use u_shipping::routing::RoutingModel;
///
/// let mut model = RoutingModel::new(3, 1, 0).unwrap();
/// let cost = model.register_transit_callback(|from, to| (from as i64 - to as i64).abs());
/// model.set_arc_cost_evaluator_of_all_vehicles(cost).unwrap();
///
/// let assignment = model.evaluate_routes(vec![vec![1, 2]]).unwrap();
/// // 0 -> 1 -> 2 -> 0
/// assert_eq!(assignment.objective(), 1 + 1 + 2);
/// assert!(assignment.is_active(2));
/// ```
pub struct RoutingModel<'a> {
    num_nodes: usize,
    num_vehicles: usize,
    depot: usize,
    callbacks: Vec<Transit<'a>>,
    dimensions: Vec<Dimension>,
    disjunctions: Vec<Disjunction>,
    node_disjunction: Vec<Option<usize>>,
    arc_cost: Option<CallbackId>,
}

impl std::fmt::Debug for RoutingModel<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingModel")
            .field("num_nodes", &self.num_nodes)
            .field("num_vehicles", &self.num_vehicles)
            .field("depot", &self.depot)
            .field("callbacks", &self.callbacks.len())
            .field("dimensions", &self.dimensions)
            .field("disjunctions", &self.disjunctions)
            .field("arc_cost", &self.arc_cost)
            .finish()
    }
}

impl<'a> RoutingModel<'a> {
    /// Creates an empty model.
    pub fn new(num_nodes: usize, num_vehicles: usize, depot: usize) -> Result<Self, ModelError> {
        if num_nodes == 0 {
            return Err(ModelError::NoNodes);
        }
        if num_vehicles == 0 {
            return Err(ModelError::NoVehicles);
        }
        if depot >= num_nodes {
            return Err(ModelError::NodeOutOfRange {
                node: depot,
                num_nodes,
            });
        }
        Ok(Self {
            num_nodes,
            num_vehicles,
            depot,
            callbacks: Vec::new(),
            dimensions: Vec::new(),
            disjunctions: Vec::new(),
            node_disjunction: vec![None; num_nodes],
            arc_cost: None,
        })
    }

    /// Registers a transit `f(from, to)`.
    pub fn register_transit_callback<F>(&mut self, f: F) -> CallbackId
    where
        F: Fn(usize, usize) -> i64 + Send + Sync + 'a,
    {
        self.callbacks.push(Transit::Binary(Box::new(f)));
        CallbackId(self.callbacks.len() - 1)
    }

    /// Registers a transit `f(from)` that ignores the destination.
    ///
    /// Used for loads picked up at a node: the quantity counts from the
    /// moment the vehicle leaves it.
    pub fn register_unary_transit_callback<F>(&mut self, f: F) -> CallbackId
    where
        F: Fn(usize) -> i64 + Send + Sync + 'a,
    {
        self.callbacks.push(Transit::Unary(Box::new(f)));
        CallbackId(self.callbacks.len() - 1)
    }

    /// Adds a dimension fed by `callback`.
    pub fn add_dimension(
        &mut self,
        callback: CallbackId,
        slack_max: i64,
        capacity: i64,
        fix_start_cumul_to_zero: bool,
        name: &str,
    ) -> Result<DimensionId, ModelError> {
        self.check_callback(callback)?;
        if self.dimension_by_name(name).is_some() {
            return Err(ModelError::DuplicateDimension(name.to_owned()));
        }
        if slack_max < 0 || capacity < 0 {
            return Err(ModelError::NegativeBound {
                name: name.to_owned(),
            });
        }
        self.dimensions.push(Dimension::new(
            name.to_owned(),
            callback,
            slack_max,
            capacity,
            fix_start_cumul_to_zero,
            self.num_nodes,
        ));
        Ok(DimensionId(self.dimensions.len() - 1))
    }

    /// Restricts the cumul of `dimension` at `node` to `[min, max]`.
    ///
    /// On the depot this constrains both the start and the end of every route.
    pub fn set_cumul_range(
        &mut self,
        dimension: DimensionId,
        node: usize,
        min: i64,
        max: i64,
    ) -> Result<(), ModelError> {
        self.check_node(node)?;
        if min > max {
            return Err(ModelError::EmptyCumulRange { node, min, max });
        }
        let dim = self
            .dimensions
            .get_mut(dimension.0)
            .ok_or(ModelError::UnknownDimension(dimension.0))?;
        dim.set_range(node, min, max);
        Ok(())
    }

    /// Makes `nodes` optional: at most one of them is visited, and `penalty`
    /// is paid when none is.
    pub fn add_disjunction(&mut self, nodes: &[usize], penalty: i64) -> Result<usize, ModelError> {
        if nodes.is_empty() {
            return Err(ModelError::EmptyDisjunction);
        }
        if penalty < 0 {
            return Err(ModelError::NegativePenalty(penalty));
        }
        for &node in nodes {
            self.check_node(node)?;
            if node == self.depot {
                return Err(ModelError::DepotInDisjunction);
            }
            if self.node_disjunction[node].is_some() || nodes.iter().filter(|&&n| n == node).count() > 1 {
                return Err(ModelError::NodeInSeveralDisjunctions(node));
            }
        }
        let index = self.disjunctions.len();
        for &node in nodes {
            self.node_disjunction[node] = Some(index);
        }
        self.disjunctions.push(Disjunction {
            nodes: nodes.to_vec(),
            penalty,
        });
        Ok(index)
    }

    /// Uses `callback` as the arc cost of every vehicle.
    pub fn set_arc_cost_evaluator_of_all_vehicles(
        &mut self,
        callback: CallbackId,
    ) -> Result<(), ModelError> {
        self.check_callback(callback)?;
        self.arc_cost = Some(callback);
        Ok(())
    }

    /// Number of nodes, depot included.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    /// The start and end node of every vehicle.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Evaluates a registered transit.
    ///
    /// # Panics
    ///
    /// Panics if `callback` does not belong to this model.
    pub fn transit(&self, callback: CallbackId, from: usize, to: usize) -> i64 {
        match &self.callbacks[callback.0] {
            Transit::Binary(f) => f(from, to),
            Transit::Unary(f) => f(from),
        }
    }

    /// Cost of traversing `from -> to`; zero when no evaluator is set.
    pub fn arc_cost(&self, from: usize, to: usize) -> i64 {
        self.arc_cost
            .map_or(0, |callback| self.transit(callback, from, to))
    }

    /// All dimensions in registration order.
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// The dimension behind `id`.
    pub fn dimension(&self, id: DimensionId) -> Option<&Dimension> {
        self.dimensions.get(id.0)
    }

    /// Looks up a dimension by name.
    pub fn dimension_by_name(&self, name: &str) -> Option<DimensionId> {
        self.dimensions
            .iter()
            .position(|d| d.name() == name)
            .map(DimensionId)
    }

    /// All disjunctions in registration order.
    pub fn disjunctions(&self) -> &[Disjunction] {
        &self.disjunctions
    }

    /// Index of the disjunction `node` belongs to, if any.
    pub fn disjunction_of(&self, node: usize) -> Option<usize> {
        self.node_disjunction.get(node).copied().flatten()
    }

    /// Penalty paid when `node` is not visited; `None` for mandatory nodes.
    pub fn penalty_of(&self, node: usize) -> Option<i64> {
        self.disjunction_of(node)
            .map(|d| self.disjunctions[d].penalty)
    }

    /// Checks a set of routes against the model and computes their cumuls.
    ///
    /// `routes[v]` lists the nodes visited by vehicle `v`, depot excluded.
    pub fn evaluate_routes(&self, routes: Vec<Vec<usize>>) -> Result<Assignment, ModelError> {
        Assignment::from_routes(self, routes)
    }

    fn check_node(&self, node: usize) -> Result<(), ModelError> {
        if node >= self.num_nodes {
            return Err(ModelError::NodeOutOfRange {
                node,
                num_nodes: self.num_nodes,
            });
        }
        Ok(())
    }

    fn check_callback(&self, callback: CallbackId) -> Result<(), ModelError> {
        if callback.0 >= self.callbacks.len() {
            return Err(ModelError::UnknownCallback(callback.0));
        }
        Ok(())
    }
}
