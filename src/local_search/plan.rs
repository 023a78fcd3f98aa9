//! Mutable working solution for local search.
//!
//! Routes are stored as `Vec<Vec<usize>>` node sequences (depot excluded)
//! with their cached costs and per-node activity, so moves can be applied
//! without rebuilding an [`Assignment`](crate::routing::Assignment).

use crate::routing::RoutingModel;

/// Objective weight of one unvisited mandatory node.
///
/// Large enough that visiting any mandatory node beats every arc cost and
/// disjunction penalty of realistic instances.
pub const MANDATORY_DROP_PENALTY: i64 = 1 << 40;

/// Working solution manipulated by the move operators.
///
/// # Examples
///
/// ```
/// use u_shipping::local_search::Plan;
/// use u_shipping::routing::RoutingModel;
///
/// let mut model = RoutingModel::new(3, 2, 0).unwrap();
/// model.add_disjunction(&[2], 40).unwrap();
///
/// let plan = Plan::new(&model, vec![vec![1], vec![]], |route| route.len() as i64);
/// assert!(plan.is_active(1));
/// assert_eq!(plan.unperformed(), vec![2]);
/// assert_eq!(plan.objective(&model), 1 + 40);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    routes: Vec<Vec<usize>>,
    costs: Vec<i64>,
    active: Vec<bool>,
    disjunction_load: Vec<usize>,
}

impl Plan {
    /// Wraps `routes` and prices each one with `price`.
    pub fn new(
        model: &RoutingModel<'_>,
        routes: Vec<Vec<usize>>,
        price: impl Fn(&[usize]) -> i64,
    ) -> Self {
        let mut active = vec![false; model.num_nodes()];
        active[model.depot()] = true;
        let mut disjunction_load = vec![0; model.disjunctions().len()];
        for &node in routes.iter().flatten() {
            active[node] = true;
            if let Some(d) = model.disjunction_of(node) {
                disjunction_load[d] += 1;
            }
        }
        let costs = routes.iter().map(|r| price(r)).collect();
        Self {
            routes,
            costs,
            active,
            disjunction_load,
        }
    }

    /// Route node sequences, indexed by vehicle.
    pub fn routes(&self) -> &[Vec<usize>] {
        &self.routes
    }

    /// Visits of one route.
    pub fn route(&self, index: usize) -> &[usize] {
        &self.routes[index]
    }

    /// Cached cost of one route.
    pub fn cost(&self, index: usize) -> i64 {
        self.costs[index]
    }

    /// Number of routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if `node` is on some route.
    pub fn is_active(&self, node: usize) -> bool {
        self.active[node]
    }

    /// Nodes on no route, depot excluded, in node order.
    pub fn unperformed(&self) -> Vec<usize> {
        self.active
            .iter()
            .enumerate()
            .filter(|(_, &a)| !a)
            .map(|(n, _)| n)
            .collect()
    }

    /// Route indices worth trying as move targets.
    ///
    /// Vehicles are interchangeable, so only the first empty route is kept.
    pub fn candidate_routes(&self) -> Vec<usize> {
        let mut seen_empty = false;
        (0..self.routes.len())
            .filter(|&r| {
                if !self.routes[r].is_empty() {
                    return true;
                }
                !std::mem::replace(&mut seen_empty, true)
            })
            .collect()
    }

    /// Objective change from leaving `nodes` (all active) unvisited.
    pub fn removal_cost(&self, model: &RoutingModel<'_>, nodes: &[usize]) -> i64 {
        let mut cost = 0i64;
        for (i, &node) in nodes.iter().enumerate() {
            match model.disjunction_of(node) {
                None => cost = cost.saturating_add(MANDATORY_DROP_PENALTY),
                Some(d) => {
                    let first = nodes[..i]
                        .iter()
                        .all(|&n| model.disjunction_of(n) != Some(d));
                    if !first {
                        continue;
                    }
                    let removed = nodes[i..]
                        .iter()
                        .filter(|&&n| model.disjunction_of(n) == Some(d))
                        .count();
                    if self.disjunction_load[d] == removed {
                        cost = cost.saturating_add(model.disjunctions()[d].penalty());
                    }
                }
            }
        }
        cost
    }

    /// Penalty saved by visiting `nodes` (all inactive), or `None` if that
    /// would visit a disjunction twice.
    pub fn insertion_gain(&self, model: &RoutingModel<'_>, nodes: &[usize]) -> Option<i64> {
        let mut gain = 0i64;
        for (i, &node) in nodes.iter().enumerate() {
            match model.disjunction_of(node) {
                None => gain = gain.saturating_add(MANDATORY_DROP_PENALTY),
                Some(d) => {
                    let shared = nodes[..i]
                        .iter()
                        .any(|&n| model.disjunction_of(n) == Some(d));
                    if shared || self.disjunction_load[d] > 0 {
                        return None;
                    }
                    gain = gain.saturating_add(model.disjunctions()[d].penalty());
                }
            }
        }
        Some(gain)
    }

    /// Objective change of penalties when `outgoing` (active) is replaced
    /// by `incoming` (inactive), or `None` if not allowed.
    pub fn swap_penalty_delta(
        &self,
        model: &RoutingModel<'_>,
        outgoing: usize,
        incoming: usize,
    ) -> Option<i64> {
        let d_out = model.disjunction_of(outgoing);
        let d_in = model.disjunction_of(incoming);
        if d_out.is_some() && d_out == d_in {
            return (self.disjunction_load[d_out?] == 1).then_some(0);
        }
        let gain = self.insertion_gain(model, &[incoming])?;
        Some(self.removal_cost(model, &[outgoing]) - gain)
    }

    /// Replaces route `index` and updates activity.
    pub fn replace_route(
        &mut self,
        model: &RoutingModel<'_>,
        index: usize,
        visits: Vec<usize>,
        cost: i64,
    ) {
        for &node in &self.routes[index] {
            self.active[node] = false;
            if let Some(d) = model.disjunction_of(node) {
                self.disjunction_load[d] -= 1;
            }
        }
        for &node in &visits {
            self.active[node] = true;
            if let Some(d) = model.disjunction_of(node) {
                self.disjunction_load[d] += 1;
            }
        }
        self.routes[index] = visits;
        self.costs[index] = cost;
    }

    /// Recomputes every cached route cost.
    pub fn reprice(&mut self, price: impl Fn(&[usize]) -> i64) {
        for (route, cost) in self.routes.iter().zip(self.costs.iter_mut()) {
            *cost = price(route);
        }
    }

    /// Penalties of unvisited disjunctions and mandatory nodes.
    pub fn drop_penalty(&self, model: &RoutingModel<'_>) -> i64 {
        let mut total = 0i64;
        for (d, disjunction) in model.disjunctions().iter().enumerate() {
            if self.disjunction_load[d] == 0 {
                total = total.saturating_add(disjunction.penalty());
            }
        }
        let missing = self.missing_mandatory(model) as i64;
        total.saturating_add(missing.saturating_mul(MANDATORY_DROP_PENALTY))
    }

    /// Cached route costs plus drop penalties.
    pub fn objective(&self, model: &RoutingModel<'_>) -> i64 {
        self.costs
            .iter()
            .fold(self.drop_penalty(model), |acc, &c| acc.saturating_add(c))
    }

    /// Number of mandatory nodes left unvisited.
    pub fn missing_mandatory(&self, model: &RoutingModel<'_>) -> usize {
        (0..model.num_nodes())
            .filter(|&n| !self.active[n] && model.disjunction_of(n).is_none())
            .count()
    }

    /// Arcs of all used routes, depot legs included.
    pub fn arcs(&self, depot: usize) -> Vec<(usize, usize)> {
        let mut arcs = Vec::new();
        for route in self.routes.iter().filter(|r| !r.is_empty()) {
            let mut prev = depot;
            for &node in route.iter().chain(std::iter::once(&depot)) {
                arcs.push((prev, node));
                prev = node;
            }
        }
        arcs
    }

    /// Consumes the plan, returning its routes.
    pub fn into_routes(self) -> Vec<Vec<usize>> {
        self.routes
    }
}
