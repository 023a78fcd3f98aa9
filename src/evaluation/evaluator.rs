//! Route evaluator that propagates dimension cumuls and checks feasibility.
//!
//! # Algorithm
//!
//! For each dimension, a forward pass carries the interval of reachable
//! cumul values along the path: leaving a node with cumul in `[lo, hi]`
//! over transit `t` reaches `[lo + t, hi + t + slack_max]`, which is then
//! intersected with the next node's cumul range and `[0, capacity]`. An
//! empty interval means the path is infeasible.
//!
//! A backward pass picks concrete values: the end of the route takes the
//! earliest reachable cumul, and every earlier stop takes the latest value
//! in its interval that still reaches its successor. With zero slack this
//! is the unique consistent schedule, so for time it yields the latest
//! possible departure from the depot.
//!
//! # Complexity
//!
//! O(n·d) per route where n = route length and d = number of dimensions.

use crate::routing::{Dimension, RoutingModel};

/// Cumul values and arc cost of a feasible route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSchedule {
    /// `cumuls[d][p]` is the cumul of dimension `d` at path position `p`,
    /// where position 0 is the depot start.
    pub cumuls: Vec<Vec<i64>>,
    /// Sum of arc costs.
    pub cost: i64,
}

/// First constraint a route breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Name of the violated dimension.
    pub dimension: String,
    /// Path position (0 = depot start) where the cumul interval became empty.
    pub position: usize,
    /// Node at that position.
    pub node: usize,
}

/// Evaluates routes of a [`RoutingModel`].
///
/// Routes are given as the visited nodes without the depot; the evaluator
/// adds the depot at both ends.
///
/// # Examples
///
/// ```
/// use u_shipping::evaluation::RouteEvaluator;
/// use u_shipping::routing::RoutingModel;
///
/// let mut model = RoutingModel::new(3, 1, 0).unwrap();
/// let step = model.register_transit_callback(|_, _| 4);
/// let time = model.add_dimension(step, 0, 10, true, "Time").unwrap();
///
/// let evaluator = RouteEvaluator::new(&model);
/// assert!(!evaluator.is_feasible(&[1, 2])); // 12 > 10
/// assert!(evaluator.is_partial_feasible(&[1, 2]));  // 8 before returning
/// assert!(evaluator.is_feasible(&[1]));
///
/// let schedule = evaluator.schedule(&[1]).unwrap();
/// assert_eq!(schedule.cumuls[time.index()], vec![0, 4, 8]);
/// ```
pub struct RouteEvaluator<'m, 'a> {
    model: &'m RoutingModel<'a>,
}

impl<'m, 'a> RouteEvaluator<'m, 'a> {
    /// Creates an evaluator over `model`.
    pub fn new(model: &'m RoutingModel<'a>) -> Self {
        Self { model }
    }

    /// Sum of arc costs of the closed route.
    pub fn route_cost(&self, visits: &[usize]) -> i64 {
        let depot = self.model.depot();
        let mut prev = depot;
        let mut cost = 0i64;
        for &node in visits.iter().chain(std::iter::once(&depot)) {
            cost = cost.saturating_add(self.model.arc_cost(prev, node));
            prev = node;
        }
        cost
    }

    /// Returns `true` if the closed route satisfies every dimension.
    pub fn is_feasible(&self, visits: &[usize]) -> bool {
        self.model
            .dimensions()
            .iter()
            .all(|dim| self.forward(dim, visits, true, None).is_ok())
    }

    /// Returns `true` if the route can be driven up to its last stop.
    ///
    /// The return to the depot is not checked, so a partial path that passes
    /// may still fail once closed.
    pub fn is_partial_feasible(&self, visits: &[usize]) -> bool {
        self.model
            .dimensions()
            .iter()
            .all(|dim| self.forward(dim, visits, false, None).is_ok())
    }

    /// Computes cumuls and cost of a feasible route, or `None`.
    pub fn schedule(&self, visits: &[usize]) -> Option<RouteSchedule> {
        let mut cumuls = Vec::with_capacity(self.model.dimensions().len());
        let mut windows = Vec::with_capacity(visits.len() + 2);
        for dim in self.model.dimensions() {
            windows.clear();
            self.forward(dim, visits, true, Some(&mut windows)).ok()?;
            cumuls.push(self.backward(dim, visits, &windows));
        }
        Some(RouteSchedule {
            cumuls,
            cost: self.route_cost(visits),
        })
    }

    /// The first dimension and position the closed route violates.
    pub fn first_violation(&self, visits: &[usize]) -> Option<Violation> {
        self.model.dimensions().iter().find_map(|dim| {
            self.forward(dim, visits, true, None)
                .err()
                .map(|position| Violation {
                    dimension: dim.name().to_owned(),
                    position,
                    node: self.node_at(visits, position),
                })
        })
    }

    fn node_at(&self, visits: &[usize], position: usize) -> usize {
        if position == 0 || position > visits.len() {
            self.model.depot()
        } else {
            visits[position - 1]
        }
    }

    /// Forward interval propagation. On failure returns the first position
    /// whose interval is empty.
    fn forward(
        &self,
        dim: &Dimension,
        visits: &[usize],
        close: bool,
        mut windows: Option<&mut Vec<(i64, i64)>>,
    ) -> Result<(), usize> {
        let depot = self.model.depot();
        let (range_lo, range_hi) = dim.cumul_range(depot);
        let (mut lo, mut hi) = if dim.fix_start_cumul_to_zero() {
            (0, 0)
        } else {
            (range_lo, range_hi)
        };
        if lo < range_lo || hi > range_hi || lo > hi {
            return Err(0);
        }
        if let Some(w) = windows.as_deref_mut() {
            w.push((lo, hi));
        }

        let end = close.then_some(depot);
        let mut prev = depot;
        for (offset, node) in visits.iter().copied().chain(end).enumerate() {
            let transit = self.model.transit(dim.callback(), prev, node);
            let (node_lo, node_hi) = dim.cumul_range(node);
            lo = lo.saturating_add(transit).max(node_lo);
            hi = hi
                .saturating_add(transit)
                .saturating_add(dim.slack_max())
                .min(node_hi);
            if lo > hi {
                return Err(offset + 1);
            }
            if let Some(w) = windows.as_deref_mut() {
                w.push((lo, hi));
            }
            prev = node;
        }
        Ok(())
    }

    /// Picks concrete cumuls from the forward intervals of a closed route.
    fn backward(&self, dim: &Dimension, visits: &[usize], windows: &[(i64, i64)]) -> Vec<i64> {
        let last = windows.len() - 1;
        let mut values = vec![0; windows.len()];
        values[last] = windows[last].0;
        for position in (0..last).rev() {
            let from = self.node_at(visits, position);
            let to = self.node_at(visits, position + 1);
            let transit = self.model.transit(dim.callback(), from, to);
            let latest = values[position + 1].saturating_sub(transit);
            values[position] = latest.min(windows[position].1);
        }
        values
    }
}
