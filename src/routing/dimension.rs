//! Cumulative quantities tracked along each route.

/// Handle to a transit callback registered on a [`RoutingModel`](super::RoutingModel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId(pub(crate) usize);

/// Handle to a dimension of a [`RoutingModel`](super::RoutingModel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DimensionId(pub(crate) usize);

impl DimensionId {
    /// Position of this dimension in registration order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A quantity accumulated along a route (time, distance, load, ...).
///
/// Going from node `i` to node `j`, the cumul at `j` lies between
/// `cumul(i) + transit(i, j)` and `cumul(i) + transit(i, j) + slack_max`.
/// Every cumul stays within `[0, capacity]` and within the per-node range.
#[derive(Debug, Clone)]
pub struct Dimension {
    name: String,
    callback: CallbackId,
    slack_max: i64,
    capacity: i64,
    fix_start_cumul_to_zero: bool,
    ranges: Vec<(i64, i64)>,
}

impl Dimension {
    pub(crate) fn new(
        name: String,
        callback: CallbackId,
        slack_max: i64,
        capacity: i64,
        fix_start_cumul_to_zero: bool,
        num_nodes: usize,
    ) -> Self {
        Self {
            name,
            callback,
            slack_max,
            capacity,
            fix_start_cumul_to_zero,
            ranges: vec![(0, capacity); num_nodes],
        }
    }

    /// Name the dimension was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Transit callback feeding this dimension.
    pub fn callback(&self) -> CallbackId {
        self.callback
    }

    /// Maximum waiting allowed on top of each transit.
    pub fn slack_max(&self) -> i64 {
        self.slack_max
    }

    /// Upper bound of every cumul.
    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    /// Whether routes must start this dimension at zero.
    pub fn fix_start_cumul_to_zero(&self) -> bool {
        self.fix_start_cumul_to_zero
    }

    /// Allowed cumul range at `node`, already clipped to `[0, capacity]`.
    pub fn cumul_range(&self, node: usize) -> (i64, i64) {
        let (min, max) = self.ranges[node];
        (min.max(0), max.min(self.capacity))
    }

    pub(crate) fn set_range(&mut self, node: usize, min: i64, max: i64) {
        self.ranges[node] = (min, max);
    }
}
