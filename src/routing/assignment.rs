//! A complete, checked solution of a [`RoutingModel`].

use crate::evaluation::RouteEvaluator;

use super::{DimensionId, ModelError, RoutingModel};

/// One vehicle's path with its cumul values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehiclePath {
    path: Vec<usize>,
    cumuls: Vec<Vec<i64>>,
    cost: i64,
}

impl VehiclePath {
    /// Full path, starting and ending at the depot.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Visited nodes without the depot ends.
    pub fn visits(&self) -> &[usize] {
        &self.path[1..self.path.len() - 1]
    }

    /// Cumul of `dimension` at `position` along the path.
    ///
    /// # Panics
    ///
    /// Panics if the dimension or position is out of range.
    pub fn cumul(&self, dimension: DimensionId, position: usize) -> i64 {
        self.cumuls[dimension.index()][position]
    }

    /// Sum of arc costs along the path.
    pub fn cost(&self) -> i64 {
        self.cost
    }

    /// Returns `true` if the vehicle leaves the depot.
    pub fn is_used(&self) -> bool {
        self.path.len() > 2
    }
}

/// A feasible set of routes, one per vehicle, with its objective.
///
/// Only obtainable through [`RoutingModel::evaluate_routes`], so every
/// assignment satisfies all dimensions and disjunctions of its model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    paths: Vec<VehiclePath>,
    active: Vec<bool>,
    objective: i64,
}

impl Assignment {
    pub(crate) fn from_routes(
        model: &RoutingModel<'_>,
        routes: Vec<Vec<usize>>,
    ) -> Result<Self, ModelError> {
        if routes.len() != model.num_vehicles() {
            return Err(ModelError::RouteCount {
                expected: model.num_vehicles(),
                actual: routes.len(),
            });
        }

        let depot = model.depot();
        let mut active = vec![false; model.num_nodes()];
        active[depot] = true;
        for &node in routes.iter().flatten() {
            if node == depot || node >= model.num_nodes() {
                return Err(ModelError::InvalidVisit(node));
            }
            if active[node] {
                return Err(ModelError::NodeVisitedTwice(node));
            }
            active[node] = true;
        }

        let mut objective = 0i64;
        for (index, disjunction) in model.disjunctions().iter().enumerate() {
            match disjunction.nodes().iter().filter(|&&n| active[n]).count() {
                0 => objective = objective.saturating_add(disjunction.penalty()),
                1 => {}
                _ => return Err(ModelError::DisjunctionOverfilled(index)),
            }
        }
        if let Some(node) =
            (0..model.num_nodes()).find(|&n| !active[n] && model.disjunction_of(n).is_none())
        {
            return Err(ModelError::MandatoryNodeUnvisited(node));
        }

        let evaluator = RouteEvaluator::new(model);
        let mut paths = Vec::with_capacity(routes.len());
        for (vehicle, visits) in routes.into_iter().enumerate() {
            let schedule = evaluator.schedule(&visits).ok_or_else(|| {
                let violation = evaluator.first_violation(&visits);
                ModelError::InfeasibleRoute {
                    vehicle,
                    dimension: violation
                        .as_ref()
                        .map(|v| v.dimension.clone())
                        .unwrap_or_default(),
                    position: violation.map_or(0, |v| v.position),
                }
            })?;
            objective = objective.saturating_add(schedule.cost);

            let mut path = Vec::with_capacity(visits.len() + 2);
            path.push(depot);
            path.extend(visits);
            path.push(depot);
            paths.push(VehiclePath {
                path,
                cumuls: schedule.cumuls,
                cost: schedule.cost,
            });
        }

        Ok(Self {
            paths,
            active,
            objective,
        })
    }

    /// Per-vehicle paths, indexed by vehicle.
    pub fn paths(&self) -> &[VehiclePath] {
        &self.paths
    }

    /// Path of one vehicle.
    pub fn path(&self, vehicle: usize) -> Option<&VehiclePath> {
        self.paths.get(vehicle)
    }

    /// Returns `true` if `node` is visited (the depot always is).
    pub fn is_active(&self, node: usize) -> bool {
        self.active.get(node).copied().unwrap_or(false)
    }

    /// Nodes visited by no vehicle, in node order.
    pub fn unperformed(&self) -> impl Iterator<Item = usize> + '_ {
        self.active
            .iter()
            .enumerate()
            .filter(|(_, &a)| !a)
            .map(|(n, _)| n)
    }

    /// Arc costs plus penalties of unvisited disjunctions.
    pub fn objective(&self) -> i64 {
        self.objective
    }

    /// Convenience accessor for `path(vehicle).cumul(dimension, position)`.
    pub fn cumul(&self, dimension: DimensionId, vehicle: usize, position: usize) -> Option<i64> {
        let path = self.paths.get(vehicle)?;
        path.cumuls
            .get(dimension.index())
            .and_then(|values| values.get(position))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Line of four nodes, depot at 0, unit steps.
    fn line_model<'a>() -> (RoutingModel<'a>, DimensionId) {
        let mut model = RoutingModel::new(4, 2, 0).expect("valid");
        let step = model.register_transit_callback(|i, j| (i as i64 - j as i64).abs());
        model.set_arc_cost_evaluator_of_all_vehicles(step).expect("valid");
        let dist = model.add_dimension(step, 0, 100, true, "Distance").expect("valid");
        model.add_disjunction(&[3], 100).expect("valid");
        (model, dist)
    }

    #[test]
    fn test_objective_includes_penalties() {
        let (model, _) = line_model();
        let a = model.evaluate_routes(vec![vec![1, 2], vec![]]).expect("feasible");
        // 1 + 1 + 2 arcs, node 3 dropped
        assert_eq!(a.objective(), 4 + 100);
        assert!(!a.is_active(3));
        assert_eq!(a.unperformed().collect::<Vec<_>>(), vec![3]);
        assert!(a.paths()[0].is_used());
        assert!(!a.paths()[1].is_used());
        assert_eq!(a.paths()[1].path(), &[0, 0]);
    }

    #[test]
    fn test_cumuls_along_path() {
        let (model, dist) = line_model();
        let a = model.evaluate_routes(vec![vec![2, 3, 1], vec![]]).expect("feasible");
        let path = a.path(0).expect("vehicle 0");
        assert_eq!(path.visits(), &[2, 3, 1]);
        let cumuls: Vec<i64> = (0..path.path().len()).map(|p| path.cumul(dist, p)).collect();
        assert_eq!(cumuls, vec![0, 2, 3, 5, 6]);
        assert_eq!(a.cumul(dist, 0, 4), Some(6));
        assert_eq!(a.cumul(dist, 5, 0), None);
    }

    #[test]
    fn test_rejects_structural_errors() {
        let (model, _) = line_model();
        assert!(matches!(
            model.evaluate_routes(vec![vec![1, 2]]),
            Err(ModelError::RouteCount { expected: 2, actual: 1 })
        ));
        assert!(matches!(
            model.evaluate_routes(vec![vec![1, 0, 2], vec![]]),
            Err(ModelError::InvalidVisit(0))
        ));
        assert!(matches!(
            model.evaluate_routes(vec![vec![1, 2], vec![2]]),
            Err(ModelError::NodeVisitedTwice(2))
        ));
        assert!(matches!(
            model.evaluate_routes(vec![vec![1], vec![]]),
            Err(ModelError::MandatoryNodeUnvisited(2))
        ));
    }

    #[test]
    fn test_rejects_capacity_violation() {
        let mut model = RoutingModel::new(3, 1, 0).expect("valid");
        let step = model.register_transit_callback(|_, _| 5);
        model.add_dimension(step, 0, 12, true, "Distance").expect("valid");
        let err = model.evaluate_routes(vec![vec![1, 2]]).expect_err("too long");
        match err {
            ModelError::InfeasibleRoute {
                vehicle,
                dimension,
                position,
            } => {
                assert_eq!(vehicle, 0);
                assert_eq!(dimension, "Distance");
                assert_eq!(position, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_overfilled_disjunction() {
        let mut model = RoutingModel::new(3, 1, 0).expect("valid");
        model.add_disjunction(&[1, 2], 10).expect("valid");
        assert!(matches!(
            model.evaluate_routes(vec![vec![1, 2]]),
            Err(ModelError::DisjunctionOverfilled(0))
        ));
        let a = model.evaluate_routes(vec![vec![2]]).expect("one of two");
        assert_eq!(a.objective(), 0);
    }
}
