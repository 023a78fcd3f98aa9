//! Solver engine seam.
//!
//! A [`RoutingEngine`] turns a [`RoutingModel`] into an [`Assignment`]
//! under given [`SearchParameters`]. The crate ships [`LocalSearchEngine`];
//! other back ends plug in by implementing the trait.

mod local;

use std::time::Duration;

use crate::routing::{Assignment, ModelError, RoutingModel};

pub use local::LocalSearchEngine;

/// How the first solution is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FirstSolutionStrategy {
    /// Extend each route along its cheapest feasible arc.
    PathCheapestArc,
}

/// How the search escapes local optima.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalSearchMetaheuristic {
    /// Stop at the first local optimum.
    GreedyDescent,
    /// Penalize frequently used costly arcs and keep searching.
    GuidedLocalSearch,
}

/// Search settings handed to an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParameters {
    pub first_solution_strategy: FirstSolutionStrategy,
    pub local_search_metaheuristic: LocalSearchMetaheuristic,
    /// Wall-clock budget of one solve.
    pub time_limit: Duration,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            first_solution_strategy: FirstSolutionStrategy::PathCheapestArc,
            local_search_metaheuristic: LocalSearchMetaheuristic::GuidedLocalSearch,
            time_limit: Duration::from_secs(30),
        }
    }
}

impl SearchParameters {
    /// Sets the first solution strategy.
    pub fn with_first_solution_strategy(mut self, strategy: FirstSolutionStrategy) -> Self {
        self.first_solution_strategy = strategy;
        self
    }

    /// Sets the metaheuristic.
    pub fn with_local_search_metaheuristic(mut self, metaheuristic: LocalSearchMetaheuristic) -> Self {
        self.local_search_metaheuristic = metaheuristic;
        self
    }

    /// Sets the time limit.
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }
}

/// Failure inside an engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The engine could not be prepared.
    #[error("engine initialization failed: {0}")]
    Initialization(String),
    /// The engine produced routes the model rejects.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// A search back end for [`RoutingModel`]s.
pub trait RoutingEngine {
    /// One-time preparation, called before the first solve.
    fn initialize(&self) -> Result<(), EngineError> {
        Ok(())
    }

    /// Searches for an assignment within `params.time_limit`.
    ///
    /// Returns `Ok(None)` if no feasible assignment was found.
    fn solve(
        &self,
        model: &RoutingModel<'_>,
        params: &SearchParameters,
    ) -> Result<Option<Assignment>, EngineError>;
}

impl<E: RoutingEngine + ?Sized> RoutingEngine for &E {
    fn initialize(&self) -> Result<(), EngineError> {
        (**self).initialize()
    }

    fn solve(
        &self,
        model: &RoutingModel<'_>,
        params: &SearchParameters,
    ) -> Result<Option<Assignment>, EngineError> {
        (**self).solve(model, params)
    }
}
