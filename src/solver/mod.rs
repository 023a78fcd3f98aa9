//! Routing solver facade.
//!
//! [`RoutingSolver`] wires a [`DeliveryProblem`] to a [`RoutingEngine`]:
//! it validates the configuration, builds the model, runs the engine once,
//! and decodes the result on demand.

mod decoder;

use std::time::Instant;

use tracing::{info, warn};

use crate::config::ConfigError;
use crate::engine::{EngineError, LocalSearchEngine, RoutingEngine};
use crate::formulation::{self, FormulationError};
use crate::models::{DeliveryProblem, RoutingSolution};
use crate::routing::{Assignment, RoutingModel};

pub use decoder::decode;

/// Failure to solve or decode.
#[derive(Debug, thiserror::Error)]
pub enum SolveError {
    /// `solution` was called before `solve`.
    #[error("routing wasn't executed")]
    NotRun,
    /// The engine finished without a feasible assignment.
    #[error("no solution found")]
    NoSolution,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Formulation(#[from] FormulationError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// The model lacks a dimension the decoder reads.
    #[error("dimension `{0}` is missing from the model")]
    MissingDimension(&'static str),
    /// The assignment references a node the problem doesn't have.
    #[error("node {0} is unknown to the problem")]
    UnknownNode(usize),
    /// A time cumul does not fit in one day.
    #[error("time cumul of {minutes} minutes is outside the day")]
    TimeOutOfDay { minutes: i64 },
}

/// Solves one delivery problem with one engine.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_shipping::config::RoutingConfig;
/// use u_shipping::distance::TravelTable;
/// use u_shipping::models::{DeliveryData, LocationCode};
/// use u_shipping::solver::RoutingSolver;
///
/// let config = RoutingConfig::default()
///     .with_number_vehicles(2)
///     .with_depot(LocationCode::parse("1000").unwrap())
///     .with_solver_time_limit(Duration::from_millis(100));
/// let data = DeliveryData::new(Vec::new(), TravelTable::new(), config).unwrap();
///
/// let mut solver = RoutingSolver::with_default_engine(&data);
/// assert!(!solver.was_run());
/// solver.solve().unwrap();
///
/// let solution = solver.solution().unwrap();
/// assert_eq!(solution.routes().len(), 2);
/// assert_eq!(solution.number_of_used_vehicles(), 0);
/// ```
pub struct RoutingSolver<'p, P: DeliveryProblem + ?Sized, E: RoutingEngine> {
    problem: &'p P,
    engine: E,
    model: Option<RoutingModel<'static>>,
    assignment: Option<Assignment>,
}

impl<'p, P: DeliveryProblem + ?Sized> RoutingSolver<'p, P, LocalSearchEngine> {
    /// Uses the built-in [`LocalSearchEngine`].
    pub fn with_default_engine(problem: &'p P) -> Self {
        Self::new(problem, LocalSearchEngine::default())
    }
}

impl<'p, P: DeliveryProblem + ?Sized, E: RoutingEngine> RoutingSolver<'p, P, E> {
    /// Creates a solver; nothing runs until [`solve`](Self::solve).
    pub fn new(problem: &'p P, engine: E) -> Self {
        Self {
            problem,
            engine,
            model: None,
            assignment: None,
        }
    }

    /// Builds the model and runs the engine.
    ///
    /// Finding no feasible assignment is not an error here; check
    /// [`has_solution`](Self::has_solution).
    pub fn solve(&mut self) -> Result<(), SolveError> {
        info!("routing init");
        let config = self.problem.config();
        config.validate()?;
        self.engine.initialize()?;

        let model = formulation::build_model(self.problem)?;
        let params = formulation::search_parameters(config);

        info!(
            orders = self.problem.number_orders(),
            vehicles = config.number_vehicles,
            time_limit_ms = params.time_limit.as_millis() as u64,
            "routing solver start"
        );
        let started = Instant::now();
        let assignment = self.engine.solve(&model, &params)?;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &assignment {
            Some(a) => info!(objective = a.objective(), elapsed_ms, "routing solver end"),
            None => warn!(elapsed_ms, "routing solver end without a solution"),
        }

        self.model = Some(model);
        self.assignment = assignment;
        Ok(())
    }

    /// Returns `true` once [`solve`](Self::solve) has completed.
    pub fn was_run(&self) -> bool {
        self.model.is_some()
    }

    /// Returns `true` if the last run found an assignment.
    pub fn has_solution(&self) -> bool {
        self.assignment.is_some()
    }

    /// The raw assignment of the last run.
    pub fn assignment(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }

    /// The model of the last run.
    pub fn model(&self) -> Option<&RoutingModel<'static>> {
        self.model.as_ref()
    }

    /// Decodes the last run into business routes.
    pub fn solution(&self) -> Result<RoutingSolution, SolveError> {
        let model = self.model.as_ref().ok_or(SolveError::NotRun)?;
        let assignment = self.assignment.as_ref().ok_or(SolveError::NoSolution)?;
        decode(self.problem, model, assignment)
    }
}
