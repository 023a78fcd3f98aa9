//! Routing configuration.
//!
//! A [`RoutingConfig`] is plain data: start from [`RoutingConfig::default`]
//! and override fields with the `with_*` methods, or load it from JSON where
//! every field is optional.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::{LocationCode, Weight};

const DEFAULT_NUMBER_VEHICLES: usize = 30;
const DEFAULT_DEPOT: &str = "3000";
const DEFAULT_SERVICE_TIME: Duration = Duration::from_secs(10 * 60);
const DEFAULT_HOURLY_VEHICLE_COST: f64 = 200.0;
const DEFAULT_MAX_BOXES_PER_VEHICLE: u32 = 64;
const DEFAULT_MAX_WEIGHT_PER_VEHICLE_KG: f64 = 1000.0;
const DEFAULT_SOLVER_TIME_LIMIT: Duration = Duration::from_secs(30);

/// Invalid routing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The fleet is empty.
    #[error("at least one vehicle is required")]
    NoVehicles,
    /// The hourly cost is negative or not a number.
    #[error("hourly vehicle cost must be a finite non-negative number, got {0}")]
    InvalidHourlyCost(f64),
    /// The vehicle weight limit is negative or not a number.
    #[error("max weight per vehicle must be a finite non-negative number, got {0} kg")]
    InvalidMaxWeight(f64),
    /// The search has no time to run.
    #[error("solver time limit must be positive")]
    ZeroTimeLimit,
    /// The JSON document could not be read.
    #[error("invalid routing configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fleet, depot, and cost parameters of a routing run.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_shipping::config::RoutingConfig;
/// use u_shipping::models::LocationCode;
///
/// let config = RoutingConfig::default()
///     .with_number_vehicles(2)
///     .with_depot(LocationCode::parse("1000").unwrap())
///     .with_solver_time_limit(Duration::from_secs(1));
/// assert_eq!(config.number_vehicles, 2);
/// assert_eq!(config.max_boxes_per_vehicle, 64);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Number of vehicles available.
    pub number_vehicles: usize,
    /// Location every route starts and ends at.
    pub depot: LocationCode,
    /// Time spent at each delivery stop.
    #[serde(with = "seconds")]
    pub service_time: Duration,
    /// Cost of operating a vehicle for one hour.
    pub hourly_vehicle_cost: f64,
    /// Box capacity of each vehicle.
    pub max_boxes_per_vehicle: u32,
    /// Weight capacity of each vehicle.
    pub max_weight_per_vehicle: Weight,
    /// Wall-clock budget of the search.
    #[serde(with = "seconds")]
    pub solver_time_limit: Duration,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            number_vehicles: DEFAULT_NUMBER_VEHICLES,
            depot: LocationCode::parse(DEFAULT_DEPOT).expect("default depot code is valid"),
            service_time: DEFAULT_SERVICE_TIME,
            hourly_vehicle_cost: DEFAULT_HOURLY_VEHICLE_COST,
            max_boxes_per_vehicle: DEFAULT_MAX_BOXES_PER_VEHICLE,
            max_weight_per_vehicle: Weight::of_kilograms(DEFAULT_MAX_WEIGHT_PER_VEHICLE_KG),
            solver_time_limit: DEFAULT_SOLVER_TIME_LIMIT,
        }
    }
}

impl RoutingConfig {
    /// Reads a configuration from JSON, filling missing fields with defaults.
    ///
    /// Durations are given in seconds.
    ///
    /// ```
    /// use u_shipping::config::RoutingConfig;
    ///
    /// let config = RoutingConfig::from_json(r#"{"number_vehicles": 4, "depot": "1700"}"#).unwrap();
    /// assert_eq!(config.number_vehicles, 4);
    /// assert_eq!(config.depot.as_str(), "1700");
    /// assert_eq!(config.service_time.as_secs(), 600);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration before any solve attempt.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.number_vehicles == 0 {
            return Err(ConfigError::NoVehicles);
        }
        if !self.hourly_vehicle_cost.is_finite() || self.hourly_vehicle_cost < 0.0 {
            return Err(ConfigError::InvalidHourlyCost(self.hourly_vehicle_cost));
        }
        let max_kg = self.max_weight_per_vehicle.kilograms();
        if !max_kg.is_finite() || max_kg < 0.0 {
            return Err(ConfigError::InvalidMaxWeight(max_kg));
        }
        if self.solver_time_limit.is_zero() {
            return Err(ConfigError::ZeroTimeLimit);
        }
        Ok(())
    }

    /// Sets the fleet size.
    pub fn with_number_vehicles(mut self, number_vehicles: usize) -> Self {
        self.number_vehicles = number_vehicles;
        self
    }

    /// Sets the depot location.
    pub fn with_depot(mut self, depot: LocationCode) -> Self {
        self.depot = depot;
        self
    }

    /// Sets the time spent at each stop.
    pub fn with_service_time(mut self, service_time: Duration) -> Self {
        self.service_time = service_time;
        self
    }

    /// Sets the hourly vehicle cost.
    pub fn with_hourly_vehicle_cost(mut self, cost: f64) -> Self {
        self.hourly_vehicle_cost = cost;
        self
    }

    /// Sets the box capacity per vehicle.
    pub fn with_max_boxes_per_vehicle(mut self, max: u32) -> Self {
        self.max_boxes_per_vehicle = max;
        self
    }

    /// Sets the weight capacity per vehicle.
    pub fn with_max_weight_per_vehicle(mut self, max: Weight) -> Self {
        self.max_weight_per_vehicle = max;
        self
    }

    /// Sets the search time budget.
    pub fn with_solver_time_limit(mut self, limit: Duration) -> Self {
        self.solver_time_limit = limit;
        self
    }
}

/// Serde adapter writing a [`Duration`] as fractional seconds.
mod seconds {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
