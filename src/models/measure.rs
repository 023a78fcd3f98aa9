//! Unit-tagged distance and weight values.
//!
//! Both types remember the unit they were created with. Accessors convert on
//! the fly, so no precision is lost by storing, and equality compares the
//! stored magnitude together with the stored unit: `1 km != 1000 m`.

use serde::{Deserialize, Serialize};

/// Unit a [`Distance`] was recorded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    /// Kilometres.
    Kilometers,
    /// Metres.
    Meters,
}

/// A travel distance.
///
/// # Examples
///
/// ```
/// use u_shipping::models::Distance;
///
/// let d = Distance::of_kilometers(1.5);
/// assert_eq!(d.meters(), 1500.0);
/// assert_eq!(Distance::of_meters(250.0).kilometers(), 0.25);
/// // provenance is part of equality
/// assert_ne!(Distance::of_kilometers(1.0), Distance::of_meters(1000.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    value: f64,
    unit: DistanceUnit,
}

impl Distance {
    /// A distance recorded in kilometres.
    pub fn of_kilometers(km: f64) -> Self {
        Self {
            value: km,
            unit: DistanceUnit::Kilometers,
        }
    }

    /// A distance recorded in metres.
    pub fn of_meters(m: f64) -> Self {
        Self {
            value: m,
            unit: DistanceUnit::Meters,
        }
    }

    /// Zero kilometres.
    pub fn zero() -> Self {
        Self::of_kilometers(0.0)
    }

    /// The distance in kilometres.
    pub fn kilometers(&self) -> f64 {
        match self.unit {
            DistanceUnit::Kilometers => self.value,
            DistanceUnit::Meters => self.value / 1000.0,
        }
    }

    /// The distance in metres.
    pub fn meters(&self) -> f64 {
        match self.unit {
            DistanceUnit::Kilometers => self.value * 1000.0,
            DistanceUnit::Meters => self.value,
        }
    }

    /// The unit this distance was recorded in.
    pub fn unit(&self) -> DistanceUnit {
        self.unit
    }

    /// Sum of two distances, expressed in kilometres.
    pub fn add(&self, other: &Distance) -> Distance {
        Distance::of_kilometers(self.kilometers() + other.kilometers())
    }
}

/// Unit a [`Weight`] was recorded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    /// Kilograms.
    Kilograms,
    /// Grams.
    Grams,
}

/// A load weight.
///
/// # Examples
///
/// ```
/// use u_shipping::models::Weight;
///
/// let w = Weight::of_kilograms(2.5);
/// assert_eq!(w.grams(), 2500.0);
/// assert_eq!(Weight::of_grams(500.0).kilograms(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    value: f64,
    unit: WeightUnit,
}

impl Weight {
    /// A weight recorded in kilograms.
    pub fn of_kilograms(kg: f64) -> Self {
        Self {
            value: kg,
            unit: WeightUnit::Kilograms,
        }
    }

    /// A weight recorded in grams.
    pub fn of_grams(g: f64) -> Self {
        Self {
            value: g,
            unit: WeightUnit::Grams,
        }
    }

    /// The weight in kilograms.
    pub fn kilograms(&self) -> f64 {
        match self.unit {
            WeightUnit::Kilograms => self.value,
            WeightUnit::Grams => self.value / 1000.0,
        }
    }

    /// The weight in grams.
    pub fn grams(&self) -> f64 {
        match self.unit {
            WeightUnit::Kilograms => self.value * 1000.0,
            WeightUnit::Grams => self.value,
        }
    }

    /// The unit this weight was recorded in.
    pub fn unit(&self) -> WeightUnit {
        self.unit
    }
}
