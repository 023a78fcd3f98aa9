//! Sparse directed distance/duration table.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::{Distance, LocationCode};

/// Distance returned for pairs without a known path, in kilometres.
pub const UNREACHABLE_DISTANCE_KM: f64 = 100_000.0;

/// Duration returned for pairs without a known path (about 11.5 days).
pub const UNREACHABLE_DURATION: Duration = Duration::from_secs(1_000_000);

/// Travel distance and duration of one directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Road distance.
    pub distance: Distance,
    /// Driving time.
    pub duration: Duration,
}

impl Edge {
    /// The sentinel edge used for unknown pairs.
    pub fn unreachable() -> Self {
        Self {
            distance: Distance::of_kilometers(UNREACHABLE_DISTANCE_KM),
            duration: UNREACHABLE_DURATION,
        }
    }
}

/// A sparse, directed adjacency table keyed by location code.
///
/// Lookups never fail: a pair with no entry resolves to the unreachable
/// sentinel, which is large enough that no route can afford it.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_shipping::distance::{TravelTable, UNREACHABLE_DURATION};
/// use u_shipping::models::{Distance, LocationCode};
///
/// let a = LocationCode::parse("1000").unwrap();
/// let b = LocationCode::parse("2000").unwrap();
///
/// let mut table = TravelTable::new();
/// table.set(&a, &b, Distance::of_kilometers(3.0), Duration::from_secs(600));
///
/// assert_eq!(table.duration(&a, &b), Duration::from_secs(600));
/// // direction matters
/// assert_eq!(table.duration(&b, &a), UNREACHABLE_DURATION);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TravelTable {
    edges: HashMap<LocationCode, HashMap<LocationCode, Edge>>,
}

impl TravelTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the edge `from -> to`.
    pub fn set(&mut self, from: &LocationCode, to: &LocationCode, distance: Distance, duration: Duration) {
        self.edges
            .entry(from.clone())
            .or_default()
            .insert(to.clone(), Edge { distance, duration });
    }

    /// Inserts or replaces the edge of a location to itself.
    ///
    /// Used for travel between two addresses sharing a location code.
    pub fn set_self_loop(&mut self, location: &LocationCode, distance: Distance, duration: Duration) {
        self.set(location, location, distance, duration);
    }

    /// The edge `from -> to`, or the unreachable sentinel.
    pub fn edge(&self, from: &LocationCode, to: &LocationCode) -> Edge {
        self.edges
            .get(from)
            .and_then(|targets| targets.get(to))
            .copied()
            .unwrap_or_else(Edge::unreachable)
    }

    /// Distance of `from -> to`, or the unreachable sentinel.
    pub fn distance(&self, from: &LocationCode, to: &LocationCode) -> Distance {
        self.edge(from, to).distance
    }

    /// Duration of `from -> to`, or the unreachable sentinel.
    pub fn duration(&self, from: &LocationCode, to: &LocationCode) -> Duration {
        self.edge(from, to).duration
    }

    /// Returns `true` if the edge `from -> to` is known.
    pub fn contains(&self, from: &LocationCode, to: &LocationCode) -> bool {
        self.edges
            .get(from)
            .is_some_and(|targets| targets.contains_key(to))
    }

    /// Number of known edges.
    pub fn len(&self) -> usize {
        self.edges.values().map(HashMap::len).sum()
    }

    /// Returns `true` if no edge is known.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Locations that have at least one outgoing edge.
    pub fn locations(&self) -> impl Iterator<Item = &LocationCode> + '_ {
        self.edges.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(code: &str) -> LocationCode {
        LocationCode::parse(code).expect("valid")
    }

    #[test]
    fn test_set_and_get() {
        let mut table = TravelTable::new();
        table.set(
            &loc("1000"),
            &loc("2000"),
            Distance::of_kilometers(1.0),
            Duration::from_secs(900),
        );
        assert!(table.contains(&loc("1000"), &loc("2000")));
        assert_eq!(
            table.distance(&loc("1000"), &loc("2000")),
            Distance::of_kilometers(1.0)
        );
        assert_eq!(
            table.duration(&loc("1000"), &loc("2000")),
            Duration::from_secs(900)
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_directed() {
        let mut table = TravelTable::new();
        table.set(
            &loc("1000"),
            &loc("2000"),
            Distance::of_kilometers(1.0),
            Duration::from_secs(900),
        );
        table.set(
            &loc("2000"),
            &loc("1000"),
            Distance::of_kilometers(2.0),
            Duration::from_secs(1200),
        );
        assert_eq!(table.distance(&loc("2000"), &loc("1000")).kilometers(), 2.0);
        assert_eq!(table.distance(&loc("1000"), &loc("2000")).kilometers(), 1.0);
    }

    #[test]
    fn test_upsert_replaces() {
        let mut table = TravelTable::new();
        let (a, b) = (loc("1000"), loc("2000"));
        table.set(&a, &b, Distance::of_kilometers(1.0), Duration::from_secs(60));
        table.set(&a, &b, Distance::of_kilometers(5.0), Duration::from_secs(300));
        assert_eq!(table.len(), 1);
        assert_eq!(table.duration(&a, &b), Duration::from_secs(300));
    }

    #[test]
    fn test_missing_is_unreachable() {
        let mut table = TravelTable::new();
        table.set(
            &loc("1000"),
            &loc("2000"),
            Distance::of_kilometers(1.0),
            Duration::from_secs(900),
        );
        // unknown origin
        assert_eq!(table.edge(&loc("9000"), &loc("1000")), Edge::unreachable());
        // known origin, unknown target
        assert_eq!(
            table.duration(&loc("1000"), &loc("3000")),
            UNREACHABLE_DURATION
        );
        assert_eq!(
            table.distance(&loc("1000"), &loc("3000")).kilometers(),
            UNREACHABLE_DISTANCE_KM
        );
        assert!(!table.contains(&loc("1000"), &loc("3000")));
    }

    #[test]
    fn test_self_loop() {
        let mut table = TravelTable::new();
        table.set_self_loop(&loc("4000"), Distance::of_kilometers(0.8), Duration::from_secs(120));
        assert_eq!(
            table.duration(&loc("4000"), &loc("4000")),
            Duration::from_secs(120)
        );
        assert_eq!(table.locations().count(), 1);
    }

    #[test]
    fn test_empty() {
        let table = TravelTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }
}
