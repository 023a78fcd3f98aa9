//! Orders and delivery time windows.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::{LocationCode, Weight};

/// A time-of-day window during which an order may be delivered.
///
/// Both bounds are inclusive.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use u_shipping::models::TimeWindow;
///
/// let tw = TimeWindow::of(8, 0, 18, 0).unwrap();
/// assert_eq!(tw.start_minutes(), 480);
/// assert_eq!(tw.end_minutes(), 1080);
/// assert!(tw.contains(NaiveTime::from_hms_opt(18, 0, 0).unwrap()));
/// assert!(!tw.contains(NaiveTime::from_hms_opt(7, 59, 59).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `start > end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Option<Self> {
        if start > end {
            return None;
        }
        Some(Self { start, end })
    }

    /// Creates a window from hour/minute pairs.
    ///
    /// Returns `None` for out-of-range components or `start > end`.
    pub fn of(start_hour: u32, start_minute: u32, end_hour: u32, end_minute: u32) -> Option<Self> {
        let start = NaiveTime::from_hms_opt(start_hour, start_minute, 0)?;
        let end = NaiveTime::from_hms_opt(end_hour, end_minute, 0)?;
        Self::new(start, end)
    }

    /// Window opening time.
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// Window closing time.
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Returns `true` if `time` lies inside the window, bounds included.
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start && time <= self.end
    }

    /// Opening time as whole minutes since midnight.
    pub fn start_minutes(&self) -> i64 {
        minutes_of_day(self.start)
    }

    /// Closing time as whole minutes since midnight.
    pub fn end_minutes(&self) -> i64 {
        minutes_of_day(self.end)
    }
}

fn minutes_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// A delivery request.
///
/// If the order is not delivered by a vehicle it is handed to the hub, which
/// costs [`total_hub_delivery_cost`](Order::total_hub_delivery_cost).
///
/// # Examples
///
/// ```
/// use u_shipping::models::{LocationCode, Order, TimeWindow, Weight};
///
/// let order = Order::new(
///     "A-17",
///     LocationCode::parse("2000").unwrap(),
///     3,
///     TimeWindow::of(8, 0, 12, 0).unwrap(),
///     Weight::of_kilograms(4.5),
///     12.5,
/// );
/// assert_eq!(order.total_hub_delivery_cost(), 37.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: String,
    location: LocationCode,
    number_boxes: u32,
    time_window: TimeWindow,
    weight: Weight,
    hub_delivery_cost_per_box: f64,
}

impl Order {
    /// Creates a new order.
    pub fn new(
        id: impl Into<String>,
        location: LocationCode,
        number_boxes: u32,
        time_window: TimeWindow,
        weight: Weight,
        hub_delivery_cost_per_box: f64,
    ) -> Self {
        Self {
            id: id.into(),
            location,
            number_boxes,
            time_window,
            weight,
            hub_delivery_cost_per_box,
        }
    }

    /// Order identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Delivery location.
    pub fn location(&self) -> &LocationCode {
        &self.location
    }

    /// Number of boxes to deliver.
    pub fn number_boxes(&self) -> u32 {
        self.number_boxes
    }

    /// Delivery window.
    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }

    /// Total weight of the order.
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Hub delivery price for a single box.
    pub fn hub_delivery_cost_per_box(&self) -> f64 {
        self.hub_delivery_cost_per_box
    }

    /// Price of handing the whole order to the hub.
    pub fn total_hub_delivery_cost(&self) -> f64 {
        f64::from(self.number_boxes) * self.hub_delivery_cost_per_box
    }
}
