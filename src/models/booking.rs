//! Booking pair model.
//!
//! This module defines the [`BookingPair`] produced by the booking-pair
//! resolver: one work or break interval of a single day, expressed in
//! minutes from midnight.

use serde::{Deserialize, Serialize};

/// Whether a booking pair records work or a break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairCategory {
    /// Time spent working.
    Work,
    /// Time booked as a break.
    Break,
}

/// One resolved work-or-break interval within a day.
///
/// Either end may be missing when the employee forgot to clock in or out.
/// Such incomplete pairs are skipped by every calculation in this crate.
///
/// # Example
///
/// ```
/// use flextime_engine::models::{BookingPair, PairCategory};
///
/// let pair = BookingPair::new(480, 1020, PairCategory::Work); // 08:00-17:00
/// assert!(pair.is_complete());
/// assert_eq!(pair.duration(), 540);
///
/// let open = BookingPair {
///     start: Some(480),
///     end: None,
///     category: PairCategory::Work,
/// };
/// assert!(!open.is_complete());
/// assert_eq!(open.duration(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPair {
    /// Minutes from midnight of the in-booking.
    pub start: Option<i32>,
    /// Minutes from midnight of the out-booking.
    pub end: Option<i32>,
    /// Work or break.
    pub category: PairCategory,
}

impl BookingPair {
    /// Creates a complete pair.
    pub fn new(start: i32, end: i32, category: PairCategory) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            category,
        }
    }

    /// Returns the `(start, end)` bounds if both bookings are present and
    /// the pair spans a positive interval.
    pub fn bounds(&self) -> Option<(i32, i32)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if end > start => Some((start, end)),
            _ => None,
        }
    }

    /// Returns true if the pair has both bookings and `end > start`.
    pub fn is_complete(&self) -> bool {
        self.bounds().is_some()
    }

    /// Returns the pair duration in minutes, or 0 for an incomplete pair.
    pub fn duration(&self) -> i32 {
        self.bounds().map_or(0, |(start, end)| end - start)
    }

    /// Returns true if this is a complete work pair.
    pub fn is_work(&self) -> bool {
        self.category == PairCategory::Work && self.is_complete()
    }

    /// Returns true if this is a complete break pair.
    pub fn is_break(&self) -> bool {
        self.category == PairCategory::Break && self.is_complete()
    }
}

/// Sums the durations of all complete pairs of the given category.
pub fn total_minutes(pairs: &[BookingPair], category: PairCategory) -> i32 {
    pairs
        .iter()
        .filter(|p| p.category == category)
        .map(BookingPair::duration)
        .sum()
}
