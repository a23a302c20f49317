//! Minute-of-day intervals and conflict detection.
//!
//! Every interval is the half-open range `[start, start + duration)` in
//! absolute minutes from local midnight. Intervals running past midnight are
//! not wrapped onto the next day.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Minutes in a day.
pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// A time-boxed block on the day timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledInterval {
    pub id: String,
    /// Minutes after midnight, in `[0, 1440)`.
    pub start_minute_of_day: i32,
    /// Strictly positive.
    pub duration_minutes: i32,
    pub label: String,
}

impl ScheduledInterval {
    pub fn new(
        id: impl Into<String>,
        start_minute_of_day: i32,
        duration_minutes: i32,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            start_minute_of_day,
            duration_minutes,
            label: label.into(),
        }
    }

    pub fn start(&self) -> i32 {
        self.start_minute_of_day
    }

    /// Exclusive end; may exceed [`MINUTES_PER_DAY`]. Widened so that any
    /// positive `i32` duration is representable.
    pub fn end(&self) -> i64 {
        i64::from(self.start_minute_of_day) + i64::from(self.duration_minutes)
    }

    /// Check the interval invariants.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidInterval`] for a non-positive
    /// duration or a start outside the day.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.duration_minutes <= 0 {
            return Err(ValidationError::InvalidInterval {
                id: self.id.clone(),
                message: format!("duration must be positive, got {}", self.duration_minutes),
            });
        }
        if !(0..MINUTES_PER_DAY).contains(&self.start_minute_of_day) {
            return Err(ValidationError::InvalidInterval {
                id: self.id.clone(),
                message: format!(
                    "start must be within [0, {MINUTES_PER_DAY}), got {}",
                    self.start_minute_of_day
                ),
            });
        }
        Ok(())
    }

    /// Strict overlap: touching boundaries do not overlap.
    pub fn overlaps(&self, other: &ScheduledInterval) -> bool {
        !(self.end() <= i64::from(other.start()) || i64::from(self.start()) >= other.end())
    }

    /// `HH:MM` label for the start minute.
    pub fn start_label(&self) -> String {
        format_minute(self.start_minute_of_day)
    }
}

/// Format a minute-of-day as `HH:MM`. Minutes past midnight keep counting hours.
pub fn format_minute(minute: i32) -> String {
    format!("{:02}:{:02}", minute.div_euclid(60), minute.rem_euclid(60))
}

/// First existing interval that `candidate` overlaps, after validating every
/// interval involved.
///
/// # Errors
/// Returns [`ValidationError::InvalidInterval`] before any overlap test if
/// the candidate or any existing interval is invalid.
pub fn first_conflict<'a>(
    candidate: &ScheduledInterval,
    existing: &'a [ScheduledInterval],
) -> Result<Option<&'a ScheduledInterval>, ValidationError> {
    candidate.validate()?;
    for interval in existing {
        interval.validate()?;
    }
    Ok(existing.iter().find(|i| candidate.overlaps(i)))
}

/// Whether `candidate` overlaps any interval in `existing`.
///
/// # Errors
/// See [`first_conflict`].
pub fn has_conflict(
    candidate: &ScheduledInterval,
    existing: &[ScheduledInterval],
) -> Result<bool, ValidationError> {
    Ok(first_conflict(candidate, existing)?.is_some())
}

/// An unoccupied stretch of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start_minute_of_day: i32,
    pub end_minute_of_day: i32,
}

impl FreeSlot {
    pub fn duration_minutes(&self) -> i32 {
        self.end_minute_of_day - self.start_minute_of_day
    }

    pub fn can_fit(&self, minutes: i32) -> bool {
        self.duration_minutes() >= minutes
    }
}

/// Gaps of at least `min_minutes` between intervals, clipped to the day,
/// sorted by start.
pub fn free_slots(intervals: &[ScheduledInterval], min_minutes: i32) -> Vec<FreeSlot> {
    let mut sorted: Vec<_> = intervals.iter().collect();
    sorted.sort_by_key(|i| i.start());

    let min_minutes = min_minutes.max(1);
    let mut slots = Vec::new();
    let mut last_end = 0;

    for interval in sorted {
        if interval.start() >= MINUTES_PER_DAY {
            break;
        }
        if interval.start() - last_end >= min_minutes {
            slots.push(FreeSlot {
                start_minute_of_day: last_end,
                end_minute_of_day: interval.start(),
            });
        }
        // Clipped to the day, so the narrowing cannot truncate.
        let end = interval.end().min(i64::from(MINUTES_PER_DAY)) as i32;
        last_end = last_end.max(end);
    }
    if MINUTES_PER_DAY - last_end >= min_minutes {
        slots.push(FreeSlot {
            start_minute_of_day: last_end,
            end_minute_of_day: MINUTES_PER_DAY,
        });
    }
    slots
}
