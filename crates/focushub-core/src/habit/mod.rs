//! Habit tracking.
//!
//! A habit is a name plus the set of local calendar days on which it was
//! completed. Streaks and calendar views are derived on demand; nothing
//! derived is stored.

mod calendar;
mod legacy;
mod streak;

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, Result, ValidationError};

pub use calendar::{month_grid, month_view, week_view, DayMark};
pub use legacy::LegacyHabit;
pub use streak::{compute_streak, compute_streak_from_strs, longest_streak};

/// A tracked habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    /// Completed days, serialized as sorted `YYYY-MM-DD` strings.
    #[serde(rename = "history")]
    pub completed_dates: BTreeSet<NaiveDate>,
}

impl Habit {
    /// Create a habit with an empty history.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyName`] if `name` is blank.
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName("habit name"));
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            completed_dates: BTreeSet::new(),
        })
    }

    pub fn is_done_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(&date)
    }

    /// Flip completion for `date`. Returns whether the day is now completed.
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        if self.completed_dates.remove(&date) {
            false
        } else {
            self.completed_dates.insert(date);
            true
        }
    }

    /// [`Habit::toggle`], refusing days after `today`.
    pub fn toggle_on(&mut self, date: NaiveDate, today: NaiveDate) -> Result<bool, ValidationError> {
        if date > today {
            return Err(ValidationError::FutureDate { date, today });
        }
        Ok(self.toggle(date))
    }

    pub fn streak(&self, today: NaiveDate) -> u32 {
        compute_streak(&self.completed_dates, today)
    }

    pub fn summary(&self, today: NaiveDate) -> HabitSummary {
        HabitSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            streak: self.streak(today),
            longest_streak: longest_streak(&self.completed_dates),
            done_today: self.is_done_on(today),
            week: week_view(&self.completed_dates, today),
        }
    }
}

/// Read-only projection of a habit for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitSummary {
    pub id: String,
    pub name: String,
    pub streak: u32,
    pub longest_streak: u32,
    pub done_today: bool,
    pub week: Vec<DayMark>,
}

/// Ordered collection of habits, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitBook {
    habits: Vec<Habit>,
}

impl HabitBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a book from stored records, migrating legacy shapes.
    pub fn from_legacy(records: Vec<LegacyHabit>) -> Result<Self, ValidationError> {
        let habits = records
            .into_iter()
            .map(Habit::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { habits })
    }

    pub fn add(&mut self, name: &str) -> Result<&Habit> {
        let habit = Habit::new(name)?;
        tracing::debug!(id = %habit.id, name = %habit.name, "habit added");
        self.habits.push(habit);
        Ok(&self.habits[self.habits.len() - 1])
    }

    pub fn remove(&mut self, id: &str) -> Result<Habit> {
        let idx = self.position(id)?;
        Ok(self.habits.remove(idx))
    }

    pub fn toggle(&mut self, id: &str, date: NaiveDate, today: NaiveDate) -> Result<bool> {
        let idx = self.position(id)?;
        Ok(self.habits[idx].toggle_on(date, today)?)
    }

    pub fn get(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Habit> {
        self.habits.iter()
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn summaries(&self, today: NaiveDate) -> Vec<HabitSummary> {
        self.habits.iter().map(|h| h.summary(today)).collect()
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.habits
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| CoreError::not_found("habit", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::parse_date;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(
            Habit::new("   ").unwrap_err(),
            ValidationError::EmptyName("habit name")
        );
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut habit = Habit::new("Take meds").unwrap();
        assert!(habit.toggle(d("2024-05-12")));
        assert!(habit.is_done_on(d("2024-05-12")));
        assert!(!habit.toggle(d("2024-05-12")));
        assert!(habit.completed_dates.is_empty());
    }

    #[test]
    fn toggle_on_refuses_future_days() {
        let mut habit = Habit::new("Walk").unwrap();
        let err = habit.toggle_on(d("2024-05-13"), d("2024-05-12")).unwrap_err();
        assert!(matches!(err, ValidationError::FutureDate { .. }));
        assert!(habit.completed_dates.is_empty());
    }

    #[test]
    fn serializes_history_as_date_strings() {
        let mut habit = Habit::new("Read").unwrap();
        habit.toggle(d("2024-05-12"));
        habit.toggle(d("2024-05-10"));
        let json = serde_json::to_value(&habit).unwrap();
        assert_eq!(json["history"], serde_json::json!(["2024-05-10", "2024-05-12"]));
    }

    #[test]
    fn book_crud() {
        let mut book = HabitBook::new();
        let id = book.add("Stretch").unwrap().id.clone();
        assert_eq!(book.len(), 1);

        assert!(book.toggle(&id, d("2024-05-12"), d("2024-05-12")).unwrap());
        let summary = &book.summaries(d("2024-05-12"))[0];
        assert_eq!(summary.streak, 1);
        assert!(summary.done_today);

        book.remove(&id).unwrap();
        assert!(book.is_empty());
        assert!(matches!(
            book.remove(&id),
            Err(CoreError::NotFound { kind: "habit", .. })
        ));
    }
}
