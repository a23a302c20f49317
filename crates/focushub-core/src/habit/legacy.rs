//! Migration of stored habit records.
//!
//! Older records carried a precomputed `streak` and a single
//! `last_completed` day instead of a full history. Migration is a pure
//! conversion: the stored record is consumed and never patched in place,
//! and converting an already-migrated record yields the same habit.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Habit;
use crate::date::parse_date;
use crate::error::ValidationError;

/// Any habit record shape that has ever been persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegacyHabit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub history: Option<Vec<String>>,
    /// Ignored: streaks are always recomputed from history.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak: Option<u32>,
    #[serde(default, alias = "lastCompleted", skip_serializing_if = "Option::is_none")]
    pub last_completed: Option<String>,
}

impl TryFrom<LegacyHabit> for Habit {
    type Error = ValidationError;

    fn try_from(record: LegacyHabit) -> Result<Self, Self::Error> {
        let completed_dates = match (record.history, record.last_completed) {
            (Some(history), _) => history
                .iter()
                .map(|s| parse_date(s))
                .collect::<Result<BTreeSet<_>, _>>()?,
            (None, Some(last)) if !last.trim().is_empty() => {
                tracing::debug!(id = %record.id, %last, "promoting last_completed into history");
                BTreeSet::from([parse_date(last.trim())?])
            }
            (None, _) => BTreeSet::new(),
        };

        Ok(Habit {
            id: record.id,
            name: record.name,
            completed_dates,
        })
    }
}

impl From<Habit> for LegacyHabit {
    fn from(habit: Habit) -> Self {
        Self {
            id: habit.id,
            name: habit.name,
            history: Some(
                habit
                    .completed_dates
                    .into_iter()
                    .map(crate::date::date_key)
                    .collect(),
            ),
            streak: None,
            last_completed: None,
        }
    }
}
