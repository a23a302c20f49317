//! Typed access to the stored widget documents.
//!
//! Habits are always read through the legacy record shape so that older
//! documents (a `streak` counter plus `lastCompleted`) are migrated on load.
//! The migrated book is written back in the current shape on the next save.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::database::KvStore;
use crate::error::{Result, StorageError};
use crate::habit::{HabitBook, LegacyHabit};
use crate::medication::Cabinet;
use crate::planner::DayPlan;
use crate::timer::{FocusTimer, Preset};
use crate::todo::TodoList;

pub const HABITS_KEY: &str = "habits";
pub const PLANNER_KEY: &str = "planner";
pub const TASKS_KEY: &str = "tasks";
pub const MEDICATIONS_KEY: &str = "medications";
pub const TIMER_KEY: &str = "timer";

pub struct Repository<S: KvStore> {
    store: S,
}

impl<S: KvStore> Repository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decode the document under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    /// Returns [`StorageError::CorruptDocument`] if the stored JSON does not
    /// match `T`.
    pub fn load_doc<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        let doc = serde_json::from_str(&raw).map_err(|e| StorageError::CorruptDocument {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(Some(doc))
    }

    pub fn save_doc<T: Serialize>(&self, key: &str, doc: &T) -> Result<()> {
        let raw = serde_json::to_string(doc)?;
        self.store.set(key, &raw)?;
        tracing::trace!(key, bytes = raw.len(), "document saved");
        Ok(())
    }

    pub fn load_habits(&self) -> Result<HabitBook> {
        let records: Vec<LegacyHabit> = self.load_doc(HABITS_KEY)?.unwrap_or_default();
        Ok(HabitBook::from_legacy(records)?)
    }

    pub fn save_habits(&self, book: &HabitBook) -> Result<()> {
        self.save_doc(HABITS_KEY, book)
    }

    pub fn load_plan(&self) -> Result<DayPlan> {
        Ok(self.load_doc(PLANNER_KEY)?.unwrap_or_default())
    }

    pub fn save_plan(&self, plan: &DayPlan) -> Result<()> {
        self.save_doc(PLANNER_KEY, plan)
    }

    pub fn load_tasks(&self) -> Result<TodoList> {
        Ok(self.load_doc(TASKS_KEY)?.unwrap_or_default())
    }

    pub fn save_tasks(&self, list: &TodoList) -> Result<()> {
        self.save_doc(TASKS_KEY, list)
    }

    pub fn load_cabinet(&self) -> Result<Cabinet> {
        Ok(self.load_doc(MEDICATIONS_KEY)?.unwrap_or_default())
    }

    pub fn save_cabinet(&self, cabinet: &Cabinet) -> Result<()> {
        self.save_doc(MEDICATIONS_KEY, cabinet)
    }

    /// Load the persisted timer, or a fresh one on `preset`.
    pub fn load_timer(&self, preset: Preset) -> Result<FocusTimer> {
        Ok(self
            .load_doc(TIMER_KEY)?
            .unwrap_or_else(|| FocusTimer::new(preset)))
    }

    pub fn save_timer(&self, timer: &FocusTimer) -> Result<()> {
        self.save_doc(TIMER_KEY, timer)
    }
}
