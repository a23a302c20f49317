//! Prioritized to-do list with list and agenda orderings.

use std::cmp::Ordering;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::date::parse_time;
use crate::error::{CoreError, Result, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "urgent",
            Priority::Medium => "important",
            Priority::Low => "relaxed",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" | "urgent" => Ok(Priority::High),
            "medium" | "important" => Ok(Priority::Medium),
            "low" | "relaxed" => Ok(Priority::Low),
            _ => Err(ValidationError::InvalidValue {
                field: "priority".into(),
                message: format!("'{s}' is not one of high, medium, low"),
            }),
        }
    }
}

/// How [`TodoList::sorted`] orders open items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoView {
    /// By priority, most urgent first.
    #[default]
    List,
    /// By time of day; untimed items after timed ones.
    Agenda,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    pub priority: Priority,
    #[serde(default)]
    pub done: bool,
    #[serde(default, with = "hhmm", skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
}

fn compare(view: TodoView, a: &TodoItem, b: &TodoItem) -> Ordering {
    a.done.cmp(&b.done).then_with(|| match view {
        TodoView::List => a.priority.cmp(&b.priority),
        TodoView::Agenda => match (a.time, b.time) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoList {
    items: Vec<TodoItem>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item. `time`, when given, must be `HH:MM`.
    pub fn add(&mut self, text: &str, priority: Priority, time: Option<&str>) -> Result<&TodoItem> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyName("task text").into());
        }
        let time = time
            .filter(|t| !t.trim().is_empty())
            .map(|t| parse_time(t.trim()))
            .transpose()?;
        self.items.push(TodoItem {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            priority,
            done: false,
            time,
        });
        Ok(&self.items[self.items.len() - 1])
    }

    /// Flip the done flag. Returns the new state.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        let item = self
            .items
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::not_found("task", id))?;
        item.done = !item.done;
        Ok(item.done)
    }

    pub fn remove(&mut self, id: &str) -> Result<TodoItem> {
        let idx = self
            .items
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::not_found("task", id))?;
        Ok(self.items.remove(idx))
    }

    /// Items ordered for display: done items last, then by `view`.
    /// Ties keep insertion order.
    pub fn sorted(&self, view: TodoView) -> Vec<&TodoItem> {
        let mut items: Vec<_> = self.items.iter().collect();
        items.sort_by(|a, b| compare(view, a, b));
        items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn open_count(&self) -> usize {
        self.items.iter().filter(|t| !t.done).count()
    }
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::date::{parse_time, TIME_FORMAT};

    pub fn serialize<S: Serializer>(time: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => s.serialize_str(&t.format(TIME_FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        raw.filter(|s| !s.is_empty())
            .map(|s| parse_time(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
