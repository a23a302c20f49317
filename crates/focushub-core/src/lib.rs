//! # FocusHub Core Library
//!
//! Business logic for the FocusHub productivity widgets. Every operation is
//! available through the standalone `focushub` CLI binary, which is a thin
//! layer over this crate.
//!
//! ## Architecture
//!
//! - **Habits**: completion history per habit, with streaks and calendar
//!   views derived on demand from the set of completed days
//! - **Planner**: a backlog plus a 24-hour timeline that refuses
//!   overlapping placements
//! - **Tasks / Medication**: prioritized to-do list and pill inventory
//! - **Timer**: a wall-clock focus timer that requires the caller to
//!   periodically invoke `tick()`
//! - **Storage**: SQLite key/value documents and TOML configuration
//!
//! ## Key Components
//!
//! - [`compute_streak`]: consecutive-day streak ending today or yesterday
//! - [`has_conflict`]: half-open interval overlap test
//! - [`Repository`]: typed load/save of every widget's document
//! - [`Config`]: application configuration management

pub mod breakdown;
pub mod date;
pub mod error;
pub mod events;
pub mod habit;
pub mod medication;
pub mod planner;
pub mod storage;
pub mod timer;
pub mod todo;

pub use breakdown::{GeminiBreaker, TaskBreaker};
pub use error::{ConfigError, CoreError, PlannerError, StorageError, ValidationError};
pub use events::Event;
pub use habit::{compute_streak, compute_streak_from_strs, Habit, HabitBook, LegacyHabit};
pub use medication::{Cabinet, Medication, StockStatus};
pub use planner::{has_conflict, DayPlan, ScheduledInterval};
pub use storage::{Config, Database, KvStore, MemoryStore, Repository};
pub use timer::{FocusTimer, Preset, PresetKind, TimerState};
pub use todo::{Priority, TodoItem, TodoList, TodoView};
