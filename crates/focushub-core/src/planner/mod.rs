//! Day planner: a backlog of unscheduled tasks and a 24-hour timeline.
//!
//! Tasks move from the backlog onto the timeline only if they do not
//! overlap anything already placed. A rejected placement leaves both lists
//! exactly as they were.

mod interval;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, PlannerError, Result, ValidationError};

pub use interval::{
    first_conflict, format_minute, free_slots, has_conflict, FreeSlot, ScheduledInterval,
    MINUTES_PER_DAY,
};

/// Number of color slots entries cycle through.
pub const PALETTE_SIZE: u8 = 6;

/// Shortest estimate a backlog task may carry.
pub const MIN_ESTIMATE_MINUTES: i32 = 5;

/// Longest estimate a backlog task may carry.
pub const MAX_ESTIMATE_MINUTES: i32 = 480;

/// A task waiting to be placed on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacklogTask {
    pub id: String,
    pub title: String,
    pub estimated_minutes: i32,
}

/// A task placed on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedTask {
    #[serde(flatten)]
    pub interval: ScheduledInterval,
    /// Palette slot in `0..PALETTE_SIZE`.
    pub color: u8,
    #[serde(default)]
    pub completed: bool,
}

/// Map a drop position inside an hour row to a minute of that hour.
pub fn snap_minute(offset_px: f64, hour_height_px: f64) -> u32 {
    if hour_height_px <= 0.0 || !offset_px.is_finite() {
        return 0;
    }
    let minute = ((offset_px / hour_height_px) * 60.0).round().max(0.0) as u32;
    minute % 60
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(default)]
    scheduled: Vec<PlannedTask>,
    #[serde(default)]
    backlog: Vec<BacklogTask>,
    #[serde(default)]
    next_color: u8,
}

impl DayPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheduled(&self) -> &[PlannedTask] {
        &self.scheduled
    }

    pub fn backlog(&self) -> &[BacklogTask] {
        &self.backlog
    }

    /// Timeline entries ordered by start minute.
    pub fn timeline(&self) -> Vec<&PlannedTask> {
        let mut entries: Vec<_> = self.scheduled.iter().collect();
        entries.sort_by_key(|t| t.interval.start());
        entries
    }

    /// Add a task to the backlog. The estimate is clamped to
    /// `[MIN_ESTIMATE_MINUTES, MAX_ESTIMATE_MINUTES]`.
    pub fn add_backlog(&mut self, title: &str, estimated_minutes: i32) -> Result<&BacklogTask> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyName("task title").into());
        }
        self.backlog.push(BacklogTask {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            estimated_minutes: estimated_minutes.clamp(MIN_ESTIMATE_MINUTES, MAX_ESTIMATE_MINUTES),
        });
        Ok(&self.backlog[self.backlog.len() - 1])
    }

    pub fn remove_backlog(&mut self, id: &str) -> Result<BacklogTask> {
        let idx = self.backlog_position(id)?;
        Ok(self.backlog.remove(idx))
    }

    /// Move a backlog task onto the timeline at `hour:minute`.
    ///
    /// # Errors
    /// - [`CoreError::NotFound`] if no backlog task has `backlog_id`
    /// - [`ValidationError`] if the slot or the task's estimate is invalid
    /// - [`PlannerError::Conflict`] if the slot overlaps a placed task
    pub fn place(&mut self, backlog_id: &str, hour: u32, minute: u32) -> Result<&PlannedTask> {
        let idx = self.backlog_position(backlog_id)?;
        if hour >= 24 || minute >= 60 {
            return Err(ValidationError::InvalidValue {
                field: "start".into(),
                message: format!("{hour}:{minute:02} is not a time of day"),
            }
            .into());
        }

        let task = &self.backlog[idx];
        let candidate = ScheduledInterval::new(
            task.id.clone(),
            (hour * 60 + minute) as i32,
            task.estimated_minutes,
            task.title.clone(),
        );
        self.check_placement(&candidate)?;

        let color = self.next_color % PALETTE_SIZE;
        self.next_color = (color + 1) % PALETTE_SIZE;
        self.backlog.remove(idx);
        tracing::debug!(id = %candidate.id, start = %candidate.start_label(), "task placed");
        self.scheduled.push(PlannedTask {
            interval: candidate,
            color,
            completed: false,
        });
        Ok(&self.scheduled[self.scheduled.len() - 1])
    }

    /// Take a task off the timeline and put it back in the backlog.
    pub fn unschedule(&mut self, id: &str) -> Result<&BacklogTask> {
        let task = self.remove_scheduled(id)?;
        self.backlog.push(BacklogTask {
            id: task.interval.id,
            title: task.interval.label,
            estimated_minutes: task.interval.duration_minutes,
        });
        Ok(&self.backlog[self.backlog.len() - 1])
    }

    pub fn remove_scheduled(&mut self, id: &str) -> Result<PlannedTask> {
        let idx = self.scheduled_position(id)?;
        Ok(self.scheduled.remove(idx))
    }

    /// Flip completion of a placed task. Returns the new state.
    pub fn toggle_completed(&mut self, id: &str) -> Result<bool> {
        let idx = self.scheduled_position(id)?;
        let task = &mut self.scheduled[idx];
        task.completed = !task.completed;
        Ok(task.completed)
    }

    pub fn total_scheduled_minutes(&self) -> i64 {
        self.scheduled
            .iter()
            .map(|t| i64::from(t.interval.duration_minutes))
            .sum()
    }

    pub fn total_backlog_minutes(&self) -> i64 {
        self.backlog
            .iter()
            .map(|t| i64::from(t.estimated_minutes))
            .sum()
    }

    /// Unoccupied stretches of at least `min_minutes`.
    pub fn free_slots(&self, min_minutes: i32) -> Vec<FreeSlot> {
        free_slots(&self.intervals(), min_minutes)
    }

    fn intervals(&self) -> Vec<ScheduledInterval> {
        self.scheduled.iter().map(|t| t.interval.clone()).collect()
    }

    fn check_placement(&self, candidate: &ScheduledInterval) -> Result<()> {
        let existing = self.intervals();
        if let Some(hit) = first_conflict(candidate, &existing)? {
            tracing::info!(candidate = %candidate.label, with = %hit.label, "placement rejected");
            return Err(PlannerError::Conflict {
                candidate: candidate.label.clone(),
                with: hit.label.clone(),
            }
            .into());
        }
        Ok(())
    }

    fn backlog_position(&self, id: &str) -> Result<usize> {
        self.backlog
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::not_found("backlog task", id))
    }

    fn scheduled_position(&self, id: &str) -> Result<usize> {
        self.scheduled
            .iter()
            .position(|t| t.interval.id == id)
            .ok_or_else(|| CoreError::not_found("scheduled task", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_with(tasks: &[(&str, i32)]) -> (DayPlan, Vec<String>) {
        let mut plan = DayPlan::new();
        let ids = tasks
            .iter()
            .map(|(title, minutes)| plan.add_backlog(title, *minutes).unwrap().id.clone())
            .collect();
        (plan, ids)
    }

    #[test]
    fn estimates_are_clamped() {
        let (plan, _) = plan_with(&[("tiny", 1), ("huge", 1000)]);
        assert_eq!(plan.backlog()[0].estimated_minutes, MIN_ESTIMATE_MINUTES);
        assert_eq!(plan.backlog()[1].estimated_minutes, MAX_ESTIMATE_MINUTES);
    }

    #[test]
    fn blank_title_rejected() {
        let mut plan = DayPlan::new();
        assert!(matches!(
            plan.add_backlog("  ", 30),
            Err(CoreError::Validation(ValidationError::EmptyName(_)))
        ));
    }

    #[test]
    fn place_moves_task_to_timeline() {
        let (mut plan, ids) = plan_with(&[("Email", 30)]);
        let placed = plan.place(&ids[0], 9, 0).unwrap();
        assert_eq!(placed.interval.start(), 540);
        assert_eq!(placed.interval.end(), 570);
        assert!(plan.backlog().is_empty());
        assert_eq!(plan.total_scheduled_minutes(), 30);
    }

    #[test]
    fn conflicting_placement_leaves_state_untouched() {
        let (mut plan, ids) = plan_with(&[("Standup", 60), ("Review", 30)]);
        plan.place(&ids[0], 9, 0).unwrap();
        let before = plan.clone();

        let err = plan.place(&ids[1], 9, 30).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Planner(PlannerError::Conflict { ref with, .. }) if with == "Standup"
        ));
        assert_eq!(plan, before);

        plan.place(&ids[1], 10, 0).unwrap();
        assert_eq!(plan.scheduled().len(), 2);
    }

    #[test]
    fn place_rejects_bad_slot() {
        let (mut plan, ids) = plan_with(&[("x", 30)]);
        assert!(plan.place(&ids[0], 24, 0).is_err());
        assert!(plan.place(&ids[0], 10, 60).is_err());
        assert_eq!(plan.backlog().len(), 1);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let mut plan = DayPlan::new();
        assert!(matches!(plan.place("nope", 9, 0), Err(CoreError::NotFound { .. })));
        assert!(matches!(plan.toggle_completed("nope"), Err(CoreError::NotFound { .. })));
    }

    #[test]
    fn colors_cycle_through_palette() {
        let (mut plan, ids) = plan_with(&[("a", 30); 7]);
        for (i, id) in ids.iter().enumerate() {
            plan.place(id, i as u32, 0).unwrap();
        }
        let colors: Vec<u8> = plan.scheduled().iter().map(|t| t.color).collect();
        assert_eq!(colors, vec![0, 1, 2, 3, 4, 5, 0]);
    }

    #[test]
    fn stored_color_cursor_out_of_range_wraps() {
        let (plan, ids) = plan_with(&[("a", 30), ("b", 30)]);
        let mut json = serde_json::to_value(&plan).unwrap();
        json["next_color"] = serde_json::json!(255);
        let mut plan: DayPlan = serde_json::from_value(json).unwrap();

        let first = plan.place(&ids[0], 9, 0).unwrap().color;
        let second = plan.place(&ids[1], 10, 0).unwrap().color;
        assert_eq!(first, 255 % PALETTE_SIZE);
        assert_eq!(second, (first + 1) % PALETTE_SIZE);
    }

    #[test]
    fn unschedule_returns_task_to_backlog() {
        let (mut plan, ids) = plan_with(&[("Call", 45)]);
        plan.place(&ids[0], 14, 15).unwrap();
        plan.toggle_completed(&ids[0]).unwrap();
        let back = plan.unschedule(&ids[0]).unwrap();
        assert_eq!(back.estimated_minutes, 45);
        assert!(plan.scheduled().is_empty());
        assert_eq!(plan.total_backlog_minutes(), 45);
    }

    #[test]
    fn timeline_is_sorted() {
        let (mut plan, ids) = plan_with(&[("late", 30), ("early", 30)]);
        plan.place(&ids[0], 15, 0).unwrap();
        plan.place(&ids[1], 8, 0).unwrap();
        let titles: Vec<_> = plan.timeline().iter().map(|t| t.interval.label.as_str()).collect();
        assert_eq!(titles, vec!["early", "late"]);
    }

    #[test]
    fn drop_offset_snaps_to_minute() {
        assert_eq!(snap_minute(0.0, 60.0), 0);
        assert_eq!(snap_minute(30.0, 60.0), 30);
        assert_eq!(snap_minute(59.6, 60.0), 0);
        assert_eq!(snap_minute(15.0, 0.0), 0);
    }

    #[test]
    fn serde_flattens_interval() {
        let (mut plan, ids) = plan_with(&[("Focus", 25)]);
        plan.place(&ids[0], 9, 0).unwrap();
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["scheduled"][0]["start_minute_of_day"], 540);
        let back: DayPlan = serde_json::from_value(json).unwrap();
        assert_eq!(back, plan);
    }
}
