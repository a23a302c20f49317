//! Day planner commands for CLI.

use chrono::Timelike;
use clap::Subcommand;
use focushub_core::date::parse_time;
use focushub_core::{Config, CoreError};
use serde_json::json;

use crate::common::{open_repo, print_json, CliResult};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Add a task to the backlog
    Add {
        /// Task title
        title: String,
        /// Estimated minutes (default: planner.default_estimate_minutes)
        #[arg(long)]
        minutes: Option<i32>,
    },
    /// Show unscheduled tasks
    Backlog,
    /// Move a backlog task onto the timeline
    Place {
        /// Backlog task ID
        id: String,
        /// Start time (HH:MM)
        at: String,
    },
    /// Show the timeline and free slots
    List,
    /// Toggle completion of a placed task
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task from the timeline or the backlog
    Remove {
        /// Task ID
        id: String,
    },
    /// Move a placed task back to the backlog
    Unschedule {
        /// Task ID
        id: String,
    },
}

pub fn run(action: PlanAction) -> CliResult {
    let config = Config::load_or_default();
    let repo = open_repo()?;
    let mut plan = repo.load_plan()?;

    match action {
        PlanAction::Add { title, minutes } => {
            let minutes = minutes.unwrap_or(config.planner.default_estimate_minutes);
            let task = plan.add_backlog(&title, minutes)?.clone();
            repo.save_plan(&plan)?;
            print_json(&task)?;
        }
        PlanAction::Backlog => {
            print_json(&json!({
                "tasks": plan.backlog(),
                "total_minutes": plan.total_backlog_minutes(),
            }))?;
        }
        PlanAction::Place { id, at } => {
            let at = parse_time(at.trim())?;
            let placed = plan.place(&id, at.hour(), at.minute())?.clone();
            repo.save_plan(&plan)?;
            print_json(&placed)?;
        }
        PlanAction::List => {
            print_json(&json!({
                "timeline": plan.timeline(),
                "free_slots": plan.free_slots(config.planner.min_free_slot_minutes),
                "scheduled_minutes": plan.total_scheduled_minutes(),
                "backlog_minutes": plan.total_backlog_minutes(),
            }))?;
        }
        PlanAction::Toggle { id } => {
            let completed = plan.toggle_completed(&id)?;
            repo.save_plan(&plan)?;
            print_json(&json!({ "id": id, "completed": completed }))?;
        }
        PlanAction::Remove { id } => {
            let title = match plan.remove_scheduled(&id) {
                Ok(task) => task.interval.label,
                Err(CoreError::NotFound { .. }) => plan.remove_backlog(&id)?.title,
                Err(e) => return Err(e.into()),
            };
            repo.save_plan(&plan)?;
            println!("Task removed: {title}");
        }
        PlanAction::Unschedule { id } => {
            let task = plan.unschedule(&id)?.clone();
            repo.save_plan(&plan)?;
            print_json(&task)?;
        }
    }
    Ok(())
}
