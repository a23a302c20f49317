//! Habit tracking commands for CLI.

use chrono::Datelike;
use clap::Subcommand;
use focushub_core::date::{local_today, parse_date};
use focushub_core::habit::{longest_streak, month_view};
use focushub_core::CoreError;
use serde_json::json;

use crate::common::{date_or_today, open_repo, print_json, CliResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Start tracking a habit
    Add {
        /// Habit name
        name: String,
    },
    /// List habits with streaks and the last seven days
    List,
    /// Mark or unmark a day as done
    Toggle {
        /// Habit ID
        id: String,
        /// Day to toggle (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Stop tracking a habit
    Remove {
        /// Habit ID
        id: String,
    },
    /// Current and longest streak
    Streak {
        /// Habit ID
        id: String,
    },
    /// Monday-first month calendar
    Calendar {
        /// Habit ID
        id: String,
        /// Month to show (YYYY-MM, default: current month)
        #[arg(long)]
        month: Option<String>,
    },
}

pub fn run(action: HabitAction) -> CliResult {
    let repo = open_repo()?;
    let mut book = repo.load_habits()?;
    let today = local_today();

    match action {
        HabitAction::Add { name } => {
            let summary = book.add(&name)?.summary(today);
            repo.save_habits(&book)?;
            print_json(&summary)?;
        }
        HabitAction::List => {
            print_json(&book.summaries(today))?;
        }
        HabitAction::Toggle { id, date } => {
            let date = date_or_today(date.as_deref())?;
            let done = book.toggle(&id, date, today)?;
            repo.save_habits(&book)?;
            let streak = book.get(&id).map(|h| h.streak(today)).unwrap_or_default();
            print_json(&json!({ "id": id, "date": date, "done": done, "streak": streak }))?;
        }
        HabitAction::Remove { id } => {
            let habit = book.remove(&id)?;
            repo.save_habits(&book)?;
            println!("Habit removed: {}", habit.name);
        }
        HabitAction::Streak { id } => {
            let habit = book.get(&id).ok_or_else(|| CoreError::not_found("habit", &id))?;
            print_json(&json!({
                "id": habit.id,
                "name": habit.name,
                "streak": habit.streak(today),
                "longest_streak": longest_streak(&habit.completed_dates),
            }))?;
        }
        HabitAction::Calendar { id, month } => {
            let habit = book.get(&id).ok_or_else(|| CoreError::not_found("habit", &id))?;
            let first = match month {
                Some(m) => parse_date(&format!("{}-01", m.trim()))?,
                None => today.with_day(1).unwrap_or(today),
            };
            let cells = month_view(&habit.completed_dates, first.year(), first.month(), today)?;
            print_json(&cells)?;
        }
    }
    Ok(())
}
