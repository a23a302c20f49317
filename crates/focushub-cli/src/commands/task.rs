//! To-do list commands for CLI.

use clap::{Subcommand, ValueEnum};
use focushub_core::{Priority, TodoView};

use crate::common::{open_repo, print_json, CliResult};

#[derive(Clone, Copy, ValueEnum)]
pub enum ViewArg {
    /// By priority
    List,
    /// By time of day
    Agenda,
}

impl From<ViewArg> for TodoView {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::List => TodoView::List,
            ViewArg::Agenda => TodoView::Agenda,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        /// Task text
        text: String,
        /// Priority: high, medium or low
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Time of day (HH:MM)
        #[arg(long)]
        time: Option<String>,
    },
    /// List tasks, open ones first
    List {
        #[arg(long, value_enum, default_value_t = ViewArg::List)]
        view: ViewArg,
    },
    /// Toggle a task done
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Remove {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> CliResult {
    let repo = open_repo()?;
    let mut list = repo.load_tasks()?;

    match action {
        TaskAction::Add { text, priority, time } => {
            let item = list.add(&text, priority, time.as_deref())?.clone();
            repo.save_tasks(&list)?;
            print_json(&item)?;
        }
        TaskAction::List { view } => {
            print_json(&list.sorted(view.into()))?;
        }
        TaskAction::Toggle { id } => {
            let done = list.toggle(&id)?;
            repo.save_tasks(&list)?;
            print_json(&serde_json::json!({
                "id": id,
                "done": done,
                "open": list.open_count(),
            }))?;
        }
        TaskAction::Remove { id } => {
            let item = list.remove(&id)?;
            repo.save_tasks(&list)?;
            println!("Task removed: {}", item.text);
        }
    }
    Ok(())
}
