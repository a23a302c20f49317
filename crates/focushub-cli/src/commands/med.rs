//! Medication inventory commands for CLI.

use chrono::Utc;
use clap::Subcommand;
use focushub_core::medication::NewMedication;
use focushub_core::{Config, Medication};
use serde_json::{json, Value};

use crate::common::{open_repo, print_json, CliResult};

#[derive(Subcommand)]
pub enum MedAction {
    /// Add a medication
    Add {
        /// Medication name
        name: String,
        /// Pills in a full pack
        #[arg(long)]
        pills: u32,
        /// Pills taken per day (fractions allowed)
        #[arg(long, default_value = "1")]
        dosage: f64,
        /// Warn when fewer days than this remain (default: medication.default_warning_days)
        #[arg(long)]
        warning_days: Option<u32>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List medications with stock status
    List,
    /// Record one day's dose
    Take {
        /// Medication ID
        id: String,
    },
    /// Restock with a new pack
    Refill {
        /// Medication ID
        id: String,
        /// Pills in the new pack
        pills: u32,
    },
    /// Delete a medication
    Remove {
        /// Medication ID
        id: String,
    },
}

fn stock_view(med: &Medication) -> Value {
    json!({
        "id": med.id,
        "name": med.name,
        "remaining_pills": med.remaining_pills,
        "total_pills": med.total_pills,
        "dosage_per_day": med.dosage_per_day,
        "days_remaining": med.days_remaining(),
        "fill_ratio": med.fill_ratio(),
        "status": med.status(),
        "notes": med.notes,
    })
}

pub fn run(action: MedAction) -> CliResult {
    let repo = open_repo()?;
    let mut cabinet = repo.load_cabinet()?;
    let now = Utc::now();

    match action {
        MedAction::Add {
            name,
            pills,
            dosage,
            warning_days,
            notes,
        } => {
            let warning_days = match warning_days {
                Some(days) => days,
                None => Config::load_or_default().medication.default_warning_days,
            };
            let new = NewMedication {
                name: &name,
                total_pills: pills,
                dosage_per_day: dosage,
                low_stock_warning_days: warning_days,
                notes: notes.as_deref(),
            };
            let view = stock_view(cabinet.add(new, now)?);
            repo.save_cabinet(&cabinet)?;
            print_json(&view)?;
        }
        MedAction::List => {
            let meds: Vec<_> = cabinet.iter().map(stock_view).collect();
            print_json(&json!({ "medications": meds, "summary": cabinet.summary() }))?;
        }
        MedAction::Take { id } => {
            let view = stock_view(cabinet.take_dose(&id, now)?);
            repo.save_cabinet(&cabinet)?;
            print_json(&view)?;
        }
        MedAction::Refill { id, pills } => {
            let view = stock_view(cabinet.refill(&id, pills, now)?);
            repo.save_cabinet(&cabinet)?;
            print_json(&view)?;
        }
        MedAction::Remove { id } => {
            let med = cabinet.remove(&id)?;
            repo.save_cabinet(&cabinet)?;
            println!("Medication removed: {}", med.name);
        }
    }
    Ok(())
}
