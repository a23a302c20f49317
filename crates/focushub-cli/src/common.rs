//! Helpers shared by the command modules.

use chrono::NaiveDate;
use focushub_core::date::{local_today, parse_date};
use focushub_core::{CoreError, Database, Repository, ValidationError};
use serde::Serialize;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Repository over `<data_dir>/focushub.db`.
pub fn open_repo() -> Result<Repository<Database>, CoreError> {
    Ok(Repository::new(Database::open()?))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `--date` argument, defaulting to today.
pub fn date_or_today(date: Option<&str>) -> Result<NaiveDate, ValidationError> {
    match date {
        Some(d) => parse_date(d.trim()),
        None => Ok(local_today()),
    }
}
