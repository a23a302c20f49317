//! Week strip and month grid views over a habit history.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One cell of a week strip or month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMark {
    pub date: NaiveDate,
    pub done: bool,
    pub is_today: bool,
    /// Future days cannot be toggled.
    pub is_future: bool,
}

impl DayMark {
    fn new(date: NaiveDate, completed: &BTreeSet<NaiveDate>, today: NaiveDate) -> Self {
        Self {
            date,
            done: completed.contains(&date),
            is_today: date == today,
            is_future: date > today,
        }
    }
}

/// The last seven days ending with `today`, oldest first.
pub fn week_view(completed: &BTreeSet<NaiveDate>, today: NaiveDate) -> Vec<DayMark> {
    (0..7u64)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|date| DayMark::new(date, completed, today))
        .collect()
}

/// Days of `year`-`month` laid out Monday-first.
///
/// Leading `None` cells pad the first row up to the weekday of the 1st.
///
/// # Errors
/// Returns [`ValidationError::InvalidValue`] if `month` is not in `1..=12`.
pub fn month_grid(year: i32, month: u32) -> Result<Vec<Option<NaiveDate>>, ValidationError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| ValidationError::InvalidValue {
        field: "month".into(),
        message: format!("{year}-{month} is not a calendar month"),
    })?;

    let padding = first.weekday().num_days_from_monday() as usize;
    let mut cells: Vec<Option<NaiveDate>> = vec![None; padding];
    cells.extend(
        first
            .iter_days()
            .take_while(|d| d.month() == month)
            .map(Some),
    );
    Ok(cells)
}

/// [`month_grid`] with each day marked against a history.
pub fn month_view(
    completed: &BTreeSet<NaiveDate>,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<Vec<Option<DayMark>>, ValidationError> {
    Ok(month_grid(year, month)?
        .into_iter()
        .map(|cell| cell.map(|date| DayMark::new(date, completed, today)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::parse_date;

    #[test]
    fn week_view_is_oldest_first() {
        let today = parse_date("2024-05-12").unwrap();
        let completed: BTreeSet<_> = [parse_date("2024-05-06").unwrap(), today].into();
        let week = week_view(&completed, today);

        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, parse_date("2024-05-06").unwrap());
        assert!(week[0].done);
        assert!(week[6].is_today && week[6].done);
        assert_eq!(week.iter().filter(|m| m.done).count(), 2);
    }

    #[test]
    fn month_grid_pads_to_monday() {
        // 2024-05-01 is a Wednesday.
        let grid = month_grid(2024, 5).unwrap();
        assert_eq!(grid.iter().take_while(|c| c.is_none()).count(), 2);
        assert_eq!(grid.iter().flatten().count(), 31);

        // 2024-04-01 is a Monday.
        let grid = month_grid(2024, 4).unwrap();
        assert_eq!(grid[0], Some(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
        assert_eq!(grid.len(), 30);

        // 2024-09-01 is a Sunday.
        let grid = month_grid(2024, 9).unwrap();
        assert_eq!(grid.iter().take_while(|c| c.is_none()).count(), 6);
    }

    #[test]
    fn month_grid_rejects_bad_month() {
        assert!(month_grid(2024, 13).is_err());
        assert!(month_grid(2024, 0).is_err());
    }

    #[test]
    fn month_view_flags_future_days() {
        let today = parse_date("2024-05-12").unwrap();
        let view = month_view(&BTreeSet::new(), 2024, 5, today).unwrap();
        let future = view.iter().flatten().filter(|m| m.is_future).count();
        assert_eq!(future, 31 - 12);
    }
}
