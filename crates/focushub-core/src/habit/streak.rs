//! Consecutive-day streak calculation.
//!
//! A streak ends either today or yesterday: a habit not yet ticked off today
//! keeps yesterday's streak alive until the day is over.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::date::parse_date;
use crate::error::ValidationError;

/// Count consecutive completed days ending today, or yesterday if today is
/// not completed yet.
///
/// Dates after `today` are never visited by the backward walk and so never
/// contribute.
pub fn compute_streak(completed: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let start = if completed.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if completed.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    let mut cursor = Some(start);
    while let Some(day) = cursor {
        if !completed.contains(&day) {
            break;
        }
        streak += 1;
        cursor = day.pred_opt();
    }
    streak
}

/// [`compute_streak`] over `YYYY-MM-DD` strings.
///
/// Duplicate strings collapse into one day.
///
/// # Errors
/// Returns [`ValidationError::InvalidDate`] for the first malformed string,
/// including `today`.
pub fn compute_streak_from_strs<S: AsRef<str>>(
    dates: &[S],
    today: &str,
) -> Result<u32, ValidationError> {
    let today = parse_date(today)?;
    let completed = dates
        .iter()
        .map(|d| parse_date(d.as_ref()))
        .collect::<Result<BTreeSet<_>, _>>()?;
    Ok(compute_streak(&completed, today))
}

/// Longest run of consecutive days anywhere in the history.
pub fn longest_streak(completed: &BTreeSet<NaiveDate>) -> u32 {
    let mut best = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;
    for &day in completed {
        run = match prev {
            Some(p) if p.succ_opt() == Some(day) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        prev = Some(day);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn set(days: &[&str]) -> BTreeSet<NaiveDate> {
        days.iter().map(|s| d(s)).collect()
    }

    #[test]
    fn empty_history_has_no_streak() {
        assert_eq!(compute_streak(&BTreeSet::new(), d("2024-05-12")), 0);
    }

    #[test]
    fn only_today_is_one() {
        assert_eq!(compute_streak(&set(&["2024-05-12"]), d("2024-05-12")), 1);
    }

    #[test]
    fn falls_back_to_yesterday() {
        let history = set(&["2024-05-10", "2024-05-11", "2024-05-12"]);
        assert_eq!(compute_streak(&history, d("2024-05-12")), 3);
        assert_eq!(compute_streak(&history, d("2024-05-13")), 3);
        assert_eq!(compute_streak(&history, d("2024-05-14")), 0);
    }

    #[test]
    fn gap_breaks_streak() {
        let history = set(&["2024-05-12", "2024-05-11", "2024-05-09"]);
        assert_eq!(compute_streak(&history, d("2024-05-12")), 2);
    }

    #[test]
    fn future_dates_do_not_count() {
        let history = set(&["2024-05-13", "2024-05-14"]);
        assert_eq!(compute_streak(&history, d("2024-05-12")), 0);

        let history = set(&["2024-05-12", "2024-05-13"]);
        assert_eq!(compute_streak(&history, d("2024-05-12")), 1);
    }

    #[test]
    fn crosses_month_and_year_boundaries() {
        let history = set(&["2023-12-30", "2023-12-31", "2024-01-01"]);
        assert_eq!(compute_streak(&history, d("2024-01-01")), 3);

        let leap = set(&["2024-02-28", "2024-02-29", "2024-03-01"]);
        assert_eq!(compute_streak(&leap, d("2024-03-01")), 3);
    }

    #[test]
    fn string_entry_point_rejects_malformed_dates() {
        let err = compute_streak_from_strs(&["2024-05-12", "yesterday"], "2024-05-12").unwrap_err();
        assert_eq!(err, ValidationError::InvalidDate("yesterday".into()));

        let err = compute_streak_from_strs::<&str>(&[], "05/12/2024").unwrap_err();
        assert_eq!(err, ValidationError::InvalidDate("05/12/2024".into()));
    }

    #[test]
    fn string_entry_point_collapses_duplicates() {
        let streak =
            compute_streak_from_strs(&["2024-05-12", "2024-05-12", "2024-05-11"], "2024-05-12")
                .unwrap();
        assert_eq!(streak, 2);
    }

    #[test]
    fn longest_run() {
        let history = set(&[
            "2024-05-01", "2024-05-02", "2024-05-03", "2024-05-04", "2024-05-10", "2024-05-11",
        ]);
        assert_eq!(longest_streak(&history), 4);
        assert_eq!(longest_streak(&BTreeSet::new()), 0);
    }
}
