//! Property tests for the streak calculator and the conflict checker.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use focushub_core::{compute_streak, has_conflict, ScheduledInterval};
use proptest::prelude::*;

fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Days::new(offset)
}

fn run_ending(today: NaiveDate, len: u64) -> BTreeSet<NaiveDate> {
    (0..len).map(|back| today - Days::new(back)).collect()
}

fn interval(id: &str, start: i32, duration: i32) -> ScheduledInterval {
    ScheduledInterval::new(id, start, duration, id)
}

proptest! {
    #[test]
    fn consecutive_run_ending_today_counts_every_day(offset in 400u64..3000, len in 1u64..365) {
        let today = day(offset);
        prop_assert_eq!(compute_streak(&run_ending(today, len), today), len as u32);
    }

    #[test]
    fn run_ending_yesterday_still_counts(offset in 400u64..3000, len in 1u64..365) {
        let today = day(offset);
        let yesterday = today - Days::new(1);
        prop_assert_eq!(compute_streak(&run_ending(yesterday, len), today), len as u32);
    }

    #[test]
    fn a_missing_day_ends_the_streak(offset in 400u64..3000, len in 2u64..365, gap in 1u64..365) {
        prop_assume!(gap < len);
        let today = day(offset);
        let mut dates = run_ending(today, len);
        dates.remove(&(today - Days::new(gap)));
        prop_assert_eq!(compute_streak(&dates, today), gap as u32);
    }

    #[test]
    fn nothing_recent_means_zero(offset in 400u64..3000, len in 1u64..100, age in 2u64..300) {
        let today = day(offset);
        let dates = run_ending(today - Days::new(age), len);
        prop_assert_eq!(compute_streak(&dates, today), 0);
    }

    #[test]
    fn conflict_is_symmetric(
        a_start in 0i32..1440, a_len in 1i32..600,
        b_start in 0i32..1440, b_len in 1i32..600,
    ) {
        let a = interval("a", a_start, a_len);
        let b = interval("b", b_start, b_len);
        prop_assert_eq!(
            has_conflict(&a, std::slice::from_ref(&b)).unwrap(),
            has_conflict(&b, std::slice::from_ref(&a)).unwrap()
        );
    }

    #[test]
    fn conflict_ignores_order_of_existing(
        starts in proptest::collection::vec((0i32..1440, 1i32..240), 0..8),
        c_start in 0i32..1440, c_len in 1i32..240,
    ) {
        let existing: Vec<_> = starts
            .iter()
            .enumerate()
            .map(|(i, (s, d))| interval(&format!("e{i}"), *s, *d))
            .collect();
        let mut reversed = existing.clone();
        reversed.reverse();
        let candidate = interval("c", c_start, c_len);
        prop_assert_eq!(
            has_conflict(&candidate, &existing).unwrap(),
            has_conflict(&candidate, &reversed).unwrap()
        );
    }

    #[test]
    fn adjacent_intervals_never_conflict(start in 0i32..1000, len in 1i32..200, next_len in 1i32..200) {
        let first = interval("first", start, len);
        let second = interval("second", start + len, next_len);
        prop_assume!(second.start() < 1440);
        prop_assert!(!has_conflict(&second, std::slice::from_ref(&first)).unwrap());
        prop_assert!(!has_conflict(&first, std::slice::from_ref(&second)).unwrap());
    }

    #[test]
    fn nested_intervals_always_conflict(start in 0i32..1200, len in 3i32..200, inset in 1i32..100) {
        prop_assume!(inset * 2 < len);
        let outer = interval("outer", start, len);
        let inner = interval("inner", start + inset, len - inset * 2);
        prop_assert!(has_conflict(&inner, std::slice::from_ref(&outer)).unwrap());
        prop_assert!(has_conflict(&outer, std::slice::from_ref(&inner)).unwrap());
    }
}

#[test]
fn invalid_existing_interval_is_reported_before_overlap() {
    let candidate = interval("c", 600, 30);
    let broken = interval("broken", 100, 0);
    let err = has_conflict(&candidate, &[broken]).unwrap_err();
    assert!(err.to_string().contains("broken"));
}
