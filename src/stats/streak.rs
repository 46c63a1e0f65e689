use chrono::{Duration, NaiveDate};
use std::collections::BTreeSet;

use crate::models::Streak;
use crate::utils::dates::{days_between, yesterday};

/// Current and longest run of consecutive days in `dates`, anchored at `today`.
///
/// The current streak stays alive through `today` while yesterday is marked,
/// so an unmarked today does not break it until the day is over. A gap
/// starting two days back zeroes the current streak; the longest is still
/// reported from history.
pub fn compute_streak(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> Streak {
    if dates.is_empty() {
        return Streak::default();
    }

    let yesterday = yesterday(today);
    let mut cursor = if dates.contains(&today) {
        yesterday
    } else if dates.contains(&yesterday) {
        yesterday - Duration::days(1)
    } else {
        return Streak {
            current: 0,
            longest: longest_run(dates),
        };
    };

    let mut current = 1u32;
    while dates.contains(&cursor) {
        current += 1;
        cursor = cursor - Duration::days(1);
    }

    Streak {
        current,
        longest: current.max(longest_run(dates)),
    }
}

/// Longest run of consecutive days anywhere in `dates`; 0 for an empty set.
pub fn longest_run(dates: &BTreeSet<NaiveDate>) -> u32 {
    let mut iter = dates.iter();
    let Some(mut prev) = iter.next() else {
        return 0;
    };

    let mut best = 1u32;
    let mut run = 1u32;
    for date in iter {
        if days_between(*date, *prev) == 1 {
            run += 1;
            best = best.max(run);
        } else {
            run = 1;
        }
        prev = date;
    }
    best
}
