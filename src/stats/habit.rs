use chrono::NaiveDate;
use std::collections::BTreeSet;

use super::series::round_percent;
use super::streak::compute_streak;
use crate::models::{Completion, Habit, HabitWithStats, Streak};
use crate::utils::dates::days_between;

pub fn completion_dates(completions: &[Completion]) -> BTreeSet<NaiveDate> {
    completions.iter().map(|c| c.completed_date).collect()
}

pub fn habit_streak(completions: &[Completion], today: NaiveDate) -> Streak {
    compute_streak(&completion_dates(completions), today)
}

/// Completed rows over calendar days elapsed since `start_date`, both ends inclusive.
///
/// The denominator counts every calendar day, weekly habits included. Rounds
/// half up and caps at 100 (a start date in the future, or rows dated before
/// the start, would otherwise push it past).
pub fn completion_rate(habit: &Habit, completions: &[Completion], today: NaiveDate) -> u8 {
    let total_days = (days_between(today, habit.start_date) + 1).max(1) as u64;
    round_percent(completions.len() as u64, total_days).min(100)
}

/// Mean of the per-habit completion rates, rounded half up; 0 with no habits.
pub fn average_completion_rate(habits: &[HabitWithStats]) -> u8 {
    if habits.is_empty() {
        return 0;
    }
    let sum: u64 = habits.iter().map(|h| h.completion_rate as u64).sum();
    let n = habits.len() as u64;
    ((2 * sum + n) / (2 * n)) as u8
}
