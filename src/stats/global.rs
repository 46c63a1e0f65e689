use chrono::NaiveDate;
use log::debug;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::streak::compute_streak;
use crate::models::{Completion, GlobalStats, Habit};

/// Dates on which every habit that had started by then has a completion.
///
/// Only dates carrying at least one completion are candidates. Habits whose
/// `start_date` is after a date are not required on that date.
pub fn complete_days(habits: &[Habit], completions: &[Completion]) -> BTreeSet<NaiveDate> {
    let mut done_by_date: BTreeMap<NaiveDate, HashSet<&str>> = BTreeMap::new();
    for c in completions {
        done_by_date
            .entry(c.completed_date)
            .or_default()
            .insert(c.habit_id.as_str());
    }

    done_by_date
        .into_iter()
        .filter(|(date, done)| {
            let mut existing = habits.iter().filter(|h| h.start_date <= *date).peekable();
            existing.peek().is_some() && existing.all(|h| done.contains(h.id.as_str()))
        })
        .map(|(date, _)| date)
        .collect()
}

pub fn global_stats(habits: &[Habit], completions: &[Completion], today: NaiveDate) -> GlobalStats {
    if habits.is_empty() {
        return GlobalStats::default();
    }

    let days = complete_days(habits, completions);
    let streak = compute_streak(&days, today);
    debug!(
        "global stats over {} habits / {} completions: {} complete days",
        habits.len(),
        completions.len(),
        days.len()
    );

    GlobalStats {
        global_current_streak: streak.current,
        global_longest_streak: streak.longest,
        total_complete_days: days.len() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;
    use crate::utils::dates::{each_day, parse_iso_date};

    fn d(s: &str) -> NaiveDate {
        parse_iso_date(s).unwrap()
    }

    fn habit(id: &str, start: &str) -> Habit {
        Habit {
            id: id.into(),
            name: id.to_uppercase(),
            description: None,
            frequency: Frequency::Daily,
            weekly_days: None,
            start_date: d(start),
            reminder_time: None,
            track_count: false,
            count_goal: None,
            created_at: "2024-01-01 00:00:00".into(),
        }
    }

    fn done(habit_id: &str, date: NaiveDate) -> Completion {
        Completion {
            id: format!("{}-{}", habit_id, date),
            habit_id: habit_id.into(),
            completed_date: date,
            count: None,
        }
    }

    fn every_day(habit_id: &str, from: &str, to: &str) -> Vec<Completion> {
        each_day(d(from), d(to)).into_iter().map(|day| done(habit_id, day)).collect()
    }

    #[test]
    fn no_habits_means_zero_stats() {
        let rows = vec![done("x", d("2024-01-01"))];
        assert_eq!(global_stats(&[], &rows, d("2024-01-01")), GlobalStats::default());
    }

    #[test]
    fn later_habits_are_not_required_before_they_start() {
        let habits = vec![habit("x", "2024-01-01"), habit("y", "2024-01-03")];
        let mut rows = every_day("x", "2024-01-01", "2024-01-05");
        rows.extend(every_day("y", "2024-01-03", "2024-01-05"));

        let days = complete_days(&habits, &rows);
        assert_eq!(days, each_day(d("2024-01-01"), d("2024-01-05")).into_iter().collect());

        let stats = global_stats(&habits, &rows, d("2024-01-05"));
        assert_eq!(stats.total_complete_days, 5);
        assert_eq!(stats.global_current_streak, 5);
    }

    #[test]
    fn habit_missing_a_day_breaks_the_perfect_day() {
        let habits = vec![habit("x", "2024-01-01"), habit("y", "2024-01-01")];
        let mut rows = every_day("x", "2024-01-01", "2024-01-05");
        rows.extend(every_day("y", "2024-01-03", "2024-01-05"));

        let days = complete_days(&habits, &rows);
        assert_eq!(days, each_day(d("2024-01-03"), d("2024-01-05")).into_iter().collect());

        let stats = global_stats(&habits, &rows, d("2024-01-05"));
        assert_eq!(
            stats,
            GlobalStats {
                global_current_streak: 3,
                global_longest_streak: 3,
                total_complete_days: 3,
            }
        );
    }

    #[test]
    fn dates_before_any_habit_started_never_count() {
        let habits = vec![habit("x", "2024-01-05")];
        let rows = vec![done("x", d("2024-01-02")), done("x", d("2024-01-05"))];
        let days = complete_days(&habits, &rows);
        assert_eq!(days.into_iter().collect::<Vec<_>>(), vec![d("2024-01-05")]);
    }

    #[test]
    fn global_streak_uses_yesterday_rule() {
        let habits = vec![habit("x", "2024-01-01")];
        let rows = every_day("x", "2024-01-01", "2024-01-07");

        let alive = global_stats(&habits, &rows, d("2024-01-08"));
        assert_eq!(alive.global_current_streak, 7);

        let broken = global_stats(&habits, &rows, d("2024-01-09"));
        assert_eq!(broken.global_current_streak, 0);
        assert_eq!(broken.global_longest_streak, 7);
        assert_eq!(broken.total_complete_days, 7);
    }
}
