use chrono::NaiveDate;
use log::debug;
use std::collections::HashMap;

use super::global::global_stats;
use super::habit::{completion_rate, habit_streak};
use crate::models::{Completion, Dashboard, Habit, HabitWithStats};

/// Attach per-habit stats to every habit and compute the global stats once.
///
/// Each habit only sees its own completions; the global aggregator is the
/// only cross-habit read. Output order follows `habits`.
pub fn decorate_habits(habits: &[Habit], completions: &[Completion], today: NaiveDate) -> Dashboard {
    let mut by_habit: HashMap<&str, Vec<Completion>> = HashMap::new();
    for c in completions {
        by_habit.entry(c.habit_id.as_str()).or_default().push(c.clone());
    }

    let decorated = habits
        .iter()
        .map(|habit| {
            let own = by_habit.remove(habit.id.as_str()).unwrap_or_default();
            decorate_one(habit, own, today)
        })
        .collect::<Vec<_>>();

    debug!("decorated {} habits for {}", decorated.len(), today);

    Dashboard {
        habits: decorated,
        global: global_stats(habits, completions, today),
    }
}

fn decorate_one(habit: &Habit, completions: Vec<Completion>, today: NaiveDate) -> HabitWithStats {
    let completed_today = completions.iter().any(|c| c.completed_date == today);
    let streak = habit_streak(&completions, today);
    let completion_rate = completion_rate(habit, &completions, today);

    HabitWithStats {
        habit: habit.clone(),
        current_streak: streak.current,
        longest_streak: streak.longest,
        completed_today,
        completions,
        completion_rate,
    }
}
