use serde::{Deserialize, Serialize};

use super::{Completion, Habit};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub longest: u32,
}

/// A habit plus everything derived from its completions. Recomputed on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitWithStats {
    #[serde(flatten)]
    pub habit: Habit,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub completed_today: bool,
    pub completions: Vec<Completion>,
    /// Whole percent, 0..=100.
    pub completion_rate: u8,
}

impl HabitWithStats {
    pub fn completion_on(&self, date: chrono::NaiveDate) -> Option<&Completion> {
        self.completions.iter().find(|c| c.completed_date == date)
    }
}

/// Cross-habit "perfect day" statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub global_current_streak: u32,
    pub global_longest_streak: u32,
    pub total_complete_days: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub habits: Vec<HabitWithStats>,
    pub global: GlobalStats,
}

impl Dashboard {
    pub fn completed_today(&self) -> usize {
        self.habits.iter().filter(|h| h.completed_today).count()
    }

    pub fn all_completed_today(&self) -> bool {
        !self.habits.is_empty() && self.habits.iter().all(|h| h.completed_today)
    }

    /// Habits ordered by reminder time, habits without a reminder last.
    pub fn by_reminder(&self) -> Vec<&HabitWithStats> {
        let mut sorted: Vec<&HabitWithStats> = self.habits.iter().collect();
        sorted.sort_by(|a, b| match (a.habit.reminder_time, b.habit.reminder_time) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        sorted
    }
}
