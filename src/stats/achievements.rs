use crate::models::achievement::Rule;
use crate::models::{Achievement, Badge, Dashboard, GlobalStats, HabitWithStats, Progress};

/// Counters the badge table is evaluated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AchievementInputs {
    pub habit_count: u32,
    pub global_current_streak: u32,
    pub global_longest_streak: u32,
    pub total_complete_days: u32,
    pub all_completed_today: bool,
}

impl AchievementInputs {
    pub fn from_stats(habits: &[HabitWithStats], global: &GlobalStats) -> Self {
        Self {
            habit_count: habits.len() as u32,
            global_current_streak: global.global_current_streak,
            global_longest_streak: global.global_longest_streak,
            total_complete_days: global.total_complete_days,
            all_completed_today: !habits.is_empty() && habits.iter().all(|h| h.completed_today),
        }
    }
}

pub fn evaluate_achievements(habits: &[HabitWithStats], global: &GlobalStats) -> Vec<Achievement> {
    evaluate(&AchievementInputs::from_stats(habits, global))
}

pub fn evaluate_dashboard(dashboard: &Dashboard) -> Vec<Achievement> {
    evaluate_achievements(&dashboard.habits, &dashboard.global)
}

/// Evaluate every badge from scratch. A streak reset can re-lock a streak badge.
pub fn evaluate(inputs: &AchievementInputs) -> Vec<Achievement> {
    Badge::ALL.iter().map(|badge| evaluate_badge(*badge, inputs)).collect()
}

fn evaluate_badge(badge: Badge, inputs: &AchievementInputs) -> Achievement {
    let progress = |value: u32, target: u32| Some(Progress { value: value.min(target), target });

    let (unlocked, progress) = match badge.rule() {
        Rule::HabitCount { threshold, tracked } => (
            inputs.habit_count >= threshold,
            if tracked { progress(inputs.habit_count, threshold) } else { None },
        ),
        Rule::AnyPerfectDay => (inputs.all_completed_today || inputs.total_complete_days >= 1, None),
        Rule::GlobalStreak { threshold } => (
            inputs.global_longest_streak >= threshold,
            progress(inputs.global_current_streak, threshold),
        ),
        Rule::CompleteDays { threshold } => (
            inputs.total_complete_days >= threshold,
            progress(inputs.total_complete_days, threshold),
        ),
    };

    Achievement { badge, unlocked, progress }
}

pub fn unlocked_count(achievements: &[Achievement]) -> usize {
    achievements.iter().filter(|a| a.unlocked).count()
}
