use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::series::round_percent;
use crate::models::HabitWithStats;
use crate::utils::dates::week_start;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoalProgress {
    pub count: u64,
    pub goal: u64,
    pub percentage: u8,
}

fn tracked_goal(habit: &HabitWithStats) -> Option<u32> {
    if !habit.habit.track_count {
        return None;
    }
    habit.habit.count_goal.filter(|g| *g > 0)
}

fn count_on(habit: &HabitWithStats, date: NaiveDate) -> u64 {
    habit.completion_on(date).and_then(|c| c.count).unwrap_or(0) as u64
}

/// Today's logged count against the daily goal.
pub fn today_progress(habit: &HabitWithStats, today: NaiveDate) -> Option<GoalProgress> {
    let goal = tracked_goal(habit)? as u64;
    let count = count_on(habit, today);
    Some(GoalProgress {
        count,
        goal,
        percentage: round_percent(count, goal).min(100),
    })
}

/// Counts logged Monday..Sunday of the current week against seven daily goals.
pub fn weekly_progress(habit: &HabitWithStats, today: NaiveDate) -> Option<GoalProgress> {
    let goal = tracked_goal(habit)? as u64;
    let start = week_start(today);
    let count: u64 = (0..7)
        .map(|offset| count_on(habit, start + Duration::days(offset)))
        .sum();
    let weekly_goal = goal * 7;
    Some(GoalProgress {
        count,
        goal: weekly_goal,
        percentage: round_percent(count, weekly_goal).min(100),
    })
}
