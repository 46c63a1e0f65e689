//! Streak and statistics engine. Everything here is pure: callers pass in a
//! full snapshot of habits and completions plus the local `today`.

pub mod achievements;
pub mod calendar;
pub mod decorate;
pub mod global;
pub mod goals;
pub mod habit;
pub mod series;
pub mod streak;

pub use achievements::{evaluate_achievements, AchievementInputs};
pub use decorate::decorate_habits;
pub use global::{complete_days, global_stats};
pub use habit::{average_completion_rate, completion_rate, habit_streak};
pub use streak::{compute_streak, longest_run};
