//! Habit tracking with streaks, perfect days and achievements.
//!
//! The [`stats`] module is a pure engine over in-memory snapshots; [`db`]
//! is the SQLite store that feeds it.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod stats;
pub mod utils;

pub use error::HabitError;
pub use models::{Completion, Dashboard, GlobalStats, Habit, HabitWithStats};
pub use stats::{compute_streak, decorate_habits, evaluate_achievements};
