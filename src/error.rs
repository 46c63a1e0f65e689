use thiserror::Error;

use crate::models::habit::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HabitError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Invalid reminder time '{0}', expected HH:MM")]
    InvalidReminder(String),

    #[error("Unknown frequency '{0}'. Use: daily, weekly")]
    InvalidFrequency(String),

    #[error("Weekday index {0} out of range (0 = Sunday .. 6 = Saturday)")]
    InvalidWeekday(i64),

    #[error("Unknown weekday '{0}'")]
    UnknownWeekday(String),

    #[error("Habit name is required")]
    EmptyName,

    #[error("Habit name is too long ({0} characters, max {max})", max = MAX_NAME_LEN)]
    NameTooLong(usize),

    #[error("Description is too long ({0} characters, max {max})", max = MAX_DESCRIPTION_LEN)]
    DescriptionTooLong(usize),

    #[error("Count goal must be at least 1")]
    InvalidCountGoal,

    #[error("Habit '{0}' does not track counts")]
    CountNotTracked(String),

    #[error("Habit '{0}' not found")]
    HabitNotFound(String),

    #[error("'{0}' matches {1} habits; use the id instead")]
    AmbiguousHabit(String, usize),
}
