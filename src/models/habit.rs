use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::HabitError;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            _ => Err(HabitError::InvalidFrequency(s.to_string())),
        }
    }
}

const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const WEEKDAY_FULL_NAMES: [&str; 7] = [
    "sunday", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday",
];

/// Weekday index as stored on a habit: 0 = Sunday .. 6 = Saturday.
pub fn weekday_name(index: u8) -> &'static str {
    WEEKDAY_NAMES.get(index as usize).copied().unwrap_or("?")
}

/// Accepts an index ("0".."6") or a day name ("sun", "Monday", ...).
pub fn parse_weekday(s: &str) -> Result<u8, HabitError> {
    let s = s.trim();
    if let Ok(n) = s.parse::<i64>() {
        return if (0..=6).contains(&n) {
            Ok(n as u8)
        } else {
            Err(HabitError::InvalidWeekday(n))
        };
    }
    let lower = s.to_lowercase();
    WEEKDAY_NAMES
        .iter()
        .zip(WEEKDAY_FULL_NAMES)
        .position(|(short, full)| lower == short.to_lowercase() || lower == full)
        .map(|i| i as u8)
        .ok_or_else(|| HabitError::UnknownWeekday(s.to_string()))
}

pub fn parse_reminder(s: &str) -> Result<NaiveTime, HabitError> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| HabitError::InvalidReminder(s.to_string()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub frequency: Frequency,
    pub weekly_days: Option<Vec<u8>>,
    pub start_date: NaiveDate,
    pub reminder_time: Option<NaiveTime>,
    pub track_count: bool,
    pub count_goal: Option<u32>,
    pub created_at: String,
}

/// Fields supplied when creating a habit.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHabit {
    pub name: String,
    pub description: Option<String>,
    pub frequency: Frequency,
    pub weekly_days: Option<Vec<u8>>,
    pub start_date: NaiveDate,
    pub reminder_time: Option<NaiveTime>,
    pub track_count: bool,
    pub count_goal: Option<u32>,
}

impl NewHabit {
    pub fn daily(name: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            description: None,
            frequency: Frequency::Daily,
            weekly_days: None,
            start_date,
            reminder_time: None,
            track_count: false,
            count_goal: None,
        }
    }

    /// Check limits and normalise dependent fields.
    pub fn validated(mut self) -> Result<Self, HabitError> {
        self.name = self.name.trim().to_string();
        let name_len = self.name.chars().count();
        if name_len == 0 {
            return Err(HabitError::EmptyName);
        }
        if name_len > MAX_NAME_LEN {
            return Err(HabitError::NameTooLong(name_len));
        }

        self.description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        if let Some(desc) = &self.description {
            let len = desc.chars().count();
            if len > MAX_DESCRIPTION_LEN {
                return Err(HabitError::DescriptionTooLong(len));
            }
        }

        self.weekly_days = match self.frequency {
            Frequency::Daily => None,
            Frequency::Weekly => {
                let mut days = self.weekly_days.unwrap_or_default();
                if let Some(bad) = days.iter().find(|d| **d > 6) {
                    return Err(HabitError::InvalidWeekday(*bad as i64));
                }
                days.sort_unstable();
                days.dedup();
                Some(days)
            }
        };

        if self.track_count {
            if self.count_goal == Some(0) {
                return Err(HabitError::InvalidCountGoal);
            }
        } else {
            self.count_goal = None;
        }

        Ok(self)
    }
}

/// Partial update. `None` leaves the field as it is; the nested `Option`
/// clears an optional field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub frequency: Option<Frequency>,
    pub weekly_days: Option<Vec<u8>>,
    pub start_date: Option<NaiveDate>,
    pub reminder_time: Option<Option<NaiveTime>>,
    pub track_count: Option<bool>,
    pub count_goal: Option<Option<u32>>,
}

impl HabitPatch {
    pub fn is_empty(&self) -> bool {
        *self == HabitPatch::default()
    }

    /// Merge onto an existing habit and re-validate the result.
    pub fn apply(self, habit: &Habit) -> Result<Habit, HabitError> {
        let merged = NewHabit {
            name: self.name.unwrap_or_else(|| habit.name.clone()),
            description: self.description.unwrap_or_else(|| habit.description.clone()),
            frequency: self.frequency.unwrap_or(habit.frequency),
            weekly_days: self.weekly_days.or_else(|| habit.weekly_days.clone()),
            start_date: self.start_date.unwrap_or(habit.start_date),
            reminder_time: self.reminder_time.unwrap_or(habit.reminder_time),
            track_count: self.track_count.unwrap_or(habit.track_count),
            count_goal: self.count_goal.unwrap_or(habit.count_goal),
        }
        .validated()?;

        Ok(Habit {
            id: habit.id.clone(),
            name: merged.name,
            description: merged.description,
            frequency: merged.frequency,
            weekly_days: merged.weekly_days,
            start_date: merged.start_date,
            reminder_time: merged.reminder_time,
            track_count: merged.track_count,
            count_goal: merged.count_goal,
            created_at: habit.created_at.clone(),
        })
    }
}

impl Habit {
    pub fn schedule_label(&self) -> String {
        match (&self.frequency, &self.weekly_days) {
            (Frequency::Weekly, Some(days)) if !days.is_empty() => {
                let names: Vec<&str> = days.iter().map(|d| weekday_name(*d)).collect();
                format!("weekly ({})", names.join(", "))
            }
            (freq, _) => freq.as_str().to_string(),
        }
    }
}
