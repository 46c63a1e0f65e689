use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Presence of a row is the completion signal; `count` is informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub id: String,
    pub habit_id: String,
    pub completed_date: NaiveDate,
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleOutcome {
    Inserted,
    Removed,
}

impl ToggleOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ToggleOutcome::Inserted)
    }
}
