use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::HabitWithStats;
use crate::utils::dates::{each_day, month_end, month_start, week_start};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartRange {
    #[default]
    #[serde(rename = "7days")]
    Last7Days,
    #[serde(rename = "30days")]
    Last30Days,
    #[serde(rename = "thisWeek")]
    ThisWeek,
    #[serde(rename = "thisMonth")]
    ThisMonth,
}

impl ChartRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartRange::Last7Days => "7days",
            ChartRange::Last30Days => "30days",
            ChartRange::ThisWeek => "thisWeek",
            ChartRange::ThisMonth => "thisMonth",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartRange::Last7Days => "Last 7 days",
            ChartRange::Last30Days => "Last 30 days",
            ChartRange::ThisWeek => "This week",
            ChartRange::ThisMonth => "This month",
        }
    }

    /// Inclusive bounds; weeks run Monday to Sunday.
    pub fn bounds(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            ChartRange::Last7Days => (today - Duration::days(6), today),
            ChartRange::Last30Days => (today - Duration::days(29), today),
            ChartRange::ThisWeek => {
                let start = week_start(today);
                (start, start + Duration::days(6))
            }
            ChartRange::ThisMonth => (month_start(today), month_end(today)),
        }
    }
}

impl FromStr for ChartRange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "7days" | "7d" | "week7" => Ok(ChartRange::Last7Days),
            "30days" | "30d" => Ok(ChartRange::Last30Days),
            "thisweek" | "week" => Ok(ChartRange::ThisWeek),
            "thismonth" | "month" => Ok(ChartRange::ThisMonth),
            _ => Err(anyhow::anyhow!(
                "Unknown range '{}'. Use: 7days, 30days, thisWeek, thisMonth",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayPoint {
    pub date: NaiveDate,
    pub completed: u32,
    pub total: u32,
    pub percentage: u8,
}

/// How many habits were done on each day of the range.
pub fn completion_series(habits: &[HabitWithStats], range: ChartRange, today: NaiveDate) -> Vec<DayPoint> {
    let (start, end) = range.bounds(today);
    let total = habits.len() as u32;

    each_day(start, end)
        .into_iter()
        .map(|date| {
            let completed = habits
                .iter()
                .filter(|h| h.completion_on(date).is_some())
                .count() as u32;
            DayPoint {
                date,
                completed,
                total,
                percentage: round_percent(completed as u64, total as u64),
            }
        })
        .collect()
}

pub fn average_percentage(points: &[DayPoint]) -> u8 {
    let sum: u64 = points.iter().map(|p| p.percentage as u64).sum();
    round_percent(sum, points.len() as u64 * 100)
}

/// `round(100 * part / whole)` with halves rounded up; 0 when `whole` is 0.
pub(crate) fn round_percent(part: u64, whole: u64) -> u8 {
    if whole == 0 {
        return 0;
    }
    ((200 * part + whole) / (2 * whole)).min(u8::MAX as u64) as u8
}
