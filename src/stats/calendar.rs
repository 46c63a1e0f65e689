use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::HabitWithStats;
use crate::utils::dates::{each_day, month_end, month_start};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayState {
    Completed,
    Missed,
    /// Today, not yet done.
    Open,
    /// Before the habit started, or still in the future.
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCalendar {
    pub month: NaiveDate,
    /// Blank cells before the 1st when weeks start on Sunday.
    pub leading_blanks: u32,
    pub days: Vec<(NaiveDate, DayState)>,
}

impl MonthCalendar {
    /// Rows of seven cells, Sunday first; `None` pads the first and last week.
    pub fn weeks(&self) -> Vec<Vec<Option<(NaiveDate, DayState)>>> {
        let mut cells: Vec<Option<(NaiveDate, DayState)>> =
            vec![None; self.leading_blanks as usize];
        cells.extend(self.days.iter().copied().map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells.chunks(7).map(|w| w.to_vec()).collect()
    }

    pub fn count(&self, state: DayState) -> usize {
        self.days.iter().filter(|(_, s)| *s == state).count()
    }
}

pub fn day_state(habit: &HabitWithStats, date: NaiveDate, today: NaiveDate) -> DayState {
    if habit.completion_on(date).is_some() {
        DayState::Completed
    } else if date < habit.habit.start_date || date > today {
        DayState::Inactive
    } else if date == today {
        DayState::Open
    } else {
        DayState::Missed
    }
}

pub fn month_calendar(habit: &HabitWithStats, month: NaiveDate, today: NaiveDate) -> MonthCalendar {
    let first = month_start(month);
    MonthCalendar {
        month: first,
        leading_blanks: first.weekday().num_days_from_sunday(),
        days: each_day(first, month_end(first))
            .into_iter()
            .map(|date| (date, day_state(habit, date, today)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Completion, Frequency, Habit};
    use crate::utils::dates::parse_iso_date;

    fn d(s: &str) -> NaiveDate {
        parse_iso_date(s).unwrap()
    }

    fn habit() -> HabitWithStats {
        HabitWithStats {
            habit: Habit {
                id: "h".into(),
                name: "Walk".into(),
                description: None,
                frequency: Frequency::Daily,
                weekly_days: None,
                start_date: d("2024-02-05"),
                reminder_time: None,
                track_count: false,
                count_goal: None,
                created_at: "2024-02-05 00:00:00".into(),
            },
            current_streak: 0,
            longest_streak: 0,
            completed_today: false,
            completions: ["2024-02-05", "2024-02-07"]
                .iter()
                .map(|day| Completion {
                    id: day.to_string(),
                    habit_id: "h".into(),
                    completed_date: d(day),
                    count: None,
                })
                .collect(),
            completion_rate: 0,
        }
    }

    #[test]
    fn classifies_each_day() {
        let h = habit();
        let today = d("2024-02-08");
        let cal = month_calendar(&h, d("2024-02-20"), today);

        assert_eq!(cal.month, d("2024-02-01"));
        assert_eq!(cal.days.len(), 29);
        // 2024-02-01 is a Thursday
        assert_eq!(cal.leading_blanks, 4);
        assert_eq!(day_state(&h, d("2024-02-04"), today), DayState::Inactive);
        assert_eq!(day_state(&h, d("2024-02-05"), today), DayState::Completed);
        assert_eq!(day_state(&h, d("2024-02-06"), today), DayState::Missed);
        assert_eq!(day_state(&h, d("2024-02-08"), today), DayState::Open);
        assert_eq!(day_state(&h, d("2024-02-09"), today), DayState::Inactive);
        assert_eq!(cal.count(DayState::Completed), 2);
        assert_eq!(cal.count(DayState::Missed), 1);
    }

    #[test]
    fn weeks_are_padded_to_seven() {
        let cal = month_calendar(&habit(), d("2024-02-01"), d("2024-02-08"));
        let weeks = cal.weeks();
        assert_eq!(weeks.len(), 5);
        assert!(weeks.iter().all(|w| w.len() == 7));
        assert!(weeks[0][3].is_none());
        assert_eq!(weeks[0][4].map(|(date, _)| date), Some(d("2024-02-01")));
    }
}
