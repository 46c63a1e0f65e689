use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use log::{debug, info, warn};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::HabitError;
use crate::models::{Completion, Frequency, Habit, HabitPatch, NewHabit, ToggleOutcome};
use crate::utils::dates::{format_iso_date, parse_iso_date};
use crate::utils::format::format_time;

// ─── Row mapping ─────────────────────────────────────────────────────────────

const HABIT_COLUMNS: &str = "id, name, description, frequency, weekly_days, start_date,
     reminder_time, track_count, count_goal, created_at";

type HabitRow = (
    String,
    String,
    Option<String>,
    String,
    Option<String>,
    String,
    Option<String>,
    i32,
    Option<i64>,
    String,
);

fn read_habit_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<HabitRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
        row.get(9)?,
    ))
}

fn habit_from_row(row: HabitRow) -> Result<Habit> {
    let (
        id,
        name,
        description,
        frequency,
        weekly_days,
        start_date,
        reminder_time,
        track_count,
        count_goal,
        created_at,
    ) = row;

    let weekly_days = weekly_days
        .map(|json| serde_json::from_str::<Vec<u8>>(&json))
        .transpose()
        .with_context(|| format!("Bad weekly_days for habit {}", id))?;

    Ok(Habit {
        frequency: Frequency::from_str(&frequency)?,
        weekly_days,
        start_date: parse_iso_date(&start_date)?,
        reminder_time: reminder_time.as_deref().map(parse_time).transpose()?,
        track_count: track_count != 0,
        count_goal: count_goal.map(|g| g as u32),
        id,
        name,
        description,
        created_at,
    })
}

fn parse_time(s: &str) -> Result<NaiveTime, HabitError> {
    crate::models::habit::parse_reminder(s)
}

fn weekly_days_json(days: &Option<Vec<u8>>) -> Result<Option<String>> {
    days.as_ref()
        .map(serde_json::to_string)
        .transpose()
        .context("Serializing weekly_days")
}

fn unique_match(reference: &str, matches: &[&Habit]) -> Result<Option<Habit>> {
    match matches {
        [] => Ok(None),
        [habit] => Ok(Some((*habit).clone())),
        _ => {
            warn!("'{}' matches {} habits", reference, matches.len());
            Err(HabitError::AmbiguousHabit(reference.to_string(), matches.len()).into())
        }
    }
}

// ─── Habit repo ──────────────────────────────────────────────────────────────

pub struct HabitRepo;

impl HabitRepo {
    /// All habits, newest first.
    pub fn list(conn: &Connection) -> Result<Vec<Habit>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM habits ORDER BY created_at DESC, rowid DESC",
            HABIT_COLUMNS
        ))?;

        let rows = stmt.query_map([], read_habit_row)?;

        let mut result = Vec::new();
        for r in rows {
            result.push(habit_from_row(r?)?);
        }
        Ok(result)
    }

    pub fn get(conn: &Connection, id: &str) -> Result<Option<Habit>> {
        let row = conn
            .query_row(
                &format!("SELECT {} FROM habits WHERE id = ?1", HABIT_COLUMNS),
                params![id],
                read_habit_row,
            )
            .optional()?;

        row.map(habit_from_row).transpose()
    }

    /// Resolve a user-supplied reference: full id, unique name (case-insensitive),
    /// or unique id prefix. A reference matching several habits is an error.
    pub fn find(conn: &Connection, reference: &str) -> Result<Option<Habit>> {
        if let Some(habit) = Self::get(conn, reference)? {
            return Ok(Some(habit));
        }

        let habits = Self::list(conn)?;
        let wanted = reference.trim().to_lowercase();

        let named: Vec<&Habit> = habits.iter().filter(|h| h.name.to_lowercase() == wanted).collect();
        if let Some(habit) = unique_match(reference, &named)? {
            return Ok(Some(habit));
        }

        if wanted.len() >= 4 {
            let prefixed: Vec<&Habit> = habits.iter().filter(|h| h.id.starts_with(&wanted)).collect();
            return unique_match(reference, &prefixed);
        }
        Ok(None)
    }

    pub fn require(conn: &Connection, reference: &str) -> Result<Habit> {
        Self::find(conn, reference)?
            .ok_or_else(|| HabitError::HabitNotFound(reference.to_string()).into())
    }

    pub fn create(conn: &Connection, new: NewHabit) -> Result<Habit> {
        let new = new.validated()?;
        let id = Uuid::new_v4().to_string();

        conn.execute(
            "INSERT INTO habits
                (id, name, description, frequency, weekly_days, start_date,
                 reminder_time, track_count, count_goal)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                id,
                new.name,
                new.description,
                new.frequency.as_str(),
                weekly_days_json(&new.weekly_days)?,
                format_iso_date(new.start_date),
                new.reminder_time.map(format_time),
                new.track_count as i32,
                new.count_goal,
            ],
        )?;
        info!("created habit {} ({})", new.name, id);

        Self::get(conn, &id)?.context("Habit vanished after insert")
    }

    pub fn update(conn: &Connection, id: &str, patch: HabitPatch) -> Result<Habit> {
        let existing = Self::get(conn, id)?.ok_or_else(|| HabitError::HabitNotFound(id.to_string()))?;
        let habit = patch.apply(&existing)?;

        conn.execute(
            "UPDATE habits SET name = ?2, description = ?3, frequency = ?4, weekly_days = ?5,
                    start_date = ?6, reminder_time = ?7, track_count = ?8, count_goal = ?9
             WHERE id = ?1",
            params![
                habit.id,
                habit.name,
                habit.description,
                habit.frequency.as_str(),
                weekly_days_json(&habit.weekly_days)?,
                format_iso_date(habit.start_date),
                habit.reminder_time.map(format_time),
                habit.track_count as i32,
                habit.count_goal,
            ],
        )?;
        info!("updated habit {}", habit.id);
        Ok(habit)
    }

    /// Returns false when no such habit existed. Completions go with it.
    pub fn delete(conn: &Connection, id: &str) -> Result<bool> {
        let removed = conn.execute("DELETE FROM habits WHERE id = ?1", params![id])?;
        if removed > 0 {
            info!("deleted habit {}", id);
        }
        Ok(removed > 0)
    }
}

// ─── Completion repo ─────────────────────────────────────────────────────────

pub struct CompletionRepo;

impl CompletionRepo {
    /// Every completion for every habit.
    pub fn list(conn: &Connection) -> Result<Vec<Completion>> {
        let mut stmt = conn.prepare(
            "SELECT id, habit_id, completed_date, count
             FROM habit_completions ORDER BY completed_date, habit_id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<i64>>(3)?,
            ))
        })?;

        let mut result = Vec::new();
        for r in rows {
            let (id, habit_id, completed_date, count) = r?;
            result.push(Completion {
                completed_date: parse_iso_date(&completed_date)?,
                count: count.map(|c| c.max(0) as u32),
                id,
                habit_id,
            });
        }
        Ok(result)
    }

    /// Delete the `(habit, date)` row if present, otherwise insert it.
    ///
    /// Runs as one IMMEDIATE transaction so two toggles of the same cell are
    /// serialized by SQLite's write lock. `count` is only accepted for habits
    /// that track counts and is ignored when the row is removed.
    pub fn toggle(
        conn: &Connection,
        habit_id: &str,
        date: NaiveDate,
        count: Option<u32>,
    ) -> Result<ToggleOutcome> {
        let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
        let date_str = format_iso_date(date);

        let track_count: Option<i32> = tx
            .query_row(
                "SELECT track_count FROM habits WHERE id = ?1",
                params![habit_id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(track_count) = track_count else {
            return Err(HabitError::HabitNotFound(habit_id.to_string()).into());
        };

        let removed = tx.execute(
            "DELETE FROM habit_completions WHERE habit_id = ?1 AND completed_date = ?2",
            params![habit_id, date_str],
        )?;

        let outcome = if removed > 0 {
            ToggleOutcome::Removed
        } else {
            if count.is_some() && track_count == 0 {
                return Err(HabitError::CountNotTracked(habit_id.to_string()).into());
            }
            tx.execute(
                "INSERT INTO habit_completions (id, habit_id, completed_date, count)
                 VALUES (?1, ?2, ?3, ?4)",
                params![Uuid::new_v4().to_string(), habit_id, date_str, count],
            )?;
            ToggleOutcome::Inserted
        };

        tx.commit()?;
        info!("toggled {} on {}: {:?}", habit_id, date_str, outcome);
        Ok(outcome)
    }

    pub fn count(conn: &Connection) -> Result<i64> {
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM habit_completions", [], |row| row.get(0))?;
        debug!("{} completion rows", n);
        Ok(n)
    }
}
