use anyhow::Result;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch("
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS habits (
            id             TEXT PRIMARY KEY,
            name           TEXT NOT NULL,
            description    TEXT,
            frequency      TEXT NOT NULL DEFAULT 'daily'
                           CHECK(frequency IN ('daily','weekly')),
            weekly_days    TEXT,
            start_date     TEXT NOT NULL,
            reminder_time  TEXT,
            track_count    INTEGER NOT NULL DEFAULT 0,
            count_goal     INTEGER CHECK(count_goal IS NULL OR count_goal >= 1),
            created_at     TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS habit_completions (
            id              TEXT PRIMARY KEY,
            habit_id        TEXT NOT NULL REFERENCES habits(id) ON DELETE CASCADE,
            completed_date  TEXT NOT NULL,
            count           INTEGER,
            created_at      TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(habit_id, completed_date)
        );

        CREATE INDEX IF NOT EXISTS idx_completions_date
            ON habit_completions(completed_date);
    ")?;
    Ok(())
}
