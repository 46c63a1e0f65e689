pub mod migrations;
pub mod repository;

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open (or create) the database file, switch to WAL and bring the schema up to date.
pub fn open(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Opening database at {:?}", path))?;

    // Enable WAL mode for better concurrent access
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Run migrations on every startup
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::HabitRepo;
    use crate::models::NewHabit;
    use chrono::NaiveDate;

    #[test]
    fn file_backed_database_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("habitual.db");
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        {
            let conn = open(&path).unwrap();
            HabitRepo::create(&conn, NewHabit::daily("Journal", start)).unwrap();
        }

        let conn = open(&path).unwrap();
        let habits = HabitRepo::list(&conn).unwrap();
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].name, "Journal");
    }
}
