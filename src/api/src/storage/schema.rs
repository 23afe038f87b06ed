//! SQLite schema definitions for the catalog tables
//!
//! Tables:
//! - races: Race meetings (racing service database)
//! - events: Sporting events (sports service database)

use rusqlite::{Connection, Result};

/// Create the races table
pub fn create_races_table(conn: &Connection) -> Result<()> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS races (
            id INTEGER PRIMARY KEY,
            meeting_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            number INTEGER NOT NULL,
            visible INTEGER NOT NULL DEFAULT 0,
            advertised_start_time TEXT NOT NULL
        )
        "#,
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_races_start ON races(advertised_start_time)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_races_meeting ON races(meeting_id)",
        [],
    )?;

    Ok(())
}

/// Create the events table
pub fn create_events_table(conn: &Connection) -> Result<()> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            visible INTEGER NOT NULL DEFAULT 0,
            advertised_start_time TEXT NOT NULL
        )
        "#,
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_events_start ON events(advertised_start_time)",
        [],
    )?;

    Ok(())
}
