//! Schema creation and versioned upgrades for the local database.
//!
//! The on-disk version is tracked with `PRAGMA user_version`. Version 1
//! carried only the events table; version 2 added daily notes and the
//! settings key-value table. Opening an older database applies just the
//! missing steps and leaves existing rows alone.

use rusqlite::Connection;

use crate::error::DaymarkResult;

pub const SCHEMA_VERSION: i64 = 2;

fn schema_version(conn: &Connection) -> DaymarkResult<i64> {
    let version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i64) -> DaymarkResult<()> {
    conn.pragma_update(None, "user_version", version)?;
    Ok(())
}

fn create_events_table(conn: &Connection) -> DaymarkResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS events (
            id           TEXT PRIMARY KEY,
            title        TEXT NOT NULL,
            date         TEXT NOT NULL,              -- YYYY-MM-DD
            start_time   TEXT,                       -- HH:MM
            end_time     TEXT,                       -- HH:MM
            description  TEXT,
            is_important INTEGER NOT NULL DEFAULT 0,
            color        TEXT,
            icon         TEXT,
            created_at   INTEGER NOT NULL            -- epoch millis
        );

        CREATE INDEX IF NOT EXISTS idx_events_date ON events(date);
        CREATE INDEX IF NOT EXISTS idx_events_created_at ON events(created_at);
        ",
    )?;
    Ok(())
}

fn create_notes_and_settings_tables(conn: &Connection) -> DaymarkResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS daily_notes (
            date       TEXT PRIMARY KEY,             -- YYYY-MM-DD
            content    TEXT NOT NULL DEFAULT '',
            updated_at INTEGER NOT NULL              -- epoch millis
        );

        CREATE TABLE IF NOT EXISTS settings (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        ",
    )?;
    Ok(())
}

/// Bring an opened database up to the current schema version.
pub fn run_pending_migrations(conn: &Connection) -> DaymarkResult<()> {
    let version = schema_version(conn)?;

    if version < 1 {
        create_events_table(conn)?;
        set_schema_version(conn, 1)?;
    }

    if version < 2 {
        create_notes_and_settings_tables(conn)?;
        set_schema_version(conn, 2)?;
    }

    Ok(())
}
