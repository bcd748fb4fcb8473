//! The local SQLite store: events, daily notes, and small persisted settings.
//!
//! This is the single source of truth for everything the UI reads. Remote
//! data only becomes visible after a pull writes it in here. Raw store
//! operations do not touch the dirty flag; the sync engine's write wrappers
//! own that side effect.

mod schema;

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};

use crate::error::DaymarkResult;
use crate::event::Event;
use crate::note::DailyNote;
use crate::snapshot::now_millis;
use crate::sync::{Session, Theme};

pub use schema::SCHEMA_VERSION;

// Settings keys
const KEY_AUTHENTICATED: &str = "authenticated";
const KEY_THEME: &str = "theme";
const KEY_REMOTE_ID: &str = "remote_id";
const KEY_LAST_SYNC: &str = "last_sync_timestamp";
const KEY_DIRTY: &str = "dirty";
const KEY_FORCE_PULL: &str = "force_pull";

pub struct Store {
    conn: Connection,
}

fn row_to_event(row: &rusqlite::Row) -> rusqlite::Result<Event> {
    Ok(Event {
        id: row.get("id")?,
        title: row.get("title")?,
        date: row.get("date")?,
        start_time: row.get("start_time")?,
        end_time: row.get("end_time")?,
        description: row.get("description")?,
        is_important: row.get::<_, i64>("is_important")? != 0,
        color: row.get("color")?,
        icon: row.get("icon")?,
        created_at: row.get("created_at")?,
    })
}

fn row_to_note(row: &rusqlite::Row) -> rusqlite::Result<DailyNote> {
    Ok(DailyNote {
        date: row.get("date")?,
        content: row.get("content")?,
        updated_at: row.get("updated_at")?,
    })
}

impl Store {
    /// Open (and migrate) the database at the given path.
    pub fn open(path: impl AsRef<Path>) -> DaymarkResult<Store> {
        let conn = Connection::open(path)?;
        schema::run_pending_migrations(&conn)?;
        Ok(Store { conn })
    }

    /// Open a throwaway in-memory database. Used by tests and by the CLI's
    /// degraded mode when the on-disk database cannot be opened.
    pub fn open_in_memory() -> DaymarkResult<Store> {
        let conn = Connection::open_in_memory()?;
        schema::run_pending_migrations(&conn)?;
        Ok(Store { conn })
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    pub fn all_events(&self) -> DaymarkResult<Vec<Event>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM events ORDER BY date, created_at")?;
        let rows = stmt.query_map([], row_to_event)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// All events on one calendar day, via the date index.
    pub fn events_on(&self, date: &str) -> DaymarkResult<Vec<Event>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM events WHERE date = ?1 ORDER BY created_at")?;
        let rows = stmt.query_map([date], row_to_event)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Upsert an event by id, canonicalizing its date/time fields first.
    /// A zero `created_at` is stamped with the current time; a non-zero
    /// one is preserved as-is, so the creation timestamp survives edits.
    pub fn save_event(&self, event: &Event) -> DaymarkResult<Event> {
        let mut stored = event.clone();
        stored.canonicalize()?;
        if stored.created_at == 0 {
            stored.created_at = now_millis();
        }

        self.conn.execute(
            "INSERT INTO events
                 (id, title, date, start_time, end_time, description,
                  is_important, color, icon, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT(id) DO UPDATE SET
                 title = excluded.title,
                 date = excluded.date,
                 start_time = excluded.start_time,
                 end_time = excluded.end_time,
                 description = excluded.description,
                 is_important = excluded.is_important,
                 color = excluded.color,
                 icon = excluded.icon",
            params![
                stored.id,
                stored.title,
                stored.date,
                stored.start_time,
                stored.end_time,
                stored.description,
                stored.is_important as i64,
                stored.color,
                stored.icon,
                stored.created_at,
            ],
        )?;

        // An update keeps the original created_at; report what's on disk
        let created_at: i64 = self.conn.query_row(
            "SELECT created_at FROM events WHERE id = ?1",
            [&stored.id],
            |row| row.get(0),
        )?;
        stored.created_at = created_at;

        Ok(stored)
    }

    /// Delete by id. Returns whether a row existed; deleting an absent id
    /// is not an error.
    pub fn delete_event(&self, id: &str) -> DaymarkResult<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM events WHERE id = ?1", [id])?;
        Ok(deleted > 0)
    }

    // ------------------------------------------------------------------
    // Daily notes
    // ------------------------------------------------------------------

    /// The note content for a date, or an empty string when there is none.
    pub fn daily_note(&self, date: &str) -> DaymarkResult<String> {
        let content: Option<String> = self
            .conn
            .query_row(
                "SELECT content FROM daily_notes WHERE date = ?1",
                [date],
                |row| row.get(0),
            )
            .optional()?;
        Ok(content.unwrap_or_default())
    }

    /// Upsert the note for a date, stamped with the current time. Saving
    /// empty content keeps the row but drops the date from `note_dates()`.
    pub fn save_daily_note(&self, date: &str, content: &str) -> DaymarkResult<DailyNote> {
        let note = DailyNote {
            date: date.to_string(),
            content: content.to_string(),
            updated_at: now_millis(),
        };

        self.conn.execute(
            "INSERT INTO daily_notes (date, content, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(date) DO UPDATE SET
                 content = excluded.content,
                 updated_at = excluded.updated_at",
            params![note.date, note.content, note.updated_at],
        )?;

        Ok(note)
    }

    /// Dates whose note content is non-empty after trimming, ascending.
    ///
    /// The filter runs in Rust rather than SQL: SQLite's `TRIM` strips
    /// only ASCII spaces, so a note holding `"\n"` or `"\t"` would count
    /// as present and disagree with `DailyNote::has_content`.
    pub fn note_dates(&self) -> DaymarkResult<Vec<String>> {
        Ok(self
            .all_notes()?
            .into_iter()
            .filter(DailyNote::has_content)
            .map(|note| note.date)
            .collect())
    }

    /// Every note row, empty content included. This is what goes into a
    /// snapshot; enumeration filtering happens only in `note_dates()`.
    pub fn all_notes(&self) -> DaymarkResult<Vec<DailyNote>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM daily_notes ORDER BY date")?;
        let rows = stmt.query_map([], row_to_note)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    // ------------------------------------------------------------------
    // Wholesale replacement (the pull path)
    // ------------------------------------------------------------------

    /// Clear both tables and repopulate them from the given data, in one
    /// transaction. Settings are untouched.
    pub fn replace_all(&mut self, events: &[Event], notes: &[DailyNote]) -> DaymarkResult<()> {
        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM events", [])?;
        tx.execute("DELETE FROM daily_notes", [])?;

        {
            let mut insert_event = tx.prepare(
                "INSERT INTO events
                     (id, title, date, start_time, end_time, description,
                      is_important, color, icon, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for event in events {
                insert_event.execute(params![
                    event.id,
                    event.title,
                    event.date,
                    event.start_time,
                    event.end_time,
                    event.description,
                    event.is_important as i64,
                    event.color,
                    event.icon,
                    event.created_at,
                ])?;
            }

            let mut insert_note = tx.prepare(
                "INSERT INTO daily_notes (date, content, updated_at) VALUES (?1, ?2, ?3)",
            )?;
            for note in notes {
                insert_note.execute(params![note.date, note.content, note.updated_at])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    pub fn setting(&self, key: &str) -> DaymarkResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set_setting(&self, key: &str, value: &str) -> DaymarkResult<()> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn delete_setting(&self, key: &str) -> DaymarkResult<()> {
        self.conn
            .execute("DELETE FROM settings WHERE key = ?1", [key])?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Typed session accessors
    // ------------------------------------------------------------------

    /// The persisted sync session, re-read fresh from the settings table.
    /// Concurrent daymark processes share these flags through the database.
    pub fn session(&self) -> DaymarkResult<Session> {
        Ok(Session {
            remote_id: self.setting(KEY_REMOTE_ID)?,
            last_sync_timestamp: self
                .setting(KEY_LAST_SYNC)?
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            dirty: self.setting(KEY_DIRTY)?.as_deref() == Some("true"),
            force_pull: self.setting(KEY_FORCE_PULL)?.as_deref() == Some("true"),
            authenticated: self.setting(KEY_AUTHENTICATED)?.as_deref() == Some("true"),
        })
    }

    pub fn set_remote_id(&self, remote_id: &str) -> DaymarkResult<()> {
        self.set_setting(KEY_REMOTE_ID, remote_id)
    }

    pub fn set_last_sync_timestamp(&self, timestamp: i64) -> DaymarkResult<()> {
        self.set_setting(KEY_LAST_SYNC, &timestamp.to_string())
    }

    pub fn set_dirty(&self, dirty: bool) -> DaymarkResult<()> {
        self.set_setting(KEY_DIRTY, if dirty { "true" } else { "false" })
    }

    pub fn set_force_pull(&self, force: bool) -> DaymarkResult<()> {
        self.set_setting(KEY_FORCE_PULL, if force { "true" } else { "false" })
    }

    pub fn set_authenticated(&self, authenticated: bool) -> DaymarkResult<()> {
        self.set_setting(KEY_AUTHENTICATED, if authenticated { "true" } else { "false" })
    }

    pub fn theme(&self) -> DaymarkResult<Theme> {
        Ok(self
            .setting(KEY_THEME)?
            .map(|v| Theme::parse(&v))
            .unwrap_or_default())
    }

    pub fn set_theme(&self, theme: Theme) -> DaymarkResult<()> {
        self.set_setting(KEY_THEME, theme.as_str())
    }

    /// Drop the auth-related session keys. Data and theme survive logout.
    pub fn clear_session(&self) -> DaymarkResult<()> {
        self.delete_setting(KEY_REMOTE_ID)?;
        self.delete_setting(KEY_LAST_SYNC)?;
        self.delete_setting(KEY_FORCE_PULL)?;
        self.delete_setting(KEY_AUTHENTICATED)?;
        Ok(())
    }
}
