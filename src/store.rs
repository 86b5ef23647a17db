use crate::types::{GenreCount, MediaEntry, MediaType, MediaUpdate, NewMediaEntry, UNKNOWN_GENRE};
use crate::{Result, WatchLogError};
use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::fs;
use std::path::{Path, PathBuf};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS media (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    type TEXT NOT NULL CHECK (type IN ('movie', 'tv')),
    genre TEXT NOT NULL DEFAULT 'Unknown',
    duration_minutes INTEGER NOT NULL CHECK (duration_minutes >= 0),
    watched_date TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_media_watched_date ON media(watched_date);
"#;

const ENTRY_COLUMNS: &str = "id, title, type, genre, duration_minutes, watched_date";

/// Local single-file store for media entries.
///
/// The store only remembers where the database lives. Every operation opens its own
/// connection and drops it before returning, so nothing is held open between menu
/// actions.
///
/// # Examples
///
/// ```rust,no_run
/// use watchlog::{MediaStore, MediaType, NewMediaEntry};
///
/// let store = MediaStore::open("media_tracker.db")?;
/// let id = store.insert(&NewMediaEntry::new("Arrival", MediaType::Movie).with_duration(116))?;
/// let entry = store.get(id)?.expect("just inserted");
/// assert_eq!(entry.title, "Arrival");
/// # Ok::<(), watchlog::WatchLogError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MediaStore {
    path: PathBuf,
}

impl MediaStore {
    /// Open the store at `path`, creating the parent directory and the schema if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let store = Self { path };
        store.ensure_schema()?;
        log::debug!("Media store ready at {}", store.path.display());
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    /// Create the media table if it does not exist. Safe to call on every startup.
    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Insert a new entry and return the id assigned to it.
    pub fn insert(&self, entry: &NewMediaEntry) -> Result<i64> {
        entry.validate()?;

        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO media (title, type, genre, duration_minutes, watched_date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.title.trim(),
                entry.media_type,
                genre_or_unknown(&entry.genre),
                entry.duration_minutes,
                entry.watched_date,
            ],
        )?;
        let id = conn.last_insert_rowid();

        log::info!("Inserted media entry {id}: '{}'", entry.title);
        Ok(id)
    }

    pub fn get(&self, id: i64) -> Result<Option<MediaEntry>> {
        let conn = self.connect()?;
        let entry = conn
            .query_row(
                &format!("SELECT {ENTRY_COLUMNS} FROM media WHERE id = ?1"),
                params![id],
                row_to_entry,
            )
            .optional()?;
        Ok(entry)
    }

    /// List entries, most recently watched first.
    pub fn list(&self, limit: Option<usize>) -> Result<Vec<MediaEntry>> {
        let limit = sql_limit(limit);

        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {ENTRY_COLUMNS} FROM media ORDER BY watched_date DESC, id DESC LIMIT ?1"
        ))?;
        let entries = stmt
            .query_map(params![limit], row_to_entry)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    /// Apply `update` to the entry with the given id.
    ///
    /// Only the fields set in `update` change; the id and watched date never do.
    pub fn update(&self, id: i64, update: &MediaUpdate) -> Result<()> {
        update.validate()?;

        let title = update.title.as_deref().map(str::trim);
        let genre = update.genre.as_deref().map(genre_or_unknown);

        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE media SET
                 title = COALESCE(?1, title),
                 type = COALESCE(?2, type),
                 genre = COALESCE(?3, genre),
                 duration_minutes = COALESCE(?4, duration_minutes)
             WHERE id = ?5",
            params![title, update.media_type, genre, update.duration_minutes, id],
        )?;

        if changed == 0 {
            return Err(WatchLogError::NotFound(id));
        }
        log::info!("Updated media entry {id}");
        Ok(())
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        let conn = self.connect()?;
        let changed = conn.execute("DELETE FROM media WHERE id = ?1", params![id])?;

        if changed == 0 {
            return Err(WatchLogError::NotFound(id));
        }
        log::info!("Deleted media entry {id}");
        Ok(())
    }

    /// Total minutes watched on `date`, zero when nothing was logged.
    pub fn sum_duration_for_date(&self, date: NaiveDate) -> Result<u64> {
        let conn = self.connect()?;
        let total: i64 = conn.query_row(
            "SELECT COALESCE(SUM(duration_minutes), 0) FROM media WHERE watched_date = ?1",
            params![date],
            |row| row.get(0),
        )?;
        Ok(total.max(0) as u64)
    }

    /// Total minutes watched between `start` and `end`, both inclusive.
    pub fn sum_duration_for_range(&self, start: NaiveDate, end: NaiveDate) -> Result<u64> {
        if start > end {
            return Err(WatchLogError::InvalidInput(format!(
                "range start {start} is after range end {end}"
            )));
        }

        let conn = self.connect()?;
        let total: i64 = conn.query_row(
            "SELECT COALESCE(SUM(duration_minutes), 0) FROM media
             WHERE watched_date BETWEEN ?1 AND ?2",
            params![start, end],
            |row| row.get(0),
        )?;
        Ok(total.max(0) as u64)
    }

    /// The genre with the most entries, ties broken alphabetically.
    ///
    /// Returns `None` when the table is empty.
    pub fn most_frequent_genre(&self) -> Result<Option<GenreCount>> {
        let conn = self.connect()?;
        let top = conn
            .query_row(
                "SELECT genre, COUNT(*) AS entries FROM media
                 GROUP BY genre
                 ORDER BY entries DESC, genre ASC
                 LIMIT 1",
                [],
                |row| {
                    let count: i64 = row.get(1)?;
                    Ok(GenreCount {
                        genre: row.get(0)?,
                        count: count.max(0) as u64,
                    })
                },
            )
            .optional()?;
        Ok(top)
    }
}

/// SQLite treats a negative LIMIT as "no limit"; oversized limits saturate.
fn sql_limit(limit: Option<usize>) -> i64 {
    limit
        .map(|n| i64::try_from(n).unwrap_or(i64::MAX))
        .unwrap_or(-1)
}

/// Trimmed genre, with blank falling back to [`UNKNOWN_GENRE`].
fn genre_or_unknown(genre: &str) -> &str {
    let genre = genre.trim();
    if genre.is_empty() {
        UNKNOWN_GENRE
    } else {
        genre
    }
}

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<MediaEntry> {
    Ok(MediaEntry {
        id: row.get(0)?,
        title: row.get(1)?,
        media_type: row.get(2)?,
        genre: row.get(3)?,
        duration_minutes: row.get(4)?,
        watched_date: row.get(5)?,
    })
}

impl ToSql for MediaType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for MediaType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: WatchLogError| FromSqlError::Other(Box::new(e)))
    }
}
