//! SQLite-backed night store.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};

use super::{NightStore, StoreError};
use crate::night::{NewNight, NightId, SleepNight};

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Embedded SQLite implementation of [`NightStore`].
///
/// The connection lives behind a mutex and every operation moves its work
/// onto the blocking thread pool, so async callers never sit on disk I/O.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database at `path`, creating parent directories
    /// as needed.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        }
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Fully in-memory database. Nothing survives the store being dropped;
    /// meant for tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        // WAL keeps reads going during writes and survives a crash mid-write;
        // NORMAL sync is still durable under WAL.
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;",
        )?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS sleep_nights (
                id                INTEGER PRIMARY KEY AUTOINCREMENT,
                start_time_millis INTEGER NOT NULL,
                end_time_millis   INTEGER NOT NULL,
                quality           INTEGER NOT NULL DEFAULT -1
            );",
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `op` against the connection on the blocking thread pool.
    async fn with_conn<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock();
            op(&conn).map_err(StoreError::from)
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("store task failed: {e}")))?
    }
}

fn night_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SleepNight> {
    Ok(SleepNight {
        id: NightId(row.get(0)?),
        start_time_millis: row.get(1)?,
        end_time_millis: row.get(2)?,
        quality: row.get(3)?,
    })
}

const NIGHT_COLUMNS: &str = "id, start_time_millis, end_time_millis, quality";

#[async_trait]
impl NightStore for SqliteStore {
    async fn insert(&self, night: NewNight) -> Result<SleepNight, StoreError> {
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO sleep_nights (start_time_millis, end_time_millis, quality)
                 VALUES (?1, ?2, ?3)",
                params![
                    night.start_time_millis,
                    night.end_time_millis,
                    night.quality
                ],
            )?;
            let id = NightId(conn.last_insert_rowid());
            Ok(night.into_night(id))
        })
        .await
    }

    async fn update(&self, night: SleepNight) -> Result<(), StoreError> {
        self.with_conn(move |conn| {
            conn.execute(
                "UPDATE sleep_nights
                 SET start_time_millis = ?1, end_time_millis = ?2, quality = ?3
                 WHERE id = ?4",
                params![
                    night.start_time_millis,
                    night.end_time_millis,
                    night.quality,
                    night.id.0
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn set_quality(&self, id: NightId, quality: i32) -> Result<(), StoreError> {
        self.with_conn(move |conn| {
            conn.execute(
                "UPDATE sleep_nights SET quality = ?1 WHERE id = ?2",
                params![quality, id.0],
            )?;
            Ok(())
        })
        .await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM sleep_nights", [])?;
            Ok(())
        })
        .await
    }

    async fn get_tonight(&self) -> Result<Option<SleepNight>, StoreError> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!(
                    "SELECT {NIGHT_COLUMNS} FROM sleep_nights ORDER BY id DESC LIMIT 1"
                ),
                [],
                night_from_row,
            )
            .optional()
        })
        .await
    }

    async fn get(&self, id: NightId) -> Result<Option<SleepNight>, StoreError> {
        self.with_conn(move |conn| {
            conn.query_row(
                &format!("SELECT {NIGHT_COLUMNS} FROM sleep_nights WHERE id = ?1"),
                params![id.0],
                night_from_row,
            )
            .optional()
        })
        .await
    }

    async fn get_all_nights(&self) -> Result<Vec<SleepNight>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {NIGHT_COLUMNS} FROM sleep_nights ORDER BY id DESC"
            ))?;
            let rows = stmt.query_map([], night_from_row)?;
            rows.collect()
        })
        .await
    }
}
