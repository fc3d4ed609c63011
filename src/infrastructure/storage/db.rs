use crate::domain::error::NearbyError;
use crate::domain::traits::KeyValueStore;
use async_trait::async_trait;
use std::path::Path;
use tokio_rusqlite::Connection;

pub async fn init_database(db_path: &Path) -> Result<Connection, NearbyError> {
    let db = Connection::open(db_path.to_path_buf()).await?;
    create_schema(&db).await?;
    Ok(db)
}

/// In-memory database with the same schema
pub async fn init_memory_database() -> Result<Connection, NearbyError> {
    let db = Connection::open_in_memory().await?;
    create_schema(&db).await?;
    Ok(db)
}

async fn create_schema(db: &Connection) -> Result<(), NearbyError> {
    db.call(|conn| {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value BLOB NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        Ok::<_, rusqlite::Error>(())
    })
    .await?;

    Ok(())
}

/// SQLite key-value store. Values are zstd-compressed.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub async fn count(&self) -> Result<usize, NearbyError> {
        let count: i64 = self
            .conn
            .call(|conn| conn.query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0)))
            .await?;

        Ok(count as usize)
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, NearbyError> {
        use rusqlite::OptionalExtension;
        use std::io::Cursor;
        use tokio_rusqlite::params;
        use zstd::stream::decode_all;

        let key_string = key.to_string();
        let compressed: Option<Vec<u8>> = self
            .conn
            .call(move |conn| {
                conn.query_row(
                    "SELECT value FROM kv WHERE key = ?",
                    params![key_string],
                    |row| row.get(0),
                )
                .optional()
            })
            .await?;

        let Some(compressed) = compressed else {
            return Ok(None);
        };

        let decompressed = decode_all(Cursor::new(&compressed))?;
        let value = String::from_utf8(decompressed)
            .map_err(|e| NearbyError::Storage(format!("value for {} is not UTF-8: {}", key, e)))?;
        Ok(Some(value))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), NearbyError> {
        use std::io::Cursor;
        use tokio_rusqlite::params;
        use zstd::stream::encode_all;

        let compressed = encode_all(Cursor::new(value.as_bytes()), 0)?;
        let now = chrono::Utc::now().timestamp();
        let key_string = key.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT OR REPLACE INTO kv (key, value, updated_at)
                     VALUES (?, ?, ?)",
                    params![key_string, compressed, now],
                )
            })
            .await?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), NearbyError> {
        use tokio_rusqlite::params;

        let key_string = key.to_string();
        self.conn
            .call(move |conn| conn.execute("DELETE FROM kv WHERE key = ?", params![key_string]))
            .await?;

        Ok(())
    }
}
