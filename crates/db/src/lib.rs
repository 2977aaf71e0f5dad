mod error;
mod helpers;
mod memory;
mod migrations;
mod store;
mod tolls;
mod trips;
mod vehicles;

use std::path::Path;

use rusqlite::Connection;

pub use error::{DbError, Result};
pub use memory::MemoryStore;
pub use store::{ReportStore, SqliteStore};

pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "temp_store", "MEMORY")?;
        conn.pragma_update(None, "cache_size", -20_000)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "temp_store", "MEMORY")?;
        Ok(Self { conn })
    }

    /// Round trip to the database to confirm the connection is usable.
    pub fn ping(&self) -> Result<()> {
        self.conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }

    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| DbError::from(err))
    }
}
