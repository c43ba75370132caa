use crate::db::migrations::init_with_migrations;
use crate::libs::config::Config;
use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

pub const DB_FILE_NAME: &str = "timecard.db";

/// How long a connection waits for another writer before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the configured database and applies pending migrations.
    pub fn new() -> Result<Db> {
        let path = Config::read()?.database_path()?;
        Self::open(path)
    }

    /// Opens the database at `path` and applies pending migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Db> {
        let mut conn = Self::connect(path.as_ref())?;
        init_with_migrations(&mut conn)?;
        Ok(Db { conn })
    }

    /// Opens a private in-memory database with the full schema.
    pub fn open_in_memory() -> Result<Db> {
        let mut conn = Connection::open_in_memory()?;
        init_with_migrations(&mut conn)?;
        Ok(Db { conn })
    }

    /// Opens the configured database without touching its schema.
    pub fn new_without_migrations() -> Result<Connection> {
        let path = Config::read()?.database_path()?;
        Self::connect(&path)
    }

    fn connect(path: &Path) -> Result<Connection> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }
}
