//! SQLite connection with an explicit one-time initialisation step.

use rusqlite::Connection;
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::query::QueryError;

/// Errors returned by the repositories
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("database is not initialised")]
    NotInitialized,

    #[error("database lock poisoned")]
    LockPoisoned,

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to create database directory: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Initialisation progress of a [`Database`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InitState {
    Uninitialized = 0,
    Initializing = 1,
    Ready = 2,
}

impl InitState {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => InitState::Initializing,
            2 => InitState::Ready,
            _ => InitState::Uninitialized,
        }
    }
}

/// A single SQLite connection shared by one repository.
pub struct Database {
    conn: Mutex<Connection>,
    state: AtomicU8,
}

impl Database {
    /// Open (or create) a database file
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        debug!("Opened database at {}", path.display());
        Ok(Self::from_connection(conn))
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            state: AtomicU8::new(InitState::Uninitialized as u8),
        }
    }

    pub fn state(&self) -> InitState {
        InitState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Run `setup` once.
    ///
    /// Concurrent callers block on the connection lock until the first call
    /// finishes. Once `Ready`, later calls return immediately. A failed setup
    /// leaves the database `Uninitialized` so the caller may retry.
    pub fn init<F>(&self, name: &str, setup: F) -> Result<()>
    where
        F: FnOnce(&Connection) -> Result<()>,
    {
        let conn = self.lock()?;

        if self.state() == InitState::Ready {
            debug!("{} database already initialised", name);
            return Ok(());
        }

        self.set_state(InitState::Initializing);
        match setup(&conn) {
            Ok(()) => {
                self.set_state(InitState::Ready);
                info!("{} database ready", name);
                Ok(())
            }
            Err(e) => {
                self.set_state(InitState::Uninitialized);
                warn!("{} database initialisation failed: {}", name, e);
                Err(e)
            }
        }
    }

    /// Lock the connection for querying. Fails until [`Database::init`] succeeds.
    pub fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        if self.state() != InitState::Ready {
            return Err(CatalogError::NotInitialized);
        }
        self.lock()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| CatalogError::LockPoisoned)
    }

    fn set_state(&self, state: InitState) {
        self.state.store(state as u8, Ordering::Release);
    }
}
