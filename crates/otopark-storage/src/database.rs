//! Read-only SQLite connection handling.
//!
//! A [`Database`] is opened per request and closed when it is dropped, so
//! every exit path of a read (success, empty table, failed query) releases
//! the connection. Open connections are counted through a shared
//! [`ConnectionCounter`] so callers can observe that nothing leaks.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use otopark_core::{GatewayError, GatewayResult};
use rusqlite::{Connection, OpenFlags};
use tracing::debug;

/// How long a read waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared count of currently open store connections, with the highest
/// count seen so far.
#[derive(Debug, Clone, Default)]
pub struct ConnectionCounter {
    open: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl ConnectionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of connections currently open
    pub fn current(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }

    /// Most connections that were ever open at the same time
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn lease(&self) -> ConnectionLease {
        let open = self.open.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(open, Ordering::SeqCst);
        ConnectionLease {
            open: self.open.clone(),
        }
    }
}

/// Decrements the counter when dropped.
#[derive(Debug)]
struct ConnectionLease {
    open: Arc<AtomicUsize>,
}

impl Drop for ConnectionLease {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}

/// SQLite database wrapper, opened read-only.
///
/// Fields drop in declaration order: the connection closes before the lease
/// gives its slot back.
pub struct Database {
    conn: Connection,
    path: PathBuf,
    _lease: ConnectionLease,
}

impl Database {
    /// Open the database at `path` for reading.
    ///
    /// The file is never created. A missing file, or one that is not an
    /// SQLite database, is a connection error.
    pub fn open(path: &Path, counter: &ConnectionCounter) -> GatewayResult<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(path, flags).map_err(|e| {
            GatewayError::connection(format!("cannot open {}: {}", path.display(), e))
        })?;
        let lease = counter.lease();

        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(GatewayError::connection)?;
        conn.pragma_update(None, "query_only", "ON")
            .map_err(GatewayError::connection)?;

        // SQLite reads the header lazily; touch the schema so a corrupt or
        // foreign file fails here instead of inside the facility query.
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(|e| {
            GatewayError::connection(format!("cannot read {}: {}", path.display(), e))
        })?;

        debug!("Opened store connection at {:?}", path);

        Ok(Self {
            conn,
            path: path.to_path_buf(),
            _lease: lease,
        })
    }

    /// Get a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        debug!("Released store connection at {:?}", self.path);
    }
}
