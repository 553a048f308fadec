use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Directory holding the tool's databases unless overridden on the command line.
pub const DEFAULT_STATE_DIR: &str = "./state";

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("failed to create state directory {path}: {source}")]
    StateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("database lock poisoned")]
    LockPoisoned,
}

/// A shared SQLite connection.
#[derive(Clone)]
pub struct DB {
    pub db: Arc<Mutex<Connection>>,
}

impl DB {
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    /// Open or create the database file, creating its directory if needed.
    pub fn open(file: &Path) -> Result<Self, DbError> {
        if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir(parent)?;
        }
        let conn = Connection::open(file)?;
        Ok(Self::new(conn))
    }

    pub fn open_in_memory() -> Result<Self, DbError> {
        Ok(Self::new(Connection::open_in_memory()?))
    }

    pub fn lock(&self) -> Result<MutexGuard<'_, Connection>, DbError> {
        self.db.lock().map_err(|_| DbError::LockPoisoned)
    }
}

pub fn ensure_dir(path: &Path) -> Result<(), DbError> {
    std::fs::create_dir_all(path).map_err(|source| DbError::StateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Location of a named database inside the state directory.
pub fn state_file(state_dir: &Path, name: &str) -> PathBuf {
    state_dir.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = state_file(&dir.path().join("nested"), "test.sqlite");

        let db = DB::open(&file).unwrap();
        db.lock()
            .unwrap()
            .execute("CREATE TABLE t (x INTEGER)", [])
            .unwrap();

        assert!(file.exists());
    }

    #[test]
    fn clones_share_connection() {
        let db = DB::open_in_memory().unwrap();
        let other = db.clone();

        db.lock().unwrap().execute("CREATE TABLE t (x INTEGER)", []).unwrap();
        other.lock().unwrap().execute("INSERT INTO t VALUES (1)", []).unwrap();

        let count: i64 = db
            .lock()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM t", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
