use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rusqlite::Connection;

use crate::session::{AdminCredential, SessionStore};

#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
    pub sessions: Arc<SessionStore>,
    pub admin: Arc<AdminCredential>,
    pub public_dir: PathBuf,
}

impl AppState {
    pub fn new(
        conn: Connection,
        sessions: SessionStore,
        admin: AdminCredential,
        public_dir: PathBuf,
    ) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            sessions: Arc::new(sessions),
            admin: Arc::new(admin),
            public_dir,
        }
    }

    /// Every store operation is one statement; the guard is held for exactly
    /// that long.
    pub fn db(&self) -> MutexGuard<'_, Connection> {
        self.db.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
