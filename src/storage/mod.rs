//! # Storage Module - Session Snapshot Persistence
//!
//! The adventure engine never touches storage itself. This module provides the
//! [`SnapshotStore`] seam it is driven through, plus three implementations:
//!
//! - [`MemoryStore`] - process-local map, used by tests and `store = "memory"`
//! - [`JsonFileStore`] - one pretty-printed JSON file per session, written
//!   atomically under an exclusive file lock
//! - [`SledStore`] - embedded sled tree with bincode-encoded values
//!
//! ```text
//! data/
//! ├── sessions/       ← JsonFileStore: <session>.json
//! └── sled/           ← SledStore database
//! ```
//!
//! Stores report undecodable records as errors; callers decide whether that
//! means "start over" (see [`AdventureError::is_corrupt_snapshot`]).

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use crate::adventure::{AdventureError, WorldSnapshot};
use crate::config::StoreKind;

pub mod json;
pub mod sled_store;

pub use json::JsonFileStore;
pub use sled_store::SledStore;

/// Load/save contract between a transport and wherever snapshots live.
pub trait SnapshotStore: Send + Sync {
    /// Fetch the snapshot for `session_id`, or `None` if the session is unknown.
    fn load(&self, session_id: &str) -> Result<Option<WorldSnapshot>, AdventureError>;

    fn save(&self, session_id: &str, snapshot: &WorldSnapshot) -> Result<(), AdventureError>;

    /// Delete a session; returns whether anything was stored.
    fn remove(&self, session_id: &str) -> Result<bool, AdventureError>;
}

impl<T: SnapshotStore + ?Sized> SnapshotStore for Box<T> {
    fn load(&self, session_id: &str) -> Result<Option<WorldSnapshot>, AdventureError> {
        (**self).load(session_id)
    }

    fn save(&self, session_id: &str, snapshot: &WorldSnapshot) -> Result<(), AdventureError> {
        (**self).save(session_id, snapshot)
    }

    fn remove(&self, session_id: &str) -> Result<bool, AdventureError> {
        (**self).remove(session_id)
    }
}

/// Open the store selected in configuration, rooted at `data_dir`.
pub fn open_store(
    kind: StoreKind,
    data_dir: impl AsRef<Path>,
) -> Result<Box<dyn SnapshotStore>, AdventureError> {
    let data_dir = data_dir.as_ref();
    Ok(match kind {
        StoreKind::Memory => Box::new(MemoryStore::new()),
        StoreKind::Json => Box::new(JsonFileStore::new(data_dir.join("sessions"))?),
        StoreKind::Sled => Box::new(SledStore::open(data_dir.join("sled"))?),
    })
}

/// Snapshots held in memory for the life of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sessions: Mutex<HashMap<String, WorldSnapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, session_id: &str) -> Result<Option<WorldSnapshot>, AdventureError> {
        let guard = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.get(session_id).cloned())
    }

    fn save(&self, session_id: &str, snapshot: &WorldSnapshot) -> Result<(), AdventureError> {
        let mut guard = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        guard.insert(session_id.to_string(), snapshot.clone());
        Ok(())
    }

    fn remove(&self, session_id: &str) -> Result<bool, AdventureError> {
        let mut guard = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.remove(session_id).is_some())
    }
}
