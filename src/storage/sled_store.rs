use std::path::Path;

use log::debug;

use crate::adventure::codec::{from_bytes, to_bytes};
use crate::adventure::{AdventureError, WorldSnapshot};

use super::SnapshotStore;

const TREE_SESSIONS: &str = "sessions";
const KEY_PREFIX: &str = "session:";

/// Sled-backed persistence for session snapshots.
pub struct SledStore {
    _db: sled::Db,
    sessions: sled::Tree,
}

impl SledStore {
    /// Open (or create) the store rooted at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, AdventureError> {
        let path_ref = path.as_ref();
        std::fs::create_dir_all(path_ref)?;
        let db = sled::open(path_ref)?;
        let sessions = db.open_tree(TREE_SESSIONS)?;
        Ok(Self { _db: db, sessions })
    }

    fn session_key(session_id: &str) -> Vec<u8> {
        format!("{}{}", KEY_PREFIX, session_id).into_bytes()
    }

    /// List all stored session ids.
    pub fn list_session_ids(&self) -> Result<Vec<String>, AdventureError> {
        let mut ids = Vec::new();
        for entry in self.sessions.scan_prefix(KEY_PREFIX.as_bytes()) {
            let (key, _) = entry?;
            let text = String::from_utf8_lossy(&key);
            if let Some(id) = text.strip_prefix(KEY_PREFIX) {
                ids.push(id.to_string());
            }
        }
        Ok(ids)
    }
}

impl SnapshotStore for SledStore {
    fn load(&self, session_id: &str) -> Result<Option<WorldSnapshot>, AdventureError> {
        let Some(bytes) = self.sessions.get(Self::session_key(session_id))? else {
            return Ok(None);
        };
        from_bytes(&bytes).map(Some)
    }

    fn save(&self, session_id: &str, snapshot: &WorldSnapshot) -> Result<(), AdventureError> {
        let bytes = to_bytes(snapshot)?;
        self.sessions.insert(Self::session_key(session_id), bytes)?;
        self.sessions.flush()?;
        debug!("saved session {} to sled", session_id);
        Ok(())
    }

    fn remove(&self, session_id: &str) -> Result<bool, AdventureError> {
        let removed = self.sessions.remove(Self::session_key(session_id))?;
        self.sessions.flush()?;
        Ok(removed.is_some())
    }
}
