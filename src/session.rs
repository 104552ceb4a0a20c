use log::{debug, info, warn};

use crate::adventure::{apply_action, codec, Action, AdventureError, World, WorldSnapshot};
use crate::logutil::preview_lines;
use crate::storage::SnapshotStore;
use crate::validation::validate_session_id;

/// # Adventure Sessions
///
/// Binds the pure engine to a [`SnapshotStore`]. Every call loads the
/// session's snapshot, runs the engine, and saves the result, so each session
/// is reconstructed entirely from its own stored state.
///
/// ## Usage
///
/// ```rust
/// use gridventure::adventure::{Action, Direction};
/// use gridventure::session::AdventureService;
/// use gridventure::storage::MemoryStore;
///
/// let service = AdventureService::new(MemoryStore::new());
/// let story = service.enter("demo").unwrap();
/// assert!(story[0].starts_with("Your journey begins"));
///
/// let lines = service.perform("demo", Action::Move(Direction::North)).unwrap();
/// assert!(lines[0].contains("garden pathway"));
/// ```
///
/// ## Missing and corrupt state
///
/// A session with no snapshot, an uninitialized one, or one that fails to
/// decode is started over from a fresh world. Only storage failures (I/O,
/// sled) and malformed session ids are returned as errors.
///
/// ## Ordering
///
/// Calls for the same session must not interleave; the transport is expected
/// to serialize them.
pub struct AdventureService<S: SnapshotStore> {
    store: S,
}

impl<S: SnapshotStore> AdventureService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn load_usable(&self, session_id: &str) -> Result<Option<WorldSnapshot>, AdventureError> {
        validate_session_id(session_id)
            .map_err(|e| AdventureError::InvalidSessionId(e.to_string()))?;
        match self.store.load(session_id) {
            Ok(snapshot) => Ok(snapshot),
            Err(e) if e.is_corrupt_snapshot() => {
                warn!("session {}: stored snapshot unusable ({}); starting over", session_id, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Enter a session: reuse its world if initialized, otherwise build and
    /// save a fresh one. Returns the full narrative log.
    pub fn enter(&self, session_id: &str) -> Result<Vec<String>, AdventureError> {
        if let Some(snapshot) = self.load_usable(session_id)? {
            match codec::decode(snapshot) {
                Ok(world) if world.initialized => {
                    debug!("session {}: resuming", session_id);
                    return Ok(world.narrative_log);
                }
                Ok(_) => {}
                Err(e) => warn!("session {}: {}; starting over", session_id, e),
            }
        }
        let world = World::fresh();
        self.store.save(session_id, &codec::encode(&world))?;
        info!("session {}: new adventure", session_id);
        Ok(world.narrative_log)
    }

    /// Run one action and persist the result. Returns only the new lines.
    pub fn perform(&self, session_id: &str, action: Action) -> Result<Vec<String>, AdventureError> {
        let stored = self.load_usable(session_id)?;
        let outcome = apply_action(action, stored);
        if outcome.reinitialized && action != Action::Reset {
            info!("session {}: initialized on first action", session_id);
        }
        self.store.save(session_id, &outcome.snapshot)?;
        debug!(
            "session {}: {:?} -> {}",
            session_id,
            action,
            preview_lines(&outcome.lines)
        );
        Ok(outcome.lines)
    }

    /// The stored narrative log, if the session exists and decodes.
    pub fn narrative(&self, session_id: &str) -> Result<Option<Vec<String>>, AdventureError> {
        Ok(self
            .load_usable(session_id)?
            .map(|snapshot| snapshot.narrative_log))
    }

    pub fn forget(&self, session_id: &str) -> Result<bool, AdventureError> {
        validate_session_id(session_id)
            .map_err(|e| AdventureError::InvalidSessionId(e.to_string()))?;
        let removed = self.store.remove(session_id)?;
        if removed {
            info!("session {}: removed", session_id);
        }
        Ok(removed)
    }
}
