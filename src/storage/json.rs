//! One JSON file per session under `<root>/<percent-encoded id>.json`.
//!
//! Writes go to a temp file in the same directory and are renamed into place
//! while an exclusive lock is held on a `.lock` sidecar, so readers never see
//! a half-written snapshot.

use fs2::FileExt;
use log::debug;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::adventure::codec::{from_json, to_json};
use crate::adventure::{AdventureError, WorldSnapshot};
use crate::validation::safe_filename;

use super::SnapshotStore;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, AdventureError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn session_path(&self, session_id: &str) -> PathBuf {
        self.root.join(format!("{}.json", safe_filename(session_id)))
    }

    fn lock_path(path: &Path) -> PathBuf {
        let mut lock = path.as_os_str().to_owned();
        lock.push(".lock");
        PathBuf::from(lock)
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<(), AdventureError> {
    let dir = path.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)?;
    let lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .read(true)
        .write(true)
        .open(JsonFileStore::lock_path(path))?;
    lock_file.lock_exclusive()?;

    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("session.json");
    let mut counter = 0u32;
    let tmp_path = loop {
        let cand = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
        match OpenOptions::new().write(true).create_new(true).open(&cand) {
            Ok(mut tmp) => {
                tmp.write_all(content.as_bytes())?;
                tmp.flush()?;
                let _ = tmp.sync_all();
                break cand;
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                counter = counter.saturating_add(1);
            }
            Err(e) => return Err(e.into()),
        }
    };
    std::fs::rename(&tmp_path, path)?;
    if let Ok(dirf) = File::open(dir) {
        let _ = dirf.sync_all();
    }
    drop(lock_file);
    Ok(())
}

impl SnapshotStore for JsonFileStore {
    fn load(&self, session_id: &str) -> Result<Option<WorldSnapshot>, AdventureError> {
        let path = self.session_path(session_id);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        from_json(&text).map(Some)
    }

    fn save(&self, session_id: &str, snapshot: &WorldSnapshot) -> Result<(), AdventureError> {
        let path = self.session_path(session_id);
        let json = to_json(snapshot)?;
        write_atomic(&path, &json)?;
        debug!("saved session snapshot to {}", path.display());
        Ok(())
    }

    fn remove(&self, session_id: &str) -> Result<bool, AdventureError> {
        let path = self.session_path(session_id);
        let removed = match std::fs::remove_file(&path) {
            Ok(()) => true,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => return Err(e.into()),
        };
        let _ = std::fs::remove_file(Self::lock_path(&path));
        Ok(removed)
    }
}
