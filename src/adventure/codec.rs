//! Snapshot codec: converts a live [`World`] to and from the flat record that
//! session stores persist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::engine::World;
use super::errors::AdventureError;
use super::grid::WorldGrid;
use super::inventory::Inventory;
use super::seed::START_LOCATION;
use super::types::{Cell, Coordinates, Item, GRID_SIZE, SNAPSHOT_SCHEMA_VERSION};

/// Storage-safe form of one session's world.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldSnapshot {
    pub schema_version: u8,
    pub initialized: bool,
    /// `[row, col]` of the player.
    pub coordinates: [usize; 2],
    pub grid: Vec<Vec<Cell>>,
    pub inventory: Vec<Item>,
    pub narrative_log: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

pub fn encode(world: &World) -> WorldSnapshot {
    WorldSnapshot {
        schema_version: SNAPSHOT_SCHEMA_VERSION,
        initialized: world.initialized,
        coordinates: [world.player.row, world.player.col],
        grid: world.grid.to_rows(),
        inventory: world.inventory.items().to_vec(),
        narrative_log: world.narrative_log.clone(),
        updated_at: Utc::now(),
    }
}

pub fn decode(snapshot: WorldSnapshot) -> Result<World, AdventureError> {
    if snapshot.schema_version != SNAPSHOT_SCHEMA_VERSION {
        return Err(AdventureError::SchemaMismatch {
            entity: "snapshot",
            expected: SNAPSHOT_SCHEMA_VERSION,
            found: snapshot.schema_version,
        });
    }
    let [row, col] = snapshot.coordinates;
    if row >= GRID_SIZE || col >= GRID_SIZE {
        return Err(AdventureError::InvalidSnapshot(format!(
            "coordinates ({}, {}) outside {}x{} grid",
            row, col, GRID_SIZE, GRID_SIZE
        )));
    }
    let grid = WorldGrid::from_rows(snapshot.grid).ok_or_else(|| {
        AdventureError::InvalidSnapshot(format!("grid must be {}x{}", GRID_SIZE, GRID_SIZE))
    })?;
    // Start cell must be an open room
    if !grid.room(START_LOCATION).is_some_and(|room| !room.is_wall()) {
        return Err(AdventureError::InvalidSnapshot(format!(
            "start cell {:?} is not an open room",
            START_LOCATION
        )));
    }
    Ok(World {
        player: Coordinates::new(row, col),
        grid,
        inventory: Inventory::from_items(snapshot.inventory),
        narrative_log: snapshot.narrative_log,
        initialized: snapshot.initialized,
    })
}

pub fn to_json(snapshot: &WorldSnapshot) -> Result<String, AdventureError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

pub fn from_json(text: &str) -> Result<WorldSnapshot, AdventureError> {
    Ok(serde_json::from_str(text)?)
}

pub fn to_bytes(snapshot: &WorldSnapshot) -> Result<Vec<u8>, AdventureError> {
    Ok(bincode::serialize(snapshot)?)
}

pub fn from_bytes(bytes: &[u8]) -> Result<WorldSnapshot, AdventureError> {
    let snapshot: WorldSnapshot = bincode::deserialize(bytes)?;
    if snapshot.schema_version != SNAPSHOT_SCHEMA_VERSION {
        return Err(AdventureError::SchemaMismatch {
            entity: "snapshot",
            expected: SNAPSHOT_SCHEMA_VERSION,
            found: snapshot.schema_version,
        });
    }
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adventure::seed::rusted_key;
    use crate::adventure::types::Room;

    #[test]
    fn decode_restores_live_world() {
        let mut world = World::fresh();
        world.inventory.add(rusted_key());
        let restored = decode(encode(&world)).unwrap();
        assert_eq!(restored, world);
    }

    #[test]
    fn json_and_bincode_preserve_snapshot() {
        let snapshot = encode(&World::fresh());
        assert_eq!(from_json(&to_json(&snapshot).unwrap()).unwrap(), snapshot);
        assert_eq!(from_bytes(&to_bytes(&snapshot).unwrap()).unwrap(), snapshot);
    }

    #[test]
    fn decode_rejects_bad_shapes() {
        let mut snapshot = encode(&World::fresh());
        snapshot.grid.pop();
        let err = decode(snapshot).unwrap_err();
        assert!(err.is_corrupt_snapshot());

        let mut snapshot = encode(&World::fresh());
        snapshot.coordinates = [5, 0];
        assert!(matches!(
            decode(snapshot),
            Err(AdventureError::InvalidSnapshot(_))
        ));

        let mut snapshot = encode(&World::fresh());
        snapshot.schema_version = 99;
        assert!(matches!(
            decode(snapshot),
            Err(AdventureError::SchemaMismatch { found: 99, .. })
        ));
    }

    #[test]
    fn decode_rejects_grid_without_open_start() {
        let mut snapshot = encode(&World::fresh());
        snapshot.grid = vec![vec![Cell::Placeholder; GRID_SIZE]; GRID_SIZE];
        let err = decode(snapshot).unwrap_err();
        assert!(matches!(err, AdventureError::InvalidSnapshot(_)));
        assert!(err.is_corrupt_snapshot());

        let mut snapshot = encode(&World::fresh());
        snapshot.grid[START_LOCATION.row][START_LOCATION.col] = Cell::Room(Room::wall());
        assert!(decode(snapshot).is_err());
    }

    #[test]
    fn coordinates_are_row_then_column() {
        let snapshot = encode(&World::fresh());
        assert_eq!(snapshot.coordinates, [START_LOCATION.row, START_LOCATION.col]);
    }
}
