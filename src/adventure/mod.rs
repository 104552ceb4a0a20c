//! Adventure state engine: a 5x5 grid of rooms, items that unlock other items,
//! and the snapshot form a session store persists.
//!
//! The engine is pure. A transport hands [`apply_action`] the stored
//! [`WorldSnapshot`] (if any) together with one [`Action`], and stores the
//! returned snapshot.

pub mod codec;
pub mod effects;
pub mod engine;
pub mod errors;
pub mod grid;
pub mod inventory;
pub mod seed;
pub mod types;

pub use codec::{decode, encode, WorldSnapshot};
pub use engine::{apply_action, Action, Outcome, World};
pub use errors::AdventureError;
pub use grid::{WorldGrid, MAP_LEGEND, MAP_SPACER};
pub use inventory::{format_inventory, format_item_examination, Inventory};
pub use types::*;
