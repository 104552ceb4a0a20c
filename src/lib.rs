//! # Gridventure - Session-Backed Grid Text Adventure
//!
//! A small text adventure on a 5x5 grid. The player starts in an overgrown
//! courtyard, explores neighbouring rooms, collects items, and uses them to
//! reveal what is hidden. Each session's world is stored as a snapshot and
//! rebuilt from it on every action, so any number of players can share one
//! process without sharing state.
//!
//! ## Quick Start
//!
//! ```rust
//! use gridventure::adventure::{Action, Direction};
//! use gridventure::session::AdventureService;
//! use gridventure::storage::MemoryStore;
//!
//! let service = AdventureService::new(MemoryStore::new());
//! service.enter("player-1").unwrap();
//! service.perform("player-1", Action::Move(Direction::North)).unwrap();
//! let lines = service.perform("player-1", Action::Grab).unwrap();
//! assert!(lines.iter().any(|l| l.starts_with("Added to inventory: Rusted Key")));
//! ```
//!
//! ## Module Organization
//!
//! - [`adventure`] - Pure game engine, world seed and snapshot codec
//! - [`session`] - Load/act/save loop over a snapshot store
//! - [`storage`] - In-memory, JSON file and sled snapshot stores
//! - [`console`] - Command parsing for the interactive terminal client
//! - [`config`] - Configuration management and validation
//! - [`validation`] - Session id validation and filename sanitizing
//! - [`logutil`] - Log escaping helpers
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ Console / CLI   │ ← Reads commands, prints lines
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │ AdventureService│ ← Per-session load → apply → save
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │ SnapshotStore   │ ← memory | json | sled
//! └─────────────────┘
//! ```

pub mod adventure;
pub mod config;
pub mod console;
pub mod logutil;
pub mod session;
pub mod storage;
pub mod validation;
