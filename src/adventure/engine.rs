//! Adventure state engine.
//!
//! [`apply_action`] is the whole contract with a transport: it takes one
//! [`Action`] plus the session's stored snapshot (if any) and returns the next
//! snapshot and the narrative lines produced. It performs no I/O.
//!
//! Every blocked or impossible request is reported through narration; the
//! action set is closed, so nothing here can fail.

use log::{debug, info, warn};

use super::codec::{self, WorldSnapshot};
use super::effects;
use super::grid::{WorldGrid, MAP_LEGEND};
use super::inventory::{format_inventory, format_item_examination, Inventory};
use super::seed::{build_grid, HELP_LINES, INTRO_LINE, START_LOCATION};
use super::types::{Cell, Coordinates, Direction, UseEffect};

pub const CLEARED_LINE: &str = "Workspace cleared.";
pub const LOST_PLAYER_LINE: &str = "I'M SO SORRY--there appears to have been an error locating \
your player. You are being placed back at the start space for now...";
pub const NOTHING_TO_GRAB: &str = "There is nothing to grab here.";
pub const NOTHING_GRABBABLE: &str = "There is nothing you can grab here at the moment";
pub const CANNOT_USE: &str = "You cannot use that item here.";
pub const NOTHING_MORE: &str = "Nothing more happens.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    Grab,
    Use,
    Look,
    Inspect,
    DisplayMap,
    DisplayInventory,
    Help,
    Clear,
    Reset,
}

/// Result of one action.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub snapshot: WorldSnapshot,
    /// Lines produced by this request, in display order.
    pub lines: Vec<String>,
    /// The stored snapshot was missing or unusable and a fresh world was built.
    pub reinitialized: bool,
}

/// Live, fully owned world for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    pub player: Coordinates,
    pub grid: WorldGrid,
    pub inventory: Inventory,
    pub narrative_log: Vec<String>,
    pub initialized: bool,
}

impl World {
    /// Build the world from its static definitions with the player at the start.
    pub fn fresh() -> Self {
        let mut grid = build_grid();
        grid.reveal_around(START_LOCATION);
        let mut world = World {
            player: START_LOCATION,
            grid,
            inventory: Inventory::new(),
            narrative_log: vec![INTRO_LINE.to_string()],
            initialized: true,
        };
        let intro = world.look();
        world.narrative_log.extend(intro);
        world
    }

    /// Run one action, appending its lines to the narrative log.
    pub fn perform(&mut self, action: Action) -> Vec<String> {
        match action {
            Action::Reset => {
                *self = World::fresh();
                return self.narrative_log.clone();
            }
            Action::Clear => {
                self.narrative_log = vec![CLEARED_LINE.to_string()];
                return self.narrative_log.clone();
            }
            _ => {}
        }

        let mut lines = self.ensure_located();
        match action {
            Action::Move(direction) => lines.extend(self.move_player(direction)),
            Action::Grab => lines.extend(self.grab()),
            Action::Use => lines.extend(self.use_items()),
            Action::Look => lines.extend(self.look()),
            Action::Inspect => lines.extend(format_item_examination(&self.inventory)),
            Action::DisplayMap => lines.extend(self.display_map()),
            Action::DisplayInventory => lines.extend(format_inventory(&self.inventory)),
            Action::Help => lines.extend(HELP_LINES.iter().map(|l| l.to_string())),
            Action::Clear | Action::Reset => {}
        }
        self.narrative_log.extend(lines.iter().cloned());
        lines
    }

    /// Reconcile the stored coordinates with the `@` marker on the grid.
    ///
    /// Returns the apology line when the player had to be put back at the start.
    fn ensure_located(&mut self) -> Vec<String> {
        let markers = self.grid.player_markers();
        let at = if markers.contains(&self.player) {
            Some(self.player)
        } else {
            markers.first().copied()
        };
        match at {
            Some(at) => {
                for stray in markers.into_iter().filter(|m| *m != at) {
                    debug!("clearing stray player marker at {:?}", stray);
                    self.grid.clear_marker(stray);
                }
                self.player = at;
                Vec::new()
            }
            None => {
                warn!(
                    "player marker missing (stored {:?}); returning to start",
                    self.player
                );
                self.narrative_log.clear();
                self.grid.reveal_around(START_LOCATION);
                self.player = START_LOCATION;
                vec![LOST_PLAYER_LINE.to_string()]
            }
        }
    }

    /// Current room description plus one line per item that has something to say.
    pub fn look(&self) -> Vec<String> {
        let Some(room) = self.grid.room(self.player) else {
            return Vec::new();
        };
        let mut lines = Vec::new();
        if let Some(description) = room.description.as_deref() {
            lines.push(description.to_string());
        }
        lines.extend(
            room.items
                .iter()
                .filter_map(|item| item.room_narration())
                .map(str::to_string),
        );
        lines
    }

    pub fn move_player(&mut self, direction: Direction) -> Vec<String> {
        let Some(target) = self.player.step(direction) else {
            return vec![format!("You cannot move {} (out of map scope)", direction)];
        };
        match self.grid.cell(target) {
            Some(Cell::Room(room)) if room.is_wall() => {
                return vec![format!("You cannot move {} (blocked by wall: #)", direction)];
            }
            Some(Cell::Room(_)) => {}
            Some(Cell::Placeholder) | None => {
                return vec![format!(
                    "The area to the {} has not been developed yet.",
                    direction
                )];
            }
        }
        self.grid.clear_marker(self.player);
        self.grid.reveal_around(target);
        self.player = target;
        debug!("player moved {} to {:?}", direction, target);
        self.look()
    }

    pub fn grab(&mut self) -> Vec<String> {
        let Some(room) = self.grid.room_mut(self.player) else {
            return vec![NOTHING_TO_GRAB.to_string()];
        };
        if room.items.is_empty() {
            return vec![NOTHING_TO_GRAB.to_string()];
        }

        let mut lines = Vec::new();
        let mut kept = Vec::with_capacity(room.items.len());
        for item in room.items.drain(..) {
            if item.restricted || self.inventory.contains(&item.name) {
                kept.push(item);
                continue;
            }
            if let Some(text) = item.when_grabbed.as_deref() {
                lines.push(text.to_string());
            }
            lines.push(format!("Added to inventory: {}", item));
            self.inventory.add(item);
        }
        room.items = kept;

        if lines.is_empty() {
            lines.push(NOTHING_GRABBABLE.to_string());
        }
        lines
    }

    /// Try every held item against every item in the current room.
    ///
    /// Re-reads inventory and room state on each step so that items changed by
    /// a use effect are seen by the rest of the pass.
    pub fn use_items(&mut self) -> Vec<String> {
        let here = self.player;
        let mut lines = Vec::new();
        let mut matched = false;
        let mut changed = false;
        let mut reported = false;

        let mut source_idx = 0;
        while source_idx < self.inventory.len() {
            let mut target_idx = 0;
            while let Some(target) = self
                .inventory
                .get(source_idx)
                .and_then(|source| source.unlocks.iter().nth(target_idx))
                .cloned()
            {
                target_idx += 1;
                let hits: Vec<usize> = self
                    .grid
                    .room(here)
                    .map(|room| {
                        room.items
                            .iter()
                            .enumerate()
                            .filter(|(_, item)| item.name == target)
                            .map(|(i, _)| i)
                            .collect()
                    })
                    .unwrap_or_default();
                if hits.is_empty() {
                    continue;
                }
                matched = true;

                let mut effect: Option<UseEffect> = None;
                if let Some(source) = self.inventory.get_mut(source_idx) {
                    if !source.used {
                        source.used = true;
                        changed = true;
                        effect = source.when_used;
                        if !reported {
                            reported = true;
                            lines.push(match source.action.as_deref() {
                                Some(action) => {
                                    format!("Successfully used {} to {}", source.name, action)
                                }
                                None => format!("Successfully used {}", source.name),
                            });
                        }
                    }
                }

                if let Some(room) = self.grid.room_mut(here) {
                    for i in hits {
                        let Some(item) = room.items.get_mut(i) else {
                            continue;
                        };
                        if item.restricted {
                            item.restricted = false;
                            changed = true;
                            if let Some(text) = item.when_revealed.as_deref() {
                                lines.push(text.to_string());
                            }
                        }
                    }
                }

                if let Some(tag) = effect {
                    lines.extend(self.apply_effect(tag));
                }
            }
            source_idx += 1;
        }

        if !matched {
            lines.push(CANNOT_USE.to_string());
        } else if !changed {
            lines.push(NOTHING_MORE.to_string());
        }
        lines
    }

    fn apply_effect(&mut self, tag: UseEffect) -> Vec<String> {
        let Some(entry) = effects::lookup(tag) else {
            warn!("no effect registered for {:?}", tag);
            return Vec::new();
        };
        info!("applying use effect {:?}", tag);
        *self = (entry.apply)(self.clone());
        let mut lines = vec![entry.narration.to_string()];
        lines.extend(self.look());
        lines
    }

    pub fn display_map(&self) -> Vec<String> {
        let mut lines = self.grid.render_rows();
        lines.extend(MAP_LEGEND.iter().map(|l| l.to_string()));
        lines
    }
}

/// Decode `snapshot`, run `action`, and encode the result.
///
/// A missing, uninitialized or undecodable snapshot is replaced by a fresh
/// world before the action runs.
pub fn apply_action(action: Action, snapshot: Option<WorldSnapshot>) -> Outcome {
    let mut lines = Vec::new();
    let mut reinitialized = false;
    let mut world = match snapshot.map(codec::decode) {
        Some(Ok(world)) if world.initialized => world,
        Some(Ok(_)) | None => {
            reinitialized = true;
            World::fresh()
        }
        Some(Err(e)) => {
            warn!("discarding unusable snapshot: {}", e);
            reinitialized = true;
            World::fresh()
        }
    };
    if reinitialized && action != Action::Reset {
        lines.extend(world.narrative_log.iter().cloned());
    }
    lines.extend(world.perform(action));
    Outcome {
        snapshot: codec::encode(&world),
        lines,
        reinitialized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adventure::seed::{
        AGELESS_ROSE, CAVE_ENTRANCE, GARDEN_PATH, MOONSTONE, MYSTERIOUS_NOTE, ROSE_STEM,
        RUSTED_KEY, SECRET_GARDEN, TANGLED_VINES,
    };
    use crate::adventure::types::{Item, GLYPH_PLAYER};

    fn world_at(at: Coordinates) -> World {
        let mut world = World::fresh();
        world.grid.clear_marker(world.player);
        world.grid.reveal_around(at);
        world.player = at;
        world
    }

    fn room_item<'a>(world: &'a World, at: Coordinates, name: &str) -> &'a Item {
        world
            .grid
            .room(at)
            .unwrap()
            .items
            .iter()
            .find(|i| i.name == name)
            .unwrap()
    }

    #[test]
    fn fresh_world_starts_at_start_with_intro() {
        let world = World::fresh();
        assert_eq!(world.player, START_LOCATION);
        assert_eq!(world.grid.player_markers(), vec![START_LOCATION]);
        assert_eq!(world.narrative_log[0], INTRO_LINE);
        assert!(world.narrative_log.len() >= 2);
        assert!(world.initialized);
    }

    #[test]
    fn blocked_moves_leave_world_untouched() {
        let mut world = World::fresh();
        let before = world.clone();
        let lines = world.move_player(Direction::West);
        assert_eq!(lines, vec!["You cannot move west (out of map scope)"]);
        let lines = world.move_player(Direction::South);
        assert_eq!(lines, vec!["You cannot move south (out of map scope)"]);
        let lines = world.move_player(Direction::East);
        assert_eq!(lines, vec!["You cannot move east (blocked by wall: #)"]);
        assert_eq!(world, before);
    }

    #[test]
    fn placeholder_is_not_developed() {
        let mut world = world_at(CAVE_ENTRANCE);
        let before = world.clone();
        let lines = world.move_player(Direction::East);
        assert_eq!(lines, vec!["The area to the east has not been developed yet."]);
        assert_eq!(world, before);
    }

    #[test]
    fn moving_north_enters_garden_path() {
        let mut world = World::fresh();
        let lines = world.move_player(Direction::North);
        assert_eq!(world.player, GARDEN_PATH);
        assert_eq!(world.grid.player_markers(), vec![GARDEN_PATH]);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("wandering garden pathway"));
        assert!(lines[1].contains("rusted item"));
        assert_ne!(
            world.grid.room(START_LOCATION).unwrap().concealed,
            GLYPH_PLAYER
        );
    }

    #[test]
    fn grab_moves_only_unrestricted_items() {
        let mut world = world_at(SECRET_GARDEN);
        assert_eq!(world.grab(), vec![NOTHING_GRABBABLE]);
        assert!(world.inventory.is_empty());
        assert_eq!(world.grid.room(SECRET_GARDEN).unwrap().items.len(), 2);

        let mut world = world_at(START_LOCATION);
        assert_eq!(world.grab(), vec![NOTHING_TO_GRAB]);
    }

    #[test]
    fn grab_then_grab_again() {
        let mut world = world_at(GARDEN_PATH);
        let lines = world.grab();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("Added to inventory: Rusted Key: "));
        assert_eq!(world.inventory.names(), vec![RUSTED_KEY]);
        assert!(world.grid.room(GARDEN_PATH).unwrap().items.is_empty());

        let inventory = world.inventory.clone();
        assert_eq!(world.grab(), vec![NOTHING_TO_GRAB]);
        assert_eq!(world.inventory, inventory);
    }

    #[test]
    fn grab_skips_items_already_held() {
        let mut world = world_at(GARDEN_PATH);
        world.inventory.add(crate::adventure::seed::rusted_key());
        assert_eq!(world.grab(), vec![NOTHING_GRABBABLE]);
        assert_eq!(world.grid.room(GARDEN_PATH).unwrap().items.len(), 1);
    }

    #[test]
    fn key_unlocks_rose_and_note_with_one_success_line() {
        let mut world = world_at(SECRET_GARDEN);
        world.inventory.add(crate::adventure::seed::rusted_key());
        let lines = world.use_items();

        let successes = lines
            .iter()
            .filter(|l| l.starts_with("Successfully used"))
            .count();
        assert_eq!(successes, 1);
        assert!(lines[0].starts_with("Successfully used Rusted Key to unlock the garden gate"));
        assert!(!room_item(&world, SECRET_GARDEN, AGELESS_ROSE).restricted);
        assert!(!room_item(&world, SECRET_GARDEN, MYSTERIOUS_NOTE).restricted);
        assert!(world.inventory.items()[0].used);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn second_use_is_quiet() {
        let mut world = world_at(SECRET_GARDEN);
        world.inventory.add(crate::adventure::seed::rusted_key());
        world.use_items();
        let lines = world.use_items();
        assert_eq!(lines, vec![NOTHING_MORE]);
    }

    #[test]
    fn use_without_match() {
        let mut world = world_at(GARDEN_PATH);
        assert_eq!(world.use_items(), vec![CANNOT_USE]);
        world.grab();
        assert_eq!(world.use_items(), vec![CANNOT_USE]);
    }

    #[test]
    fn rose_opens_cave_once() {
        let mut world = world_at(CAVE_ENTRANCE);
        world.inventory.add(crate::adventure::seed::rusted_key());
        let mut rose = crate::adventure::seed::ageless_rose();
        rose.restricted = false;
        world.inventory.add(rose);

        let lines = world.use_items();
        assert!(lines[0].starts_with("Successfully used Ageless Rose to coax"));
        assert!(lines.iter().any(|l| l.contains("vines shiver")));
        assert!(lines.iter().any(|l| l.contains("petals scatter")));
        assert!(lines.iter().any(|l| l.contains("drawn back from the cave mouth")));
        assert_eq!(
            world.inventory.names(),
            vec![RUSTED_KEY, ROSE_STEM, MOONSTONE]
        );
        assert!(world.grid.room(CAVE_ENTRANCE).unwrap().items.is_empty());

        // The vines are gone and the stem unlocks nothing.
        assert_eq!(world.use_items(), vec![CANNOT_USE]);
        assert!(!world
            .grid
            .room(CAVE_ENTRANCE)
            .unwrap()
            .items
            .iter()
            .any(|i| i.name == TANGLED_VINES));
    }

    #[test]
    fn clear_leaves_one_line() {
        let mut world = World::fresh();
        world.perform(Action::Help);
        let lines = world.perform(Action::Clear);
        assert_eq!(lines, vec![CLEARED_LINE]);
        assert_eq!(world.narrative_log, vec![CLEARED_LINE]);
    }

    #[test]
    fn perform_appends_to_log() {
        let mut world = World::fresh();
        let before = world.narrative_log.len();
        let lines = world.perform(Action::DisplayInventory);
        assert_eq!(lines, vec!["Inventory is empty"]);
        assert_eq!(world.narrative_log.len(), before + 1);
    }

    #[test]
    fn lost_marker_returns_player_to_start() {
        let mut world = world_at(GARDEN_PATH);
        world.grid.clear_marker(GARDEN_PATH);
        let lines = world.perform(Action::Look);
        assert_eq!(lines[0], LOST_PLAYER_LINE);
        assert_eq!(world.player, START_LOCATION);
        assert_eq!(world.grid.player_markers(), vec![START_LOCATION]);
        assert_eq!(world.narrative_log[0], LOST_PLAYER_LINE);
    }

    #[test]
    fn stale_coordinates_follow_marker() {
        let mut world = world_at(GARDEN_PATH);
        world.player = START_LOCATION;
        let lines = world.perform(Action::Look);
        assert_eq!(world.player, GARDEN_PATH);
        assert!(lines[0].contains("garden pathway"));
    }

    #[test]
    fn apply_action_reinitializes_missing_snapshot() {
        let outcome = apply_action(Action::Move(Direction::North), None);
        assert!(outcome.reinitialized);
        assert_eq!(outcome.lines[0], INTRO_LINE);
        assert_eq!(outcome.snapshot.coordinates, [GARDEN_PATH.row, GARDEN_PATH.col]);
    }

    #[test]
    fn apply_action_reuses_initialized_snapshot() {
        let first = apply_action(Action::Move(Direction::North), None);
        let second = apply_action(Action::Grab, Some(first.snapshot));
        assert!(!second.reinitialized);
        assert!(second.lines.iter().any(|l| l.contains("Added to inventory")));
        assert_eq!(second.snapshot.inventory.len(), 1);
    }

    #[test]
    fn every_matching_source_is_spent_but_reported_once() {
        let mut world = world_at(START_LOCATION);
        let gate = Item::new("Iron Gate", "A rusted iron gate.", true)
            .with_when_revealed("The iron gate swings open.");
        world.grid.room_mut(START_LOCATION).unwrap().items.push(gate);

        let brass = Item::new("Brass Key", "A brass key.", false)
            .with_action("open the gate")
            .with_unlocks(&["Iron Gate"]);
        let silver = Item::new("Silver Key", "A silver key.", false)
            .with_action("open the gate")
            .with_unlocks(&["Iron Gate"])
            .with_when_used(UseEffect::RoseOffered);
        let mut spent = Item::new("Spent Key", "A worn-out key.", false)
            .with_unlocks(&["Iron Gate"])
            .with_when_used(UseEffect::RoseOffered);
        spent.used = true;
        world.inventory.add(brass);
        world.inventory.add(silver);
        world.inventory.add(spent);

        let lines = world.use_items();
        let count = |needle: &str| lines.iter().filter(|l| l.contains(needle)).count();
        assert_eq!(count("Successfully used"), 1);
        assert_eq!(lines[0], "Successfully used Brass Key to open the gate");
        assert_eq!(count("swings open"), 1);
        // Only the silver key flipped with an effect attached; the spent key stays quiet
        assert_eq!(count("petals scatter"), 1);
        let used = |name: &str| {
            world
                .inventory
                .items()
                .iter()
                .any(|item| item.name == name && item.used)
        };
        assert!(used("Brass Key"));
        assert!(used("Silver Key"));
        assert!(world.inventory.contains(MOONSTONE));
        assert!(!room_item(&world, START_LOCATION, "Iron Gate").restricted);
    }

    #[test]
    fn apply_action_rebuilds_world_without_open_start() {
        let mut snapshot = apply_action(Action::Look, None).snapshot;
        snapshot.grid = vec![vec![Cell::Placeholder; 5]; 5];
        let outcome = apply_action(Action::Look, Some(snapshot));
        assert!(outcome.reinitialized);
        assert_eq!(outcome.lines[0], INTRO_LINE);
        assert!(!outcome.lines.iter().any(|l| l == LOST_PLAYER_LINE));

        let next = apply_action(Action::Move(Direction::North), Some(outcome.snapshot));
        assert!(!next.reinitialized);
        assert!(!next.lines.iter().any(|l| l == LOST_PLAYER_LINE));
        let markers = next
            .snapshot
            .grid
            .iter()
            .flatten()
            .filter(|cell| cell.glyph() == GLYPH_PLAYER)
            .count();
        assert_eq!(markers, 1);
    }

    #[test]
    fn apply_action_replaces_corrupt_snapshot() {
        let mut snapshot = apply_action(Action::Look, None).snapshot;
        snapshot.grid.truncate(2);
        let outcome = apply_action(Action::Look, Some(snapshot));
        assert!(outcome.reinitialized);
        assert_eq!(
            outcome.snapshot.coordinates,
            [START_LOCATION.row, START_LOCATION.col]
        );
    }
}
