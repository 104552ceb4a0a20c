//! Test utilities & fixtures shared by the integration tests.

use gridventure::adventure::{apply_action, Action, WorldSnapshot};

/// Feed `actions` through the engine starting from a fresh world, returning
/// the final snapshot and the lines of the last action.
pub fn play_through(actions: &[Action]) -> (WorldSnapshot, Vec<String>) {
    let mut outcome = apply_action(Action::Reset, None);
    for action in actions {
        outcome = apply_action(*action, Some(outcome.snapshot));
    }
    (outcome.snapshot, outcome.lines)
}

/// Count `@` glyphs across the stored grid.
#[allow(dead_code)]
pub fn player_markers(snapshot: &WorldSnapshot) -> usize {
    snapshot
        .grid
        .iter()
        .flatten()
        .filter(|cell| cell.glyph() == '@')
        .count()
}
