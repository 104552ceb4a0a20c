//! Static world definitions: items, rooms, the grid layout and fixed text.
//!
//! Everything here is rebuilt from scratch on every reset, so sessions never
//! share item or room instances.

use super::grid::WorldGrid;
use super::types::{Cell, Coordinates, Item, Room, UseEffect};

pub const START_LOCATION: Coordinates = Coordinates::new(4, 0);
pub const GARDEN_PATH: Coordinates = Coordinates::new(3, 0);
pub const SECRET_GARDEN: Coordinates = Coordinates::new(2, 0);
pub const CAVE_ENTRANCE: Coordinates = Coordinates::new(3, 1);

pub const RUSTED_KEY: &str = "Rusted Key";
pub const AGELESS_ROSE: &str = "Ageless Rose";
pub const MYSTERIOUS_NOTE: &str = "Mysterious Note";
pub const TANGLED_VINES: &str = "Tangled Vines";
pub const ROSE_STEM: &str = "Rose Stem";
pub const MOONSTONE: &str = "Moonstone";

pub const INTRO_LINE: &str = "Your journey begins... Press h for help with commands";

pub const HELP_LINES: &[&str] = &[
    "H: display quick rundown of methods",
    "M: view map",
    "I: view inventory",
    "W, A, S, D: North, West, South, East",
    "G: grab",
    "U: use",
    "N: inspect (allows you to view the descriptions of all current items in your inventory)",
    "L: look around the current room again",
    "C: clear the workspace",
    "R: reset the adventure",
];

pub const CAVE_OPENED_DESCRIPTION: &str = "The vines have drawn back from the cave mouth. \
A faint silver light glows from somewhere deep inside.";

pub fn rusted_key() -> Item {
    Item::new(
        RUSTED_KEY,
        "An ancient, ornate key...maybe it can be used to unlock something?",
        false,
    )
    .with_action("unlock the garden gate. The pedestal stands before you, atop it the rose and the note")
    .with_when_grabbed(
        "After carefully picking it up and brushing off a substantial amount of dirt, \
you are able to make out the outline of a rusted key",
    )
    .with_environment_effect(
        "When you look down at the mossy pathway, you can only barely make out \
the edges of an old, rusted item...",
    )
    .with_unlocks(&[AGELESS_ROSE, MYSTERIOUS_NOTE])
}

pub fn ageless_rose() -> Item {
    Item::new(
        AGELESS_ROSE,
        "A beautiful rose. Feels as though it will never wilt, no matter how long \
it is stuffed into your pocket",
        true,
    )
    .with_action("coax the tangled vines away from the cave mouth")
    .with_when_revealed(
        "After the gate slowly creaks open, you are able to make out a vase resting \
atop the pedestal, and within it is a single rose.",
    )
    .with_hidden_description(
        "Behind an ornate gate you are able to make out the outline of what appears \
to be a pedestal...",
    )
    .with_environment_effect("A single rose rests in a vase atop the pedestal.")
    .with_unlocks(&[TANGLED_VINES])
    .with_when_used(UseEffect::RoseOffered)
}

pub fn mysterious_note() -> Item {
    Item::new(
        MYSTERIOUS_NOTE,
        "You are amazing <3 always be you, even when things get stressful! -charlotte (creator)",
        true,
    )
    .with_when_revealed("Beneath the vase, there appears to be a short note addressed to you.")
    .with_hidden_description("Something pale flutters beneath the pedestal, just out of reach.")
    .with_environment_effect("A folded note lies beneath the vase, addressed to you.")
}

pub fn tangled_vines() -> Item {
    Item::new(
        TANGLED_VINES,
        "A knot of thorny vines, thicker than your wrist.",
        true,
    )
    .with_when_revealed("The vines shiver at the rose's scent and slowly uncurl from the cave mouth.")
    .with_hidden_description(
        "Thick, tangled vines seal the cave mouth. They seem to shy away from anything \
living and beautiful.",
    )
}

/// What remains of the rose once it has been offered to the vines.
pub fn rose_stem() -> Item {
    let mut stem = Item::new(
        ROSE_STEM,
        "A thornless green stem. The petals are gone, but it still smells faintly of summer.",
        false,
    );
    stem.used = true;
    stem
}

/// Follow-on reward placed straight into the inventory when the cave opens.
pub fn moonstone() -> Item {
    Item::new(
        MOONSTONE,
        "A smooth, pale stone that glows faintly, as if it remembers the moon.",
        false,
    )
}

/// Assemble a fresh grid. The player marker is placed by the caller.
pub fn build_grid() -> WorldGrid {
    let p = || Cell::Placeholder;
    let w = || Cell::Room(Room::wall());

    let start = Room::open(
        "You see a garden in front of you, and a gravel path appears to beckon you further in...",
        Vec::new(),
    );
    let garden_path = Room::open(
        "You see in front of you a mysterious wandering garden pathway lined with all \
sorts of plants and flowers.",
        vec![rusted_key()],
    );
    let secret_garden = Room::open(
        "A narrow gap in the hedge opens onto a small walled garden.",
        vec![ageless_rose(), mysterious_note()],
    );
    let cave_entrance = Room::open(
        "In front of you is an ominous, looming cave. Stalactites hang from its roof \
and it appears to beckon you further inwards...",
        vec![tangled_vines()],
    );

    WorldGrid::from_layout([
        [p(), p(), p(), w(), w()],
        [w(), w(), p(), p(), w()],
        [Cell::Room(secret_garden), w(), p(), w(), p()],
        [Cell::Room(garden_path), Cell::Room(cave_entrance), p(), w(), p()],
        [Cell::Room(start), w(), p(), p(), p()],
    ])
}
