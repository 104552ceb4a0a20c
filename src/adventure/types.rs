use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub const SNAPSHOT_SCHEMA_VERSION: u8 = 1;

/// Width and height of the world grid.
pub const GRID_SIZE: usize = 5;

pub const GLYPH_PLAYER: char = '@';
pub const GLYPH_UNDISCOVERED: char = '?';
pub const GLYPH_WALL: char = '#';
pub const GLYPH_OPEN: char = ' ';

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Row/column delta for one step in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grid coordinate, row 0 at the north edge and column 0 at the west edge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Coordinates {
    pub row: usize,
    pub col: usize,
}

impl Coordinates {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// One step in `direction`, or `None` when the step leaves the grid.
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dr, dc) = direction.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        if row < GRID_SIZE && col < GRID_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }
}

/// Side effect fired the first time an item is successfully used.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UseEffect {
    /// The rose is spent on the cave vines: it becomes a stem, the cave opens
    /// and a moonstone drops into the inventory.
    RoseOffered,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub description: String,
    /// Present in a room but not obtainable until something unlocks it.
    pub restricted: bool,
    /// What using this item accomplishes ("unlock the garden gate").
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub when_grabbed: Option<String>,
    #[serde(default)]
    pub when_revealed: Option<String>,
    /// Room narration while the item is still restricted.
    #[serde(default)]
    pub hidden_description: Option<String>,
    /// Room narration once the item is obtainable.
    #[serde(default)]
    pub environment_effect: Option<String>,
    /// Names of the items this one unlocks when used in their room.
    #[serde(default)]
    pub unlocks: BTreeSet<String>,
    #[serde(default)]
    pub used: bool,
    #[serde(default)]
    pub when_used: Option<UseEffect>,
}

impl Item {
    pub fn new(name: &str, description: &str, restricted: bool) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            restricted,
            action: None,
            when_grabbed: None,
            when_revealed: None,
            hidden_description: None,
            environment_effect: None,
            unlocks: BTreeSet::new(),
            used: false,
            when_used: None,
        }
    }

    pub fn with_action(mut self, action: &str) -> Self {
        self.action = Some(action.to_string());
        self
    }

    pub fn with_when_grabbed(mut self, text: &str) -> Self {
        self.when_grabbed = Some(text.to_string());
        self
    }

    pub fn with_when_revealed(mut self, text: &str) -> Self {
        self.when_revealed = Some(text.to_string());
        self
    }

    pub fn with_hidden_description(mut self, text: &str) -> Self {
        self.hidden_description = Some(text.to_string());
        self
    }

    pub fn with_environment_effect(mut self, text: &str) -> Self {
        self.environment_effect = Some(text.to_string());
        self
    }

    pub fn with_unlocks(mut self, names: &[&str]) -> Self {
        self.unlocks = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn with_when_used(mut self, effect: UseEffect) -> Self {
        self.when_used = Some(effect);
        self
    }

    /// The single line this item contributes to a room description, if any.
    pub fn room_narration(&self) -> Option<&str> {
        if !self.restricted {
            self.environment_effect.as_deref()
        } else {
            self.hidden_description.as_deref()
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.description)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Room {
    /// Glyph currently shown on the map.
    pub concealed: char,
    /// Glyph shown once the room has been discovered.
    pub revealed: char,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Room {
    /// An undiscovered open room.
    pub fn open(description: &str, items: Vec<Item>) -> Self {
        Self {
            concealed: GLYPH_UNDISCOVERED,
            revealed: GLYPH_OPEN,
            description: if description.is_empty() {
                None
            } else {
                Some(description.to_string())
            },
            items,
        }
    }

    /// An undiscovered wall.
    pub fn wall() -> Self {
        Self {
            concealed: GLYPH_UNDISCOVERED,
            revealed: GLYPH_WALL,
            description: None,
            items: Vec::new(),
        }
    }

    pub fn is_wall(&self) -> bool {
        self.revealed == GLYPH_WALL
    }

    pub fn has_player(&self) -> bool {
        self.concealed == GLYPH_PLAYER
    }
}

/// One grid cell: a real room, or a marker for an area that is not built yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    Room(Room),
    Placeholder,
}

impl Cell {
    pub fn glyph(&self) -> char {
        match self {
            Cell::Room(room) => room.concealed,
            Cell::Placeholder => GLYPH_UNDISCOVERED,
        }
    }

    pub fn as_room(&self) -> Option<&Room> {
        match self {
            Cell::Room(room) => Some(room),
            Cell::Placeholder => None,
        }
    }

    pub fn as_room_mut(&mut self) -> Option<&mut Room> {
        match self {
            Cell::Room(room) => Some(room),
            Cell::Placeholder => None,
        }
    }
}
