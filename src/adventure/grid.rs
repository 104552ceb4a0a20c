//! The 5x5 world grid and its fog-of-war.

use super::types::{Cell, Coordinates, Room, GLYPH_PLAYER, GRID_SIZE};

/// Separator placed between map glyphs on a rendered row.
pub const MAP_SPACER: &str = "  ";

/// Legend lines appended after the rendered map rows.
pub const MAP_LEGEND: &[&str] = &[
    "key:",
    "@: current location",
    "?: not yet discovered",
    "#: wall",
    "(blank): open area/able to go through",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldGrid {
    cells: Vec<Cell>, // row-major GRID_SIZE*GRID_SIZE
}

impl WorldGrid {
    /// Build a grid from exactly `GRID_SIZE` rows of `GRID_SIZE` cells.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        if rows.len() != GRID_SIZE || rows.iter().any(|r| r.len() != GRID_SIZE) {
            return None;
        }
        Some(Self {
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Build a grid from a fixed-size layout.
    pub fn from_layout(rows: [[Cell; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self {
            cells: rows.into_iter().flatten().collect(),
        }
    }

    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(GRID_SIZE)
            .map(|row| row.to_vec())
            .collect()
    }

    fn idx(at: Coordinates) -> usize {
        at.row * GRID_SIZE + at.col
    }

    pub fn cell(&self, at: Coordinates) -> Option<&Cell> {
        if at.row >= GRID_SIZE || at.col >= GRID_SIZE {
            return None;
        }
        self.cells.get(Self::idx(at))
    }

    pub fn room(&self, at: Coordinates) -> Option<&Room> {
        self.cell(at).and_then(Cell::as_room)
    }

    pub fn room_mut(&mut self, at: Coordinates) -> Option<&mut Room> {
        if at.row >= GRID_SIZE || at.col >= GRID_SIZE {
            return None;
        }
        self.cells.get_mut(Self::idx(at)).and_then(Cell::as_room_mut)
    }

    /// All coordinates whose room currently shows the player marker.
    pub fn player_markers(&self) -> Vec<Coordinates> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.as_room().is_some_and(Room::has_player))
            .map(|(i, _)| Coordinates::new(i / GRID_SIZE, i % GRID_SIZE))
            .collect()
    }

    /// Permanently discover every room in the 3x3 block around `center`
    /// (clamped to the grid), then mark `center` as the player's room.
    pub fn reveal_around(&mut self, center: Coordinates) {
        let rows = center.row.saturating_sub(1)..=(center.row + 1).min(GRID_SIZE - 1);
        for row in rows {
            let cols = center.col.saturating_sub(1)..=(center.col + 1).min(GRID_SIZE - 1);
            for col in cols {
                if let Some(room) = self.room_mut(Coordinates::new(row, col)) {
                    room.concealed = room.revealed;
                }
            }
        }
        if let Some(room) = self.room_mut(center) {
            room.concealed = GLYPH_PLAYER;
        }
    }

    /// Drop the player marker from `at`, leaving the room discovered.
    pub fn clear_marker(&mut self, at: Coordinates) {
        if let Some(room) = self.room_mut(at) {
            if room.has_player() {
                room.concealed = room.revealed;
            }
        }
    }

    /// Map rows, one string per grid row.
    pub fn render_rows(&self) -> Vec<String> {
        self.cells
            .chunks(GRID_SIZE)
            .map(|row| {
                row.iter()
                    .map(|cell| cell.glyph().to_string())
                    .collect::<Vec<_>>()
                    .join(MAP_SPACER)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adventure::types::{GLYPH_OPEN, GLYPH_UNDISCOVERED, GLYPH_WALL};

    fn open_grid() -> WorldGrid {
        let rows = (0..GRID_SIZE)
            .map(|_| {
                (0..GRID_SIZE)
                    .map(|_| Cell::Room(Room::open("room", Vec::new())))
                    .collect()
            })
            .collect();
        WorldGrid::from_rows(rows).unwrap()
    }

    #[test]
    fn from_rows_rejects_wrong_dimensions() {
        assert!(WorldGrid::from_rows(vec![vec![Cell::Placeholder; 5]; 4]).is_none());
        let mut rows = vec![vec![Cell::Placeholder; 5]; 5];
        rows[2].pop();
        assert!(WorldGrid::from_rows(rows).is_none());
    }

    #[test]
    fn reveal_clamps_at_corner() {
        let mut grid = open_grid();
        grid.reveal_around(Coordinates::new(4, 0));
        assert_eq!(grid.room(Coordinates::new(4, 0)).unwrap().concealed, GLYPH_PLAYER);
        for at in [
            Coordinates::new(3, 0),
            Coordinates::new(3, 1),
            Coordinates::new(4, 1),
        ] {
            assert_eq!(grid.room(at).unwrap().concealed, GLYPH_OPEN);
        }
        assert_eq!(
            grid.room(Coordinates::new(2, 0)).unwrap().concealed,
            GLYPH_UNDISCOVERED
        );
        assert_eq!(
            grid.room(Coordinates::new(4, 2)).unwrap().concealed,
            GLYPH_UNDISCOVERED
        );
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut once = open_grid();
        once.reveal_around(Coordinates::new(2, 2));
        let mut twice = once.clone();
        twice.reveal_around(Coordinates::new(2, 2));
        assert_eq!(once, twice);
    }

    #[test]
    fn reveal_skips_placeholders_and_shows_walls() {
        let mut rows = vec![vec![Cell::Placeholder; GRID_SIZE]; GRID_SIZE];
        rows[1][1] = Cell::Room(Room::open("here", Vec::new()));
        rows[0][1] = Cell::Room(Room::wall());
        let mut grid = WorldGrid::from_rows(rows).unwrap();
        grid.reveal_around(Coordinates::new(1, 1));
        assert_eq!(grid.room(Coordinates::new(0, 1)).unwrap().concealed, GLYPH_WALL);
        assert!(matches!(
            grid.cell(Coordinates::new(0, 0)),
            Some(Cell::Placeholder)
        ));
        assert_eq!(grid.player_markers(), vec![Coordinates::new(1, 1)]);
    }

    #[test]
    fn render_rows_uses_spacer() {
        let mut grid = open_grid();
        grid.reveal_around(Coordinates::new(0, 0));
        let rows = grid.render_rows();
        assert_eq!(rows.len(), GRID_SIZE);
        assert_eq!(rows[0], ["@", " ", "?", "?", "?"].join(MAP_SPACER));
    }
}
