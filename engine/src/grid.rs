use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// A cell on the board. Coordinates are signed so that off-board neighbors
/// can be represented and rejected by [`Board::in_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Four axis-aligned neighbors in fixed order: +x, -x, +y, -y.
    pub fn neighbors(self) -> [Position; 4] {
        [
            Position::new(self.x + 1, self.y),
            Position::new(self.x - 1, self.y),
            Position::new(self.x, self.y + 1),
            Position::new(self.x, self.y - 1),
        ]
    }
}

/// Manhattan distance.
pub fn distance(a: Position, b: Position) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub width: u32,
    pub height: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self::REFERENCE
    }
}

impl Board {
    pub const REFERENCE: Board = Board {
        width: 6,
        height: 4,
    };

    /// Largest accepted cell count. Occupancy is a dense map, so this also
    /// bounds its allocation.
    pub const MAX_CELLS: u64 = 1 << 20;

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Both sides non-zero and the cell count within [`Board::MAX_CELLS`].
    pub fn validate(&self) -> Result<(), SimError> {
        let cells = u64::from(self.width) * u64::from(self.height);
        if cells == 0 || cells > Self::MAX_CELLS {
            return Err(SimError::InvalidBoard {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && i64::from(pos.x) < i64::from(self.width)
            && i64::from(pos.y) < i64::from(self.height)
    }

    /// Row-major cell index, `None` when `pos` is off the board.
    pub fn occupancy_key(&self, pos: Position) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(pos.y as usize * self.width as usize + pos.x as usize)
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Which cells hold a living fighter. Built once per side turn and then
/// mutated as fighters step or fall.
#[derive(Debug, Clone)]
pub struct Occupancy {
    board: Board,
    cells: Vec<bool>,
}

impl Occupancy {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            cells: vec![false; board.cell_count()],
        }
    }

    pub fn from_positions(board: Board, positions: impl IntoIterator<Item = Position>) -> Self {
        let mut occ = Self::new(board);
        for pos in positions {
            occ.occupy(pos);
        }
        occ
    }

    /// Off-board cells report as occupied so they are never entered.
    pub fn is_occupied(&self, pos: Position) -> bool {
        match self.board.occupancy_key(pos) {
            Some(key) => self.cells[key],
            None => true,
        }
    }

    pub fn occupy(&mut self, pos: Position) {
        if let Some(key) = self.board.occupancy_key(pos) {
            self.cells[key] = true;
        }
    }

    pub fn vacate(&mut self, pos: Position) {
        if let Some(key) = self.board.occupancy_key(pos) {
            self.cells[key] = false;
        }
    }

    pub fn relocate(&mut self, from: Position, to: Position) {
        self.vacate(from);
        self.occupy(to);
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }
}
