use serde::{Deserialize, Serialize};

/// State of a single board cell. Owned by the [`Board`](crate::Board), never shared.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_opened: bool,
    pub is_flagged: bool,
}

impl Cell {
    /// A mine or an opened cell. A board is cleared once every cell is settled.
    pub const fn is_settled(self) -> bool {
        self.is_mine || self.is_opened
    }
}

/// Player-visible rendering of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileView {
    Hidden,
    Flagged,
    Opened(u8),
    Exploded,
    // only shown after the game is lost:
    Mine,
    WrongFlag,
}

impl Default for TileView {
    fn default() -> Self {
        Self::Hidden
    }
}
