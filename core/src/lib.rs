//! Game-state engine for a single-player grid-uncovering puzzle: a board seeded with hidden mines,
//! a guaranteed-safe first reveal, cascading reveals of zero-count regions, and win/loss detection.
//!
//! The presentation layer talks to [`Game`] only. It forwards move requests ([`Game::reveal`],
//! [`Game::toggle_flag`]) and renders the returned [`GameEvent`]s or a [`BoardView`] snapshot.
#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use reveal::*;
pub use types::*;
pub use view::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod reveal;
mod types;
mod view;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validates raw new-game parameters as entered by a player.
    pub fn new(nrows: i32, ncols: i32, nmines: i32) -> Result<Self> {
        if nrows < 1 || ncols < 1 {
            return Err(GameError::NonPositiveDimension);
        }
        if nrows > i32::from(MAX_SIDE) || ncols > i32::from(MAX_SIDE) {
            return Err(GameError::DimensionTooLarge);
        }
        let mines = CellCount::try_from(nmines).map_err(|_| GameError::NegativeMineCount)?;

        let config = Self::new_unchecked((nrows as Coord, ncols as Coord), mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 < 1 || self.size.1 < 1 {
            return Err(GameError::NonPositiveDimension);
        }
        if self.size.0 > MAX_SIDE || self.size.1 > MAX_SIDE {
            return Err(GameError::DimensionTooLarge);
        }
        if self.mines >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }

    pub const fn nrows(&self) -> Coord {
        self.size.0
    }

    pub const fn ncols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.0 < self.size.0 && pos.1 < self.size.1
    }
}

/// Where the mines of one game are, independent of any play state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    size: Coord2,
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Builds a layout from mine positions; duplicated positions count once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Position]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        let mut mine_count = 0;

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            let slot = &mut mine_mask[coords.to_nd_index()];
            if !*slot {
                *slot = true;
                mine_count += 1;
            }
        }

        Ok(Self {
            size,
            mine_mask,
            mine_count,
        })
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Position) -> bool {
        coords.0 < self.size.0 && coords.1 < self.size.1 && self[coords]
    }

    pub fn mine_positions(&self) -> Vec<Position> {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .collect()
    }
}

impl Index<Position> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Position) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl MarkOutcome {
    /// New flag value of the cell, `None` when the toggle was a no-op.
    pub const fn flag_value(self) -> Option<bool> {
        match self {
            Self::NoChange => None,
            Self::Flagged => Some(true),
            Self::Unflagged => Some(false),
        }
    }
}

/// Outcome of revealing a single cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// The cell was opened before, nothing changed.
    AlreadyOpen,
    /// The cell was a mine. It stays marked opened.
    Exploded,
    /// The cell was opened and has this many adjacent mines (never zero).
    Opened(u8),
    /// The cell had no adjacent mines; every newly opened position, in breadth-first order
    /// starting with the revealed cell.
    OpenedCascade(Vec<Position>),
    /// The move was rejected: the game is over, or the cell is flagged and flags block reveals.
    Ignored,
}

impl RevealOutcome {
    pub fn has_update(&self) -> bool {
        use RevealOutcome::*;
        match self {
            AlreadyOpen => false,
            Exploded => true,
            Opened(_) => true,
            OpenedCascade(_) => true,
            Ignored => false,
        }
    }

    /// Number of cells this reveal opened.
    pub fn opened_count(&self) -> usize {
        use RevealOutcome::*;
        match self {
            AlreadyOpen | Ignored => 0,
            Exploded | Opened(_) => 1,
            OpenedCascade(opened) => opened.len(),
        }
    }
}
