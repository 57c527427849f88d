use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// The grid of cells for one game. Created once per game, never reused.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: GameConfig,
    cells: Array2<Cell>,
    mines_placed: bool,
    opened_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
}

impl Board {
    /// Creates a board with every cell un-mined, unopened and unflagged.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            cells: Array2::default(config.size.to_nd_index()),
            mines_placed: false,
            opened_count: Saturating(0),
            flagged_count: Saturating(0),
        })
    }

    /// Validates raw parameters and creates the board in one go.
    pub fn create(nrows: i32, ncols: i32, nmines: i32) -> Result<Self> {
        Self::new(GameConfig::new(nrows, ncols, nmines)?)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn nrows(&self) -> Coord {
        self.config.nrows()
    }

    pub fn ncols(&self) -> Coord {
        self.config.ncols()
    }

    pub fn cell_count(&self) -> CellCount {
        self.config.total_cells()
    }

    /// Number of mines this board is meant to hold; actual mines exist only after placement.
    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn opened_count(&self) -> CellCount {
        self.opened_count.0
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn validate_coords(&self, coords: Position) -> Result<Position> {
        if self.config.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn cell_at(&self, coords: Position) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn iter_neighbors(&self, coords: Position) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// Mines among the neighbors of `coords`, whether or not those neighbors are opened.
    pub fn count_adjacent_mines(&self, coords: Position) -> Result<u8> {
        let coords = self.validate_coords(coords)?;
        Ok(self.adjacent_mines(coords))
    }

    /// Every non-mine cell is opened.
    pub fn is_cleared(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_settled())
    }

    /// Every position holding a mine, row-major.
    pub fn mine_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| cell.is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    /// Copies `layout` onto the board. Allowed once, and never onto an opened cell.
    pub fn lay_mines(&mut self, layout: &MineLayout) -> Result<()> {
        if self.mines_placed {
            return Err(GameError::MinesAlreadyPlaced);
        }
        if layout.size() != self.size() || layout.mine_count() != self.config.mines {
            log::warn!(
                "Layout {:?} with {} mines does not fit board {:?} with {} mines",
                layout.size(),
                layout.mine_count(),
                self.size(),
                self.config.mines
            );
            return Err(GameError::InvalidLayout);
        }
        let mines = layout.mine_positions();
        if let Some(pos) = mines.iter().find(|&&pos| self.cell(pos).is_opened) {
            log::warn!("Layout puts a mine on opened cell {:?}", pos);
            return Err(GameError::InvalidLayout);
        }

        for pos in mines {
            self.cells[pos.to_nd_index()].is_mine = true;
        }
        self.mines_placed = true;
        Ok(())
    }

    pub(crate) fn adjacent_mines(&self, coords: Position) -> u8 {
        // at most 8 neighbors
        self.iter_neighbors(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].is_mine)
            .count() as u8
    }

    pub(crate) fn cell(&self, coords: Position) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    /// Marks an in-bounds cell opened, clearing its flag. Returns `false` if it already was.
    pub(crate) fn open(&mut self, coords: Position) -> bool {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_opened {
            return false;
        }

        cell.is_opened = true;
        self.opened_count += 1;
        if cell.is_flagged {
            cell.is_flagged = false;
            self.flagged_count -= 1;
        }
        true
    }

    /// Flips the flag on an unopened in-bounds cell.
    pub(crate) fn toggle_flag(&mut self, coords: Position) -> MarkOutcome {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_opened {
            return MarkOutcome::NoChange;
        }

        cell.is_flagged = !cell.is_flagged;
        if cell.is_flagged {
            self.flagged_count += 1;
            MarkOutcome::Flagged
        } else {
            self.flagged_count -= 1;
            MarkOutcome::Unflagged
        }
    }
}
