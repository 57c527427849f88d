use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible snapshot of a game, what a presentation layer renders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: Coord2,
    pub mines: CellCount,
    pub state: GameState,
    pub move_count: u32,
    pub tiles: Array2<TileView>,
}

impl BoardView {
    pub fn from_game<G: MinefieldGenerator>(game: &Game<G>) -> Self {
        let board = game.board();
        let state = game.state();
        let size = board.size();
        let mut tiles = Array2::from_elem(size.to_nd_index(), TileView::Hidden);

        let (row_end, col_end) = size;
        for row in 0..row_end {
            for col in 0..col_end {
                let coords = (row, col);
                tiles[coords.to_nd_index()] = tile_view(board, coords, state);
            }
        }

        Self {
            size,
            mines: board.mine_count(),
            state,
            move_count: game.move_count(),
            tiles,
        }
    }

    pub fn tile_at(&self, coords: Position) -> TileView {
        self.tiles[coords.to_nd_index()]
    }
}

fn tile_view(board: &Board, coords: Position, state: GameState) -> TileView {
    let cell = board.cell(coords);
    let lost = matches!(state, GameState::Lost);

    match cell {
        Cell {
            is_opened: true,
            is_mine: true,
            ..
        } => TileView::Exploded,
        Cell {
            is_opened: true, ..
        } => TileView::Opened(board.adjacent_mines(coords)),
        Cell {
            is_flagged: true,
            is_mine: false,
            ..
        } if lost => TileView::WrongFlag,
        Cell {
            is_flagged: true, ..
        } => TileView::Flagged,
        Cell { is_mine: true, .. } if lost => TileView::Mine,
        _ => TileView::Hidden,
    }
}
