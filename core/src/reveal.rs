use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// How flags interact with reveals.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagRule {
    /// Flags are annotations only: flagged cells reveal and cascade like any other.
    #[default]
    Ignore,
    /// Flagged cells reject direct reveals and stop cascades.
    Block,
}

impl FlagRule {
    pub const fn blocks_reveal(self) -> bool {
        matches!(self, Self::Block)
    }
}

/// Opens the cell at `coords`, cascading through zero-count regions.
///
/// The whole cascade resolves before this returns; no partially opened state is observable.
pub fn reveal(board: &mut Board, coords: Position, flag_rule: FlagRule) -> Result<RevealOutcome> {
    use RevealOutcome::*;

    let coords = board.validate_coords(coords)?;
    let cell = board.cell(coords);

    if cell.is_opened {
        return Ok(AlreadyOpen);
    }
    if cell.is_flagged && flag_rule.blocks_reveal() {
        log::debug!("Reveal at {:?} blocked by flag", coords);
        return Ok(Ignored);
    }

    board.open(coords);
    if cell.is_mine {
        log::debug!("Mine exploded at {:?}", coords);
        return Ok(Exploded);
    }

    let count = board.adjacent_mines(coords);
    log::debug!("Open cell at {:?}, mine count: {}", coords, count);
    if count != 0 {
        return Ok(Opened(count));
    }

    Ok(OpenedCascade(cascade(board, coords, flag_rule)))
}

/// Breadth-first flood fill from an already opened zero-count cell.
fn cascade(board: &mut Board, origin: Position, flag_rule: FlagRule) -> Vec<Position> {
    let mut opened = vec![origin];
    let mut visited: HashSet<Position> = HashSet::from([origin]);
    let mut to_visit: VecDeque<_> = board.iter_neighbors(origin).collect();
    log::trace!(
        "Starting flood-fill from {:?}, initial neighbors: {:?}",
        origin,
        to_visit
    );

    while let Some(visit_coords) = to_visit.pop_front() {
        if !visited.insert(visit_coords) {
            continue;
        }

        let cell = board.cell(visit_coords);
        if cell.is_opened || (cell.is_flagged && flag_rule.blocks_reveal()) {
            log::trace!("Skipping cell at {:?}", visit_coords);
            continue;
        }
        // neighbors of a zero-count cell are never mines
        debug_assert!(!cell.is_mine);

        board.open(visit_coords);
        opened.push(visit_coords);
        let visit_count = board.adjacent_mines(visit_coords);
        log::trace!(
            "Flood opened cell at {:?}, mine count: {}",
            visit_coords,
            visit_count
        );

        if visit_count == 0 {
            to_visit.extend(
                board
                    .iter_neighbors(visit_coords)
                    .filter(|pos| !visited.contains(pos)),
            );
        }
    }

    opened
}
