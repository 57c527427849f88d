use alloc::vec::Vec;

use super::*;

/// Fixed mine positions, for replays and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetMinefieldGenerator {
    mines: Vec<Position>,
}

impl PresetMinefieldGenerator {
    pub fn new(mines: Vec<Position>) -> Self {
        Self { mines }
    }
}

impl MinefieldGenerator for PresetMinefieldGenerator {
    fn generate(&mut self, config: GameConfig, protected: Position) -> Result<MineLayout> {
        if !config.contains(protected) {
            return Err(GameError::OutOfBounds);
        }

        let layout = MineLayout::from_mine_coords(config.size, &self.mines)?;
        if layout.mine_count() as usize != self.mines.len() {
            log::warn!("Preset layout has duplicated mine positions");
            return Err(GameError::InvalidLayout);
        }
        if layout.mine_count() != config.mines {
            log::warn!(
                "Preset layout has {} mines, game expects {}",
                layout.mine_count(),
                config.mines
            );
            return Err(GameError::InvalidLayout);
        }
        if layout.contains_mine(protected) {
            log::warn!("Preset layout puts a mine on start cell {:?}", protected);
            return Err(GameError::InvalidLayout);
        }
        Ok(layout)
    }
}
