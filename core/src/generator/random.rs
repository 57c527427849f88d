use alloc::vec::Vec;
use rand::prelude::*;
use rand::seq::index;

use super::*;

/// Uniformly random placement over every cell except the protected one.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator {
    rng: SmallRng,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(&mut self, config: GameConfig, protected: Position) -> Result<MineLayout> {
        if !config.contains(protected) {
            return Err(GameError::OutOfBounds);
        }

        let total_cells = config.total_cells();
        // the protected cell is never a candidate
        let candidates = total_cells - 1;
        if config.mines > candidates {
            log::warn!(
                "Cannot keep start cell safe, requested {} mines but only {} cells are free",
                config.mines,
                candidates
            );
            return Err(GameError::TooManyMines);
        }

        let skipped = flat_index(protected, config.size);
        let mines: Vec<Position> = index::sample(
            &mut self.rng,
            candidates as usize,
            config.mines as usize,
        )
        .into_iter()
        .map(|i| {
            let i = i as CellCount;
            // shift indices past the protected cell to close the gap
            let i = if i >= skipped { i + 1 } else { i };
            from_flat_index(i, config.size)
        })
        .collect();

        log::debug!(
            "Placed {} mines on {:?}, start cell {:?} kept safe",
            mines.len(),
            config.size,
            protected
        );
        MineLayout::from_mine_coords(config.size, &mines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rows: i32, cols: i32, mines: i32) -> GameConfig {
        GameConfig::new(rows, cols, mines).unwrap()
    }

    #[test]
    fn places_exact_count_and_spares_protected_cell() {
        for seed in 0..200 {
            let mut generator = RandomMinefieldGenerator::new(seed);
            let protected = ((seed % 5) as Coord, (seed % 7) as Coord);

            let layout = generator.generate(config(5, 7, 20), protected).unwrap();

            assert_eq!(layout.mine_count(), 20);
            assert!(!layout.contains_mine(protected));
        }
    }

    #[test]
    fn fills_every_other_cell_when_only_one_is_free() {
        let mut generator = RandomMinefieldGenerator::new(7);

        let layout = generator.generate(config(3, 3, 8), (1, 2)).unwrap();

        assert_eq!(layout.mine_count(), 8);
        assert!(!layout.contains_mine((1, 2)));
    }

    #[test]
    fn zero_mines_gives_empty_layout() {
        let mut generator = RandomMinefieldGenerator::new(1);

        let layout = generator.generate(config(4, 4, 0), (0, 0)).unwrap();

        assert_eq!(layout.mine_count(), 0);
        assert!(layout.mine_positions().is_empty());
    }

    #[test]
    fn same_seed_same_layout() {
        let a = RandomMinefieldGenerator::new(42)
            .generate(config(9, 9, 10), (4, 4))
            .unwrap();
        let b = RandomMinefieldGenerator::new(42)
            .generate(config(9, 9, 10), (4, 4))
            .unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn every_candidate_can_receive_a_mine() {
        let mut generator = RandomMinefieldGenerator::new(3);
        let mut seen = [[false; 3]; 2];

        for _ in 0..200 {
            let layout = generator.generate(config(2, 3, 1), (0, 0)).unwrap();
            for (row, col) in layout.mine_positions() {
                seen[row as usize][col as usize] = true;
            }
        }

        assert!(!seen[0][0]);
        assert_eq!(seen.iter().flatten().filter(|&&hit| hit).count(), 5);
    }

    #[test]
    fn rejects_protected_cell_outside_board() {
        let mut generator = RandomMinefieldGenerator::new(0);

        assert_eq!(
            generator.generate(config(2, 2, 1), (2, 0)),
            Err(GameError::OutOfBounds)
        );
    }
}
