use crate::*;
pub use preset::*;
pub use random::*;

mod preset;
mod random;

/// Decides where the mines go once the protected (first revealed) cell is known.
///
/// Implementations must return a layout of exactly `config.mines` mines that leaves `protected`
/// mine-free.
pub trait MinefieldGenerator {
    fn generate(&mut self, config: GameConfig, protected: Position) -> Result<MineLayout>;
}
