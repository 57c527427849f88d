use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Values must be positive.")]
    NonPositiveDimension,
    #[error("Number of mines should be less than total number of cells.")]
    TooManyMines,
    #[error("Number of mines must not be negative.")]
    NegativeMineCount,
    #[error("Board dimensions are too large.")]
    DimensionTooLarge,
    #[error("Position is outside the board")]
    OutOfBounds,
    #[error("Mine layout does not fit the board")]
    InvalidLayout,
    #[error("Mines were already placed on this board")]
    MinesAlreadyPlaced,
}

impl GameError {
    /// Bad new-game parameters, reported to the player before a game starts.
    pub const fn is_validation(self) -> bool {
        matches!(
            self,
            Self::NonPositiveDimension
                | Self::TooManyMines
                | Self::NegativeMineCount
                | Self::DimensionTooLarge
        )
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
