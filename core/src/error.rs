use thiserror::Error;

use crate::{CellCount, Position};

/// A command the board refused. The board stays as it was apart from carrying this value.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum InvalidMove {
    #[error("Position {0} is outside the board")]
    OutOfBounds(Position),
    #[error("Cell at {0} is already opened")]
    AlreadyOpened(Position),
    #[error("Cell at {0} is flagged and cannot be opened")]
    Flagged(Position),
    #[error("Cell at {0} is a flower and cannot be opened")]
    Flower(Position),
    #[error("Cell at {0} is opened and cannot be flagged")]
    FlagOnOpened(Position),
    #[error("All {0} flags are already placed")]
    FlagLimitReached(CellCount),
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Too many mines")]
    TooManyMines,
    #[error("Board needs at least one row and one column")]
    EmptyBoard,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Unknown level")]
    UnknownLevel,
}

pub type Result<T> = core::result::Result<T, GameError>;
