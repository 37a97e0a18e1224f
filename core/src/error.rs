use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Start coordinates are out of bounds")]
    StartOutOfBounds,
    #[error("Board has not been created yet")]
    NotBuilt,
    #[error("Cell already has a coordinate")]
    AlreadyAssigned,
    #[error("Cell value must be between 0 and 8")]
    InvalidValue,
    #[error("No representation could be spawned for a cell")]
    SpawnFailed,
}

pub type Result<T> = core::result::Result<T, GameError>;
