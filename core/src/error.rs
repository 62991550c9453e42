use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Grid dimensions must be at least 1x1")]
    InvalidDimensions,
    #[error("Unknown algorithm index {index}, only {available} available")]
    UnknownAlgorithm { index: usize, available: usize },
}

pub type Result<T> = core::result::Result<T, MazeError>;
