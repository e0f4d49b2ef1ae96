use std::convert::TryInto;
use std::result;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MazeError {
    #[error("Index {index} out of range for {len} cells")]
    IndexOutOfRange { index: isize, len: usize },
    #[error("Expected {expected} entries, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("Invalid direction: {0}")]
    InvalidDirection(String),
    #[error("Start cell {0} is not part of the maze")]
    InvalidStartCell(usize),
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),
}

impl MazeError {
    pub fn out_of_range<I>(index: I, len: usize) -> Self
    where
        I: TryInto<isize>,
    {
        Self::IndexOutOfRange {
            index: index.try_into().unwrap_or(isize::MAX),
            len,
        }
    }

    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::LengthMismatch { expected, actual }
    }
}

pub type Result<T> = result::Result<T, MazeError>;
