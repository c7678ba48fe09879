//! Grid access errors.
//!
//! These signal logic errors in the caller (a walker that stepped off the
//! map, a zero-sized grid) rather than recoverable user input problems.

use thiserror::Error;

use crate::geom::Point;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("cell {pos} is outside the {width}x{height} grid")]
    OutOfBounds { pos: Point, width: i32, height: i32 },

    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidSize { width: i32, height: i32 },
}
