use thiserror::Error;

use crate::grid::{MAX_MAP_SIZE, MIN_MAP_SIZE};

#[derive(Debug, Error)]
pub enum GameError {
    #[error("map {axis} must be within {min}..={max}, got {value}", min = MIN_MAP_SIZE, max = MAX_MAP_SIZE)]
    InvalidDimension { axis: &'static str, value: usize },

    #[error("maze has only {open} open cells, cannot place {requested} coins")]
    NotEnoughOpenCells { open: usize, requested: usize },
}
