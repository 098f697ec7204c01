//! Board configuration: grid size and how cells map to rendering space.
use thiserror::Error;

use crate::{
    board::rectangular::{RectDimensions, STANDARD_SIZE},
    layout::{BoardLayout, WorldPoint},
};

/// Reason a [`BoardConfig`] cannot be used.
#[derive(Debug, Error, Copy, Clone, PartialEq)]
pub enum ConfigError {
    #[error("board dimensions {width}x{height} are empty or too large")]
    InvalidDimensions { width: usize, height: usize },
    #[error("cell size must be a positive number, got {0}")]
    InvalidCellSize(f32),
}

/// Settings a board is built from.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoardConfig {
    /// Number of cells along `x`.
    pub width: usize,
    /// Number of cells along `y`.
    pub height: usize,
    /// Edge length of a cell in rendering space.
    pub cell_size: f32,
    /// Height of the board plane above the origin.
    pub y_offset: f32,
    /// Point the board is centred on.
    pub origin: WorldPoint,
}

impl BoardConfig {
    /// The board dimensions.
    pub fn dimensions(&self) -> Result<RectDimensions, ConfigError> {
        RectDimensions::try_new(self.width, self.height).ok_or(ConfigError::InvalidDimensions {
            width: self.width,
            height: self.height,
        })
    }

    /// The rendering layout.
    pub fn layout(&self) -> Result<BoardLayout, ConfigError> {
        let dim = self.dimensions()?;
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        Ok(BoardLayout::new(dim, self.cell_size, self.y_offset, self.origin))
    }
}

impl Default for BoardConfig {
    /// A standard 8x8 board of unit cells centred on the origin.
    fn default() -> Self {
        Self {
            width: STANDARD_SIZE,
            height: STANDARD_SIZE,
            cell_size: 1.0,
            y_offset: 0.0,
            origin: WorldPoint::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_standard() {
        let config = BoardConfig::default();
        assert_eq!(config.dimensions(), Ok(RectDimensions::default()));
        assert_eq!(config.layout(), Ok(BoardLayout::default()));
    }

    #[test]
    fn rejects_bad_values() {
        let config = BoardConfig {
            width: 0,
            ..BoardConfig::default()
        };
        assert_eq!(
            config.layout(),
            Err(ConfigError::InvalidDimensions {
                width: 0,
                height: 8
            })
        );
        let config = BoardConfig {
            cell_size: -1.0,
            ..BoardConfig::default()
        };
        assert_eq!(config.layout(), Err(ConfigError::InvalidCellSize(-1.0)));
    }
}
