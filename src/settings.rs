use std::path::PathBuf;

use thiserror::Error;

use crate::grid::Cell;
use crate::speed::SpeedLevel;

/// Largest board the terminal front end can reasonably draw.
pub const MAX_ROW_AND_COLUMN_COUNT: u16 = 200;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("grid needs at least 2 rows and columns, got {0}")]
    GridTooSmall(u16),
    #[error("grid may have at most 200 rows and columns, got {0}")]
    GridTooLarge(u16),
    #[error("snake start ({x}, {y}) lies outside the {size}x{size} grid")]
    StartOutsideGrid { x: u16, y: u16, size: u16 },
    #[error("cell width must be at least 1 column")]
    ZeroCellWidth,
}

/// Startup parameters, read once and never changed afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub row_and_column_count: u16,
    pub snake_start_x: u16,
    pub snake_start_y: u16,
    /// Terminal columns per grid cell.
    pub cell_width: u16,
    pub speed: SpeedLevel,
    pub wrap_around: bool,
    pub high_score_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            row_and_column_count: 20,
            snake_start_x: 10,
            snake_start_y: 10,
            cell_width: 2,
            speed: SpeedLevel::default(),
            wrap_around: false,
            high_score_file: PathBuf::from(".snekfx_high_scores.txt"),
        }
    }
}

impl Settings {
    /// A default configuration on a `size`×`size` grid starting at `start`.
    pub fn new(size: u16, start: Cell) -> Self {
        Settings {
            row_and_column_count: size,
            snake_start_x: start.x,
            snake_start_y: start.y,
            ..Default::default()
        }
    }

    pub fn snake_start(&self) -> Cell {
        Cell::new(self.snake_start_x, self.snake_start_y)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let size = self.row_and_column_count;
        if size < 2 {
            return Err(SettingsError::GridTooSmall(size));
        }
        if size > MAX_ROW_AND_COLUMN_COUNT {
            return Err(SettingsError::GridTooLarge(size));
        }
        if self.snake_start_x >= size || self.snake_start_y >= size {
            return Err(SettingsError::StartOutsideGrid {
                x: self.snake_start_x,
                y: self.snake_start_y,
                size,
            });
        }
        if self.cell_width == 0 {
            return Err(SettingsError::ZeroCellWidth);
        }
        Ok(())
    }
}
