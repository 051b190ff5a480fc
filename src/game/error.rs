//! Configuration errors for the game core

use thiserror::Error;

/// A game cannot be set up with these parameters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("tick interval must be at least 1 ms")]
    ZeroTickInterval,

    #[error("tile size must be at least 1")]
    ZeroTileSize,
}
