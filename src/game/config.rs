use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::ConfigError;

/// Score added every time the snake eats
pub const DEFAULT_FOOD_SCORE: u32 = 3;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of grid rows
    pub rows: usize,
    /// Number of grid columns
    pub cols: usize,
    /// Score gained per food eaten
    pub food_score: u32,
    /// Delay between two ticks, in milliseconds
    pub tick_interval_ms: u64,
    /// How long the lose screen stays up before the front-end exits, in milliseconds
    pub game_over_linger_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 20,
            food_score: DEFAULT_FOOD_SCORE,
            tick_interval_ms: 50,
            game_over_linger_ms: 3000,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(5, 5)
    }

    /// Check that the configuration can drive a game
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_grid(self.rows, self.cols)?;
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn game_over_linger(&self) -> Duration {
        Duration::from_millis(self.game_over_linger_ms)
    }
}

/// Reject grids without cells
pub fn validate_grid(rows: usize, cols: usize) -> Result<(), ConfigError> {
    if rows == 0 || cols == 0 {
        return Err(ConfigError::EmptyGrid { rows, cols });
    }
    Ok(())
}

/// Number of whole tiles of `tile_size` that fit in a viewport.
///
/// Returns `(rows, cols)`. A viewport smaller than one tile yields an error
/// instead of an empty grid.
pub fn grid_for_viewport(
    width: usize,
    height: usize,
    tile_width: usize,
    tile_height: usize,
) -> Result<(usize, usize), ConfigError> {
    if tile_width == 0 || tile_height == 0 {
        return Err(ConfigError::ZeroTileSize);
    }
    let rows = height / tile_height;
    let cols = width / tile_width;
    validate_grid(rows, cols)?;
    Ok((rows, cols))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.rows, 20);
        assert_eq!(config.cols, 20);
        assert_eq!(config.food_score, 3);
        assert_eq!(config.tick_interval(), Duration::from_millis(50));
        assert_eq!(config.game_over_linger(), Duration::from_secs(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 30);
        assert_eq!(config.rows, 15);
        assert_eq!(config.cols, 30);
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert_eq!(
            GameConfig::new(0, 5).validate(),
            Err(ConfigError::EmptyGrid { rows: 0, cols: 5 })
        );
        assert_eq!(
            GameConfig::new(5, 0).validate(),
            Err(ConfigError::EmptyGrid { rows: 5, cols: 0 })
        );
    }

    #[test]
    fn test_zero_tick_interval_rejected() {
        let config = GameConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickInterval));
    }

    #[test]
    fn test_grid_for_viewport() {
        // 20px tiles over a 1024x768 window
        assert_eq!(grid_for_viewport(1024, 768, 20, 20), Ok((38, 51)));
        // two terminal columns per cell
        assert_eq!(grid_for_viewport(81, 24, 2, 1), Ok((24, 40)));
    }

    #[test]
    fn test_grid_for_tiny_viewport() {
        assert_eq!(
            grid_for_viewport(10, 10, 20, 20),
            Err(ConfigError::EmptyGrid { rows: 0, cols: 0 })
        );
        assert_eq!(
            grid_for_viewport(10, 10, 0, 1),
            Err(ConfigError::ZeroTileSize)
        );
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "rows": 12, "food_score": 5 }"#).unwrap();
        assert_eq!(config.rows, 12);
        assert_eq!(config.cols, 20);
        assert_eq!(config.food_score, 5);
        assert_eq!(config.tick_interval_ms, 50);
    }
}
