//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The grid is a torus: moving off one edge re-enters from the opposite edge,
//! and the only way to lose is running into the snake's own body.

pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use config::{GameConfig, grid_for_viewport};
pub use direction::{Direction, DirectionQueue};
pub use engine::{GameEngine, TickResult};
pub use error::ConfigError;
pub use session::{GameEvent, Session};
pub use state::{GameState, Location, Snake, Snapshot, next_head};
