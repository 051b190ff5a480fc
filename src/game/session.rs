//! Event-driven wrapper around a single game.
//!
//! Input handlers and the scheduler never touch [`GameState`] directly; they
//! send a [`GameEvent`] and the session applies it. Everything runs on one
//! logical thread, so events are applied strictly in arrival order.

use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::{debug, trace};

use super::{
    config::GameConfig,
    direction::Direction,
    engine::{GameEngine, TickResult},
    error::ConfigError,
    state::{GameState, Snapshot},
};

/// Something that happened to the game between two frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The player asked to turn
    Steer(Direction),
    /// The fixed-delay timer fired
    Tick,
    /// The viewport now holds a different number of cells
    Resize { rows: usize, cols: usize },
    /// Throw the current game away and start a new one on the same grid
    Restart,
}

pub struct Session<R: Rng = ThreadRng> {
    engine: GameEngine<R>,
    state: GameState,
}

impl Session<ThreadRng> {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_engine(GameEngine::new(config)?))
    }
}

impl<R: Rng> Session<R> {
    /// Start a fresh game on the engine's configured grid
    pub fn with_engine(mut engine: GameEngine<R>) -> Self {
        let state = engine.reset();
        Self { engine, state }
    }

    /// Continue from an existing state
    pub fn from_state(engine: GameEngine<R>, state: GameState) -> Self {
        Self { engine, state }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Apply one event. Returns the tick outcome for [`GameEvent::Tick`].
    pub fn handle(&mut self, event: GameEvent) -> Result<Option<TickResult>, ConfigError> {
        match event {
            GameEvent::Steer(direction) => {
                let accepted = self.state.set_direction(direction);
                trace!(?direction, accepted, "steer");
                Ok(None)
            }
            GameEvent::Tick => Ok(Some(self.engine.advance(&mut self.state))),
            GameEvent::Resize { rows, cols } => {
                self.engine.resize(&mut self.state, rows, cols)?;
                Ok(None)
            }
            GameEvent::Restart => {
                let (rows, cols) = (self.state.rows(), self.state.cols());
                self.state = self.engine.reset_with_grid(rows, cols)?;
                debug!(rows, cols, "restarted");
                Ok(None)
            }
        }
    }
}
