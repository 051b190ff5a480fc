use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::{debug, info};

use super::{
    config::{GameConfig, validate_grid},
    direction::Direction,
    error::ConfigError,
    state::{GameState, Location, Snake, next_head},
};

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// The snake moved and kept its length
    Continue,
    /// The snake reached the food and grew by one segment
    Ate,
    /// The snake ran into itself; the game is over
    Collided,
}

impl TickResult {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TickResult::Collided)
    }
}

/// The game engine that handles all game logic.
///
/// Generic over the random source so tests can drive it with a seeded RNG.
pub struct GameEngine<R: Rng = ThreadRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine drawing randomness from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh game: one segment at a random cell, food elsewhere
    pub fn reset(&mut self) -> GameState {
        self.spawn(self.config.rows, self.config.cols)
    }

    /// Start a fresh game on a grid other than the configured one
    pub fn reset_with_grid(&mut self, rows: usize, cols: usize) -> Result<GameState, ConfigError> {
        validate_grid(rows, cols)?;
        Ok(self.spawn(rows, cols))
    }

    // `rows` and `cols` are already validated
    fn spawn(&mut self, rows: usize, cols: usize) -> GameState {
        let head = self.random_location(rows, cols);
        let snake = Snake::new(head);
        let food = self.place_food(&snake, rows, cols);
        debug!(rows, cols, ?head, ?food, "new game");
        GameState::from_parts(snake, food, rows, cols)
    }

    /// Advance one step in `direction`.
    ///
    /// Food is checked before self-collision, so reaching food on an occupied
    /// cell counts as eating. On collision the snake is left as it was before
    /// the move. A game that is already over is left untouched.
    pub fn tick(&mut self, state: &mut GameState, direction: Direction) -> TickResult {
        if !state.running {
            return TickResult::Collided;
        }

        let new_head = next_head(state.snake.head(), direction, state.rows(), state.cols());
        state.snake.push_head(new_head);
        state.steps = state.steps.saturating_add(1);

        if new_head == state.food {
            state.score = state.score.saturating_add(self.config.food_score);
            state.food = self.place_food(&state.snake, state.rows(), state.cols());
            debug!(score = state.score, length = state.snake.len(), "ate food");
            TickResult::Ate
        } else if state.snake.collides_with_body(new_head) {
            state.snake.pop_head();
            state.running = false;
            info!(
                score = state.score,
                length = state.snake.len(),
                steps = state.steps,
                "snake collided with itself"
            );
            TickResult::Collided
        } else {
            state.snake.pop_tail();
            TickResult::Continue
        }
    }

    /// Advance one step in the direction currently held by the queue
    pub fn advance(&mut self, state: &mut GameState) -> TickResult {
        let direction = state.direction();
        self.tick(state, direction)
    }

    /// Follow a viewport change. Food pushed off the grid is placed again.
    pub fn resize(
        &mut self,
        state: &mut GameState,
        rows: usize,
        cols: usize,
    ) -> Result<(), ConfigError> {
        state.set_grid(rows, cols)?;
        if !state.is_in_bounds(state.food) {
            state.food = self.place_food(&state.snake, rows, cols);
        }
        debug!(rows, cols, "grid resized");
        Ok(())
    }

    /// Uniformly random cell of a non-empty `rows` x `cols` grid
    pub(crate) fn random_location(&mut self, rows: usize, cols: usize) -> Location {
        Location::new(
            random_int(&mut self.rng, 0, rows - 1),
            random_int(&mut self.rng, 0, cols - 1),
        )
    }

    /// Pick a food cell off the snake.
    ///
    /// Rejection sampling keeps the choice uniform over free cells. When the
    /// snake covers every cell there is nowhere free, so any cell is taken.
    fn place_food(&mut self, snake: &Snake, rows: usize, cols: usize) -> Location {
        let free_cells = (rows * cols).saturating_sub(
            snake.segments().filter(|seg| seg.is_within(rows, cols)).count(),
        );
        loop {
            let pos = self.random_location(rows, cols);
            if free_cells == 0 || !snake.contains(pos) {
                return pos;
            }
        }
    }
}

/// Uniform integer in the inclusive range `[min, max]`
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: usize, max: usize) -> usize {
    rng.gen_range(min..=max)
}
