use serde::Serialize;
use std::collections::VecDeque;

use super::config::validate_grid;
use super::direction::{Direction, DirectionQueue};
use super::error::ConfigError;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub row: usize,
    pub col: usize,
}

impl Location {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_within(&self, rows: usize, cols: usize) -> bool {
        self.row < rows && self.col < cols
    }
}

/// Cell one step from `head` in `direction`, wrapping around the grid edges.
///
/// A coordinate that goes negative re-enters at the last row/column; anything
/// else is reduced modulo the dimension. `rows` and `cols` must be non-zero.
pub fn next_head(head: Location, direction: Direction, rows: usize, cols: usize) -> Location {
    let (d_row, d_col) = direction.delta();
    Location::new(
        wrap(head.row as i64 + d_row, rows),
        wrap(head.col as i64 + d_col, cols),
    )
}

fn wrap(coord: i64, dim: usize) -> usize {
    if coord < 0 {
        dim - 1
    } else {
        coord as usize % dim
    }
}

/// The snake body, stored tail-first and head-last
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Location>,
}

impl Snake {
    /// A one-segment snake
    pub fn new(head: Location) -> Self {
        Self {
            body: VecDeque::from([head]),
        }
    }

    /// Build a snake from segments listed tail-first. Returns `None` when empty.
    pub fn from_segments(segments: impl IntoIterator<Item = Location>) -> Option<Self> {
        let body: VecDeque<Location> = segments.into_iter().collect();
        if body.is_empty() {
            None
        } else {
            Some(Self { body })
        }
    }

    /// Get the head position
    pub fn head(&self) -> Location {
        // Never empty: every constructor requires a segment and `pop_tail`
        // keeps the last one.
        self.body[self.body.len() - 1]
    }

    /// Get the tail position (oldest segment)
    pub fn tail(&self) -> Location {
        self.body[0]
    }

    /// Segments from tail to head
    pub fn segments(&self) -> impl Iterator<Item = &Location> {
        self.body.iter()
    }

    /// Whether `pos` is occupied by any segment other than the head
    pub fn collides_with_body(&self, pos: Location) -> bool {
        self.body.iter().take(self.body.len() - 1).any(|&seg| seg == pos)
    }

    pub fn contains(&self, pos: Location) -> bool {
        self.body.contains(&pos)
    }

    pub(crate) fn push_head(&mut self, head: Location) {
        self.body.push_back(head);
    }

    /// Undo the latest `push_head`
    pub(crate) fn pop_head(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_back();
        }
    }

    pub(crate) fn pop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    rows: usize,
    cols: usize,
    pub snake: Snake,
    pub food: Location,
    pub directions: DirectionQueue,
    pub score: u32,
    pub steps: u32,
    pub running: bool,
}

impl GameState {
    /// Create a running game with zero score, heading right
    pub fn new(snake: Snake, food: Location, rows: usize, cols: usize) -> Result<Self, ConfigError> {
        validate_grid(rows, cols)?;
        Ok(Self::from_parts(snake, food, rows, cols))
    }

    pub(crate) fn from_parts(snake: Snake, food: Location, rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            snake,
            food,
            directions: DirectionQueue::default(),
            score: 0,
            steps: 0,
            running: true,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Steer the snake; a reversal of the current direction is ignored
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        self.directions.push(direction)
    }

    /// Direction the next tick will move in
    pub fn direction(&self) -> Direction {
        self.directions.current()
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Location) -> bool {
        pos.is_within(self.rows, self.cols)
    }

    /// Swap in new grid dimensions.
    ///
    /// Segments keep their coordinates; the next head is wrapped into the new
    /// grid. Callers must re-place food that ends up outside the grid.
    pub(crate) fn set_grid(&mut self, rows: usize, cols: usize) -> Result<(), ConfigError> {
        validate_grid(rows, cols)?;
        self.rows = rows;
        self.cols = cols;
        Ok(())
    }

    /// Immutable copy of everything a renderer needs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            rows: self.rows,
            cols: self.cols,
            snake: self.snake.segments().copied().collect(),
            food: self.food,
            score: self.score,
            steps: self.steps,
            running: self.running,
        }
    }
}

/// Frozen view of a game after a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub rows: usize,
    pub cols: usize,
    /// Segments tail-first, head-last
    pub snake: Vec<Location>,
    pub food: Location,
    pub score: u32,
    pub steps: u32,
    pub running: bool,
}

impl Snapshot {
    pub fn head(&self) -> Option<Location> {
        self.snake.last().copied()
    }
}
