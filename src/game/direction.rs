use serde::{Deserialize, Serialize};

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The direction pointing the other way
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Returns the unit offset (d_row, d_col) for moving in this direction
    pub fn delta(&self) -> (i64, i64) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// The last two accepted movement directions.
///
/// Only the most recent slot drives movement; the queue exists so that a
/// reversal onto the snake's own neck is rejected before it reaches a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionQueue {
    previous: Option<Direction>,
    current: Direction,
}

impl DirectionQueue {
    /// A queue whose only accepted direction so far is `initial`
    pub fn new(initial: Direction) -> Self {
        Self {
            previous: None,
            current: initial,
        }
    }

    /// Accept `direction` unless it reverses the current one.
    ///
    /// Returns whether the direction was accepted.
    pub fn push(&mut self, direction: Direction) -> bool {
        if self.current().is_opposite(direction) {
            return false;
        }
        self.previous = Some(self.current);
        self.current = direction;
        true
    }

    /// Latest accepted direction
    pub fn current(&self) -> Direction {
        self.current
    }

    /// Direction accepted before the current one, if any
    pub fn previous(&self) -> Option<Direction> {
        self.previous
    }
}

impl Default for DirectionQueue {
    fn default() -> Self {
        Self::new(Direction::Right)
    }
}
