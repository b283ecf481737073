use std::collections::VecDeque;

use crate::config::{DEFAULT_SNAKE_HEAD, GridSize, INITIAL_SNAKE_LEN};
use crate::food::{FoodField, FoodItem, FoodKind};
use crate::grid::Position;
use crate::input::Direction;

/// Result of advancing the snake by one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The head reached a free cell or an item. `eaten` lists the items on the
    /// new head cell; the caller removes them from the board.
    Moved { snake: Snake, eaten: Vec<FoodItem> },
    /// The head ran into the body. Nothing was eaten.
    Collided { head: Position },
}

/// Snake body, head first, and the direction of its last move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
}

impl Snake {
    /// The three-cell snake every life starts with, heading right.
    #[must_use]
    pub fn spawn_default(bounds: GridSize) -> Self {
        let (head_x, head_y) = DEFAULT_SNAKE_HEAD;
        let body = (0..INITIAL_SNAKE_LEN as i32)
            .map(|offset| Position::new(head_x - offset, head_y).wrapped(bounds))
            .collect();

        Self {
            body,
            direction: Direction::Right,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    /// `segments` must not be empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!segments.is_empty());
        Self {
            body: VecDeque::from(segments),
            direction,
        }
    }

    /// Computes the snake after one move in `direction`.
    ///
    /// Collision is checked against the whole pre-step body, tail included,
    /// before anything is eaten; a colliding step never eats. Food keeps the
    /// tail so the snake grows by one. Poison drops the tail as usual and one
    /// more cell while the snake is longer than its starting length.
    #[must_use]
    pub fn step(&self, direction: Direction, bounds: GridSize, food: &FoodField) -> StepOutcome {
        let next_head = self.head().offset_wrapped(direction.delta(), bounds);

        if self.occupies(next_head) {
            return StepOutcome::Collided { head: next_head };
        }

        let eaten: Vec<FoodItem> = food
            .items()
            .iter()
            .filter(|item| item.position == next_head)
            .copied()
            .collect();
        let grows = eaten.iter().any(|item| item.kind == FoodKind::Food);
        let poisoned = eaten.iter().any(|item| item.kind == FoodKind::Poison);

        let mut body = self.body.clone();
        body.push_front(next_head);
        if !grows {
            let _ = body.pop_back();
        }
        if poisoned && body.len() > INITIAL_SNAKE_LEN {
            let _ = body.pop_back();
        }

        StepOutcome::Moved {
            snake: Self { body, direction },
            eaten,
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the direction of the last move.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
