use crate::clock::Timestamp;
use crate::config::{GridSize, INITIAL_SNAKE_LEN};
use crate::food::{FoodItem, FoodKind};
use crate::game::GameStatus;
use crate::grid::Position;
use crate::input::Direction;

/// What the presentation layer should draw in one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellType {
    Empty,
    SnakeHead,
    SnakeBody,
    /// Food with the share of its lifetime still left, `0.0..=1.0`.
    Food { remaining: f32 },
    Poison,
}

/// Read-only copy of everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub bounds: GridSize,
    pub snake: Vec<Position>,
    pub direction: Direction,
    pub food: Vec<FoodItem>,
    pub status: GameStatus,
    pub now: Timestamp,
    pub food_lifetime_ms: u64,
}

impl Snapshot {
    /// Snake length above the starting length.
    #[must_use]
    pub fn score(&self) -> u32 {
        u32::try_from(self.snake.len().saturating_sub(INITIAL_SNAKE_LEN)).unwrap_or(u32::MAX)
    }

    /// Render type of `position`. Food wins over the snake, the snake over
    /// poison.
    #[must_use]
    pub fn classify(&self, position: Position) -> CellType {
        if let Some(item) = self
            .food
            .iter()
            .find(|item| item.position == position && item.kind == FoodKind::Food)
        {
            return CellType::Food {
                remaining: item.remaining_fraction(self.now, self.food_lifetime_ms),
            };
        }

        match self.snake.iter().position(|segment| *segment == position) {
            Some(0) => return CellType::SnakeHead,
            Some(_) => return CellType::SnakeBody,
            None => {}
        }

        if self
            .food
            .iter()
            .any(|item| item.position == position && item.kind == FoodKind::Poison)
        {
            return CellType::Poison;
        }

        CellType::Empty
    }

    /// Classifies every cell, row by row.
    #[must_use]
    pub fn cells(&self) -> Vec<Vec<CellType>> {
        (0..i32::from(self.bounds.height))
            .map(|y| {
                (0..i32::from(self.bounds.width))
                    .map(|x| self.classify(Position { x, y }))
                    .collect()
            })
            .collect()
    }
}
