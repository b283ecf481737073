use rand::Rng;

use crate::clock::Timestamp;
use crate::config::GridSize;
use crate::error::SpawnError;
use crate::grid::{Position, random_empty_cell};
use crate::snake::Snake;

/// Item type and the effect it has when the snake's head reaches it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum FoodKind {
    /// Grows the snake by one cell.
    Food,
    /// Shrinks the snake by one cell, down to the initial length.
    Poison,
}

/// Item currently lying on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FoodItem {
    pub position: Position,
    pub kind: FoodKind,
    pub created_at: Timestamp,
}

impl FoodItem {
    #[must_use]
    pub fn new(position: Position, kind: FoodKind, created_at: Timestamp) -> Self {
        Self {
            position,
            kind,
            created_at,
        }
    }

    /// Creates a food item at `position` stamped at time zero.
    #[must_use]
    pub fn food(position: Position) -> Self {
        Self::new(position, FoodKind::Food, Timestamp::ZERO)
    }

    /// Creates a poison item at `position` stamped at time zero.
    #[must_use]
    pub fn poison(position: Position) -> Self {
        Self::new(position, FoodKind::Poison, Timestamp::ZERO)
    }

    #[must_use]
    pub fn age_at(&self, now: Timestamp) -> u64 {
        now.millis_since(self.created_at)
    }

    /// An item lives for exactly `lifetime_ms`; it is gone once strictly older.
    #[must_use]
    pub fn is_expired(&self, now: Timestamp, lifetime_ms: u64) -> bool {
        self.age_at(now) > lifetime_ms
    }

    /// Share of the lifetime left, from `1.0` when fresh to `0.0` when due.
    #[must_use]
    pub fn remaining_fraction(&self, now: Timestamp, lifetime_ms: u64) -> f32 {
        if lifetime_ms == 0 {
            return 0.0;
        }
        let left = lifetime_ms.saturating_sub(self.age_at(now));
        (left as f64 / lifetime_ms as f64) as f32
    }
}

/// Live items on the board and their spawn/expiry lifecycle.
///
/// Invariant: when every spawn checks cross-type overlap, no two live items
/// share a cell. Items never spawn on the snake.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodField {
    items: Vec<FoodItem>,
}

impl FoodField {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a field from explicit items, e.g. to set up a scenario.
    #[must_use]
    pub fn from_items(items: Vec<FoodItem>) -> Self {
        Self { items }
    }

    /// Places a new item of `kind` on a free cell stamped with `now`.
    ///
    /// The cell avoids the snake and live items. With
    /// `avoid_cross_type_overlap` unset only items of the same kind are
    /// avoided, so food may land on poison and the other way around.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        kind: FoodKind,
        now: Timestamp,
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
        avoid_cross_type_overlap: bool,
    ) -> Result<FoodItem, SpawnError> {
        let position = random_empty_cell(rng, bounds, |position| {
            snake.occupies(position)
                || self.items.iter().any(|item| {
                    item.position == position && (avoid_cross_type_overlap || item.kind == kind)
                })
        })?;

        let item = FoodItem::new(position, kind, now);
        self.items.push(item);
        Ok(item)
    }

    /// Drops every item older than `lifetime_ms` and returns how many went.
    pub fn expire(&mut self, now: Timestamp, lifetime_ms: u64) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.is_expired(now, lifetime_ms));
        before - self.items.len()
    }

    /// Removes and returns the items at `position`. A second call for the
    /// same cell returns nothing.
    pub fn consume(&mut self, position: Position) -> Vec<FoodItem> {
        let (eaten, kept): (Vec<FoodItem>, Vec<FoodItem>) = self
            .items
            .drain(..)
            .partition(|item| item.position == position);
        self.items = kept;
        eaten
    }

    #[must_use]
    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    #[must_use]
    pub fn count(&self, kind: FoodKind) -> usize {
        self.items.iter().filter(|item| item.kind == kind).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::clock::Timestamp;
    use crate::config::GridSize;
    use crate::error::SpawnError;
    use crate::grid::Position;
    use crate::input::Direction;
    use crate::snake::Snake;

    use super::{FoodField, FoodItem, FoodKind};

    const BOUNDS: GridSize = GridSize {
        width: 8,
        height: 6,
    };

    fn short_snake() -> Snake {
        Snake::from_segments(
            vec![
                Position { x: 2, y: 0 },
                Position { x: 1, y: 0 },
                Position { x: 0, y: 0 },
            ],
            Direction::Right,
        )
    }

    #[test]
    fn food_spawn_never_overlaps_snake_or_other_items() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = short_snake();
        let mut field = FoodField::new();

        for i in 0..40 {
            let kind = if i % 3 == 0 {
                FoodKind::Poison
            } else {
                FoodKind::Food
            };
            let item = field
                .spawn(kind, Timestamp::ZERO, &mut rng, BOUNDS, &snake, true)
                .expect("board has room");
            assert!(!snake.occupies(item.position));
        }

        let cells: HashSet<Position> = field.items().iter().map(|item| item.position).collect();
        assert_eq!(cells.len(), field.len());
    }

    #[test]
    fn spawn_reports_full_board_and_leaves_field_untouched() {
        let mut rng = StdRng::seed_from_u64(1);
        let bounds = GridSize {
            width: 3,
            height: 1,
        };
        let snake = short_snake();
        let mut field = FoodField::new();

        let result = field.spawn(
            FoodKind::Food,
            Timestamp::ZERO,
            &mut rng,
            bounds,
            &snake,
            true,
        );

        assert_eq!(
            result,
            Err(SpawnError::GridFull {
                width: 3,
                height: 1
            })
        );
        assert!(field.is_empty());
    }

    #[test]
    fn cross_type_overlap_is_allowed_when_not_avoided() {
        let mut rng = StdRng::seed_from_u64(5);
        let bounds = GridSize {
            width: 4,
            height: 1,
        };
        let snake = short_snake();
        let mut field = FoodField::from_items(vec![FoodItem::poison(Position::new(3, 0))]);

        let item = field
            .spawn(
                FoodKind::Food,
                Timestamp::ZERO,
                &mut rng,
                bounds,
                &snake,
                false,
            )
            .expect("poison cell is allowed");

        assert_eq!(item.position, Position::new(3, 0));
        let kinds: Vec<FoodKind> = field
            .items()
            .iter()
            .filter(|i| i.position == item.position)
            .map(|i| i.kind)
            .collect();
        assert_eq!(kinds, vec![FoodKind::Poison, FoodKind::Food]);
    }

    #[test]
    fn expiry_keeps_items_until_strictly_older_than_lifetime() {
        let spawned_at = Timestamp::from_millis(3_000);
        let mut field = FoodField::from_items(vec![FoodItem::new(
            Position::new(4, 4),
            FoodKind::Food,
            spawned_at,
        )]);

        assert_eq!(field.expire(spawned_at.add_millis(9_999), 10_000), 0);
        assert_eq!(field.expire(spawned_at.add_millis(10_000), 10_000), 0);
        assert_eq!(field.len(), 1);

        assert_eq!(field.expire(spawned_at.add_millis(10_001), 10_000), 1);
        assert!(field.is_empty());
    }

    #[test]
    fn expiry_twice_at_same_instant_is_stable() {
        let now = Timestamp::from_millis(12_000);
        let mut field = FoodField::from_items(vec![
            FoodItem::new(Position::new(1, 1), FoodKind::Food, Timestamp::from_millis(500)),
            FoodItem::new(Position::new(2, 2), FoodKind::Poison, Timestamp::from_millis(4_000)),
        ]);

        field.expire(now, 10_000);
        let once = field.clone();
        field.expire(now, 10_000);

        assert_eq!(field, once);
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn consume_is_idempotent() {
        let cell = Position::new(5, 2);
        let mut field = FoodField::from_items(vec![
            FoodItem::food(cell),
            FoodItem::food(Position::new(0, 3)),
        ]);

        assert_eq!(field.consume(cell), vec![FoodItem::food(cell)]);
        assert!(field.consume(cell).is_empty());
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn remaining_fraction_runs_from_one_to_zero() {
        let item = FoodItem::food(Position::new(0, 0));

        assert!((item.remaining_fraction(Timestamp::ZERO, 10_000) - 1.0).abs() < f32::EPSILON);
        assert!(
            (item.remaining_fraction(Timestamp::from_millis(2_500), 10_000) - 0.75).abs()
                < f32::EPSILON
        );
        assert_eq!(item.remaining_fraction(Timestamp::from_millis(20_000), 10_000), 0.0);
    }
}
