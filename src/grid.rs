use rand::Rng;

use crate::config::{GridSize, SPAWN_SAMPLE_ATTEMPTS};
use crate::error::SpawnError;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: wrap_axis(self.x, i32::from(bounds.width)),
            y: wrap_axis(self.y, i32::from(bounds.height)),
        }
    }

    /// Moves by `(dx, dy)` on the torus.
    #[must_use]
    pub fn offset_wrapped(self, (dx, dy): (i32, i32), bounds: GridSize) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
        .wrapped(bounds)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Wraps `value` into `0..upper_bound`, also for negative values.
#[must_use]
pub fn wrap_axis(value: i32, upper_bound: i32) -> i32 {
    debug_assert!(upper_bound > 0);
    value.rem_euclid(upper_bound)
}

/// Picks a uniformly random cell for which `is_occupied` is false.
///
/// Rejection sampling is tried first since the board is mostly empty. When
/// every sample lands on an occupied cell the free cells are enumerated and
/// one is chosen from those, so a crowded board still resolves in bounded
/// time. A completely full board yields [`SpawnError::GridFull`].
pub fn random_empty_cell<R, F>(
    rng: &mut R,
    bounds: GridSize,
    is_occupied: F,
) -> Result<Position, SpawnError>
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    if bounds.total_cells() == 0 {
        return Err(SpawnError::GridFull {
            width: bounds.width,
            height: bounds.height,
        });
    }

    for _ in 0..SPAWN_SAMPLE_ATTEMPTS {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };
        if !is_occupied(candidate) {
            return Ok(candidate);
        }
    }

    let candidates: Vec<Position> = (0..i32::from(bounds.height))
        .flat_map(|y| (0..i32::from(bounds.width)).map(move |x| Position { x, y }))
        .filter(|position| !is_occupied(*position))
        .collect();

    if candidates.is_empty() {
        return Err(SpawnError::GridFull {
            width: bounds.width,
            height: bounds.height,
        });
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}
