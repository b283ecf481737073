use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit step in grid coordinates; y grows downward.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Confirm,
    Reset,
    Replay,
    ReplaySeekBack,
    ReplaySeekForward,
    ReplaySlower,
    ReplayFaster,
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Pending and committed heading of the snake.
///
/// Key presses only touch `pending`. The movement tick commits it, and the
/// reversal check always compares against the last committed direction, so
/// several presses between two ticks can never fold the snake onto its neck.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DirectionController {
    committed: Direction,
    pending: Direction,
}

impl DirectionController {
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self {
            committed: direction,
            pending: direction,
        }
    }

    /// Records a key press. Returns false when the press was rejected as a
    /// reversal. The latest accepted press replaces any earlier one.
    pub fn press(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.committed, direction) {
            return false;
        }
        self.pending = direction;
        true
    }

    /// Makes the pending direction the committed one and returns it.
    pub fn commit(&mut self) -> Direction {
        self.committed = self.pending;
        self.committed
    }

    pub fn reset(&mut self, direction: Direction) {
        *self = Self::new(direction);
    }

    #[must_use]
    pub fn committed(&self) -> Direction {
        self.committed
    }

    #[must_use]
    pub fn pending(&self) -> Direction {
        self.pending
    }
}

/// Translates one key event into a game input. Unknown keys map to `None`.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l') => {
            GameInput::Direction(Direction::Right)
        }
        KeyCode::Enter | KeyCode::Char(' ') => GameInput::Confirm,
        KeyCode::Esc | KeyCode::Char('p' | 'P') => GameInput::Pause,
        KeyCode::Char('x' | 'X') => GameInput::Reset,
        KeyCode::Char('r' | 'R') => GameInput::Replay,
        KeyCode::Char(',') => GameInput::ReplaySeekBack,
        KeyCode::Char('.') => GameInput::ReplaySeekForward,
        KeyCode::Char('[') => GameInput::ReplaySlower,
        KeyCode::Char(']') => GameInput::ReplayFaster,
        KeyCode::Char('q' | 'Q') => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

/// Polls the terminal for keyboard input without blocking the frame.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Drains pending terminal events and returns the mapped inputs in order.
    pub fn poll_inputs(&mut self) -> io::Result<Vec<GameInput>> {
        let mut inputs = Vec::new();

        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(input) = map_key(key) {
                    inputs.push(input);
                }
            }
        }

        Ok(inputs)
    }
}
