//! Snake on a wrap-around grid with food that spoils.
//!
//! The simulation (`grid`, `snake`, `food`, `input`, `scheduler`, `game`)
//! has no terminal dependency beyond key mapping; `renderer`, `ui` and
//! `terminal_runtime` draw a [`snapshot::Snapshot`] of it with ratatui.

pub mod clock;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod history;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod snake;
pub mod snapshot;
pub mod terminal_runtime;
pub mod ui;
