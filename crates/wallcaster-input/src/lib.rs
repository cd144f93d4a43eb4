//! Input handling for the Wallcaster engine.
//!
//! This crate turns raw key and mouse events into two things game code can
//! use:
//!
//! - [`InputHandlers`]: one optional callback each for key-down, key-up and
//!   mouse motion. Registering a new callback replaces the previous one.
//! - [`KeyBindTable`]: logical actions bound to physical keys, queried with
//!   [`KeyBindTable::is_pressed`].
//!
//! [`InputState`] combines both and fixes the dispatch order: for every key
//! event the handler runs first, then every bind on that key is updated.
//!
//! # Usage
//!
//! ```ignore
//! use wallcaster_input::{ActionId, InputState, KeyCode};
//!
//! const FORWARD: ActionId = ActionId(0);
//!
//! let mut input = InputState::new(80);
//! input.bind_key(FORWARD, KeyCode::KeyW)?;
//! input.handlers_mut().on_mouse_move(|delta| turn_camera(delta.x));
//!
//! // Fed by the window system while draining OS events
//! input.key_down(KeyCode::KeyW);
//! assert!(input.is_bind_pressed(FORWARD));
//! ```

mod action;
mod handlers;
mod input;

pub use action::{ActionId, KeyBind, KeyBindTable};
pub use handlers::{InputHandlers, KeyHandler, MouseMoveHandler};
pub use input::InputState;

use thiserror::Error;

/// Input errors.
#[derive(Error, Debug)]
pub enum InputError {
    /// The bind table already holds its configured number of entries.
    #[error("Key bind table is full ({capacity} entries)")]
    BindTableFull { capacity: usize },

    /// Growing the bind table failed.
    #[error("Allocation failed: {0}")]
    Allocation(#[from] std::collections::TryReserveError),
}

pub type Result<T> = std::result::Result<T, InputError>;

// Re-export winit types commonly used with input
pub use winit::keyboard::KeyCode;
