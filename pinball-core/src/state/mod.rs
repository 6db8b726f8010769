//! Self-test menu states
//!
//! The menu is a fixed, ordered list of screens. The outer game state
//! machine owns the current screen and hands it back every tick; the
//! handler only computes the next one.

pub mod events;
pub mod screen;

pub use events::InputEvent;
pub use screen::{NextState, Screen, ScreenKind, ValueTarget, MACHINE_STATE_ATTRACT};
