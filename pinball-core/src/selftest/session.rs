//! Per-session menu state
//!
//! Everything that must survive between ticks while the menu is active.
//! Owned by [`super::SelfTest`]; nothing here is global.

use crate::state::InputEvent;

use super::editor::Accelerator;
use super::input::ResetButton;

/// Mutable state of one diagnostic session
#[derive(Debug, Clone)]
pub struct Session {
    /// Lamp index or display pattern on the hardware test screens
    pub(crate) cur_value: u8,
    /// Value being edited, or the solenoid being fired
    pub(crate) saved_value: u32,
    /// Reset button history
    pub(crate) button: ResetButton,
    /// Time of the last accepted self-test press
    pub(crate) last_self_test_change_ms: u32,
    /// Time the solenoid test last fired
    pub(crate) last_solenoid_ms: u32,
    /// Held-button repeat state
    pub(crate) speedy: Accelerator,
    /// Solenoid test advances on its own when set
    pub(crate) solenoid_cycle: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an empty session
    pub const fn new() -> Self {
        Self {
            cur_value: 0,
            saved_value: 0,
            button: ResetButton::new(),
            last_self_test_change_ms: 0,
            last_solenoid_ms: 0,
            speedy: Accelerator::new(),
            solenoid_cycle: true,
        }
    }

    /// Value currently shown on the lamp or display test
    pub fn cur_value(&self) -> u8 {
        self.cur_value
    }

    /// Value currently being edited (or solenoid being fired)
    pub fn saved_value(&self) -> u32 {
        self.saved_value
    }

    /// Whether the solenoid test is auto-cycling
    pub fn solenoid_cycle(&self) -> bool {
        self.solenoid_cycle
    }

    /// Held-button changes not yet written to storage
    pub fn pending_speedy_changes(&self) -> u32 {
        self.speedy.changes()
    }

    /// Time of the last accepted self-test press
    pub fn last_self_test_change(&self) -> u32 {
        self.last_self_test_change_ms
    }

    /// Override the self-test debounce clock
    ///
    /// Game code that enters the menu from a self-test press records the
    /// press here so the same press is not taken as an advance.
    pub fn set_last_self_test_change(&mut self, at_ms: u32) {
        self.last_self_test_change_ms = at_ms;
    }
}

/// What happened this tick, as seen by a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Tick {
    /// The screen was entered this tick
    pub entered: bool,
    /// Classified switch event
    pub event: InputEvent,
    /// Reset held past the repeat threshold
    pub held: bool,
    /// Current time
    pub now_ms: u32,
}
