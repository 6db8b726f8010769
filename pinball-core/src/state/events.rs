//! Classified switch input for one tick

use crate::traits::SwitchId;

/// What the switch event pulled this tick means to the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Nothing pending (or the event was consumed)
    Idle,
    /// Ordinary reset button press
    ResetPress,
    /// Second reset press inside the double-click window
    DoubleClick,
    /// Slam switch closed; leave the menu
    Slam,
    /// Self-test button accepted; move to the next screen
    SelfTestAdvance,
    /// Any other switch, including a debounced self-test press
    Other(SwitchId),
}

impl InputEvent {
    /// Check if this event acts as a reset press on hardware test screens
    ///
    /// The lamp, display, solenoid, and credit screens treat a double-click
    /// the same as a single press.
    pub fn is_any_reset(&self) -> bool {
        matches!(self, InputEvent::ResetPress | InputEvent::DoubleClick)
    }
}
