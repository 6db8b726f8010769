//! Lamp and score display driver traits
//!
//! The driver owns multiplexing and refresh. The self-test logic only
//! writes the values that should be shown.

/// Number of player score displays
pub const PLAYER_DISPLAYS: u8 = 4;

/// Display position of the credit/match display
///
/// Only meaningful for [`DisplayDriver::set_display_blank`].
pub const CREDIT_DISPLAY: u8 = 4;

/// Blank mask enabling every digit of a six-digit display
pub const ALL_DIGITS: u8 = 0x3F;

/// Trait for the lamp matrix
pub trait LampDriver {
    /// Turn every lamp off and cancel any flashing
    fn turn_off_all_lamps(&mut self);

    /// Set a single lamp
    ///
    /// - `lamp`: Lamp number
    /// - `on`: Whether the lamp is lit
    /// - `dim`: Dimming level (0 = full brightness)
    /// - `flash_period_ms`: Flash period, or 0 for steady
    fn set_lamp_state(&mut self, lamp: u8, on: bool, dim: u8, flash_period_ms: u16);
}

/// Trait for the score, credit, and ball-in-play displays
pub trait DisplayDriver {
    /// Show a number on a player display
    ///
    /// When `blank_leading_zeros` is set, only the digits needed for the
    /// value are enabled.
    fn set_display(&mut self, position: u8, value: u32, blank_leading_zeros: bool);

    /// Set which digits of a display are enabled (bit 0 = rightmost digit)
    fn set_display_blank(&mut self, position: u8, mask: u8);

    /// Show a value on the credit display
    fn set_display_credits(&mut self, value: u8, show: bool);

    /// Show a value on the ball-in-play display
    fn set_display_ball_in_play(&mut self, value: u8, show: bool);

    /// Render one frame of a display test pattern
    ///
    /// Called every tick while the display test is active.
    fn cycle_all_displays(&mut self, now_ms: u32, pattern: u8);
}
