//! Configuration type definitions
//!
//! Defaults match Bally/Stern -35 and Stern M-100/M-200 boards.

use crate::traits::SwitchId;

use super::audit::AuditMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Switch number reported for the cabinet self-test button
pub const SELF_TEST_SWITCH: SwitchId = SwitchId(0x7F);

/// Default number of controlled lamps
pub const DEFAULT_LAMP_COUNT: u8 = 60;

/// Number of switches in the matrix
pub const DEFAULT_SWITCH_COUNT: u8 = 40;

/// Number of momentary solenoids on the driver board
pub const DEFAULT_SOLENOID_COUNT: u8 = 15;

/// Lamp test value that lights every lamp
pub const ALL_LAMPS: u8 = 99;

/// Repeat schedule for held-button value entry
///
/// The interval shortens as more changes accumulate during one hold:
/// `slow_ms` for the first `slow_changes`, `medium_ms` until
/// `medium_changes` in total, then `fast_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpeedySchedule {
    pub slow_changes: u32,
    pub slow_ms: u32,
    pub medium_changes: u32,
    pub medium_ms: u32,
    pub fast_ms: u32,
}

impl Default for SpeedySchedule {
    fn default() -> Self {
        Self {
            slow_changes: 6,
            slow_ms: 400,
            medium_changes: 50,
            medium_ms: 50,
            fast_ms: 10,
        }
    }
}

impl SpeedySchedule {
    /// Delay before the next change, given how many already happened
    pub fn interval_after(&self, changes: u32) -> u32 {
        if changes < self.slow_changes {
            self.slow_ms
        } else if changes < self.medium_changes {
            self.medium_ms
        } else {
            self.fast_ms
        }
    }
}

/// Self-test timing and hardware sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SelfTestConfig {
    /// Switch that advances to the next screen
    pub self_test_switch: SwitchId,
    /// Lamps cycled by the lamp test
    pub lamp_count: u8,
    /// Switches scanned by the switch test
    pub switch_count: u8,
    /// Solenoids cycled by the solenoid test
    pub solenoid_count: u8,
    /// Patterns offered by the display test
    pub display_patterns: u8,
    /// Highest credit value before wrapping to 0
    pub max_credits: u8,
    /// Increment applied to score thresholds
    pub score_step: u32,
    /// Two reset presses closer than this are a double-click
    pub double_click_ms: u32,
    /// Reset must be held longer than this to auto-repeat
    pub hold_threshold_ms: u32,
    /// Minimum gap between self-test advances
    pub advance_debounce_ms: u32,
    /// Gap between solenoid test pulses
    pub solenoid_interval_ms: u32,
    /// Flash period for lamps lit by the lamp test
    pub lamp_flash_ms: u16,
    /// Held-button repeat schedule
    pub speedy: SpeedySchedule,
}

impl Default for SelfTestConfig {
    fn default() -> Self {
        Self {
            self_test_switch: SELF_TEST_SWITCH,
            lamp_count: DEFAULT_LAMP_COUNT,
            switch_count: DEFAULT_SWITCH_COUNT,
            solenoid_count: DEFAULT_SOLENOID_COUNT,
            display_patterns: 31,
            max_credits: 20,
            score_step: 1000,
            double_click_ms: 400,
            hold_threshold_ms: 1300,
            advance_debounce_ms: 250,
            solenoid_interval_ms: 1000,
            lamp_flash_ms: 500,
            speedy: SpeedySchedule::default(),
        }
    }
}

/// Complete board configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    /// Self-test timing and sizes
    pub self_test: SelfTestConfig,
    /// Where audits and settings live in non-volatile storage
    pub audits: AuditMap,
}

/// Errors from encoding or decoding a stored configuration
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Output buffer too small
    BufferTooSmall,
    /// Stored bytes are not a valid configuration
    Corrupted,
}

#[cfg(feature = "serde")]
impl BoardConfig {
    /// Encode into `buffer`, returning the used prefix
    pub fn encode<'a>(&self, buffer: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buffer).map_err(|e| match e {
            postcard::Error::SerializeBufferFull => ConfigError::BufferTooSmall,
            _ => ConfigError::Corrupted,
        })
    }

    /// Decode a configuration previously written by [`BoardConfig::encode`]
    pub fn decode(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speedy_tiers() {
        let s = SpeedySchedule::default();
        assert_eq!(s.interval_after(0), 400);
        assert_eq!(s.interval_after(5), 400);
        assert_eq!(s.interval_after(6), 50);
        assert_eq!(s.interval_after(49), 50);
        assert_eq!(s.interval_after(50), 10);
        assert_eq!(s.interval_after(10_000), 10);
    }

    #[test]
    fn test_defaults() {
        let cfg = SelfTestConfig::default();
        assert_eq!(cfg.self_test_switch, SwitchId(0x7F));
        assert_eq!(cfg.lamp_count, 60);
        assert_eq!(cfg.max_credits, 20);
        assert!(cfg.double_click_ms < cfg.hold_threshold_ms);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_board_config_survives_storage() {
        let mut cfg = BoardConfig::default();
        cfg.self_test.lamp_count = 48;
        cfg.audits.credits = crate::traits::NvAddress(7);

        let mut buf = [0u8; 128];
        let used = cfg.encode(&mut buf).unwrap().len();
        assert_eq!(BoardConfig::decode(&buf[..used]).unwrap(), cfg);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_encode_into_tiny_buffer() {
        let mut buf = [0u8; 2];
        assert_eq!(
            BoardConfig::default().encode(&mut buf).unwrap_err(),
            ConfigError::BufferTooSmall
        );
    }
}
