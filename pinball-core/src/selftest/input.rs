//! Reset button and switch event classification
//!
//! Turns the single switch event pulled each tick into an [`InputEvent`]
//! and tracks how long the reset button has been held.

use crate::config::SelfTestConfig;
use crate::state::InputEvent;
use crate::traits::SwitchId;

/// Inputs wired to the menu this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuInputs {
    /// Button used to step and edit values
    pub reset: SwitchId,
    /// Slam switch, if the machine has one
    pub slam: Option<SwitchId>,
}

impl MenuInputs {
    /// Reset button only, no slam switch
    pub const fn new(reset: SwitchId) -> Self {
        Self { reset, slam: None }
    }

    /// Add a slam switch that aborts the menu
    pub const fn with_slam(mut self, slam: SwitchId) -> Self {
        self.slam = Some(slam);
        self
    }
}

/// Reset button press history
#[derive(Debug, Clone, Default)]
pub struct ResetButton {
    /// Time of the most recent reset event
    last_press_ms: Option<u32>,
    /// Start of the current hold; `Some` only while the button is down
    held_since_ms: Option<u32>,
}

impl ResetButton {
    /// Create a button with no press history
    pub const fn new() -> Self {
        Self {
            last_press_ms: None,
            held_since_ms: None,
        }
    }

    /// Record a reset closure, returning true if it completes a double-click
    pub fn press(&mut self, now_ms: u32, window_ms: u32) -> bool {
        self.held_since_ms = Some(now_ms);
        let double = matches!(self.last_press_ms, Some(last) if now_ms.wrapping_sub(last) < window_ms);
        self.last_press_ms = Some(now_ms);
        double
    }

    /// Clear the hold once the button reads open
    ///
    /// Returns true on the tick the hold ends.
    pub fn release_if_open(&mut self, closed: bool) -> bool {
        if self.held_since_ms.is_some() && !closed {
            self.held_since_ms = None;
            return true;
        }
        false
    }

    /// Check if the button has been held longer than `threshold_ms`
    pub fn is_held(&self, now_ms: u32, threshold_ms: u32) -> bool {
        matches!(self.held_since_ms, Some(since) if now_ms.wrapping_sub(since) > threshold_ms)
    }

    /// Check if the button is down at all
    pub fn is_down(&self) -> bool {
        self.held_since_ms.is_some()
    }
}

/// Classify the switch event pulled this tick
///
/// `last_advance_ms` is the time of the last accepted self-test press and
/// is updated when a new one is accepted. Reset handling takes priority,
/// then slam, then self-test.
pub fn classify(
    event: Option<SwitchId>,
    inputs: &MenuInputs,
    cfg: &SelfTestConfig,
    button: &mut ResetButton,
    last_advance_ms: &mut u32,
    now_ms: u32,
) -> InputEvent {
    let Some(switch) = event else {
        return InputEvent::Idle;
    };

    if switch == inputs.reset {
        if button.press(now_ms, cfg.double_click_ms) {
            return InputEvent::DoubleClick;
        }
        return InputEvent::ResetPress;
    }

    if inputs.slam == Some(switch) {
        return InputEvent::Slam;
    }

    if switch == cfg.self_test_switch {
        if now_ms.wrapping_sub(*last_advance_ms) > cfg.advance_debounce_ms {
            *last_advance_ms = now_ms;
            return InputEvent::SelfTestAdvance;
        }
        return InputEvent::Other(switch);
    }

    InputEvent::Other(switch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const RESET: SwitchId = SwitchId(6);
    const SLAM: SwitchId = SwitchId(15);

    fn run(event: Option<SwitchId>, button: &mut ResetButton, advance: &mut u32, now: u32) -> InputEvent {
        let inputs = MenuInputs::new(RESET).with_slam(SLAM);
        classify(event, &inputs, &SelfTestConfig::default(), button, advance, now)
    }

    #[test]
    fn test_first_press_is_never_double() {
        let mut button = ResetButton::new();
        let mut adv = 0;
        assert_eq!(run(Some(RESET), &mut button, &mut adv, 10), InputEvent::ResetPress);
    }

    #[test]
    fn test_double_click_window() {
        let mut button = ResetButton::new();
        let mut adv = 0;
        assert_eq!(run(Some(RESET), &mut button, &mut adv, 1000), InputEvent::ResetPress);
        assert_eq!(run(Some(RESET), &mut button, &mut adv, 1399), InputEvent::DoubleClick);
        // Window measured from the latest press
        assert_eq!(run(Some(RESET), &mut button, &mut adv, 1799), InputEvent::ResetPress);
    }

    #[test]
    fn test_press_at_window_edge_is_single() {
        let mut button = ResetButton::new();
        let mut adv = 0;
        run(Some(RESET), &mut button, &mut adv, 1000);
        assert_eq!(run(Some(RESET), &mut button, &mut adv, 1400), InputEvent::ResetPress);
    }

    #[test]
    fn test_hold_tracking() {
        let mut button = ResetButton::new();
        button.press(100, 400);
        assert!(button.is_down());
        assert!(!button.is_held(1400, 1300));
        assert!(button.is_held(1401, 1300));

        assert!(!button.release_if_open(true));
        assert!(button.release_if_open(false));
        assert!(!button.is_down());
        assert!(!button.release_if_open(false));
        assert!(!button.is_held(5000, 1300));
    }

    #[test]
    fn test_slam_and_other() {
        let mut button = ResetButton::new();
        let mut adv = 0;
        assert_eq!(run(Some(SLAM), &mut button, &mut adv, 10), InputEvent::Slam);
        assert_eq!(run(Some(SwitchId(22)), &mut button, &mut adv, 10), InputEvent::Other(SwitchId(22)));
        assert_eq!(run(None, &mut button, &mut adv, 10), InputEvent::Idle);
    }

    #[test]
    fn test_slam_ignored_when_not_wired() {
        let mut button = ResetButton::new();
        let mut adv = 0;
        let inputs = MenuInputs::new(RESET);
        let event = classify(Some(SLAM), &inputs, &SelfTestConfig::default(), &mut button, &mut adv, 10);
        assert_eq!(event, InputEvent::Other(SLAM));
    }

    #[test]
    fn test_self_test_debounce() {
        let mut button = ResetButton::new();
        let mut adv = 1000;
        let st = SelfTestConfig::default().self_test_switch;
        assert_eq!(run(Some(st), &mut button, &mut adv, 1250), InputEvent::Other(st));
        assert_eq!(adv, 1000);
        assert_eq!(run(Some(st), &mut button, &mut adv, 1251), InputEvent::SelfTestAdvance);
        assert_eq!(adv, 1251);
        assert_eq!(run(Some(st), &mut button, &mut adv, 1300), InputEvent::Other(st));
    }

    proptest! {
        #[test]
        fn prop_double_click_iff_inside_window(start in 0u32..1_000_000, gap in 0u32..2000) {
            let mut button = ResetButton::new();
            let first = button.press(start, 400);
            let second = button.press(start + gap, 400);
            prop_assert!(!first);
            prop_assert_eq!(second, gap < 400);
        }

        #[test]
        fn prop_hold_survives_clock_wrap(start in (u32::MAX - 5000)..u32::MAX, held in 0u32..4000) {
            let mut button = ResetButton::new();
            button.press(start, 400);
            prop_assert_eq!(button.is_held(start.wrapping_add(held), 1300), held > 1300);
        }
    }
}
