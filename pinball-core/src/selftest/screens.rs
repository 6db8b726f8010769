//! Hardware test screens
//!
//! Lamp, display, solenoid, switch, and sound tests. Each has an `enter`
//! step run once when the screen is selected and a `tick` step run every
//! tick after it.

use heapless::Vec;

use crate::config::{SelfTestConfig, ALL_LAMPS};
use crate::traits::display::{ALL_DIGITS, CREDIT_DISPLAY, PLAYER_DISPLAYS};
use crate::traits::{Board, SwitchId};

use super::session::{Session, Tick};

/// Pulse class for the first solenoid fired on entry
const ENTRY_PULSE: u8 = 5;

/// Pulse class for the periodic solenoid test
const CYCLE_PULSE: u8 = 3;

/// Ball-in-play codes identifying the hardware tests
const LIGHTS_CODE: u8 = 1;
const DISPLAYS_CODE: u8 = 2;
const SOLENOIDS_CODE: u8 = 3;
const SWITCHES_CODE: u8 = 4;
const SOUNDS_CODE: u8 = 5;

impl Session {
    pub(crate) fn lights<B: Board>(&mut self, board: &mut B, cfg: &SelfTestConfig, tick: &Tick) {
        if tick.entered {
            board.disable_solenoid_stack();
            board.set_disable_flippers(true);
            board.set_display_credits(0, true);
            board.set_display_ball_in_play(LIGHTS_CODE, true);
            board.turn_off_all_lamps();
            light_all(board, cfg);
            self.cur_value = ALL_LAMPS;
            board.set_display(0, u32::from(self.cur_value), true);
        }

        if tick.event.is_any_reset() {
            self.cur_value += 1;
            if self.cur_value > ALL_LAMPS {
                self.cur_value = 0;
            }
            if self.cur_value == cfg.lamp_count {
                self.cur_value = ALL_LAMPS;
                light_all(board, cfg);
            } else {
                board.turn_off_all_lamps();
                board.set_lamp_state(self.cur_value, true, 0, cfg.lamp_flash_ms);
            }
            board.set_display(0, u32::from(self.cur_value), true);
        }
    }

    pub(crate) fn displays<B: Board>(&mut self, board: &mut B, cfg: &SelfTestConfig, tick: &Tick) {
        if tick.entered {
            board.turn_off_all_lamps();
            board.set_display_credits(0, true);
            board.set_display_ball_in_play(DISPLAYS_CODE, true);
            for position in 0..PLAYER_DISPLAYS {
                board.set_display_blank(position, ALL_DIGITS);
            }
            self.cur_value = 0;
        }

        if tick.event.is_any_reset() {
            self.cur_value += 1;
            if self.cur_value >= cfg.display_patterns {
                self.cur_value = 0;
            }
        }

        board.cycle_all_displays(tick.now_ms, self.cur_value);
    }

    pub(crate) fn solenoids<B: Board>(&mut self, board: &mut B, cfg: &SelfTestConfig, tick: &Tick) {
        if tick.entered {
            board.turn_off_all_lamps();
            self.last_solenoid_ms = tick.now_ms;
            board.enable_solenoid_stack();
            board.set_disable_flippers(false);
            board.set_display_blank(CREDIT_DISPLAY, 0);
            board.set_display_credits(0, true);
            board.set_display_ball_in_play(SOLENOIDS_CODE, true);
            self.solenoid_cycle = true;
            self.saved_value = 0;
            board.push_solenoid(0, ENTRY_PULSE);
            board.set_display(0, self.saved_value, true);
        }

        if tick.event.is_any_reset() {
            self.solenoid_cycle = !self.solenoid_cycle;
            debug!("selftest: solenoid auto-cycle {}", self.solenoid_cycle);
        }

        if tick.now_ms.wrapping_sub(self.last_solenoid_ms) > cfg.solenoid_interval_ms {
            if self.solenoid_cycle {
                self.saved_value += 1;
                if self.saved_value >= u32::from(cfg.solenoid_count) {
                    self.saved_value = 0;
                }
            }
            board.push_solenoid(self.saved_value as u8, CYCLE_PULSE);
            board.set_display(0, self.saved_value, true);
            self.last_solenoid_ms = tick.now_ms;
        }
    }

    pub(crate) fn switches<B: Board>(&mut self, board: &mut B, cfg: &SelfTestConfig, tick: &Tick) {
        if tick.entered {
            board.turn_off_all_lamps();
            board.disable_solenoid_stack();
            board.set_disable_flippers(true);
            board.set_display_credits(0, true);
            board.set_display_ball_in_play(SWITCHES_CODE, true);
        }

        let closed = closed_switches(board, cfg.switch_count);
        for (position, switch) in closed.iter().enumerate() {
            board.set_display(position as u8, u32::from(switch.as_u8()), true);
        }
        for position in closed.len() as u8..PLAYER_DISPLAYS {
            board.set_display_blank(position, 0);
        }
    }

    pub(crate) fn sounds<B: Board>(&mut self, board: &mut B) {
        board.set_display_credits(0, true);
        board.set_display_ball_in_play(SOUNDS_CODE, true);
    }
}

fn light_all<B: Board>(board: &mut B, cfg: &SelfTestConfig) {
    for lamp in 0..cfg.lamp_count {
        board.set_lamp_state(lamp, true, 0, cfg.lamp_flash_ms);
    }
}

/// First switches (up to one per player display) reading closed
fn closed_switches<B: Board>(board: &B, switch_count: u8) -> Vec<SwitchId, { PLAYER_DISPLAYS as usize }> {
    let mut closed = Vec::new();
    for switch in (0..switch_count).map(SwitchId) {
        if board.is_switch_active(switch) && closed.push(switch).is_err() {
            break;
        }
    }
    closed
}
