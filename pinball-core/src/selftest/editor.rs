//! Editable persisted values
//!
//! Score thresholds, credits, and audit counters share one editing
//! protocol:
//!
//! - Score-like values step by the score increment on each press and
//!   write through. Holding reset auto-repeats on an accelerating
//!   schedule without touching storage; the result is written once when
//!   the button is released. A double-click zeroes the shown value but
//!   leaves storage alone until the next commit.
//! - Credits step by one, wrap past the maximum, and write through on
//!   every press or double-click.
//! - Audits are clear-only: a double-click zeroes and writes through.

use crate::config::{SelfTestConfig, SpeedySchedule};
use crate::state::{InputEvent, ValueTarget};
use crate::traits::{Board, NvAddress, NvStorage};

use super::session::{Session, Tick};

/// Held-button auto-repeat clock
#[derive(Debug, Clone, Default)]
pub struct Accelerator {
    /// When the next change is due; `None` until a hold crosses the threshold
    next_change_ms: Option<u32>,
    /// Changes applied since the hold began, cleared on commit
    changes: u32,
}

impl Accelerator {
    /// Create an idle accelerator
    pub const fn new() -> Self {
        Self {
            next_change_ms: None,
            changes: 0,
        }
    }

    /// Start repeating at `now_ms` unless already running
    pub fn arm(&mut self, now_ms: u32) {
        if self.next_change_ms.is_none() {
            self.next_change_ms = Some(now_ms);
            self.changes = 0;
        }
    }

    /// Stop repeating, keeping the uncommitted change count
    pub fn disarm(&mut self) {
        self.next_change_ms = None;
    }

    /// Check if a change is due and schedule the one after it
    pub fn take_due(&mut self, now_ms: u32, schedule: &SpeedySchedule) -> bool {
        match self.next_change_ms {
            Some(at) if reached(now_ms, at) => {
                let interval = schedule.interval_after(self.changes);
                self.next_change_ms = Some(now_ms.wrapping_add(interval));
                self.changes += 1;
                true
            }
            _ => false,
        }
    }

    /// Consume the uncommitted changes, returning true if there were any
    pub fn take_pending(&mut self) -> bool {
        if self.changes > 0 {
            self.changes = 0;
            return true;
        }
        false
    }

    /// Drop uncommitted changes without writing them
    pub fn abandon(&mut self) {
        self.changes = 0;
    }

    /// Changes applied since the hold began
    pub fn changes(&self) -> u32 {
        self.changes
    }

    /// When the next change is due
    pub fn next_change(&self) -> Option<u32> {
        self.next_change_ms
    }
}

/// Wrap-safe `now >= at` for a free-running millisecond clock
fn reached(now_ms: u32, at_ms: u32) -> bool {
    (now_ms.wrapping_sub(at_ms) as i32) >= 0
}

impl Session {
    /// Run the editing protocol for one tick
    pub(crate) fn edit_value<B: Board>(
        &mut self,
        board: &mut B,
        target: ValueTarget,
        cfg: &SelfTestConfig,
        tick: &Tick,
    ) {
        match target {
            ValueTarget::Score(address) => self.edit_score(board, address, cfg, tick),
            ValueTarget::Credits(address) => self.edit_credits(board, address, cfg, tick),
            ValueTarget::Audit(address) => self.edit_audit(board, address, tick),
        }
    }

    fn edit_score<B: Board>(&mut self, board: &mut B, address: NvAddress, cfg: &SelfTestConfig, tick: &Tick) {
        if tick.entered {
            self.saved_value = read_u32_or_zero(board, address);
            board.set_display(0, self.saved_value, true);
        }

        if tick.event == InputEvent::ResetPress {
            self.saved_value = self.saved_value.wrapping_add(cfg.score_step);
            board.set_display(0, self.saved_value, true);
            write_u32_logged(board, address, self.saved_value);
        }

        if tick.held && self.speedy.take_due(tick.now_ms, &cfg.speedy) {
            self.saved_value = self.saved_value.wrapping_add(cfg.score_step);
            board.set_display(0, self.saved_value, true);
        }

        if !tick.held && self.speedy.take_pending() {
            debug!("selftest: committing {} at {}", self.saved_value, address);
            write_u32_logged(board, address, self.saved_value);
        }

        if tick.event == InputEvent::DoubleClick {
            self.saved_value = 0;
            board.set_display(0, self.saved_value, true);
        }
    }

    fn edit_credits<B: Board>(&mut self, board: &mut B, address: NvAddress, cfg: &SelfTestConfig, tick: &Tick) {
        if tick.entered {
            self.saved_value = match board.read_byte(address) {
                Ok(credits) => u32::from(credits),
                Err(_) => {
                    warn!("selftest: credit read failed at {}", address);
                    0
                }
            };
            board.set_display(0, self.saved_value, true);
        }

        if tick.event.is_any_reset() {
            self.saved_value += 1;
            if self.saved_value > u32::from(cfg.max_credits) {
                self.saved_value = 0;
            }
            board.set_display(0, self.saved_value, true);
            if board.write_byte(address, (self.saved_value & 0xFF) as u8).is_err() {
                warn!("selftest: credit write failed at {}", address);
            }
        }
    }

    fn edit_audit<B: Board>(&mut self, board: &mut B, address: NvAddress, tick: &Tick) {
        if tick.entered {
            self.saved_value = read_u32_or_zero(board, address);
            board.set_display(0, self.saved_value, true);
        }

        if tick.event == InputEvent::DoubleClick {
            self.saved_value = 0;
            board.set_display(0, self.saved_value, true);
            info!("selftest: audit at {} cleared", address);
            write_u32_logged(board, address, self.saved_value);
        }
    }
}

fn read_u32_or_zero<S: NvStorage>(storage: &mut S, address: NvAddress) -> u32 {
    storage.read_u32(address).unwrap_or_else(|_| {
        warn!("selftest: read failed at {}", address);
        0
    })
}

fn write_u32_logged<S: NvStorage>(storage: &mut S, address: NvAddress, value: u32) {
    if storage.write_u32(address, value).is_err() {
        warn!("selftest: write of {} failed at {}", value, address);
    }
}
