//! Self-test and audit menu handler
//!
//! [`SelfTest::tick`] is called once per control-loop tick while the
//! machine is in the test menu. Each tick it:
//!
//! 1. Pulls one switch event and classifies it (reset, double-click,
//!    slam, self-test advance)
//! 2. Tracks how long reset has been held and arms auto-repeat
//! 3. Resets the displays and coin lockout if the screen just changed
//! 4. Runs the current screen's test or value editor
//!
//! and returns the state the caller should be in next tick.

pub mod editor;
pub mod input;
pub mod screens;
pub mod session;

pub use editor::Accelerator;
pub use input::{MenuInputs, ResetButton};
pub use session::Session;

use crate::config::{AuditMap, BoardConfig, SelfTestConfig};
use crate::state::{InputEvent, NextState, Screen, ScreenKind};
use crate::traits::display::PLAYER_DISPLAYS;
use crate::traits::Board;

use session::Tick;

/// Diagnostic menu driver
#[derive(Debug, Clone)]
pub struct SelfTest {
    /// Timing and hardware sizes
    config: SelfTestConfig,
    /// Storage layout
    audits: AuditMap,
    /// State carried between ticks
    session: Session,
}

impl Default for SelfTest {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl SelfTest {
    /// Create a handler for the given board
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config: config.self_test,
            audits: config.audits,
            session: Session::new(),
        }
    }

    /// Session state
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable session state
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Self-test configuration in use
    pub fn config(&self) -> &SelfTestConfig {
        &self.config
    }

    /// Storage layout in use
    pub fn audits(&self) -> &AuditMap {
        &self.audits
    }

    /// Run one tick of the menu
    ///
    /// - `screen`: Screen the machine is currently in
    /// - `screen_changed`: True on the first tick in `screen`
    /// - `now_ms`: Free-running millisecond clock
    /// - `inputs`: Reset and optional slam switch
    ///
    /// Returns the state for the next tick. The current screen still runs
    /// this tick even when the result moves elsewhere.
    pub fn tick<B: Board>(
        &mut self,
        board: &mut B,
        screen: Screen,
        screen_changed: bool,
        now_ms: u32,
        inputs: MenuInputs,
    ) -> NextState {
        let cfg = self.config;
        let session = &mut self.session;
        let mut next = NextState::Test(screen);

        let event = input::classify(
            board.pull_next_switch(),
            &inputs,
            &cfg,
            &mut session.button,
            &mut session.last_self_test_change_ms,
            now_ms,
        );

        if session.button.release_if_open(board.is_switch_active(inputs.reset)) {
            session.speedy.disarm();
        }

        let held = session.button.is_held(now_ms, cfg.hold_threshold_ms);
        if held {
            session.speedy.arm(now_ms);
        }

        match event {
            InputEvent::Slam => {
                info!("selftest: slam, leaving menu from {}", screen);
                session.speedy.abandon();
                next = NextState::Attract;
            }
            InputEvent::SelfTestAdvance => {
                next = match screen.next() {
                    Some(following) => NextState::Test(following),
                    None => {
                        info!("selftest: menu complete");
                        NextState::Attract
                    }
                };
            }
            _ => {}
        }

        if screen_changed {
            debug!("selftest: entering {}", screen);
            session.speedy.abandon();
            reset_outputs(board, screen);
        }

        let tick = Tick {
            entered: screen_changed,
            event,
            held,
            now_ms,
        };

        match screen.kind(&self.audits) {
            ScreenKind::Lights => session.lights(board, &cfg, &tick),
            ScreenKind::Displays => session.displays(board, &cfg, &tick),
            ScreenKind::Solenoids => session.solenoids(board, &cfg, &tick),
            ScreenKind::Switches => session.switches(board, &cfg, &tick),
            ScreenKind::Sounds => session.sounds(board),
            ScreenKind::Value(target) => session.edit_value(board, target, &cfg, &tick),
        }

        next
    }
}

/// Common setup on entering any screen
fn reset_outputs<B: Board>(board: &mut B, screen: Screen) {
    board.set_coin_lockout(false);

    for position in 0..PLAYER_DISPLAYS {
        board.set_display(position, 0, false);
        board.set_display_blank(position, 0);
    }

    if let Some(code) = screen.credit_code() {
        board.set_display_credits(code, true);
        board.set_display_ball_in_play(0, false);
    }
}
