//! Screen definitions
//!
//! Each screen keeps the negative machine-state ordinal used by
//! Bally/Stern-style game code (attract is 0, the first test is -1), so
//! callers that store machine state as an integer can round-trip through
//! [`Screen::ordinal`] and [`Screen::from_ordinal`].

use crate::config::AuditMap;
use crate::traits::NvAddress;

/// Machine-state ordinal of attract mode
pub const MACHINE_STATE_ATTRACT: i8 = 0;

/// Machine-state ordinal one past the last screen
pub const MACHINE_STATE_TEST_DONE: i8 = -17;

/// Self-test screens in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(i8)]
pub enum Screen {
    /// Lamp test
    Lights = -1,
    /// Display digit/segment test
    Displays = -2,
    /// Solenoid firing test
    Solenoids = -3,
    /// Switch matrix test
    Switches = -4,
    /// Sound board test
    Sounds = -5,
    /// First replay award threshold
    ScoreLevel1 = -6,
    /// Second replay award threshold
    ScoreLevel2 = -7,
    /// Third replay award threshold
    ScoreLevel3 = -8,
    /// Stored high score
    HighScore = -9,
    /// Credits on the machine
    Credits = -10,
    /// Lifetime games started
    TotalPlays = -11,
    /// Lifetime replays awarded
    TotalReplays = -12,
    /// Times the high score was beaten
    HighScoreBeaten = -13,
    /// Coins through chute 2
    Chute2Coins = -14,
    /// Coins through chute 1
    Chute1Coins = -15,
    /// Coins through chute 3
    Chute3Coins = -16,
}

/// What the handler wants the machine to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NextState {
    /// Stay in (or move to) a self-test screen
    Test(Screen),
    /// Leave the menu for attract mode
    Attract,
}

impl NextState {
    /// Machine-state ordinal of this state
    pub fn ordinal(self) -> i8 {
        match self {
            NextState::Test(screen) => screen.ordinal(),
            NextState::Attract => MACHINE_STATE_ATTRACT,
        }
    }
}

/// How a screen behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenKind {
    Lights,
    Displays,
    Solenoids,
    Switches,
    Sounds,
    /// Edits a persisted value
    Value(ValueTarget),
}

/// Persisted value edited by a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValueTarget {
    /// Score-like accumulator, stepped by the score increment
    Score(NvAddress),
    /// Single credit byte
    Credits(NvAddress),
    /// Audit accumulator, clear-only
    Audit(NvAddress),
}

impl Screen {
    /// All screens in menu order
    pub const ALL: [Screen; 16] = [
        Screen::Lights,
        Screen::Displays,
        Screen::Solenoids,
        Screen::Switches,
        Screen::Sounds,
        Screen::ScoreLevel1,
        Screen::ScoreLevel2,
        Screen::ScoreLevel3,
        Screen::HighScore,
        Screen::Credits,
        Screen::TotalPlays,
        Screen::TotalReplays,
        Screen::HighScoreBeaten,
        Screen::Chute2Coins,
        Screen::Chute1Coins,
        Screen::Chute3Coins,
    ];

    /// First screen shown when the menu is entered
    pub const FIRST: Screen = Screen::Lights;

    /// Machine-state ordinal
    pub const fn ordinal(self) -> i8 {
        self as i8
    }

    /// Look up a screen by machine-state ordinal
    pub fn from_ordinal(ordinal: i8) -> Option<Self> {
        Screen::ALL.iter().copied().find(|s| s.ordinal() == ordinal)
    }

    /// Screen reached by pressing self-test, or `None` past the last one
    pub fn next(self) -> Option<Self> {
        let ordinal = self.ordinal() - 1;
        if ordinal == MACHINE_STATE_TEST_DONE {
            return None;
        }
        Screen::from_ordinal(ordinal)
    }

    /// Code shown on the credit display while this screen is active
    ///
    /// Hardware tests identify themselves through the ball-in-play
    /// display instead and return `None`.
    pub fn credit_code(self) -> Option<u8> {
        if self.ordinal() <= Screen::ScoreLevel1.ordinal() {
            Some((self.ordinal().unsigned_abs()) - Screen::Sounds.ordinal().unsigned_abs())
        } else {
            None
        }
    }

    /// Behavior of this screen, resolving storage through `map`
    pub fn kind(self, map: &AuditMap) -> ScreenKind {
        use ValueTarget::*;

        match self {
            Screen::Lights => ScreenKind::Lights,
            Screen::Displays => ScreenKind::Displays,
            Screen::Solenoids => ScreenKind::Solenoids,
            Screen::Switches => ScreenKind::Switches,
            Screen::Sounds => ScreenKind::Sounds,
            Screen::ScoreLevel1 => ScreenKind::Value(Score(map.award_score_1)),
            Screen::ScoreLevel2 => ScreenKind::Value(Score(map.award_score_2)),
            Screen::ScoreLevel3 => ScreenKind::Value(Score(map.award_score_3)),
            Screen::HighScore => ScreenKind::Value(Score(map.high_score)),
            Screen::Credits => ScreenKind::Value(Credits(map.credits)),
            Screen::TotalPlays => ScreenKind::Value(Audit(map.total_plays)),
            Screen::TotalReplays => ScreenKind::Value(Audit(map.total_replays)),
            Screen::HighScoreBeaten => ScreenKind::Value(Audit(map.high_score_beaten)),
            Screen::Chute2Coins => ScreenKind::Value(Audit(map.chute_2_coins)),
            Screen::Chute1Coins => ScreenKind::Value(Audit(map.chute_1_coins)),
            Screen::Chute3Coins => ScreenKind::Value(Audit(map.chute_3_coins)),
        }
    }

    /// Persisted value edited by this screen, if any
    pub fn target(self, map: &AuditMap) -> Option<ValueTarget> {
        match self.kind(map) {
            ScreenKind::Value(target) => Some(target),
            _ => None,
        }
    }
}
