//! Non-volatile storage layout for audits and settings

use crate::traits::NvAddress;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where each audit counter and persisted setting lives
///
/// Every field except `credits` is the first byte of a four-byte
/// accumulator. `credits` is a single byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AuditMap {
    pub high_score: NvAddress,
    pub credits: NvAddress,
    pub award_score_1: NvAddress,
    pub award_score_2: NvAddress,
    pub award_score_3: NvAddress,
    pub total_plays: NvAddress,
    pub total_replays: NvAddress,
    pub high_score_beaten: NvAddress,
    pub chute_2_coins: NvAddress,
    pub chute_1_coins: NvAddress,
    pub chute_3_coins: NvAddress,
}

impl Default for AuditMap {
    fn default() -> Self {
        Self {
            high_score: NvAddress(1),
            credits: NvAddress(5),
            award_score_1: NvAddress(10),
            award_score_2: NvAddress(14),
            award_score_3: NvAddress(18),
            total_plays: NvAddress(26),
            total_replays: NvAddress(30),
            high_score_beaten: NvAddress(34),
            chute_2_coins: NvAddress(38),
            chute_1_coins: NvAddress(42),
            chute_3_coins: NvAddress(46),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::storage::ACCUMULATOR_LEN;

    #[test]
    fn test_default_accumulators_do_not_overlap() {
        let map = AuditMap::default();
        let accumulators = [
            map.high_score,
            map.award_score_1,
            map.award_score_2,
            map.award_score_3,
            map.total_plays,
            map.total_replays,
            map.high_score_beaten,
            map.chute_2_coins,
            map.chute_1_coins,
            map.chute_3_coins,
        ];

        for (i, a) in accumulators.iter().enumerate() {
            let credits = map.credits.as_u16();
            assert!(
                credits < a.as_u16() || credits >= a.as_u16() + ACCUMULATOR_LEN,
                "credits byte inside accumulator {}",
                i
            );
            for b in &accumulators[i + 1..] {
                let (lo, hi) = if a < b { (a, b) } else { (b, a) };
                assert!(lo.as_u16() + ACCUMULATOR_LEN <= hi.as_u16());
            }
        }
    }
}
