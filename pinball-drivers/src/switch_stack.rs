//! Debounced switch matrix
//!
//! Bally/Stern boards read the playfield switches as five strobe columns
//! of eight returns. The board code scans the matrix on a fixed
//! interrupt and hands each scan to [`SwitchStack::scan`]. A switch
//! closure is accepted once it reads the same way for the configured
//! number of consecutive scans, and accepted closures are queued for the
//! control loop.

use heapless::Deque;
use pinball_core::traits::{SwitchId, SwitchSource};

/// Strobe columns in the matrix
pub const STROBES: usize = 5;

/// Switches in the matrix
pub const MATRIX_SWITCHES: usize = STROBES * 8;

/// Consecutive identical scans needed to accept a change
pub const DEFAULT_DEBOUNCE_SCANS: u8 = 2;

/// Debounced switch state plus a queue of pending closures
///
/// `N` bounds the queue. When it is full, new closures are dropped and
/// counted.
#[derive(Debug, Clone)]
pub struct SwitchStack<const N: usize> {
    /// Debounced state, one bit per switch
    stable: [u8; STROBES],
    /// Scans each switch has disagreed with `stable`
    pending: [u8; MATRIX_SWITCHES],
    /// Scans required before accepting a change
    debounce_scans: u8,
    /// Closures not yet pulled
    events: Deque<SwitchId, N>,
    /// Closures lost to a full queue
    dropped: u32,
}

impl<const N: usize> Default for SwitchStack<N> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_SCANS)
    }
}

impl<const N: usize> SwitchStack<N> {
    /// Create a stack with every switch open
    pub fn new(debounce_scans: u8) -> Self {
        Self {
            stable: [0; STROBES],
            pending: [0; MATRIX_SWITCHES],
            debounce_scans: debounce_scans.max(1),
            events: Deque::new(),
            dropped: 0,
        }
    }

    /// Feed one raw matrix scan (bit `n` of column `c` is switch `c * 8 + n`)
    pub fn scan(&mut self, columns: [u8; STROBES]) {
        for (column, raw) in columns.iter().enumerate() {
            let changed = raw ^ self.stable[column];
            for bit in 0..8 {
                let index = column * 8 + bit;
                let mask = 1u8 << bit;

                if changed & mask == 0 {
                    self.pending[index] = 0;
                    continue;
                }

                self.pending[index] += 1;
                if self.pending[index] < self.debounce_scans {
                    continue;
                }

                self.pending[index] = 0;
                self.stable[column] ^= mask;
                if raw & mask != 0 {
                    self.push(SwitchId(index as u8));
                }
            }
        }
    }

    /// Queue a closure from an input outside the matrix
    ///
    /// Used for the cabinet self-test button, which is wired to its own
    /// interrupt rather than the matrix.
    pub fn push(&mut self, switch: SwitchId) {
        if self.events.push_back(switch).is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }

    /// Discard queued closures
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Closures waiting to be pulled
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if no closures are waiting
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Closures lost because the queue was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl<const N: usize> SwitchSource for SwitchStack<N> {
    fn pull_next_switch(&mut self) -> Option<SwitchId> {
        self.events.pop_front()
    }

    fn is_switch_active(&self, switch: SwitchId) -> bool {
        let index = switch.as_u8() as usize;
        if index >= MATRIX_SWITCHES {
            return false;
        }
        self.stable[index / 8] & (1 << (index % 8)) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Scan with exactly one switch closed
    fn only(switch: u8) -> [u8; STROBES] {
        let mut columns = [0; STROBES];
        columns[switch as usize / 8] = 1 << (switch % 8);
        columns
    }

    #[test]
    fn test_closure_needs_debounce() {
        let mut stack = SwitchStack::<8>::default();
        stack.scan(only(17));
        assert!(stack.is_empty());
        assert!(!stack.is_switch_active(SwitchId(17)));

        stack.scan(only(17));
        assert!(stack.is_switch_active(SwitchId(17)));
        assert_eq!(stack.pull_next_switch(), Some(SwitchId(17)));
        assert_eq!(stack.pull_next_switch(), None);
    }

    #[test]
    fn test_glitch_ignored() {
        let mut stack = SwitchStack::<8>::default();
        stack.scan(only(3));
        stack.scan([0; STROBES]);
        stack.scan(only(3));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_held_switch_queued_once() {
        let mut stack = SwitchStack::<8>::default();
        for _ in 0..10 {
            stack.scan(only(39));
        }
        assert_eq!(stack.len(), 1);

        stack.scan([0; STROBES]);
        stack.scan([0; STROBES]);
        assert!(!stack.is_switch_active(SwitchId(39)));
        assert_eq!(stack.len(), 1);

        stack.scan(only(39));
        stack.scan(only(39));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_full_queue_drops_newest() {
        let mut stack = SwitchStack::<2>::new(1);
        stack.push(SwitchId(1));
        stack.push(SwitchId(2));
        stack.push(SwitchId(3));
        assert_eq!(stack.dropped(), 1);
        assert_eq!(stack.pull_next_switch(), Some(SwitchId(1)));
        assert_eq!(stack.pull_next_switch(), Some(SwitchId(2)));
        assert_eq!(stack.pull_next_switch(), None);
    }

    #[test]
    fn test_special_inputs_are_never_active() {
        let mut stack = SwitchStack::<4>::default();
        stack.push(SwitchId(0x7F));
        assert!(!stack.is_switch_active(SwitchId(0x7F)));
        assert_eq!(stack.pull_next_switch(), Some(SwitchId(0x7F)));
    }

    #[test]
    fn test_clear() {
        let mut stack = SwitchStack::<4>::new(1);
        stack.scan(only(0));
        stack.clear();
        assert!(stack.is_empty());
        assert!(stack.is_switch_active(SwitchId(0)));
    }

    proptest! {
        #[test]
        fn prop_stable_scan_reported_in_order(columns in prop::array::uniform5(any::<u8>())) {
            let mut stack = SwitchStack::<64>::default();
            stack.scan(columns);
            stack.scan(columns);

            let mut expected = 0;
            let mut last = None;
            while let Some(switch) = stack.pull_next_switch() {
                prop_assert!(last < Some(switch));
                last = Some(switch);
                expected += 1;
            }
            let closed: u32 = columns.iter().map(|c| c.count_ones()).sum();
            prop_assert_eq!(expected, closed);

            for index in 0..MATRIX_SWITCHES as u8 {
                let bit = columns[index as usize / 8] & (1 << (index % 8)) != 0;
                prop_assert_eq!(stack.is_switch_active(SwitchId(index)), bit);
            }
        }
    }
}
