//! Switch matrix input trait

/// Identifies one switch in the playfield/cabinet switch matrix
///
/// Bally/Stern-style boards number switches 0-39 across five strobe
/// columns. Values outside the matrix are used for special inputs such as
/// the self-test button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwitchId(pub u8);

impl SwitchId {
    /// Get the raw switch number
    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

impl From<u8> for SwitchId {
    fn from(value: u8) -> Self {
        SwitchId(value)
    }
}

/// Source of debounced switch closures
///
/// Closures are queued by the driver (usually from a matrix scan running
/// at a fixed rate) and consumed one per control-loop tick.
pub trait SwitchSource {
    /// Pull the oldest pending switch closure, if any
    fn pull_next_switch(&mut self) -> Option<SwitchId>;

    /// Check whether a switch currently reads closed
    fn is_switch_active(&self, switch: SwitchId) -> bool;
}
