//! Non-volatile storage abstractions
//!
//! Provides byte and accumulator access to the board's EEPROM (or
//! battery-backed RAM). Audit counters and score thresholds live at fixed
//! addresses; see [`crate::config::AuditMap`].

/// Byte address in non-volatile storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NvAddress(pub u16);

impl NvAddress {
    /// Get the address as a raw offset
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Address `bytes` further on
    pub const fn offset(self, bytes: u16) -> Self {
        NvAddress(self.0.wrapping_add(bytes))
    }
}

/// Size in bytes of an accumulator written by [`NvStorage::write_u32`]
pub const ACCUMULATOR_LEN: u16 = 4;

/// Non-volatile storage trait
///
/// Accumulators are stored little-endian in four consecutive bytes
/// starting at the given address. Implementations do not perform wear
/// leveling; callers are expected to coalesce writes.
pub trait NvStorage {
    /// Error type returned by the underlying device
    type Error: core::fmt::Debug;

    /// Read one byte
    fn read_byte(&mut self, address: NvAddress) -> Result<u8, Self::Error>;

    /// Write one byte
    fn write_byte(&mut self, address: NvAddress, value: u8) -> Result<(), Self::Error>;

    /// Read a 32-bit accumulator
    fn read_u32(&mut self, address: NvAddress) -> Result<u32, Self::Error> {
        let mut bytes = [0u8; ACCUMULATOR_LEN as usize];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = self.read_byte(address.offset(i as u16))?;
        }
        Ok(u32::from_le_bytes(bytes))
    }

    /// Write a 32-bit accumulator
    fn write_u32(&mut self, address: NvAddress, value: u32) -> Result<(), Self::Error> {
        for (i, byte) in value.to_le_bytes().iter().enumerate() {
            self.write_byte(address.offset(i as u16), *byte)?;
        }
        Ok(())
    }
}
