//! RAM-backed storage
//!
//! Models battery-backed RAM (or an EEPROM shadow loaded at boot). Also
//! used on the host to run the menu against saved audit images.

use pinball_core::traits::{NvAddress, NvStorage};

/// Errors from RAM-backed storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NvRamError {
    /// Address past the end of the memory
    OutOfRange,
}

/// Byte-addressed storage of `N` bytes
#[derive(Debug, Clone)]
pub struct NvRam<const N: usize> {
    data: [u8; N],
}

impl<const N: usize> Default for NvRam<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> NvRam<N> {
    /// Create zero-filled storage
    pub const fn new() -> Self {
        Self { data: [0; N] }
    }

    /// Load contents from a byte slice (e.g. a save file)
    ///
    /// Copies at most `N` bytes; the remainder is left untouched.
    pub fn load_from(&mut self, src: &[u8]) {
        let len = src.len().min(N);
        self.data[..len].copy_from_slice(&src[..len]);
    }

    /// Full contents, for saving
    pub fn snapshot(&self) -> &[u8; N] {
        &self.data
    }

    /// Storage size in bytes
    pub const fn capacity(&self) -> usize {
        N
    }

    fn slot(&mut self, address: NvAddress) -> Result<&mut u8, NvRamError> {
        self.data
            .get_mut(address.as_u16() as usize)
            .ok_or(NvRamError::OutOfRange)
    }
}

impl<const N: usize> NvStorage for NvRam<N> {
    type Error = NvRamError;

    fn read_byte(&mut self, address: NvAddress) -> Result<u8, NvRamError> {
        self.slot(address).map(|b| *b)
    }

    fn write_byte(&mut self, address: NvAddress, value: u8) -> Result<(), NvRamError> {
        *self.slot(address)? = value;
        Ok(())
    }

    fn read_u32(&mut self, address: NvAddress) -> Result<u32, NvRamError> {
        let start = address.as_u16() as usize;
        let bytes = self
            .data
            .get(start..start + 4)
            .ok_or(NvRamError::OutOfRange)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn write_u32(&mut self, address: NvAddress, value: u32) -> Result<(), NvRamError> {
        let start = address.as_u16() as usize;
        // Check the whole range first so a failed write leaves no partial value
        let bytes = self
            .data
            .get_mut(start..start + 4)
            .ok_or(NvRamError::OutOfRange)?;
        bytes.copy_from_slice(&value.to_le_bytes());
        Ok(())
    }
}
