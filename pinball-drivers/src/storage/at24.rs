//! AT24-series I2C EEPROM driver
//!
//! Supports the 24C32 through 24C512, which use two address bytes.
//!
//! # Protocol
//!
//! - Random read: write the 16-bit address (big-endian), then read
//! - Byte/page write: address followed by up to one page of data
//! - The part ignores the bus for the write cycle time (5 ms typical)
//!   after every write, so the driver waits it out before returning
//!
//! Page writes wrap inside the page, so multi-byte writes are split at
//! page boundaries and each page goes out as a single frame.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use pinball_core::traits::storage::ACCUMULATOR_LEN;
use pinball_core::traits::{NvAddress, NvStorage};

/// Default 7-bit bus address (A0-A2 tied low)
pub const DEFAULT_ADDRESS: u8 = 0x50;

/// Largest page of any supported part (24C512)
pub const MAX_PAGE_SIZE: u16 = 128;

/// Largest part reachable with two address bytes
pub const MAX_CAPACITY: u32 = 0x1_0000;

/// Errors from the EEPROM driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum At24Error<E> {
    /// Bus error
    I2c(E),
    /// Access runs past the end of the part
    OutOfRange,
    /// Page size or capacity the driver cannot handle
    InvalidConfig,
}

/// AT24 configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct At24Config {
    /// 7-bit bus address
    pub address: u8,
    /// Part size in bytes
    pub capacity: u32,
    /// Page size in bytes
    pub page_size: u16,
    /// Write cycle time in ms
    pub write_cycle_ms: u32,
}

impl Default for At24Config {
    fn default() -> Self {
        Self::at24c32()
    }
}

impl At24Config {
    /// 24C32: 4 KiB, 32-byte pages
    pub const fn at24c32() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            capacity: 4096,
            page_size: 32,
            write_cycle_ms: 5,
        }
    }

    /// 24C256: 32 KiB, 64-byte pages
    pub const fn at24c256() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            capacity: 32_768,
            page_size: 64,
            write_cycle_ms: 5,
        }
    }

    /// 24C512: 64 KiB, 128-byte pages
    pub const fn at24c512() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            capacity: MAX_CAPACITY,
            page_size: MAX_PAGE_SIZE,
            write_cycle_ms: 5,
        }
    }

    /// Check the config describes a part the driver can address
    pub fn is_valid(&self) -> bool {
        self.page_size > 0 && self.page_size <= MAX_PAGE_SIZE && self.capacity <= MAX_CAPACITY
    }

    /// Bytes left in the page containing `offset`
    fn page_remaining(&self, offset: u32) -> u32 {
        let page = u32::from(self.page_size);
        page - (offset % page)
    }
}

/// AT24-series EEPROM
pub struct At24<I2C, D> {
    i2c: I2C,
    delay: D,
    config: At24Config,
}

impl<I2C: I2c, D: DelayNs> At24<I2C, D> {
    /// Create a driver for a part described by `config`
    ///
    /// Fails with [`At24Error::InvalidConfig`] for a zero or oversized
    /// page, or a capacity beyond 16-bit addressing.
    pub fn new(i2c: I2C, delay: D, config: At24Config) -> Result<Self, At24Error<I2C::Error>> {
        if !config.is_valid() {
            return Err(At24Error::InvalidConfig);
        }
        Ok(Self { i2c, delay, config })
    }

    /// Release the bus and delay
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// Configuration in use
    pub fn config(&self) -> &At24Config {
        &self.config
    }

    fn check_range(&self, address: NvAddress, len: usize) -> Result<(), At24Error<I2C::Error>> {
        let len = u32::try_from(len).map_err(|_| At24Error::OutOfRange)?;
        match u32::from(address.as_u16()).checked_add(len) {
            Some(end) if end <= self.config.capacity => Ok(()),
            _ => Err(At24Error::OutOfRange),
        }
    }

    /// Read `buf.len()` bytes starting at `address`
    pub fn read(&mut self, address: NvAddress, buf: &mut [u8]) -> Result<(), At24Error<I2C::Error>> {
        self.check_range(address, buf.len())?;
        self.i2c
            .write_read(self.config.address, &address.as_u16().to_be_bytes(), buf)
            .map_err(At24Error::I2c)
    }

    /// Write `data` starting at `address`, one frame per page touched
    pub fn write(&mut self, address: NvAddress, data: &[u8]) -> Result<(), At24Error<I2C::Error>> {
        self.check_range(address, data.len())?;

        let mut offset = u32::from(address.as_u16());
        let mut rest = data;
        while !rest.is_empty() {
            let len = rest.len().min(self.config.page_remaining(offset) as usize);
            let (chunk, tail) = rest.split_at(len);
            self.write_page(offset, chunk)?;
            offset += len as u32;
            rest = tail;
        }
        Ok(())
    }

    fn write_page(&mut self, offset: u32, chunk: &[u8]) -> Result<(), At24Error<I2C::Error>> {
        // Range was checked against a capacity of at most 64 KiB
        let at = u16::try_from(offset).map_err(|_| At24Error::OutOfRange)?;
        let mut frame = [0u8; 2 + MAX_PAGE_SIZE as usize];
        frame[..2].copy_from_slice(&at.to_be_bytes());
        frame[2..2 + chunk.len()].copy_from_slice(chunk);
        self.i2c
            .write(self.config.address, &frame[..2 + chunk.len()])
            .map_err(At24Error::I2c)?;
        self.delay.delay_ms(self.config.write_cycle_ms);
        Ok(())
    }
}

impl<I2C: I2c, D: DelayNs> NvStorage for At24<I2C, D> {
    type Error = At24Error<I2C::Error>;

    fn read_byte(&mut self, address: NvAddress) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.read(address, &mut buf)?;
        Ok(buf[0])
    }

    fn write_byte(&mut self, address: NvAddress, value: u8) -> Result<(), Self::Error> {
        self.write(address, &[value])
    }

    fn read_u32(&mut self, address: NvAddress) -> Result<u32, Self::Error> {
        let mut buf = [0u8; ACCUMULATOR_LEN as usize];
        self.read(address, &mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    fn write_u32(&mut self, address: NvAddress, value: u32) -> Result<(), Self::Error> {
        self.write(address, &value.to_le_bytes())
    }
}
