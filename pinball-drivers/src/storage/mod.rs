//! Non-volatile storage implementations

pub mod at24;
pub mod nvram;

pub use at24::{At24, At24Config, At24Error};
pub use nvram::{NvRam, NvRamError};
