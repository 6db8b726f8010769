//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in pinball-core for common controller board hardware:
//!
//! - Non-volatile storage (RAM-backed, AT24-series I2C EEPROM)
//! - Debounced switch matrix with a bounded event stack

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod storage;
pub mod switch_stack;

pub use storage::{At24, At24Config, At24Error, NvRam, NvRamError};
pub use switch_stack::SwitchStack;
