//! Board-agnostic core logic for the pinball self-test menu
//!
//! This crate contains all menu logic that does not depend on specific
//! hardware implementations:
//!
//! - Hardware abstraction traits (switches, lamps, displays, solenoids,
//!   non-volatile storage)
//! - Screen definitions and menu ordering
//! - Reset button classification (double-click, hold, auto-repeat)
//! - Editing protocol for persisted scores, credits, and audits
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod log;

pub mod config;
pub mod selftest;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use selftest::{MenuInputs, SelfTest};
pub use state::{NextState, Screen};
