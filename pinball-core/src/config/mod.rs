//! Configuration types
//!
//! Board-agnostic self-test timing and the non-volatile storage layout.
//! With the `serde` feature, a [`BoardConfig`] can be stored as postcard
//! binary data.

pub mod audit;
pub mod types;

pub use audit::*;
pub use types::*;
