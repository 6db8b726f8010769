//! Hardware abstraction traits
//!
//! These traits define the interface between the self-test logic and the
//! board's switch, lamp, display, solenoid, and non-volatile storage
//! drivers.

pub mod display;
pub mod solenoid;
pub mod storage;
pub mod switches;

pub use display::{DisplayDriver, LampDriver};
pub use solenoid::SolenoidDriver;
pub use storage::{NvAddress, NvStorage};
pub use switches::{SwitchId, SwitchSource};

/// Everything the self-test handler talks to during a tick
///
/// Implemented automatically for any type that provides all collaborator
/// traits, so a board support package only implements the pieces.
pub trait Board: SwitchSource + LampDriver + DisplayDriver + SolenoidDriver + NvStorage {}

// Blanket implementation for all complete boards
impl<T> Board for T where T: SwitchSource + LampDriver + DisplayDriver + SolenoidDriver + NvStorage {}
