//! Solenoid driver trait

/// Pulse class used when firing a solenoid from the test menu
///
/// The driver maps the class to an actual on-time.
pub type PulseClass = u8;

/// Trait for the solenoid driver board
///
/// Momentary solenoids are fired through a stack that the driver drains
/// at its own pace; continuous solenoids (flipper enable, coin lockout)
/// are set directly.
pub trait SolenoidDriver {
    /// Allow queued solenoids to fire
    fn enable_solenoid_stack(&mut self);

    /// Stop firing queued solenoids
    fn disable_solenoid_stack(&mut self);

    /// Disable (`true`) or enable (`false`) the flipper relay
    fn set_disable_flippers(&mut self, disabled: bool);

    /// Engage (`true`) or release (`false`) the coin lockout coil
    fn set_coin_lockout(&mut self, locked: bool);

    /// Queue a momentary solenoid to fire
    fn push_solenoid(&mut self, index: u8, pulse: PulseClass);
}
