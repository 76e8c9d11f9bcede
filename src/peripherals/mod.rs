//! The hardware the control core talks to, as traits.
//!
//! Motors, solenoids, the controller, the clock and the competition switch
//! are all external collaborators. The core depends only on the traits in
//! this module, which keeps it runnable on the host against the
//! [`mock`] implementations and on the Brain against the vexide adapters in
//! `hardware` (feature `vexide`).
//!
//! # Ports
//!
//! Motor ports use the V5 convention of a signed port number, where a
//! negative number marks a reversed motor:
//!
//! ```
//! use pushback::peripherals::MotorPort;
//!
//! let port = MotorPort(-16);
//! assert_eq!(port.number(), 16);
//! assert_eq!(port.apply(100), -100);
//! ```

use std::{cell::Cell, future::Future, rc::Rc, time::Duration};

use serde::{Deserialize, Serialize};

/// Controller buttons, axes and the [`InputSource`](controller::InputSource)
/// trait.
pub mod controller;

/// Host implementations of every collaborator trait, for tests and
/// simulation.
pub mod mock;

/// Largest power magnitude a motor accepts.
pub const MAX_POWER: i32 = 127;

/// Clamps a power to `[-MAX_POWER, MAX_POWER]`.
pub fn clamp_power(power: i32) -> i32 { power.clamp(-MAX_POWER, MAX_POWER) }

/// A smart port, signed: negative numbers run the motor reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MotorPort(pub i8);

impl MotorPort {
    /// The physical port number, `1..=21` for a valid port.
    pub fn number(self) -> u8 { self.0.unsigned_abs() }

    /// Whether the motor on this port is mounted reversed.
    pub fn is_reversed(self) -> bool { self.0 < 0 }

    /// Converts a commanded power into the power the motor must receive.
    pub fn apply(self, power: i32) -> i32 {
        if self.is_reversed() { -power } else { power }
    }

    pub fn is_valid(self) -> bool { (1..=21).contains(&self.number()) }
}

/// A three-wire (ADI) port, `'A'..='H'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolenoidPort(pub char);

impl SolenoidPort {
    pub fn is_valid(self) -> bool { ('A'..='H').contains(&self.0.to_ascii_uppercase()) }

    /// Zero-based index of the port, `'A'` being 0.
    pub fn index(self) -> u8 { (self.0.to_ascii_uppercase() as u8).saturating_sub(b'A') }
}

/// Where actuator commands go.
///
/// Writes are fire-and-forget: the hardware offers no acknowledgement, so
/// implementations report nothing back and the core never retries.
pub trait ActuatorSink {
    /// Sets the power of the motor on `port` (a physical port number).
    /// `power` is already clamped and already corrected for reversal.
    fn set_motor_power(&mut self, port: u8, power: i32);

    /// Drives a three-wire digital output high or low.
    fn set_digital_output(&mut self, port: SolenoidPort, level: bool);
}

/// Time, and the only way the core waits.
pub trait Clock {
    /// Time since the program started.
    fn now(&self) -> Duration;

    /// Waits for `duration`. Waits are never cancelled part way.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// Answers "is the current competition phase still running?".
///
/// Loops poll this at every tick or step boundary and return once it turns
/// `false`.
pub trait PhaseSignal {
    fn is_active(&self) -> bool;
}

impl<F: Fn() -> bool> PhaseSignal for F {
    fn is_active(&self) -> bool { self() }
}

/// A shared on/off flag set by the lifecycle hooks.
///
/// Clones share the same flag, so the lifecycle owner can end a phase that a
/// loop is observing through its own clone.
#[derive(Debug, Clone, Default)]
pub struct ActiveFlag(Rc<Cell<bool>>);

impl ActiveFlag {
    pub fn new() -> Self { Self::default() }

    pub fn set(&self, active: bool) { self.0.set(active); }

    pub fn get(&self) -> bool { self.0.get() }
}

impl PhaseSignal for ActiveFlag {
    fn is_active(&self) -> bool { self.get() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_ports_negate_power() {
        assert_eq!(MotorPort(12).apply(-55), -55);
        assert_eq!(MotorPort(-13).apply(-55), 55);
        assert_eq!(MotorPort(-13).number(), 13);
    }

    #[test]
    fn port_validity() {
        assert!(MotorPort(21).is_valid());
        assert!(MotorPort(-1).is_valid());
        assert!(!MotorPort(0).is_valid());
        assert!(!MotorPort(22).is_valid());
        assert!(SolenoidPort('h').is_valid());
        assert!(!SolenoidPort('I').is_valid());
        assert_eq!(SolenoidPort('G').index(), 6);
    }

    #[test]
    fn active_flag_clones_share_state() {
        let flag = ActiveFlag::new();
        let observer = flag.clone();
        assert!(!observer.is_active());
        flag.set(true);
        assert!(observer.is_active());
    }

    #[test]
    fn closures_are_phase_signals() {
        let limit = 3;
        let signal = || limit > 2;
        assert!(signal.is_active());
    }
}
