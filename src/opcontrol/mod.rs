//! Operator control for the driver-controlled period.
//!
//! # Features
//!
//! - **Button toggles**: a press flips a mechanism or a piston on or off.
//! - **Exclusive groups**: toggles that must never run together.
//! - **Reverse-then-stop**: a button that briefly runs a mechanism backwards
//!   to clear a jam, then stops it.
//! - **Stick overrides**: a stick that drives a mechanism directly while it
//!   is pushed.
//!
//! # Example
//!
//! ```
//! use futures_lite::future::block_on;
//! use pushback::{
//!     competition::Context,
//!     config::RobotConfig,
//!     display::NullDisplay,
//!     opcontrol::teleop::Teleop,
//!     peripherals::mock::{MockClock, RecordingSink, ScriptedInput},
//! };
//!
//! let clock = MockClock::new();
//! let mut sink = RecordingSink::new(clock.clone());
//! let mut input = ScriptedInput::idle(3);
//! let mut display = NullDisplay;
//! let active = || true;
//! let mut teleop = Teleop::new(&RobotConfig::classic());
//!
//! let mut ctx = Context::new(&mut sink, &mut input, &clock, &mut display, &active);
//! for _ in 0..3 {
//!     block_on(teleop.tick(&mut ctx));
//! }
//! assert_eq!(teleop.ticks(), 3);
//! ```

/// The per-tick driver loop.
pub mod teleop;

/// Toggle state machines and exclusive groups.
pub mod toggle;
