//! # Pushback
//!
//! Pushback is the drive, toggle and autonomous control core for a VEX V5
//! competition robot, built on top of [Vexide](https://vexide.dev). It
//! provides:
//!
//! - **Drivetrain Control**: Arcade, tank and ramped trigger-throttle drive
//!   with ratio-preserving normalization.
//! - **Operator Control**: Button toggles for mechanisms and pneumatics,
//!   exclusive toggle groups, reverse-then-stop actions and stick overrides.
//! - **Autonomous**: A timed step sequencer with composite routines for
//!   loading, scoring and crossing the field.
//! - **Configuration**: Robot builds as data, with presets and JSON loading.
//! - **Display Graphics**: Status lines drawn with
//!   [`embedded-graphics`](https://crates.io/crates/embedded-graphics).
//! - **Logging**: A console and file logger for debugging on the field.
//!
//! The core talks to hardware only through the traits in [`peripherals`], so
//! everything except the `hardware` module runs and is tested on the host.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pushback::{config::RobotConfig, competition::Robot, hardware::*};
//! use vexide::prelude::*;
//!
//! #[vexide::main]
//! async fn main(peripherals: Peripherals) {
//!     let config = RobotConfig::rocket_league();
//!     let mut peripherals = DynamicPeripherals::new(peripherals);
//!     let controller = peripherals.take_primary_controller().expect("controller");
//!     let sink = V5Sink::new(&config, &mut peripherals);
//!     let input = V5Input::new(controller);
//!     let robot = Robot::new(config, sink, input, V5Clock).expect("valid preset");
//!     robot.compete().await;
//! }
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Robot builds, presets and validation.
//! - [`competition`]: The robot lifecycle and the per-phase context.
//! - [`drivetrain`]: Differential drive modes.
//! - [`opcontrol`]: The driver-control loop and toggles.
//! - [`auton`]: Autonomous steps and the sequencer.
//! - [`actuators`]: Commanded actuator state.
//! - [`peripherals`]: Hardware traits and host mocks.
//! - [`display`]: Status display.
//! - [`fs`]: Logging.

/// Commanded state of every motor group and solenoid.
pub mod actuators;

/// Autonomous routines.
///
/// - **Steps**: drive, turn, wait, actuate and score primitives.
/// - **Composites**: load-and-score and traverse, flattened into steps.
/// - **Sequencer**: runs a routine against the clock, one step at a time.
pub mod auton;

/// Competition lifecycle hooks and the per-phase [`Context`](competition::Context).
pub mod competition;

/// Robot build configuration.
pub mod config;

/// Status display.
///
/// Provides the [`StatusDisplay`](display::StatusDisplay) trait and an
/// [`embedded-graphics`](https://crates.io/crates/embedded-graphics) text
/// renderer for any `DrawTarget`.
pub mod display;

/// Differential drivetrain control module.
///
/// Turns controller input into left and right drive power. Supports:
///
/// - **Arcade**: One stick for forward/backward, another for turning.
/// - **Tank**: Each stick controls one side of the robot.
/// - **Ramped**: Trigger throttle with acceleration limiting.
pub mod drivetrain;

/// Filesystem utilities module.
///
/// Contains the logger that records robot telemetry and debug information
/// to the console and to the Brain's SD card.
pub mod fs;

/// Operator control module.
///
/// The per-tick driver loop, button toggles with exclusive groups,
/// reverse-then-stop actions and analog overrides.
pub mod opcontrol;

/// Hardware traits and host mocks.
pub mod peripherals;

/// vexide adapters for the hardware traits.
#[cfg(feature = "vexide")]
pub mod hardware;
