//! Differential drivetrain control.
//!
//! This module turns controller input into a [`DriveCommand`]: one power for
//! the left side of the robot and one for the right, each in `[-127, 127]`.
//!
//! # Supported Drive Modes
//!
//! - **Arcade**: One stick for forward/backward, another for turning.
//! - **Tank**: Each stick directly controls one side of the drivetrain.
//! - **Ramped**: Trigger throttle that accelerates a fixed step per tick,
//!   a deadbanded half-rate turning stick, and normalization that keeps the
//!   turn radius when a side would saturate.
//!
//! # Example
//!
//! ```
//! use pushback::config::{DriveMode, RampedConfig};
//! use pushback::drivetrain::Differential;
//! use pushback::peripherals::controller::ControllerButton;
//! use pushback::peripherals::mock::{InputFrame, ScriptedInput};
//! use pushback::peripherals::controller::InputSource;
//!
//! let mut drive = Differential::new(DriveMode::Ramped(RampedConfig::default()));
//! let mut input = ScriptedInput::new(vec![
//!     InputFrame::neutral().holding(ControllerButton::ButtonR2);
//!     3
//! ]);
//!
//! let mut command = Default::default();
//! for _ in 0..3 {
//!     input.refresh();
//!     command = drive.update(&input);
//! }
//! assert_eq!(command.left, 24); // three steps of 8
//! ```

use crate::{
    config::{DriveMode, RampedConfig},
    peripherals::controller::{ControllerButton, InputSource},
};

/// Power for each side of the drivetrain, for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriveCommand {
    pub left:  i32,
    pub right: i32,
}

/// Throttle that moves toward its target by at most `step` per tick.
///
/// The only drive state that survives from one tick to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ramp {
    current: i32,
    step:    i32,
}

impl Ramp {
    pub fn new(step: i32) -> Self {
        Self {
            current: 0,
            step:    step.max(1),
        }
    }

    pub fn current(&self) -> i32 { self.current }

    /// Moves one step toward `target` and returns the new throttle. Never
    /// overshoots.
    pub fn advance(&mut self, target: i32) -> i32 {
        let delta = (target - self.current).clamp(-self.step, self.step);
        self.current += delta;
        self.current
    }

    pub fn reset(&mut self) { self.current = 0; }
}

/// Zeroes readings whose magnitude is at or below `width`.
pub fn deadband(value: i32, width: i32) -> i32 {
    if value.abs() <= width { 0 } else { value }
}

/// Scales both sides by the same factor when either exceeds `max`, so the
/// larger magnitude becomes exactly `max` and the left/right ratio (the turn
/// radius) is kept.
pub fn normalize(left: i32, right: i32, max: i32) -> DriveCommand {
    let largest = left.abs().max(right.abs());
    if largest <= max {
        return DriveCommand { left, right };
    }
    let scale = f64::from(max) / f64::from(largest);
    DriveCommand {
        left:  (f64::from(left) * scale).round() as i32,
        right: (f64::from(right) * scale).round() as i32,
    }
}

/// A differential drivetrain controller.
///
/// Holds the drive mode picked for this robot build and, for the ramped
/// mode, the throttle carried between ticks. Build a fresh one per phase.
#[derive(Debug, Clone)]
pub struct Differential {
    mode: DriveMode,
    ramp: Ramp,
}

impl Differential {
    pub fn new(mode: DriveMode) -> Self {
        let step = match mode {
            DriveMode::Ramped(RampedConfig { step, .. }) => step,
            _ => 1,
        };
        Self {
            mode,
            ramp: Ramp::new(step),
        }
    }

    pub fn mode(&self) -> &DriveMode { &self.mode }

    /// The ramped throttle, zero in the other modes.
    pub fn throttle(&self) -> i32 { self.ramp.current() }

    /// Computes this tick's command from an already refreshed input sample.
    pub fn update(&mut self, input: &impl InputSource) -> DriveCommand {
        match self.mode {
            DriveMode::Arcade { forward, turn } => {
                let fwd = input.axis(forward);
                let turn = input.axis(turn);
                DriveCommand {
                    left:  fwd - turn,
                    right: fwd + turn,
                }
            }
            DriveMode::Tank { left, right } => DriveCommand {
                left:  input.axis(left),
                right: input.axis(right),
            },
            DriveMode::Ramped(config) => {
                let target = throttle_target(input, config.positive, config.negative, config.max_power);
                let throttle = self.ramp.advance(target);
                let turn = deadband(input.axis(config.turn), config.deadband) / 2;
                normalize(throttle - turn, throttle + turn, config.max_power)
            }
        }
    }
}

fn throttle_target(
    input: &impl InputSource,
    positive: ControllerButton,
    negative: ControllerButton,
    max_power: i32,
) -> i32 {
    let raw = i32::from(input.button_held(positive)) - i32::from(input.button_held(negative));
    raw * max_power
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peripherals::{
        controller::Axis,
        mock::{InputFrame, ScriptedInput},
    };

    fn ramped() -> Differential { Differential::new(DriveMode::Ramped(RampedConfig::default())) }

    fn run(drive: &mut Differential, frames: Vec<InputFrame>) -> Vec<DriveCommand> {
        let count = frames.len();
        let mut input = ScriptedInput::new(frames);
        (0..count)
            .map(|_| {
                input.refresh();
                drive.update(&input)
            })
            .collect()
    }

    #[test]
    fn ramp_reaches_full_power_in_sixteen_ticks() {
        let mut ramp = Ramp::new(8);
        let mut previous = 0;
        for tick in 1..=16 {
            let value = ramp.advance(127);
            assert!(value - previous <= 8);
            assert!(value <= 127);
            if tick < 16 {
                assert!(value < 127, "reached 127 early at tick {}", tick);
            }
            previous = value;
        }
        assert_eq!(ramp.current(), 127);
    }

    #[test]
    fn ramp_converges_within_bound_from_any_start() {
        for (start, target) in [(127, -127), (-40, 33), (5, 5), (0, -127), (100, 0)] {
            let mut ramp = Ramp::new(8);
            while ramp.current() != start {
                ramp.advance(start);
            }
            let bound = ((target - start).abs() + 7) / 8;
            let mut ticks = 0;
            let mut previous = ramp.current();
            while ramp.current() != target {
                let value = ramp.advance(target);
                assert!((value - previous).abs() <= 8);
                previous = value;
                ticks += 1;
            }
            assert_eq!(ticks, bound, "{} -> {}", start, target);
        }
    }

    #[test]
    fn deadband_zeroes_small_readings() {
        for value in -3..=3 {
            assert_eq!(deadband(value, 3), 0);
        }
        assert_eq!(deadband(4, 3), 4);
        assert_eq!(deadband(-10, 3), -10);
    }

    #[test]
    fn turn_is_deadbanded_then_halved() {
        let mut drive = ramped();
        let out = run(&mut drive, vec![
            InputFrame::neutral().with_axis(Axis::LeftX, 2),
            InputFrame::neutral().with_axis(Axis::LeftX, 10),
            InputFrame::neutral().with_axis(Axis::LeftX, -3),
        ]);
        assert_eq!(out[0], DriveCommand { left: 0, right: 0 });
        assert_eq!(out[1], DriveCommand { left: -5, right: 5 });
        assert_eq!(out[2], DriveCommand { left: 0, right: 0 });
    }

    #[test]
    fn normalize_keeps_ratio_and_caps_at_max() {
        let cmd = normalize(127 - 60, 127 + 60, 127);
        assert_eq!(cmd.right, 127);
        assert_eq!(cmd.left, 46); // 67 * 127 / 187 = 45.5
        let cmd = normalize(-190, -100, 127);
        assert_eq!(cmd.left, -127);
        assert_eq!(cmd.right, -67); // -100 * 127 / 190 = -66.8
        assert_eq!(normalize(100, -120, 127), DriveCommand { left: 100, right: -120 });
    }

    #[test]
    fn normalize_ratio_holds_across_inputs() {
        for left in (-250..=250).step_by(17) {
            for right in (-250..=250).step_by(23) {
                let cmd = normalize(left, right, 127);
                let largest = cmd.left.abs().max(cmd.right.abs());
                assert!(largest <= 127);
                if left.abs().max(right.abs()) > 127 {
                    assert_eq!(largest, 127);
                    let before = f64::from(left) / f64::from(left.abs().max(right.abs()));
                    let after = f64::from(cmd.left) / 127.0;
                    assert!((before - after).abs() <= 0.5 / 127.0 + 1e-9);
                }
            }
        }
    }

    #[test]
    fn full_throttle_with_hard_turn_is_normalized() {
        let mut drive = ramped();
        let frames =
            vec![InputFrame::neutral().holding(ControllerButton::ButtonR2).with_axis(Axis::LeftX, 127); 20];
        let out = run(&mut drive, frames);
        let last = out.last().copied().unwrap();
        // throttle 127, turn 63: left 64, right 190 -> scaled
        assert_eq!(last.right, 127);
        assert_eq!(last.left, 43);
        assert_eq!(drive.throttle(), 127);
    }

    #[test]
    fn both_triggers_cancel_out() {
        let mut drive = ramped();
        let both = InputFrame::neutral()
            .holding(ControllerButton::ButtonR2)
            .holding(ControllerButton::ButtonL2);
        let out = run(&mut drive, vec![both; 4]);
        assert!(out.iter().all(|cmd| *cmd == DriveCommand::default()));
    }

    #[test]
    fn releasing_the_trigger_ramps_down() {
        let mut drive = ramped();
        let mut frames = vec![InputFrame::neutral().holding(ControllerButton::ButtonR2); 3];
        frames.push(InputFrame::neutral());
        let out = run(&mut drive, frames);
        let lefts: Vec<i32> = out.iter().map(|cmd| cmd.left).collect();
        assert_eq!(lefts, vec![8, 16, 24, 16]);
    }

    #[test]
    fn arcade_mixes_without_ramping() {
        let mut drive = Differential::new(DriveMode::Arcade {
            forward: Axis::LeftY,
            turn:    Axis::RightX,
        });
        let out = run(&mut drive, vec![
            InputFrame::neutral()
                .with_axis(Axis::LeftY, 100)
                .with_axis(Axis::RightX, 30),
        ]);
        assert_eq!(out[0], DriveCommand { left: 70, right: 130 });
    }

    #[test]
    fn tank_follows_each_stick() {
        let mut drive = Differential::new(DriveMode::Tank {
            left:  Axis::LeftY,
            right: Axis::RightY,
        });
        let out = run(&mut drive, vec![
            InputFrame::neutral()
                .with_axis(Axis::LeftY, -50)
                .with_axis(Axis::RightY, 90),
        ]);
        assert_eq!(out[0], DriveCommand { left: -50, right: 90 });
        assert_eq!(drive.throttle(), 0);
    }
}
