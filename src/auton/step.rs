//! Autonomous steps and the routine builder.
//!
//! A [`Routine`] is a flat, ordered list of [`Step`]s. The composite
//! routines in this module ([`Routine::load_and_score`],
//! [`Routine::traverse`], [`Routine::jiggle`]) only ever append primitive
//! steps, so what the sequencer runs is exactly what the list shows.
//!
//! Every power and duration here was tuned on the field. They are constants,
//! not feedback targets.
//!
//! # Example
//!
//! ```
//! use pushback::auton::step::{LoadAndScore, Routine, Step};
//!
//! let routine = Routine::new()
//!     .drive(90, 90, 600)
//!     .turn(70, 250)
//!     .load_and_score(&LoadAndScore::default());
//!
//! assert_eq!(routine.steps()[0], Step::Drive { left: 90, right: 90, ms: 600 });
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What a mechanism should be doing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// The mechanism's profile "on" power.
    #[default]
    On,
    /// The mechanism's profile "off" power.
    Off,
    /// The mechanism's profile "reverse" power.
    Reverse,
    /// An explicit power, for mechanisms that run at a different speed in
    /// one particular mode.
    Power(i32),
}

/// An instantaneous actuator write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum Command {
    Mechanism { name: String, level: Level },
    Solenoid { name: String, extended: bool },
}

/// One autonomous primitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// Set both drive sides, hold for `ms`, then zero both.
    Drive { left: i32, right: i32, ms: u32 },
    /// Spin in place: left at `power`, right at `-power`, then zero both.
    Turn { power: i32, ms: u32 },
    /// Hold every actuator as it is.
    Wait { ms: u32 },
    /// Write one actuator command and move on immediately.
    Actuate { command: Command },
    /// Run the scoring mechanism forward for `ms`, then stop it.
    Score { ms: u32 },
}

impl Step {
    /// How long the step blocks the sequencer.
    pub fn duration(&self) -> Duration {
        match self {
            Step::Drive { ms, .. } | Step::Turn { ms, .. } | Step::Wait { ms } | Step::Score { ms } => {
                Duration::from_millis(u64::from(*ms))
            }
            Step::Actuate { .. } => Duration::ZERO,
        }
    }
}

/// The tuning for [`Routine::load_and_score`].
///
/// The sub-step order is part of the loading ritual: back away, lower the
/// loader, shake the robot so the blocks settle, raise the loader, drive into
/// the goal and score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadAndScore {
    /// Solenoid that lowers the match loader when extended.
    pub loader:        String,
    pub backup_power:  i32,
    pub backup_ms:     u32,
    /// Time given to the pneumatic after each move.
    pub settle_ms:     u32,
    pub jiggle_power:  i32,
    pub jiggle_ms:     u32,
    /// Number of forward/back bursts.
    pub jiggles:       u32,
    pub forward_power: i32,
    pub forward_ms:    u32,
    pub score_ms:      u32,
}

impl Default for LoadAndScore {
    fn default() -> Self {
        Self {
            loader:        "match_loader".into(),
            backup_power:  -80,
            backup_ms:     350,
            settle_ms:     250,
            jiggle_power:  60,
            jiggle_ms:     80,
            jiggles:       3,
            forward_power: 90,
            forward_ms:    550,
            score_ms:      1200,
        }
    }
}

/// The tuning for [`Routine::traverse`]: turn, drive, turn back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Traverse {
    pub turn_power:    i32,
    pub first_turn_ms: u32,
    pub forward_power: i32,
    pub forward_ms:    u32,
    /// The second turn runs at `-turn_power`.
    pub last_turn_ms:  u32,
}

impl Traverse {
    /// Crossing from the loader side of the field to the long goal.
    pub const LOADER_TO_GOAL: Traverse = Traverse {
        turn_power:    70,
        first_turn_ms: 260,
        forward_power: 100,
        forward_ms:    900,
        last_turn_ms:  260,
    };

    /// The way back.
    pub const GOAL_TO_LOADER: Traverse = Traverse {
        turn_power:    -70,
        first_turn_ms: 260,
        forward_power: 100,
        forward_ms:    900,
        last_turn_ms:  260,
    };
}

/// An ordered list of steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Routine {
    steps: Vec<Step>,
}

impl Routine {
    pub fn new() -> Self { Self::default() }

    pub fn steps(&self) -> &[Step] { &self.steps }

    pub fn into_steps(self) -> Vec<Step> { self.steps }

    pub fn len(&self) -> usize { self.steps.len() }

    pub fn is_empty(&self) -> bool { self.steps.is_empty() }

    /// Sum of every step's duration.
    pub fn duration(&self) -> Duration { self.steps.iter().map(Step::duration).sum() }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn drive(self, left: i32, right: i32, ms: u32) -> Self {
        self.step(Step::Drive { left, right, ms })
    }

    pub fn turn(self, power: i32, ms: u32) -> Self { self.step(Step::Turn { power, ms }) }

    pub fn wait(self, ms: u32) -> Self { self.step(Step::Wait { ms }) }

    pub fn score(self, ms: u32) -> Self { self.step(Step::Score { ms }) }

    pub fn mechanism(self, name: &str, level: Level) -> Self {
        self.step(Step::Actuate {
            command: Command::Mechanism {
                name: name.into(),
                level,
            },
        })
    }

    pub fn solenoid(self, name: &str, extended: bool) -> Self {
        self.step(Step::Actuate {
            command: Command::Solenoid {
                name: name.into(),
                extended,
            },
        })
    }

    /// `count` short forward/back bursts at `power`.
    pub fn jiggle(mut self, power: i32, ms: u32, count: u32) -> Self {
        for _ in 0..count {
            self = self.drive(power, power, ms).drive(-power, -power, ms);
        }
        self
    }

    /// Pulls blocks out of the match loader and scores them.
    pub fn load_and_score(self, params: &LoadAndScore) -> Self {
        self.drive(params.backup_power, params.backup_power, params.backup_ms)
            .solenoid(&params.loader, true)
            .wait(params.settle_ms)
            .jiggle(params.jiggle_power, params.jiggle_ms, params.jiggles)
            .solenoid(&params.loader, false)
            .wait(params.settle_ms)
            .drive(params.forward_power, params.forward_power, params.forward_ms)
            .score(params.score_ms)
    }

    /// Moves between two zones of the field.
    pub fn traverse(self, params: &Traverse) -> Self {
        self.turn(params.turn_power, params.first_turn_ms)
            .drive(params.forward_power, params.forward_power, params.forward_ms)
            .turn(-params.turn_power, params.last_turn_ms)
    }

    /// Backs away from the starting tile while the intake spins, then stops
    /// everything.
    pub fn back_off_start() -> Self {
        Routine::new()
            .mechanism("top_roller", Level::Reverse)
            .mechanism("conveyor", Level::On)
            .drive(-100, -100, 300)
            .mechanism("top_roller", Level::Off)
            .mechanism("conveyor", Level::Off)
    }

    /// Two loader runs, each scored into the long goal.
    pub fn match_loads() -> Self {
        let load = LoadAndScore::default();
        Routine::new()
            .load_and_score(&load)
            .traverse(&Traverse::GOAL_TO_LOADER)
            .load_and_score(&load)
    }
}

impl From<Vec<Step>> for Routine {
    fn from(steps: Vec<Step>) -> Self { Self { steps } }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_forward(step: &Step) -> bool {
        matches!(step, Step::Drive { left, right, .. } if *left > 0 || *right > 0)
    }

    #[test]
    fn load_and_score_keeps_the_ritual_order() {
        let routine = Routine::new().load_and_score(&LoadAndScore::default());
        let steps = routine.steps();

        let lowers: Vec<usize> = steps
            .iter()
            .enumerate()
            .filter(|(_, s)| {
                matches!(s, Step::Actuate { command: Command::Solenoid { extended: true, .. } })
            })
            .map(|(i, _)| i)
            .collect();
        let raises: Vec<usize> = steps
            .iter()
            .enumerate()
            .filter(|(_, s)| {
                matches!(s, Step::Actuate { command: Command::Solenoid { extended: false, .. } })
            })
            .map(|(i, _)| i)
            .collect();
        assert_eq!(lowers.len(), 1);
        assert_eq!(raises.len(), 1);

        let first_forward = steps.iter().position(is_forward).unwrap();
        let score = steps
            .iter()
            .position(|s| matches!(s, Step::Score { .. }))
            .unwrap();

        assert!(matches!(steps[0], Step::Drive { left: -80, right: -80, ms: 350 }));
        assert!(lowers[0] < first_forward);
        assert!(raises[0] < score);
        assert_eq!(score, steps.len() - 1);
    }

    #[test]
    fn jiggle_alternates_direction() {
        let routine = Routine::new().jiggle(60, 80, 2);
        assert_eq!(routine.steps(), &[
            Step::Drive { left: 60, right: 60, ms: 80 },
            Step::Drive { left: -60, right: -60, ms: 80 },
            Step::Drive { left: 60, right: 60, ms: 80 },
            Step::Drive { left: -60, right: -60, ms: 80 },
        ]);
    }

    #[test]
    fn traverse_turns_back_the_other_way() {
        let routine = Routine::new().traverse(&Traverse::LOADER_TO_GOAL);
        assert_eq!(routine.steps(), &[
            Step::Turn { power: 70, ms: 260 },
            Step::Drive { left: 100, right: 100, ms: 900 },
            Step::Turn { power: -70, ms: 260 },
        ]);
    }

    #[test]
    fn routine_duration_sums_steps() {
        let routine = Routine::new()
            .drive(50, 50, 300)
            .mechanism("conveyor", Level::On)
            .wait(120)
            .score(1000);
        assert_eq!(routine.duration(), Duration::from_millis(1420));
    }

    #[test]
    fn steps_read_from_json() {
        let json = r#"[
            {"kind": "drive", "left": -100, "right": -100, "ms": 300},
            {"kind": "actuate", "command": {"target": "mechanism", "name": "conveyor", "level": "off"}},
            {"kind": "actuate", "command": {"target": "solenoid", "name": "match_loader", "extended": true}},
            {"kind": "score", "ms": 900}
        ]"#;
        let routine: Routine = serde_json::from_str(json).unwrap();
        assert_eq!(routine.len(), 4);
        assert_eq!(routine.steps()[1], Step::Actuate {
            command: Command::Mechanism {
                name:  "conveyor".into(),
                level: Level::Off,
            },
        });
    }
}
