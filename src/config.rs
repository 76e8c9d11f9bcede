//! Robot build configuration.
//!
//! Every robot build this code has driven differs only in its port map, its
//! power constants, which toggles exclude each other and its autonomous
//! script. All of that lives in one [`RobotConfig`] value, picked at startup,
//! instead of in per-build copies of the control loops.
//!
//! Two builds ship as presets:
//!
//! - [`RobotConfig::classic`]: arcade drive; conveyor and top roller each on
//!   their own toggle with a reverse-and-stop button; a "store match load"
//!   toggle that runs independently of the others.
//! - [`RobotConfig::rocket_league`]: trigger throttle with ramping, a stick
//!   for turning, a manual conveyor stick, "store match load" and "shoot"
//!   toggles that exclude each other, and two pneumatic toggles.
//!
//! A build can also be read from JSON with [`RobotConfig::from_json`]. Either
//! way, [`RobotConfig::validate`] must accept it before a
//! [`Robot`](crate::competition::Robot) will run it.
//!
//! # Example
//!
//! ```
//! use pushback::config::RobotConfig;
//!
//! let mut config = RobotConfig::rocket_league();
//! config.exclusive.clear(); // let "shoot" and "store match load" run together
//! assert!(config.validate().is_ok());
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    auton::step::{Command, Level, Routine, Step},
    peripherals::{
        MAX_POWER,
        MotorPort,
        SolenoidPort,
        controller::{Axis, ControllerButton},
    },
};

/// A group of up to eight motor ports driven together.
pub type Ports = heapless::Vec<MotorPort, 8>;

/// Builds a port group from signed port numbers. Anything past eight ports
/// is dropped.
pub fn ports(numbers: &[i8]) -> Ports { numbers.iter().copied().map(MotorPort).take(8).collect() }

/// The fixed power levels of one mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerProfile {
    pub on:      i32,
    pub off:     i32,
    pub reverse: i32,
}

impl PowerProfile {
    pub fn power(&self, level: Level) -> i32 {
        match level {
            Level::On => self.on,
            Level::Off => self.off,
            Level::Reverse => self.reverse,
            Level::Power(power) => power,
        }
    }
}

/// A motor-driven mechanism (conveyor, roller, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MechanismConfig {
    pub name:    String,
    pub ports:   Ports,
    pub profile: PowerProfile,
}

/// A pneumatic solenoid on a three-wire port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolenoidConfig {
    pub name:    String,
    pub port:    SolenoidPort,
    /// Level written when a phase starts.
    #[serde(default)]
    pub initial: bool,
}

/// What enabling a toggle does. Disabling it undoes the effect: the
/// mechanism goes to its profile "off" power, the solenoid goes low.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    Run {
        mechanism: String,
        #[serde(default)]
        level:     Level,
    },
    Extend {
        solenoid: String,
    },
}

/// A button that flips a set of effects on and off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleConfig {
    pub name:    String,
    pub button:  ControllerButton,
    pub effects: Vec<Effect>,
}

/// A button that reverses a mechanism briefly, then stops it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReverseConfig {
    pub button:    ControllerButton,
    pub mechanism: String,
    /// Toggle whose enabled flag is cleared once the mechanism stops.
    #[serde(default)]
    pub clears:    Option<String>,
    pub settle_ms: u32,
}

/// A stick that drives a mechanism directly while it is pushed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalogConfig {
    pub axis:      Axis,
    pub mechanism: String,
    /// Readings with a magnitude at or below this leave the mechanism to its
    /// toggles.
    pub deadband:  i32,
}

/// Trigger throttle with ramping, deadbanded half-rate turning and
/// ratio-preserving normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RampedConfig {
    pub positive:  ControllerButton,
    pub negative:  ControllerButton,
    pub turn:      Axis,
    pub max_power: i32,
    /// Largest throttle change per tick.
    pub step:      i32,
    pub deadband:  i32,
}

impl Default for RampedConfig {
    fn default() -> Self {
        Self {
            positive:  ControllerButton::ButtonR2,
            negative:  ControllerButton::ButtonL2,
            turn:      Axis::LeftX,
            max_power: MAX_POWER,
            step:      8,
            deadband:  3,
        }
    }
}

/// How driver input becomes drive power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DriveMode {
    /// `left = forward - turn`, `right = forward + turn`.
    Arcade { forward: Axis, turn: Axis },
    /// Each side follows its own stick.
    Tank { left: Axis, right: Axis },
    Ramped(RampedConfig),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveConfig {
    pub left:  Ports,
    pub right: Ports,
    pub mode:  DriveMode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutonConfig {
    /// Mechanism run by [`Step::Score`].
    #[serde(default)]
    pub score_mechanism: Option<String>,
    #[serde(default)]
    pub routine:         Routine,
}

/// Everything that distinguishes one robot build from another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotConfig {
    pub name:       String,
    /// Teleop loop period.
    pub tick_ms:    u32,
    pub drive:      DriveConfig,
    #[serde(default)]
    pub mechanisms: Vec<MechanismConfig>,
    #[serde(default)]
    pub solenoids:  Vec<SolenoidConfig>,
    #[serde(default)]
    pub toggles:    Vec<ToggleConfig>,
    /// Groups of toggle names. Enabling one member disables the others.
    #[serde(default)]
    pub exclusive:  Vec<Vec<String>>,
    #[serde(default)]
    pub reversals:  Vec<ReverseConfig>,
    #[serde(default)]
    pub analog:     Vec<AnalogConfig>,
    #[serde(default)]
    pub autonomous: AutonConfig,
}

/// Reasons a [`RobotConfig`] is refused.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{context} refers to unknown mechanism `{name}`")]
    UnknownMechanism { context: String, name: String },
    #[error("{context} refers to unknown solenoid `{name}`")]
    UnknownSolenoid { context: String, name: String },
    #[error("{context} refers to unknown toggle `{name}`")]
    UnknownToggle { context: String, name: String },
    #[error("duplicate name `{0}`")]
    DuplicateName(String),
    #[error("{context}: power {power} is outside [-{max}, {max}]", max = MAX_POWER)]
    PowerOutOfRange { context: String, power: i32 },
    #[error("{context}: motor port {port} is not a smart port")]
    InvalidMotorPort { context: String, port: i8 },
    #[error("{context}: `{port}` is not a three-wire port")]
    InvalidSolenoidPort { context: String, port: char },
    #[error("{0} has no motors")]
    NoMotors(String),
    #[error("{0:?} is bound more than once")]
    DuplicateButton(ControllerButton),
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("exclusive group {0} needs at least two toggles")]
    TrivialGroup(usize),
    #[error("malformed robot configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl RobotConfig {
    /// The arcade-drive build.
    pub fn classic() -> Self {
        RobotConfig {
            name:       "classic".into(),
            tick_ms:    20,
            drive:      DriveConfig {
                left:  ports(&[1, 2, -3]),
                right: ports(&[4, 5, -6]),
                mode:  DriveMode::Arcade {
                    forward: Axis::LeftY,
                    turn:    Axis::RightX,
                },
            },
            mechanisms: vec![
                mechanism("conveyor", &[11], 120, -120),
                mechanism("top_roller", &[20], -120, 120),
            ],
            solenoids:  Vec::new(),
            toggles:    vec![
                toggle("conveyor", ControllerButton::ButtonR1, vec![run("conveyor", Level::On)]),
                toggle("roller", ControllerButton::ButtonL1, vec![run("top_roller", Level::On)]),
                toggle("store_match_load", ControllerButton::ButtonX, vec![
                    run("conveyor", Level::Power(120)),
                    run("top_roller", Level::Power(-55)),
                ]),
            ],
            exclusive:  Vec::new(),
            reversals:  vec![
                reverse(ControllerButton::ButtonR2, "conveyor", "conveyor"),
                reverse(ControllerButton::ButtonL2, "top_roller", "roller"),
            ],
            analog:     Vec::new(),
            autonomous: AutonConfig {
                score_mechanism: Some("top_roller".into()),
                routine:         Routine::new(),
            },
        }
    }

    /// The trigger-throttle build.
    pub fn rocket_league() -> Self {
        RobotConfig {
            name:       "rocket_league".into(),
            tick_ms:    20,
            drive:      DriveConfig {
                left:  ports(&[-16, 18, 17]),
                right: ports(&[-13, -14, 12]),
                mode:  DriveMode::Ramped(RampedConfig::default()),
            },
            mechanisms: vec![
                mechanism("conveyor", &[20], 120, -120),
                mechanism("top_roller", &[11], -120, 90),
            ],
            solenoids:  vec![
                SolenoidConfig {
                    name:    "descorer".into(),
                    port:    SolenoidPort('G'),
                    initial: false,
                },
                SolenoidConfig {
                    name:    "match_loader".into(),
                    port:    SolenoidPort('H'),
                    initial: false,
                },
            ],
            toggles:    vec![
                toggle("store_match_load", ControllerButton::ButtonA, vec![
                    run("conveyor", Level::Power(120)),
                    run("top_roller", Level::Power(55)),
                ]),
                toggle("shoot", ControllerButton::ButtonX, vec![
                    run("conveyor", Level::On),
                    run("top_roller", Level::On),
                ]),
                toggle("match_loader", ControllerButton::ButtonR1, vec![Effect::Extend {
                    solenoid: "match_loader".into(),
                }]),
                toggle("descorer", ControllerButton::ButtonL1, vec![Effect::Extend {
                    solenoid: "descorer".into(),
                }]),
            ],
            exclusive:  vec![vec!["store_match_load".into(), "shoot".into()]],
            reversals:  Vec::new(),
            analog:     vec![AnalogConfig {
                axis:      Axis::RightY,
                mechanism: "conveyor".into(),
                deadband:  3,
            }],
            autonomous: AutonConfig {
                score_mechanism: Some("top_roller".into()),
                routine:         Routine::back_off_start(),
            },
        }
    }

    /// Picks a preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "classic" => Some(Self::classic()),
            "rocket_league" => Some(Self::rocket_league()),
            _ => None,
        }
    }

    /// Reads and validates a build from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RobotConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> { Ok(serde_json::to_string_pretty(self)?) }

    /// Physical smart ports used by the drive and the mechanisms, each once,
    /// in ascending order.
    pub fn motor_ports(&self) -> Vec<u8> {
        let mut numbers: Vec<u8> = self
            .drive
            .left
            .iter()
            .chain(&self.drive.right)
            .chain(self.mechanisms.iter().flat_map(|m| &m.ports))
            .map(|port| port.number())
            .collect();
        numbers.sort_unstable();
        numbers.dedup();
        numbers
    }

    /// Three-wire ports used by the solenoids, each once, in order.
    pub fn solenoid_ports(&self) -> Vec<SolenoidPort> {
        let mut ports: Vec<_> = self.solenoids.iter().map(|s| s.port).collect();
        ports.sort_unstable();
        ports.dedup();
        ports
    }

    pub fn with_routine(mut self, routine: Routine) -> Self {
        self.autonomous.routine = routine;
        self
    }

    /// Checks that every name resolves, every power and port is in range,
    /// and no button does two jobs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::NotPositive("tick_ms"));
        }
        self.validate_drive()?;

        let mut names = HashSet::new();
        for mech in &self.mechanisms {
            if !names.insert(mech.name.as_str()) {
                return Err(ConfigError::DuplicateName(mech.name.clone()));
            }
            if mech.ports.is_empty() {
                return Err(ConfigError::NoMotors(mech.name.clone()));
            }
            check_ports(&mech.name, &mech.ports)?;
            for power in [mech.profile.on, mech.profile.off, mech.profile.reverse] {
                check_power(&mech.name, power)?;
            }
        }
        for solenoid in &self.solenoids {
            if !names.insert(solenoid.name.as_str()) {
                return Err(ConfigError::DuplicateName(solenoid.name.clone()));
            }
            if !solenoid.port.is_valid() {
                return Err(ConfigError::InvalidSolenoidPort {
                    context: solenoid.name.clone(),
                    port:    solenoid.port.0,
                });
            }
        }

        let mut buttons = HashSet::new();
        let mut bind = |button: ControllerButton| {
            if buttons.insert(button) {
                Ok(())
            } else {
                Err(ConfigError::DuplicateButton(button))
            }
        };
        if let DriveMode::Ramped(ramped) = &self.drive.mode {
            bind(ramped.positive)?;
            bind(ramped.negative)?;
        }

        let mut toggle_names = HashSet::new();
        for toggle in &self.toggles {
            if !toggle_names.insert(toggle.name.as_str()) {
                return Err(ConfigError::DuplicateName(toggle.name.clone()));
            }
            bind(toggle.button)?;
            let context = format!("toggle `{}`", toggle.name);
            for effect in &toggle.effects {
                match effect {
                    Effect::Run { mechanism, level } => {
                        self.check_mechanism(&context, mechanism)?;
                        if let Level::Power(power) = level {
                            check_power(&context, *power)?;
                        }
                    }
                    Effect::Extend { solenoid } => self.check_solenoid(&context, solenoid)?,
                }
            }
        }

        for reversal in &self.reversals {
            bind(reversal.button)?;
            let context = format!("reverse on {:?}", reversal.button);
            self.check_mechanism(&context, &reversal.mechanism)?;
            if let Some(name) = &reversal.clears {
                check_toggle(&toggle_names, &context, name)?;
            }
        }

        for (index, group) in self.exclusive.iter().enumerate() {
            if group.len() < 2 {
                return Err(ConfigError::TrivialGroup(index));
            }
            let context = format!("exclusive group {}", index);
            for name in group {
                check_toggle(&toggle_names, &context, name)?;
            }
        }

        for analog in &self.analog {
            self.check_mechanism(&format!("{:?} stick", analog.axis), &analog.mechanism)?;
        }

        self.validate_routine()
    }

    fn validate_drive(&self) -> Result<(), ConfigError> {
        for (side, group) in [("left drive", &self.drive.left), ("right drive", &self.drive.right)] {
            if group.is_empty() {
                return Err(ConfigError::NoMotors(side.into()));
            }
            check_ports(side, group)?;
        }
        if let DriveMode::Ramped(ramped) = &self.drive.mode {
            if ramped.step <= 0 {
                return Err(ConfigError::NotPositive("ramp step"));
            }
            if ramped.max_power <= 0 {
                return Err(ConfigError::NotPositive("ramp max_power"));
            }
            check_power("ramp max_power", ramped.max_power)?;
        }
        Ok(())
    }

    fn validate_routine(&self) -> Result<(), ConfigError> {
        let auton = &self.autonomous;
        if let Some(name) = &auton.score_mechanism {
            self.check_mechanism("score mechanism", name)?;
        }
        for (index, step) in auton.routine.steps().iter().enumerate() {
            let context = format!("autonomous step {}", index);
            match step {
                Step::Drive { left, right, .. } => {
                    check_power(&context, *left)?;
                    check_power(&context, *right)?;
                }
                Step::Turn { power, .. } => check_power(&context, *power)?,
                Step::Wait { .. } => {}
                Step::Score { .. } => {
                    if auton.score_mechanism.is_none() {
                        return Err(ConfigError::UnknownMechanism {
                            context,
                            name: "<score mechanism>".into(),
                        });
                    }
                }
                Step::Actuate { command } => match command {
                    Command::Mechanism { name, level } => {
                        self.check_mechanism(&context, name)?;
                        if let Level::Power(power) = level {
                            check_power(&context, *power)?;
                        }
                    }
                    Command::Solenoid { name, .. } => self.check_solenoid(&context, name)?,
                },
            }
        }
        Ok(())
    }

    fn check_mechanism(&self, context: &str, name: &str) -> Result<(), ConfigError> {
        if self.mechanisms.iter().any(|m| m.name == name) {
            Ok(())
        } else {
            Err(ConfigError::UnknownMechanism {
                context: context.into(),
                name:    name.into(),
            })
        }
    }

    fn check_solenoid(&self, context: &str, name: &str) -> Result<(), ConfigError> {
        if self.solenoids.iter().any(|s| s.name == name) {
            Ok(())
        } else {
            Err(ConfigError::UnknownSolenoid {
                context: context.into(),
                name:    name.into(),
            })
        }
    }
}

fn check_toggle(known: &HashSet<&str>, context: &str, name: &str) -> Result<(), ConfigError> {
    if known.contains(name) {
        Ok(())
    } else {
        Err(ConfigError::UnknownToggle {
            context: context.into(),
            name:    name.into(),
        })
    }
}

fn check_power(context: &str, power: i32) -> Result<(), ConfigError> {
    if power.abs() <= MAX_POWER {
        Ok(())
    } else {
        Err(ConfigError::PowerOutOfRange {
            context: context.into(),
            power,
        })
    }
}

fn check_ports(context: &str, group: &Ports) -> Result<(), ConfigError> {
    match group.iter().find(|port| !port.is_valid()) {
        Some(port) => Err(ConfigError::InvalidMotorPort {
            context: context.into(),
            port:    port.0,
        }),
        None => Ok(()),
    }
}

fn mechanism(name: &str, numbers: &[i8], on: i32, reverse: i32) -> MechanismConfig {
    MechanismConfig {
        name:    name.into(),
        ports:   ports(numbers),
        profile: PowerProfile { on, off: 0, reverse },
    }
}

fn toggle(name: &str, button: ControllerButton, effects: Vec<Effect>) -> ToggleConfig {
    ToggleConfig {
        name: name.into(),
        button,
        effects,
    }
}

fn run(mechanism: &str, level: Level) -> Effect {
    Effect::Run {
        mechanism: mechanism.into(),
        level,
    }
}

fn reverse(button: ControllerButton, mechanism: &str, clears: &str) -> ReverseConfig {
    ReverseConfig {
        button,
        mechanism: mechanism.into(),
        clears: Some(clears.into()),
        settle_ms: 200,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        RobotConfig::classic().validate().unwrap();
        RobotConfig::rocket_league().validate().unwrap();
        RobotConfig::rocket_league()
            .with_routine(Routine::match_loads())
            .validate()
            .unwrap();
    }

    #[test]
    fn preset_lookup() {
        assert_eq!(RobotConfig::preset("classic").unwrap().name, "classic");
        assert!(RobotConfig::preset("worlds").is_none());
    }

    #[test]
    fn json_round_trip_keeps_the_build() {
        let config = RobotConfig::rocket_league();
        let json = config.to_json().unwrap();
        assert_eq!(RobotConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn minimal_json_build() {
        let json = r#"{
            "name": "bench",
            "tick_ms": 10,
            "drive": {
                "left": [1, -2],
                "right": [3],
                "mode": {"kind": "arcade", "forward": "LeftY", "turn": "RightX"}
            }
        }"#;
        let config = RobotConfig::from_json(json).unwrap();
        assert_eq!(config.drive.left[1], MotorPort(-2));
        assert!(config.toggles.is_empty());
        assert!(config.autonomous.routine.is_empty());
    }

    #[test]
    fn malformed_json_is_refused() {
        let err = RobotConfig::from_json("{\"name\": 4}").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn unknown_mechanism_in_toggle() {
        let mut config = RobotConfig::classic();
        config.toggles[0].effects.push(run("flywheel", Level::On));
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownMechanism { ref name, .. } if name == "flywheel"));
    }

    #[test]
    fn unknown_toggle_in_exclusive_group() {
        let mut config = RobotConfig::rocket_league();
        config.exclusive[0].push("hang".into());
        assert!(matches!(config.validate(), Err(ConfigError::UnknownToggle { .. })));
    }

    #[test]
    fn one_member_groups_are_refused() {
        let mut config = RobotConfig::rocket_league();
        config.exclusive = vec![vec!["shoot".into()]];
        assert!(matches!(config.validate(), Err(ConfigError::TrivialGroup(0))));
    }

    #[test]
    fn button_bound_twice() {
        let mut config = RobotConfig::rocket_league();
        // R2 is already the forward trigger.
        config.toggles[1].button = ControllerButton::ButtonR2;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateButton(ControllerButton::ButtonR2))
        ));
    }

    #[test]
    fn out_of_range_power() {
        let mut config = RobotConfig::classic();
        config.mechanisms[0].profile.on = 200;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PowerOutOfRange { power: 200, .. })
        ));

        let config = RobotConfig::classic().with_routine(Routine::new().drive(128, 0, 100));
        assert!(matches!(config.validate(), Err(ConfigError::PowerOutOfRange { .. })));
    }

    #[test]
    fn bad_ports() {
        let mut config = RobotConfig::classic();
        config.drive.left = ports(&[1, 0]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMotorPort { port: 0, .. })
        ));

        let mut config = RobotConfig::rocket_league();
        config.solenoids[0].port = SolenoidPort('Z');
        assert!(matches!(config.validate(), Err(ConfigError::InvalidSolenoidPort { .. })));

        let mut config = RobotConfig::classic();
        config.drive.right.clear();
        assert!(matches!(config.validate(), Err(ConfigError::NoMotors(_))));
    }

    #[test]
    fn zero_step_and_tick() {
        let mut config = RobotConfig::rocket_league();
        if let DriveMode::Ramped(ramped) = &mut config.drive.mode {
            ramped.step = 0;
        }
        assert!(matches!(config.validate(), Err(ConfigError::NotPositive("ramp step"))));

        let mut config = RobotConfig::classic();
        config.tick_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::NotPositive("tick_ms"))));
    }

    #[test]
    fn score_step_needs_a_score_mechanism() {
        let mut config = RobotConfig::classic().with_routine(Routine::new().score(500));
        config.autonomous.score_mechanism = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn ports_helper_caps_at_eight() {
        let group = ports(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(group.len(), 8);
    }

    #[test]
    fn profile_levels() {
        let profile = PowerProfile {
            on:      -120,
            off:     0,
            reverse: 90,
        };
        assert_eq!(profile.power(Level::On), -120);
        assert_eq!(profile.power(Level::Reverse), 90);
        assert_eq!(profile.power(Level::Power(55)), 55);
    }

    #[test]
    fn claimed_ports_are_physical_and_unique() {
        let config = RobotConfig::rocket_league();
        assert_eq!(config.motor_ports(), vec![11, 12, 13, 14, 16, 17, 18, 20]);
        assert_eq!(config.solenoid_ports(), vec![SolenoidPort('G'), SolenoidPort('H')]);

        let mut shared = RobotConfig::classic();
        shared.mechanisms[0].ports = ports(&[-1, 11]);
        assert_eq!(shared.motor_ports(), vec![1, 2, 3, 4, 5, 6, 11, 20]);
        assert!(shared.solenoid_ports().is_empty());
    }
}
