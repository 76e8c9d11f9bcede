//! The robot's outputs and what they were last told to do.
//!
//! [`Actuators`] is built fresh for every phase from a validated
//! [`RobotConfig`]. It holds the drive port groups, one entry per mechanism
//! with its power profile and commanded power, and one entry per solenoid
//! with its commanded level. Components change the commanded state and call
//! [`Actuators::flush`]; the sink only ever sees clamped powers with port
//! reversal already applied.

use heapless::String as LineBuf;
use log::warn;

use crate::{
    auton::step::{Command, Level},
    config::{Ports, PowerProfile, RobotConfig},
    peripherals::{ActuatorSink, SolenoidPort, clamp_power},
};

#[derive(Debug, Clone)]
struct Mechanism {
    name:      String,
    ports:     Ports,
    profile:   PowerProfile,
    commanded: i32,
    /// Set for one tick by a manual stick; wins over `commanded`.
    manual:    Option<i32>,
}

impl Mechanism {
    fn output(&self) -> i32 { self.manual.unwrap_or(self.commanded) }
}

#[derive(Debug, Clone)]
struct Solenoid {
    name:     String,
    port:     SolenoidPort,
    extended: bool,
}

/// Commanded state of every actuator on the robot.
#[derive(Debug, Clone)]
pub struct Actuators {
    left:       Ports,
    right:      Ports,
    mechanisms: Vec<Mechanism>,
    solenoids:  Vec<Solenoid>,
}

impl Actuators {
    /// Builds the output table. Mechanisms start at their "off" power and
    /// solenoids at their configured initial level.
    pub fn new(config: &RobotConfig) -> Self {
        Self {
            left:       config.drive.left.clone(),
            right:      config.drive.right.clone(),
            mechanisms: config
                .mechanisms
                .iter()
                .map(|m| Mechanism {
                    name:      m.name.clone(),
                    ports:     m.ports.clone(),
                    profile:   m.profile,
                    commanded: m.profile.off,
                    manual:    None,
                })
                .collect(),
            solenoids:  config
                .solenoids
                .iter()
                .map(|s| Solenoid {
                    name:     s.name.clone(),
                    port:     s.port,
                    extended: s.initial,
                })
                .collect(),
        }
    }

    /// Writes drive power to both sides immediately.
    pub fn drive(&self, sink: &mut impl ActuatorSink, left: i32, right: i32) {
        write_group(sink, &self.left, left);
        write_group(sink, &self.right, right);
    }

    /// Changes a mechanism's commanded power. Returns `false` for an unknown
    /// name.
    pub fn set_mechanism(&mut self, name: &str, level: Level) -> bool {
        match self.mechanisms.iter_mut().find(|m| m.name == name) {
            Some(mech) => {
                mech.commanded = mech.profile.power(level);
                true
            }
            None => {
                warn!("No mechanism named `{}`", name);
                false
            }
        }
    }

    /// Drives a mechanism from a stick for the current tick only.
    pub fn set_manual(&mut self, name: &str, power: Option<i32>) {
        if let Some(mech) = self.mechanisms.iter_mut().find(|m| m.name == name) {
            mech.manual = power;
        }
    }

    /// Changes a solenoid's commanded level. Returns `false` for an unknown
    /// name.
    pub fn set_solenoid(&mut self, name: &str, extended: bool) -> bool {
        match self.solenoids.iter_mut().find(|s| s.name == name) {
            Some(solenoid) => {
                solenoid.extended = extended;
                true
            }
            None => {
                warn!("No solenoid named `{}`", name);
                false
            }
        }
    }

    /// Applies an autonomous command to the commanded state.
    pub fn apply(&mut self, command: &Command) -> bool {
        match command {
            Command::Mechanism { name, level } => self.set_mechanism(name, *level),
            Command::Solenoid { name, extended } => self.set_solenoid(name, *extended),
        }
    }

    /// The power a mechanism is currently commanded to, stick included.
    pub fn mechanism_power(&self, name: &str) -> Option<i32> {
        self.mechanisms
            .iter()
            .find(|m| m.name == name)
            .map(Mechanism::output)
    }

    pub fn solenoid_extended(&self, name: &str) -> Option<bool> {
        self.solenoids
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.extended)
    }

    /// Writes one mechanism's output now.
    pub fn flush_mechanism(&self, sink: &mut impl ActuatorSink, name: &str) {
        if let Some(mech) = self.mechanisms.iter().find(|m| m.name == name) {
            write_group(sink, &mech.ports, mech.output());
        }
    }

    /// Writes one solenoid's level now.
    pub fn flush_solenoid(&self, sink: &mut impl ActuatorSink, name: &str) {
        if let Some(solenoid) = self.solenoids.iter().find(|s| s.name == name) {
            sink.set_digital_output(solenoid.port, solenoid.extended);
        }
    }

    /// Writes every mechanism and solenoid.
    pub fn flush(&self, sink: &mut impl ActuatorSink) {
        for mech in &self.mechanisms {
            write_group(sink, &mech.ports, mech.output());
        }
        for solenoid in &self.solenoids {
            sink.set_digital_output(solenoid.port, solenoid.extended);
        }
    }

    /// Zeroes the drive, turns every mechanism off and clears any stick
    /// override. Solenoids keep their level.
    pub fn stop(&mut self, sink: &mut impl ActuatorSink) {
        self.drive(sink, 0, 0);
        for mech in &mut self.mechanisms {
            mech.commanded = mech.profile.off;
            mech.manual = None;
        }
        self.flush(sink);
    }

    /// Short description of the running mechanisms and extended solenoids.
    pub fn summary(&self) -> LineBuf<48> {
        let mut line = LineBuf::new();
        let running = self
            .mechanisms
            .iter()
            .filter(|m| m.output() != m.profile.off)
            .map(|m| m.name.as_str());
        let extended = self
            .solenoids
            .iter()
            .filter(|s| s.extended)
            .map(|s| s.name.as_str());
        for name in running.chain(extended) {
            if !line.is_empty() && line.push(' ').is_err() {
                break;
            }
            // Whatever does not fit is left off the screen.
            if line.push_str(name).is_err() {
                break;
            }
        }
        line
    }
}

fn write_group(sink: &mut impl ActuatorSink, ports: &Ports, power: i32) {
    let power = clamp_power(power);
    for port in ports {
        sink.set_motor_power(port.number(), port.apply(power));
    }
}
