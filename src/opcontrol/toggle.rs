//! Button toggles for mechanisms and pneumatics.
//!
//! Each [`ToggleConfig`] binds one button to a list of effects. A press
//! flips the toggle:
//!
//! - **Enabling** writes the effects' "on" commands: the mechanism's profile
//!   power (or the explicit power the effect names), or a high solenoid.
//! - **Disabling** writes the "off" commands: the mechanism's profile "off"
//!   power, or a low solenoid.
//!
//! Toggles listed together in an exclusive group never run at the same time.
//! Enabling one first disables every enabled peer, then applies its own "on"
//! commands, so on a mechanism both toggles share, the newcomer wins.
//!
//! # Example
//!
//! ```
//! use pushback::{actuators::Actuators, config::RobotConfig, opcontrol::toggle::ToggleBank};
//!
//! let config = RobotConfig::rocket_league();
//! let mut actuators = Actuators::new(&config);
//! let mut toggles = ToggleBank::new(&config);
//!
//! toggles.press("store_match_load", &mut actuators);
//! toggles.press("shoot", &mut actuators);
//! assert!(!toggles.is_enabled("store_match_load"));
//! assert!(toggles.is_enabled("shoot"));
//! ```

use log::debug;

use crate::{
    actuators::Actuators,
    auton::step::Level,
    config::{Effect, RobotConfig, ToggleConfig},
    peripherals::controller::InputSource,
};

#[derive(Debug, Clone)]
struct Toggle {
    config:  ToggleConfig,
    enabled: bool,
}

/// Every toggle on the robot and the exclusive groups between them.
#[derive(Debug, Clone)]
pub struct ToggleBank {
    toggles: Vec<Toggle>,
    /// Exclusive groups, as indices into `toggles`.
    groups:  Vec<Vec<usize>>,
}

impl ToggleBank {
    /// Builds the bank with every toggle disabled. Group members that name no
    /// toggle are skipped; a validated configuration has none.
    pub fn new(config: &RobotConfig) -> Self {
        let toggles: Vec<Toggle> = config
            .toggles
            .iter()
            .map(|t| Toggle {
                config:  t.clone(),
                enabled: false,
            })
            .collect();
        let groups = config
            .exclusive
            .iter()
            .map(|group| {
                group
                    .iter()
                    .filter_map(|name| toggles.iter().position(|t| &t.config.name == name))
                    .collect()
            })
            .collect();
        Self { toggles, groups }
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.toggles
            .iter()
            .any(|t| t.enabled && t.config.name == name)
    }

    /// Names of the enabled toggles, in configuration order.
    pub fn enabled(&self) -> impl Iterator<Item = &str> {
        self.toggles
            .iter()
            .filter(|t| t.enabled)
            .map(|t| t.config.name.as_str())
    }

    /// Flips every toggle whose button was pressed this tick, in
    /// configuration order. Returns how many flipped.
    pub fn handle(&mut self, input: &impl InputSource, actuators: &mut Actuators) -> usize {
        let mut flipped = 0;
        for index in 0..self.toggles.len() {
            if input.button_pressed(self.toggles[index].config.button) {
                self.flip(index, actuators);
                flipped += 1;
            }
        }
        flipped
    }

    /// Flips a toggle by name, as if its button had been pressed. Returns
    /// `false` for an unknown name.
    pub fn press(&mut self, name: &str, actuators: &mut Actuators) -> bool {
        match self.toggles.iter().position(|t| t.config.name == name) {
            Some(index) => {
                self.flip(index, actuators);
                true
            }
            None => false,
        }
    }

    /// Marks a toggle disabled without writing anything. Used once something
    /// else has already stopped its mechanism.
    pub fn clear(&mut self, name: &str) {
        for toggle in self.toggles.iter_mut().filter(|t| t.config.name == name) {
            toggle.enabled = false;
        }
    }

    fn flip(&mut self, index: usize, actuators: &mut Actuators) {
        if self.toggles[index].enabled {
            self.disable(index, actuators);
            return;
        }

        let peers: Vec<usize> = self
            .groups
            .iter()
            .filter(|group| group.contains(&index))
            .flatten()
            .copied()
            .filter(|&peer| peer != index && self.toggles[peer].enabled)
            .collect();
        for peer in peers {
            self.disable(peer, actuators);
        }

        let toggle = &mut self.toggles[index];
        toggle.enabled = true;
        debug!("Toggle `{}` on", toggle.config.name);
        for effect in &toggle.config.effects {
            match effect {
                Effect::Run { mechanism, level } => {
                    actuators.set_mechanism(mechanism, *level);
                }
                Effect::Extend { solenoid } => {
                    actuators.set_solenoid(solenoid, true);
                }
            }
        }
    }

    fn disable(&mut self, index: usize, actuators: &mut Actuators) {
        let toggle = &mut self.toggles[index];
        toggle.enabled = false;
        debug!("Toggle `{}` off", toggle.config.name);
        for effect in &toggle.config.effects {
            match effect {
                Effect::Run { mechanism, .. } => {
                    actuators.set_mechanism(mechanism, Level::Off);
                }
                Effect::Extend { solenoid } => {
                    actuators.set_solenoid(solenoid, false);
                }
            }
        }
    }
}
