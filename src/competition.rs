//! Competition lifecycle.
//!
//! The field (or a competition switch) decides which phase the robot is in.
//! [`Robot`] owns the hardware handles for the whole program and exposes one
//! hook per transition:
//!
//! - [`Robot::on_init`]: once, at program start.
//! - [`Robot::on_autonomous`]: runs the autonomous routine.
//! - [`Robot::on_teleop`]: runs driver control until the phase ends.
//! - [`Robot::on_disabled`]: ends the running phase and stops the robot.
//!
//! Each phase gets a fresh [`Context`] and fresh control state, so nothing a
//! driver toggled carries into the next match.
//!
//! # Example
//!
//! ```
//! use futures_lite::future::block_on;
//! use pushback::{
//!     competition::Robot,
//!     config::RobotConfig,
//!     peripherals::mock::{MockClock, RecordingSink, ScriptedInput},
//! };
//!
//! let clock = MockClock::new();
//! let mut robot = Robot::new(
//!     RobotConfig::rocket_league(),
//!     RecordingSink::new(clock.clone()),
//!     ScriptedInput::idle(0),
//!     clock,
//! )
//! .unwrap();
//!
//! robot.on_init();
//! block_on(robot.on_autonomous());
//! robot.on_disabled();
//! ```

use log::{info, warn};

use crate::{
    actuators::Actuators,
    auton::sequencer::Sequencer,
    config::{ConfigError, RobotConfig},
    display::{NullDisplay, StatusDisplay},
    opcontrol::teleop::Teleop,
    peripherals::{ActiveFlag, ActuatorSink, Clock, PhaseSignal, controller::InputSource},
};

/// Everything a control loop may touch during one phase.
///
/// Built by [`Robot`] at the start of each phase and handed to exactly one
/// component, which then owns every actuator until the phase ends.
pub struct Context<'a, S, I, C> {
    pub sink:    &'a mut S,
    pub input:   &'a mut I,
    pub clock:   &'a C,
    pub display: &'a mut dyn StatusDisplay,
    pub phase:   &'a dyn PhaseSignal,
}

impl<'a, S, I, C> Context<'a, S, I, C>
where
    S: ActuatorSink,
    I: InputSource,
    C: Clock,
{
    pub fn new(
        sink: &'a mut S,
        input: &'a mut I,
        clock: &'a C,
        display: &'a mut dyn StatusDisplay,
        phase: &'a dyn PhaseSignal,
    ) -> Self {
        Self {
            sink,
            input,
            clock,
            display,
            phase,
        }
    }

    pub fn is_active(&self) -> bool { self.phase.is_active() }
}

/// The robot: its configuration, its hardware and its lifecycle hooks.
pub struct Robot<S, I, C> {
    config:  RobotConfig,
    sink:    S,
    input:   I,
    clock:   C,
    display: Box<dyn StatusDisplay>,
    active:  ActiveFlag,
}

impl<S, I, C> Robot<S, I, C>
where
    S: ActuatorSink,
    I: InputSource,
    C: Clock,
{
    /// Checks the configuration and takes ownership of the hardware.
    ///
    /// # Errors
    ///
    /// Returns the first problem [`RobotConfig::validate`] finds.
    pub fn new(config: RobotConfig, sink: S, input: I, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            sink,
            input,
            clock,
            display: Box::new(NullDisplay),
            active: ActiveFlag::new(),
        })
    }

    pub fn with_display(mut self, display: impl StatusDisplay + 'static) -> Self {
        self.display = Box::new(display);
        self
    }

    pub fn config(&self) -> &RobotConfig { &self.config }

    /// The flag the loops poll. Clearing it ends the running phase at its
    /// next tick or step boundary.
    pub fn active(&self) -> ActiveFlag { self.active.clone() }

    pub fn sink(&self) -> &S { &self.sink }

    pub fn input_mut(&mut self) -> &mut I { &mut self.input }

    /// Program start: puts every actuator in its resting state and says
    /// hello on the screen.
    pub fn on_init(&mut self) {
        info!("Robot `{}` initialized", self.config.name);
        let mut actuators = Actuators::new(&self.config);
        actuators.stop(&mut self.sink);
        self.display.show(0, &self.config.name);
    }

    /// Runs the configured autonomous routine once.
    pub async fn on_autonomous(&mut self) {
        self.active.set(true);
        info!("Autonomous started");
        let mut actuators = Actuators::new(&self.config);
        let mut sequencer = Sequencer::new(&self.config.autonomous);
        let phase = self.active.clone();
        let mut ctx = Context::new(
            &mut self.sink,
            &mut self.input,
            &self.clock,
            self.display.as_mut(),
            &phase,
        );
        sequencer.run(&mut ctx, &mut actuators).await;
        if !sequencer.is_finished() {
            warn!(
                "Autonomous cut short at step {} of {}",
                sequencer.pointer(),
                sequencer.len()
            );
        }
    }

    /// Runs driver control until the phase ends.
    pub async fn on_teleop(&mut self) {
        self.active.set(true);
        let mut teleop = Teleop::new(&self.config);
        let phase = self.active.clone();
        let mut ctx = Context::new(
            &mut self.sink,
            &mut self.input,
            &self.clock,
            self.display.as_mut(),
            &phase,
        );
        teleop.run(&mut ctx).await;
    }

    /// Ends the running phase and stops every motor.
    pub fn on_disabled(&mut self) {
        self.active.set(false);
        info!("Disabled");
        Actuators::new(&self.config).stop(&mut self.sink);
    }
}
