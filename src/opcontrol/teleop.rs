//! The driver-control loop.
//!
//! One [`Teleop`] runs one driver phase. Every tick it:
//!
//! 1. refreshes the controller,
//! 2. writes the drive command for the robot's drive mode,
//! 3. flips the toggles whose buttons were pressed,
//! 4. applies stick overrides and reverse-then-stop actions,
//! 5. writes every mechanism and solenoid, then
//! 6. updates the status lines,
//!
//! and then sleeps for the configured tick period. The loop returns on the
//! first tick boundary after the phase signal goes quiet.

use std::{fmt::Write as _, time::Duration};

use heapless::String as LineBuf;
use log::{debug, info, trace};

use super::toggle::ToggleBank;
use crate::{
    actuators::Actuators,
    auton::step::Level,
    competition::Context,
    config::{AnalogConfig, ReverseConfig, RobotConfig},
    drivetrain::{DriveCommand, Differential, deadband},
    peripherals::{ActuatorSink, Clock, controller::InputSource},
};

/// Driver control for one phase.
pub struct Teleop {
    period:    Duration,
    drive:     Differential,
    actuators: Actuators,
    toggles:   ToggleBank,
    reversals: Vec<ReverseConfig>,
    analog:    Vec<AnalogConfig>,
    ticks:     u32,
}

impl Teleop {
    pub fn new(config: &RobotConfig) -> Self {
        Self {
            period:    Duration::from_millis(u64::from(config.tick_ms)),
            drive:     Differential::new(config.drive.mode),
            actuators: Actuators::new(config),
            toggles:   ToggleBank::new(config),
            reversals: config.reversals.clone(),
            analog:    config.analog.clone(),
            ticks:     0,
        }
    }

    pub fn toggles(&self) -> &ToggleBank { &self.toggles }

    pub fn actuators(&self) -> &Actuators { &self.actuators }

    /// Ticks run so far.
    pub fn ticks(&self) -> u32 { self.ticks }

    /// Runs ticks until the phase ends.
    pub async fn run<S, I, C>(&mut self, ctx: &mut Context<'_, S, I, C>)
    where
        S: ActuatorSink,
        I: InputSource,
        C: Clock,
    {
        info!("Driver control started");
        while ctx.is_active() {
            self.tick(ctx).await;
            ctx.clock.sleep(self.period).await;
        }
        info!("Driver control ended after {} ticks", self.ticks);
    }

    /// One pass of the loop, without the trailing sleep.
    pub async fn tick<S, I, C>(&mut self, ctx: &mut Context<'_, S, I, C>)
    where
        S: ActuatorSink,
        I: InputSource,
        C: Clock,
    {
        self.ticks += 1;
        ctx.input.refresh();
        let input = &*ctx.input;
        let sink = &mut *ctx.sink;

        let command = self.drive.update(input);
        self.actuators.drive(sink, command.left, command.right);

        self.toggles.handle(input, &mut self.actuators);

        for analog in &self.analog {
            let value = deadband(input.axis(analog.axis), analog.deadband);
            let manual = (value != 0).then_some(value);
            self.actuators.set_manual(&analog.mechanism, manual);
        }

        for reverse in &self.reversals {
            if !input.button_pressed(reverse.button) {
                continue;
            }
            debug!("Reversing `{}`", reverse.mechanism);
            self.actuators.set_manual(&reverse.mechanism, None);
            self.actuators.set_mechanism(&reverse.mechanism, Level::Reverse);
            self.actuators.flush_mechanism(sink, &reverse.mechanism);
            ctx.clock
                .sleep(Duration::from_millis(u64::from(reverse.settle_ms)))
                .await;
            self.actuators.set_mechanism(&reverse.mechanism, Level::Off);
            self.actuators.flush_mechanism(sink, &reverse.mechanism);
            if let Some(toggle) = &reverse.clears {
                self.toggles.clear(toggle);
            }
        }

        self.actuators.flush(sink);
        trace!("tick {}: drive {:?}", self.ticks, command);

        ctx.display.show(1, &drive_line(command));
        ctx.display.show(2, &self.actuators.summary());
    }
}

fn drive_line(command: DriveCommand) -> LineBuf<24> {
    let mut line = LineBuf::new();
    // Drive powers never need more than four characters.
    let _ = write!(line, "L {:4} R {:4}", command.left, command.right);
    line
}
