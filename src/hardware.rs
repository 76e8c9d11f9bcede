//! V5 hardware adapters.
//!
//! Connects the control core to vexide devices:
//!
//! - [`V5Sink`]: smart-port motors and three-wire solenoids.
//! - [`V5Input`]: the primary controller.
//! - [`V5Clock`]: vexide's uptime and sleep.
//! - [`BrainCanvas`]: the Brain screen as an `embedded-graphics` target.
//!
//! Ports are taken by number through [`DynamicPeripherals`].
//!
//! Device errors are logged and otherwise ignored: a disconnected motor or
//! controller must never stop the rest of the robot.

use std::{collections::BTreeMap, convert::Infallible, time::Duration};

use embedded_graphics::{pixelcolor::Rgb888, prelude::*, primitives::Rectangle};
use log::{info, warn};
use vexide::{
    color::Rgb,
    controller::{ButtonState, ControllerState},
    display::{Display, Rect},
    prelude::*,
};

use crate::{
    competition::Robot,
    config::RobotConfig,
    display::spans,
    peripherals::{
        ActuatorSink,
        Clock,
        MAX_POWER,
        SolenoidPort,
        controller::{AXIS_MAX, Axis, ControllerButton, InputSource},
    },
};

/// Nominal battery voltage that full power maps to.
const FULL_VOLTAGE: f64 = 12.0;

/// Motors and solenoids claimed for every port a configuration names.
pub struct V5Sink {
    motors:    BTreeMap<u8, Motor>,
    solenoids: BTreeMap<SolenoidPort, AdiDigitalOut>,
}

impl V5Sink {
    /// Takes the ports `config` names from `peripherals`.
    ///
    /// A port that something else already holds is logged and left out, so
    /// writes to it are dropped with a warning instead of reaching a device.
    pub fn new(config: &RobotConfig, peripherals: &mut DynamicPeripherals) -> Self {
        let mut motors = BTreeMap::new();
        for number in config.motor_ports() {
            match peripherals.take_smart_port(number) {
                Some(port) => {
                    motors.insert(number, Motor::new(port, Gearset::Green, Direction::Forward));
                }
                None => warn!("Smart port {} is already in use, skipping", number),
            }
        }

        let mut solenoids = BTreeMap::new();
        for port in config.solenoid_ports() {
            match peripherals.take_adi_port(port.index() + 1) {
                Some(adi) => {
                    solenoids.insert(port, AdiDigitalOut::new(adi));
                }
                None => warn!("ADI port {} is already in use, skipping", port.0),
            }
        }

        info!("Claimed {} motors and {} solenoids", motors.len(), solenoids.len());
        Self { motors, solenoids }
    }
}

impl ActuatorSink for V5Sink {
    fn set_motor_power(&mut self, port: u8, power: i32) {
        let Some(motor) = self.motors.get_mut(&port) else {
            warn!("No motor claimed on port {}", port);
            return;
        };
        let voltage = f64::from(power) / f64::from(MAX_POWER) * FULL_VOLTAGE;
        motor.set_voltage(voltage).unwrap_or_else(|e| {
            warn!("Motor {} error: {}", port, e);
        });
    }

    fn set_digital_output(&mut self, port: SolenoidPort, level: bool) {
        let Some(solenoid) = self.solenoids.get_mut(&port) else {
            warn!("No solenoid claimed on port {}", port.0);
            return;
        };
        let result = if level { solenoid.set_high() } else { solenoid.set_low() };
        result.unwrap_or_else(|e| {
            warn!("Solenoid {} error: {}", port.0, e);
        });
    }
}

/// The controller, sampled once per [`InputSource::refresh`].
pub struct V5Input {
    controller: Controller,
    state:      ControllerState,
}

impl V5Input {
    pub fn new(controller: Controller) -> Self {
        Self {
            controller,
            state: ControllerState::default(),
        }
    }

    fn button(&self, button: ControllerButton) -> ButtonState {
        let state = &self.state;
        match button {
            ControllerButton::ButtonA => state.button_a,
            ControllerButton::ButtonB => state.button_b,
            ControllerButton::ButtonX => state.button_x,
            ControllerButton::ButtonY => state.button_y,
            ControllerButton::ButtonUp => state.button_up,
            ControllerButton::ButtonDown => state.button_down,
            ControllerButton::ButtonLeft => state.button_left,
            ControllerButton::ButtonRight => state.button_right,
            ControllerButton::ButtonL1 => state.button_l1,
            ControllerButton::ButtonL2 => state.button_l2,
            ControllerButton::ButtonR1 => state.button_r1,
            ControllerButton::ButtonR2 => state.button_r2,
        }
    }
}

impl InputSource for V5Input {
    fn refresh(&mut self) {
        self.state = self.controller.state().unwrap_or_else(|e| {
            warn!("Controller State Error: {}", e);
            ControllerState::default()
        });
    }

    fn axis(&self, axis: Axis) -> i32 {
        let value = match axis {
            Axis::LeftX => self.state.left_stick.x(),
            Axis::LeftY => self.state.left_stick.y(),
            Axis::RightX => self.state.right_stick.x(),
            Axis::RightY => self.state.right_stick.y(),
        };
        ((value * f64::from(AXIS_MAX)).round() as i32).clamp(-AXIS_MAX, AXIS_MAX)
    }

    fn button_pressed(&self, button: ControllerButton) -> bool { self.button(button).is_now_pressed() }

    fn button_held(&self, button: ControllerButton) -> bool { self.button(button).is_pressed() }
}

/// vexide's clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct V5Clock;

impl Clock for V5Clock {
    fn now(&self) -> Duration { vexide::time::user_uptime() }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> { vexide::time::sleep(duration) }
}

/// The Brain screen as a [`DrawTarget`].
pub struct BrainCanvas {
    display: Display,
}

impl BrainCanvas {
    pub fn new(display: Display) -> Self { Self { display } }

    /// One SDK fill over `area`, which must already lie on the screen.
    fn fill_rect(&mut self, area: &Rectangle, color: Rgb888) {
        let Some(bottom_right) = area.bottom_right() else {
            return;
        };
        self.display.fill(
            &Rect::new(
                [area.top_left.x as i16, area.top_left.y as i16],
                [bottom_right.x as i16, bottom_right.y as i16],
            ),
            Rgb::new(color.r(), color.g(), color.b()),
        );
    }
}

impl OriginDimensions for BrainCanvas {
    fn size(&self) -> Size {
        Size::new(
            Display::HORIZONTAL_RESOLUTION as u32,
            Display::VERTICAL_RESOLUTION as u32,
        )
    }
}

impl DrawTarget for BrainCanvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        let visible = pixels.into_iter().filter(|Pixel(p, _)| bounds.contains(*p));
        for (run, color) in spans(visible) {
            self.fill_rect(&run, color);
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        self.fill_rect(&area, color);
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let screen = self.bounding_box();
        self.fill_rect(&screen, color);
        Ok(())
    }
}

/// The competition runtime calls these as the field changes mode.
impl Compete for Robot<V5Sink, V5Input, V5Clock> {
    async fn autonomous(&mut self) { self.on_autonomous().await; }

    async fn driver(&mut self) { self.on_teleop().await; }

    async fn disabled(&mut self) { self.on_disabled(); }
}
