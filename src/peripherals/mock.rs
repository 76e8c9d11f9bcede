//! Host stand-ins for the robot's hardware.
//!
//! - [`MockClock`]: time that only moves when something sleeps on it.
//! - [`RecordingSink`]: an actuator sink that keeps every write, stamped with
//!   the mock time it happened at.
//! - [`ScriptedInput`]: a controller that replays a list of frames, one per
//!   tick.
//! - [`RecordingDisplay`]: keeps the last text shown on each status line.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use pushback::peripherals::{ActuatorSink, Clock, mock::{MockClock, RecordingSink}};
//!
//! let clock = MockClock::new();
//! let mut sink = RecordingSink::new(clock.clone());
//! sink.set_motor_power(11, 120);
//! clock.advance(Duration::from_millis(20));
//! sink.set_motor_power(11, 0);
//!
//! assert_eq!(sink.motor_history(11), vec![120, 0]);
//! assert_eq!(clock.now(), Duration::from_millis(20));
//! ```

use std::{cell::Cell, future::Future, rc::Rc, time::Duration};

use super::{
    ActiveFlag,
    ActuatorSink,
    Clock,
    SolenoidPort,
    controller::{AXIS_MAX, Axis, ControllerButton, InputSource},
};
use crate::display::StatusDisplay;

/// Mock time source. Sleeping advances the time instantly.
///
/// Clones share the same time, so a sink and a loop under test can agree on
/// when things happened.
#[derive(Debug, Clone, Default)]
pub struct MockClock {
    now: Rc<Cell<Duration>>,
}

impl MockClock {
    pub fn new() -> Self { Self::default() }

    pub fn advance(&self, duration: Duration) { self.now.set(self.now.get() + duration); }
}

impl Clock for MockClock {
    fn now(&self) -> Duration { self.now.get() }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        self.advance(duration);
        std::future::ready(())
    }
}

/// A single write seen by a [`RecordingSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Write {
    Motor { port: u8, power: i32 },
    Digital { port: SolenoidPort, level: bool },
}

/// An actuator sink that remembers everything.
#[derive(Debug, Clone)]
pub struct RecordingSink {
    clock:  MockClock,
    writes: Vec<(Duration, Write)>,
}

impl RecordingSink {
    pub fn new(clock: MockClock) -> Self {
        Self {
            clock,
            writes: Vec::new(),
        }
    }

    /// Every write in order, with the mock time it happened at.
    pub fn writes(&self) -> &[(Duration, Write)] { &self.writes }

    pub fn clear(&mut self) { self.writes.clear(); }

    /// Every power written to `port`, in order.
    pub fn motor_history(&self, port: u8) -> Vec<i32> {
        self.writes
            .iter()
            .filter_map(|(_, write)| match *write {
                Write::Motor { port: p, power } if p == port => Some(power),
                _ => None,
            })
            .collect()
    }

    /// Every level written to `port`, in order.
    pub fn digital_history(&self, port: SolenoidPort) -> Vec<bool> {
        self.writes
            .iter()
            .filter_map(|(_, write)| match *write {
                Write::Digital { port: p, level } if p == port => Some(level),
                _ => None,
            })
            .collect()
    }

    /// The last power written to `port`, if any.
    pub fn motor(&self, port: u8) -> Option<i32> { self.motor_history(port).last().copied() }

    /// The last level written to `port`, if any.
    pub fn digital(&self, port: SolenoidPort) -> Option<bool> {
        self.digital_history(port).last().copied()
    }
}

impl ActuatorSink for RecordingSink {
    fn set_motor_power(&mut self, port: u8, power: i32) {
        self.writes
            .push((self.clock.now(), Write::Motor { port, power }));
    }

    fn set_digital_output(&mut self, port: SolenoidPort, level: bool) {
        self.writes
            .push((self.clock.now(), Write::Digital { port, level }));
    }
}

/// One controller sample: axis readings and the set of held buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    axes: [i32; 4],
    held: u16,
}

impl InputFrame {
    /// A neutral controller: sticks centred, nothing held.
    pub fn neutral() -> Self { Self::default() }

    pub fn with_axis(mut self, axis: Axis, value: i32) -> Self {
        self.axes[axis.index()] = value.clamp(-AXIS_MAX, AXIS_MAX);
        self
    }

    pub fn holding(mut self, button: ControllerButton) -> Self {
        self.held |= button.mask();
        self
    }

    fn is_held(&self, button: ControllerButton) -> bool { self.held & button.mask() != 0 }
}

/// A controller that replays frames, one per [`InputSource::refresh`].
///
/// Button edges are derived the way the V5 controller derives them: a press
/// is reported on the first frame a button is held after a frame where it was
/// not. Past the last frame the controller reads neutral, and the optional
/// phase flag is cleared so the loop under test returns.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames:   Vec<InputFrame>,
    next:     usize,
    current:  InputFrame,
    previous: InputFrame,
    finish:   Option<ActiveFlag>,
}

impl ScriptedInput {
    pub fn new(frames: Vec<InputFrame>) -> Self {
        Self {
            frames,
            ..Self::default()
        }
    }

    /// `ticks` neutral frames.
    pub fn idle(ticks: usize) -> Self { Self::new(vec![InputFrame::neutral(); ticks]) }

    /// Clears `flag` on the first refresh past the last frame.
    pub fn finishing(mut self, flag: ActiveFlag) -> Self {
        self.finish = Some(flag);
        self
    }

    /// Number of frames consumed so far.
    pub fn consumed(&self) -> usize { self.next }
}

impl InputSource for ScriptedInput {
    fn refresh(&mut self) {
        self.previous = self.current;
        match self.frames.get(self.next) {
            Some(frame) => {
                self.current = *frame;
                self.next += 1;
            }
            None => {
                self.current = InputFrame::neutral();
                if let Some(flag) = &self.finish {
                    flag.set(false);
                }
            }
        }
    }

    fn axis(&self, axis: Axis) -> i32 { self.current.axes[axis.index()] }

    fn button_pressed(&self, button: ControllerButton) -> bool {
        self.current.is_held(button) && !self.previous.is_held(button)
    }

    fn button_held(&self, button: ControllerButton) -> bool { self.current.is_held(button) }
}

/// A status display that keeps the latest text of each line.
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    lines: Vec<String>,
    shows: usize,
}

impl RecordingDisplay {
    pub fn line(&self, line: u8) -> Option<&str> {
        self.lines
            .get(usize::from(line))
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    /// Number of `show` calls so far.
    pub fn shows(&self) -> usize { self.shows }
}

impl StatusDisplay for RecordingDisplay {
    fn show(&mut self, line: u8, text: &str) {
        let index = usize::from(line);
        if self.lines.len() <= index {
            self.lines.resize(index + 1, String::new());
        }
        self.lines[index] = text.to_owned();
        self.shows += 1;
    }
}
