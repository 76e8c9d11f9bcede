//! Runs an autonomous [`Routine`] one step at a time.
//!
//! Steps run strictly in order, each waiting out its own duration on the
//! [`Clock`]. The phase signal is checked between steps only: a step that has
//! started always runs to its end. There is no feedback and no retry. The
//! powers and durations are trusted as they were tuned.

use std::fmt::Write as _;

use heapless::String as LineBuf;
use log::{info, warn};

use super::step::{Command, Level, Step};
use crate::{
    actuators::Actuators,
    competition::Context,
    config::AutonConfig,
    peripherals::{ActuatorSink, Clock, controller::InputSource},
};

/// A routine plus an instruction pointer into it.
#[derive(Debug, Clone)]
pub struct Sequencer {
    steps:   Vec<Step>,
    score:   Option<String>,
    pointer: usize,
}

impl Sequencer {
    pub fn new(config: &AutonConfig) -> Self {
        Self {
            steps:   config.routine.steps().to_vec(),
            score:   config.score_mechanism.clone(),
            pointer: 0,
        }
    }

    /// Index of the next step to run.
    pub fn pointer(&self) -> usize { self.pointer }

    pub fn len(&self) -> usize { self.steps.len() }

    pub fn is_empty(&self) -> bool { self.steps.is_empty() }

    /// Whether every step has run.
    pub fn is_finished(&self) -> bool { self.pointer >= self.steps.len() }

    /// Runs the remaining steps. Returns after the last one, or at the first
    /// step boundary where the phase is over, in which case the robot is
    /// stopped.
    ///
    /// Every mechanism and solenoid is written once before the first step, so
    /// the hardware starts from the commanded state whatever the last phase
    /// left behind.
    pub async fn run<S, I, C>(&mut self, ctx: &mut Context<'_, S, I, C>, actuators: &mut Actuators)
    where
        S: ActuatorSink,
        I: InputSource,
        C: Clock,
    {
        actuators.drive(ctx.sink, 0, 0);
        actuators.flush(ctx.sink);

        while let Some(step) = self.steps.get(self.pointer).cloned() {
            if !ctx.phase.is_active() {
                warn!("Phase ended after {} of {} steps", self.pointer, self.steps.len());
                actuators.stop(ctx.sink);
                return;
            }

            info!("Step {}/{}: {:?}", self.pointer + 1, self.steps.len(), step);
            let mut line: LineBuf<24> = LineBuf::new();
            let _ = write!(line, "auton {}/{}", self.pointer + 1, self.steps.len());
            ctx.display.show(1, &line);

            self.perform(&step, ctx, actuators).await;
            self.pointer += 1;
        }
        info!("Routine finished");
    }

    async fn perform<S, I, C>(&self, step: &Step, ctx: &mut Context<'_, S, I, C>, actuators: &mut Actuators)
    where
        S: ActuatorSink,
        I: InputSource,
        C: Clock,
    {
        match step {
            Step::Drive { left, right, .. } => {
                actuators.drive(ctx.sink, *left, *right);
                ctx.clock.sleep(step.duration()).await;
                actuators.drive(ctx.sink, 0, 0);
            }
            Step::Turn { power, .. } => {
                actuators.drive(ctx.sink, *power, -*power);
                ctx.clock.sleep(step.duration()).await;
                actuators.drive(ctx.sink, 0, 0);
            }
            Step::Wait { .. } => ctx.clock.sleep(step.duration()).await,
            Step::Actuate { command } => {
                if actuators.apply(command) {
                    match command {
                        Command::Mechanism { name, .. } => actuators.flush_mechanism(ctx.sink, name),
                        Command::Solenoid { name, .. } => actuators.flush_solenoid(ctx.sink, name),
                    }
                }
            }
            Step::Score { .. } => match &self.score {
                Some(name) => {
                    actuators.set_mechanism(name, Level::On);
                    actuators.flush_mechanism(ctx.sink, name);
                    ctx.clock.sleep(step.duration()).await;
                    actuators.set_mechanism(name, Level::Off);
                    actuators.flush_mechanism(ctx.sink, name);
                }
                None => {
                    warn!("No scoring mechanism configured, waiting instead");
                    ctx.clock.sleep(step.duration()).await;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures_lite::future::block_on;

    use super::*;
    use crate::{
        auton::step::{LoadAndScore, Routine},
        config::RobotConfig,
        peripherals::{
            PhaseSignal,
            SolenoidPort,
            mock::{MockClock, RecordingDisplay, RecordingSink, ScriptedInput, Write},
        },
    };

    fn ms(millis: u64) -> Duration { Duration::from_millis(millis) }

    /// Runs `routine` on the rocket-league build under `phase`.
    fn run_with(routine: Routine, phase: &dyn PhaseSignal, clock: &MockClock) -> (Sequencer, RecordingSink) {
        let config = RobotConfig::rocket_league().with_routine(routine);
        let mut actuators = Actuators::new(&config);
        let mut sequencer = Sequencer::new(&config.autonomous);
        let mut sink = RecordingSink::new(clock.clone());
        let mut input = ScriptedInput::idle(0);
        let mut display = RecordingDisplay::default();

        let mut ctx = Context::new(&mut sink, &mut input, clock, &mut display, phase);
        block_on(sequencer.run(&mut ctx, &mut actuators));
        (sequencer, sink)
    }

    fn run(routine: Routine, clock: &MockClock) -> (Sequencer, RecordingSink) {
        run_with(routine, &|| true, clock)
    }

    fn timed(sink: &RecordingSink, port: u8) -> Vec<(Duration, i32)> {
        sink.writes()
            .iter()
            .filter_map(|(at, write)| match *write {
                Write::Motor { port: p, power } if p == port => Some((*at, power)),
                _ => None,
            })
            .collect()
    }

    fn first(sink: &RecordingSink, wanted: impl Fn(&Write) -> bool) -> usize {
        sink.writes()
            .iter()
            .position(|(_, write)| wanted(write))
            .expect("no matching write")
    }

    fn last(sink: &RecordingSink, wanted: impl Fn(&Write) -> bool) -> usize {
        sink.writes()
            .iter()
            .rposition(|(_, write)| wanted(write))
            .expect("no matching write")
    }

    #[test]
    fn steps_run_in_order_and_take_their_time() {
        let clock = MockClock::new();
        let routine = Routine::new().drive(50, 50, 100).wait(50).turn(40, 100).score(200);
        let (sequencer, sink) = run(routine, &clock);

        // Left 18 and right 12 are both forward ports.
        assert_eq!(timed(&sink, 18), vec![
            (ms(0), 0),
            (ms(0), 50),
            (ms(100), 0),
            (ms(150), 40),
            (ms(250), 0),
        ]);
        assert_eq!(timed(&sink, 12), vec![
            (ms(0), 0),
            (ms(0), 50),
            (ms(100), 0),
            (ms(150), -40),
            (ms(250), 0),
        ]);
        // The top roller scores at its "on" power.
        assert_eq!(timed(&sink, 11), vec![(ms(0), 0), (ms(250), -120), (ms(450), 0)]);
        assert!(sequencer.is_finished());
        assert_eq!(sequencer.pointer(), 4);
    }

    #[test]
    fn elapsed_time_matches_declared_durations() {
        let clock = MockClock::new();
        let routine = Routine::match_loads();
        let expected = routine.duration();
        let (sequencer, _) = run(routine, &clock);
        assert_eq!(clock.now(), expected);
        assert_eq!(sequencer.pointer(), sequencer.len());
    }

    #[test]
    fn load_and_score_moves_the_loader_around_the_drive() {
        let clock = MockClock::new();
        let (_, sink) = run(Routine::new().load_and_score(&LoadAndScore::default()), &clock);

        let loader = SolenoidPort('H');
        // Retracted at the start, then lowered and raised again.
        assert_eq!(sink.digital_history(loader), vec![false, true, false]);

        let lowered = first(&sink, |w| *w == Write::Digital { port: loader, level: true });
        let raised = last(&sink, |w| *w == Write::Digital { port: loader, level: false });
        let forward = first(&sink, |w| matches!(*w, Write::Motor { port: 18, power } if power > 0));
        let backward = first(&sink, |w| matches!(*w, Write::Motor { port: 18, power } if power < 0));
        let scoring = first(&sink, |w| matches!(*w, Write::Motor { port: 11, power } if power != 0));

        assert!(backward < lowered);
        assert!(lowered < forward);
        assert!(lowered < raised);
        assert!(raised < scoring);
    }

    #[test]
    fn initial_levels_are_written_before_the_first_step() {
        let clock = MockClock::new();
        let (_, sink) = run(Routine::new().wait(100), &clock);

        for port in ['G', 'H'] {
            assert_eq!(sink.digital_history(SolenoidPort(port)), vec![false]);
        }
        assert_eq!(timed(&sink, 20), vec![(ms(0), 0)]);
        assert_eq!(timed(&sink, 11), vec![(ms(0), 0)]);
        assert!(
            sink.writes()
                .iter()
                .filter(|(_, write)| matches!(write, Write::Digital { .. }))
                .all(|(at, _)| *at == Duration::ZERO)
        );
    }

    #[test]
    fn phase_end_stops_at_a_step_boundary() {
        let clock = MockClock::new();
        let watch = clock.clone();
        let phase = move || watch.now() < ms(150);
        let routine = Routine::new()
            .mechanism("conveyor", Level::On)
            .drive(60, 60, 100)
            .drive(60, 60, 100)
            .drive(60, 60, 100);
        let (sequencer, sink) = run_with(routine, &phase, &clock);

        // The second drive started before the deadline and was not cut.
        assert_eq!(clock.now(), ms(200));
        assert_eq!(sequencer.pointer(), 3);
        assert!(!sequencer.is_finished());
        assert_eq!(sink.motor(18), Some(0));
        assert_eq!(sink.motor(20), Some(0));
    }

    #[test]
    fn ended_phase_runs_nothing() {
        let clock = MockClock::new();
        let (sequencer, sink) = run_with(Routine::new().drive(60, 60, 100), &|| false, &clock);
        assert_eq!(sequencer.pointer(), 0);
        assert_eq!(clock.now(), Duration::ZERO);
        assert_eq!(sink.motor_history(18), vec![0, 0]);
    }

    #[test]
    fn unknown_names_are_skipped() {
        let clock = MockClock::new();
        let routine = Routine::new().mechanism("flywheel", Level::On).solenoid("wings", true).wait(10);
        let (sequencer, sink) = run(routine, &clock);
        assert!(sequencer.is_finished());
        // Opening drive zero plus the initial flush of two motors and two solenoids.
        assert_eq!(sink.writes().len(), 10);
    }

    #[test]
    fn score_without_a_mechanism_only_waits() {
        let clock = MockClock::new();
        let mut config = RobotConfig::classic().with_routine(Routine::new().score(300));
        config.autonomous.score_mechanism = None;
        let mut actuators = Actuators::new(&config);
        let mut sequencer = Sequencer::new(&config.autonomous);
        let mut sink = RecordingSink::new(clock.clone());
        let mut input = ScriptedInput::idle(0);
        let mut display = RecordingDisplay::default();
        let active = || true;

        let mut ctx = Context::new(&mut sink, &mut input, &clock, &mut display, &active);
        block_on(sequencer.run(&mut ctx, &mut actuators));
        assert_eq!(clock.now(), ms(300));
        assert_eq!(display.line(1), Some("auton 1/1"));
        assert!(sink.motor_history(11).iter().all(|power| *power == 0));
    }
}
