/// Autonomous steps, composite routines and the routine builder
pub mod step;
/// Runs a routine step by step against the clock
pub mod sequencer;
