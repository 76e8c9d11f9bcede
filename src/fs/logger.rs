//! Dual-output logger.
//!
//! Implements the [`log`] facade, writing every message to the console and
//! to `log.txt` (on the Brain, the root of the SD card).
//!
//! # Usage
//!
//! Initialize the logger once at the start of the program:
//!
//! ```ignore
//! use log::{LevelFilter, info};
//! use pushback::fs::logger;
//!
//! #[vexide::main]
//! async fn main(peripherals: Peripherals) {
//!     logger::init(LevelFilter::Info).expect("Logger init failed");
//!     info!("Program started");
//! }
//! ```
//!
//! # Log Output
//!
//! Each entry has the level, the time since program start, the target and
//! the message:
//!
//! ```text
//! INFO [2m 5s 123ms] pushback::competition - Autonomous started
//! DEBUG [2m 21s 40ms] pushback::opcontrol::toggle - Toggle `shoot` on
//! ```

use std::{
    fmt::Display,
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    path::Path,
    sync::{Mutex, OnceLock},
    time::Duration,
};

use humantime::format_duration;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

/// File the global logger writes to.
pub const LOG_FILE: &str = "log.txt";

/// Writes log lines to the console and a file.
///
/// The file is created or truncated when the logger is built. If it cannot
/// be opened (no SD card, say) the logger keeps writing to the console only.
pub struct DualLogger {
    level: LevelFilter,
    file:  Mutex<Option<BufWriter<File>>>,
}

impl DualLogger {
    pub fn new(level: LevelFilter, path: impl AsRef<Path>) -> Self {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .ok()
            .map(BufWriter::new);

        Self {
            level,
            file: Mutex::new(file),
        }
    }

    /// Whether a log file is being written.
    pub fn has_file(&self) -> bool { self.file.lock().map(|file| file.is_some()).unwrap_or(false) }
}

impl log::Log for DualLogger {
    fn enabled(&self, metadata: &Metadata) -> bool { metadata.level() <= self.level }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), uptime(), record.target(), record.args());

        print!("{}", line);

        if let Ok(mut file) = self.file.lock() {
            if let Some(writer) = file.as_mut() {
                let _ = writer.write_all(line.as_bytes());
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            if let Some(writer) = file.as_mut() {
                let _ = writer.flush();
            }
        }
    }
}

static LOGGER: OnceLock<DualLogger> = OnceLock::new();

/// Installs the global logger, writing to the console and [`LOG_FILE`].
///
/// Call once, before anything logs.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| DualLogger::new(level, LOG_FILE));
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

/// One log line, newline included.
pub fn format_line(level: Level, uptime: Duration, target: &str, message: impl Display) -> String {
    format!("{} [{}] {} - {}\n", level, format_duration(uptime), target, message)
}

/// Time since the user program started, to the millisecond.
#[cfg(feature = "vexide")]
fn uptime() -> Duration { whole_millis(vexide::time::user_uptime()) }

/// Time since the first log line on the host, to the millisecond.
#[cfg(not(feature = "vexide"))]
fn uptime() -> Duration {
    static START: OnceLock<std::time::Instant> = OnceLock::new();
    whole_millis(START.get_or_init(std::time::Instant::now).elapsed())
}

fn whole_millis(duration: Duration) -> Duration {
    Duration::from_millis(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use log::Log;

    use super::*;

    #[test]
    fn lines_carry_level_uptime_and_target() {
        let line = format_line(
            Level::Info,
            Duration::from_millis(125_123),
            "pushback::competition",
            "Autonomous started",
        );
        assert_eq!(line, "INFO [2m 5s 123ms] pushback::competition - Autonomous started\n");
    }

    #[test]
    fn uptime_is_whole_milliseconds() {
        assert_eq!(whole_millis(Duration::from_micros(20_999)), Duration::from_millis(20));
        assert_eq!(uptime().subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn filtered_levels_are_dropped_and_the_rest_reach_the_file() {
        let path = std::env::temp_dir().join(format!("pushback-log-{}.txt", std::process::id()));
        let logger = DualLogger::new(LevelFilter::Info, &path);
        assert!(logger.has_file());

        for (level, text) in [(Level::Debug, "hidden"), (Level::Warn, "shown")] {
            logger.log(
                &Record::builder()
                    .level(level)
                    .target("pushback::test")
                    .args(format_args!("{}", text))
                    .build(),
            );
        }
        logger.flush();

        let written = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert!(written.contains("WARN ["));
        assert!(written.contains("pushback::test - shown"));
        assert!(!written.contains("hidden"));
    }

    #[test]
    fn missing_directory_falls_back_to_console() {
        let logger = DualLogger::new(LevelFilter::Trace, "/nonexistent-dir/for/pushback/log.txt");
        assert!(!logger.has_file());
        assert!(logger.enabled(&Metadata::builder().level(Level::Trace).build()));
    }
}
