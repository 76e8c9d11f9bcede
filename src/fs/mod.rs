//! Filesystem utilities.
//!
//! # Logging
//!
//! The `logger` submodule installs a [`log`] backend that writes to the
//! console and to `log.txt`, which on the Brain lands on the SD card. Useful
//! for problems that only show up on the field.
//!
//! # Example
//!
//! ```ignore
//! use log::{LevelFilter, info};
//! use pushback::fs::logger;
//!
//! logger::init(LevelFilter::Debug).expect("Failed to initialize logger");
//! info!("Robot initialized");
//! ```

/// Console and file logging.
pub mod logger;
