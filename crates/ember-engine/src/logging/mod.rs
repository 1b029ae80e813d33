//! Logger setup for hosted builds.
//!
//! The library itself only talks to the `log` facade; this module wires an
//! `env_logger` backend for binaries and tests.

mod init;

pub use init::{init_logging, LoggingConfig};
