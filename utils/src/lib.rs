//! Shared utilities for stampgate.

pub mod logging;

pub use logging::{init_logging, LogFormat};
