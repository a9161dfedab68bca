//! Utility modules for dockflow

pub mod logging;

pub use logging::{init_logging, LoggingConfig};
