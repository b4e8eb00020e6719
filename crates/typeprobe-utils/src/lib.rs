//! # typeprobe utilities
//!
//! Shared utilities, logging, and helpers for typeprobe.
//!
//! This crate provides common functionality used across the workspace,
//! including logging infrastructure built on `tracing`.

pub mod logging;

// Re-export commonly used logging functions for convenience
pub use logging::{
    init_logging, init_logging_with_format, init_logging_with_level, LogFormat, LogLevel, LoggingError, LoggingGuard,
};
pub use tracing::{debug, error, info, trace, warn};
