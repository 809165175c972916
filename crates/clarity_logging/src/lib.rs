#![deny(missing_docs)]
//! Shared logging utilities for the ClarityAssist workspace.
//!
//! This crate provides the `clarity_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger.

use std::sync::Once;

static TEST_LOGGER: Once = Once::new();

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! clarity_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! clarity_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! clarity_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! clarity_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! clarity_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// Only the first call installs the logger; later calls, and calls made after
/// another logger was installed, are no-ops.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    TEST_LOGGER.call_once(|| {
        // Use debug level in debug builds, info in release builds.
        let level = if cfg!(debug_assertions) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };

        let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
    });
}
