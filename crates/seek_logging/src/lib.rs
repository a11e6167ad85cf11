#![deny(missing_docs)]
//! `seek_*` logging macros over the `log` facade, shared by every ShallowSeek
//! crate, plus helpers for trimming logged HTTP bodies and for installing a
//! logger in tests.

use std::borrow::Cow;

/// Longest response body excerpt written to the log, in characters.
pub const BODY_PREVIEW_CHARS: usize = 200;

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! seek_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! seek_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! seek_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! seek_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! seek_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Shortens a response body for logging.
///
/// Bodies up to [`BODY_PREVIEW_CHARS`] characters are returned unchanged;
/// longer ones are cut on a character boundary and suffixed with `...`.
pub fn body_preview(body: &str) -> Cow<'_, str> {
    match body.char_indices().nth(BODY_PREVIEW_CHARS) {
        None => Cow::Borrowed(body),
        Some((cut, _)) => Cow::Owned(format!("{}...", &body[..cut])),
    }
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
