//! Logging infrastructure for Lamina.
//!
//! This module provides structured JSON logging controlled by the `LAMINA_DEBUG`
//! environment variable.
//!
//! # Environment Variables
//!
//! - `LAMINA_DEBUG=true` - Enable debug logging
//! - `LAMINA_LOG_LEVEL=debug|info|warn|error|trace` - Set specific log level
//! - `LAMINA_LOG_FORMAT=json|pretty|compact` - Set output format (default: json)
//!
//! # Usage
//!
//! ```rust,no_run
//! use lamina_query::logging;
//!
//! // Initialize logging (call once at startup)
//! logging::init();
//! ```

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

/// Check if debug logging is enabled via `LAMINA_DEBUG` environment variable.
///
/// Returns `true` if `LAMINA_DEBUG` is set to "true", "1", or "yes" (case-insensitive).
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var("LAMINA_DEBUG")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// Get the configured log level from `LAMINA_LOG_LEVEL` environment variable.
///
/// Defaults to "debug" if `LAMINA_DEBUG` is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    if let Ok(level) = env::var("LAMINA_LOG_LEVEL") {
        match level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" => "warn",
            "error" => "error",
            _ => {
                if is_debug_enabled() {
                    "debug"
                } else {
                    "warn"
                }
            }
        }
    } else if is_debug_enabled() {
        "debug"
    } else {
        "warn"
    }
}

/// Get the configured log format from `LAMINA_LOG_FORMAT` environment variable.
///
/// Defaults to "json" for structured logging.
pub fn get_log_format() -> &'static str {
    env::var("LAMINA_LOG_FORMAT")
        .map(|f| match f.to_lowercase().as_str() {
            "pretty" => "pretty",
            "compact" => "compact",
            _ => "json",
        })
        .unwrap_or("json")
}

/// Initialize the Lamina logging system.
///
/// This should be called once at application startup. Subsequent calls are no-ops.
///
/// Logging is controlled by:
/// - `LAMINA_DEBUG=true` - Enable debug-level logging
/// - `LAMINA_LOG_LEVEL` - Override the log level (trace, debug, info, warn, error)
/// - `LAMINA_LOG_FORMAT` - Output format (pretty, json, compact)
pub fn init() {
    INIT.call_once(|| {
        if !is_debug_enabled() && env::var("LAMINA_LOG_LEVEL").is_err() {
            // No logging requested, skip initialization
            return;
        }

        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let level = get_log_level();
            let filter = EnvFilter::try_new(format!(
                "lamina={},lamina_query={},lamina_schema={},lamina_document={}",
                level, level, level, level
            ))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

            match get_log_format() {
                "json" => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().json())
                        .init();
                }
                "compact" => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().compact())
                        .init();
                }
                _ => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().pretty())
                        .init();
                }
            }

            tracing::info!(
                level = level,
                format = get_log_format(),
                "Lamina logging initialized"
            );
        }

        #[cfg(not(feature = "tracing-subscriber"))]
        {
            // Tracing subscriber not available, logging will be silent
            // unless the user sets up their own subscriber
        }
    });
}

/// Initialize logging with a specific level.
///
/// # Safety
///
/// This function modifies environment variables, which is unsafe in
/// multi-threaded programs. Call this early in your program before
/// spawning threads.
pub fn init_with_level(level: &str) {
    // SAFETY: This should only be called at program startup before threads are spawned.
    // The user is responsible for calling this safely.
    unsafe {
        env::set_var("LAMINA_LOG_LEVEL", level);
    }
    init();
}

/// Initialize logging for debugging (convenience function).
///
/// Equivalent to setting `LAMINA_DEBUG=true` and calling `init()`.
///
/// # Safety
///
/// This function modifies environment variables, which is unsafe in
/// multi-threaded programs. Call this early in your program before
/// spawning threads.
pub fn init_debug() {
    // SAFETY: This should only be called at program startup before threads are spawned.
    unsafe {
        env::set_var("LAMINA_DEBUG", "true");
    }
    init();
}
