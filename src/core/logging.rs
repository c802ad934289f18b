//! Logging abstraction
//!
//! Tagged logging macros that work across targets:
//! - `defmt` feature: defmt frames, `[TAG] message`
//! - host (`std` feature or tests): printed as `[LEVEL] TAG: message` and
//!   kept in the log ring buffer (see [`crate::core::log_router`])
//! - `embassy` feature without `std`: kept in the static ring buffer
//! - anything else: no-op
//!
//! The macros take the component tag first:
//!
//! ```ignore
//! log_error!("NVS", "Fail to read key ['{}'] [{}]", key, code);
//! ```
//!
//! Target selection happens inside [`log_event`] rather than in the macro
//! bodies, so the features of this crate decide the sink regardless of the
//! crate invoking the macro.

use core::fmt;

pub use crate::core::log_buffer::LogLevel;

/// Emit one log line. Called by the `log_*!` macros.
#[doc(hidden)]
pub fn log_event(level: LogLevel, tag: &'static str, args: fmt::Arguments<'_>) {
    #[cfg(feature = "defmt")]
    {
        let text = defmt::Display2Format(&args);
        match level {
            LogLevel::Debug => defmt::debug!("[{=str}] {}", tag, text),
            LogLevel::Info => defmt::info!("[{=str}] {}", tag, text),
            LogLevel::Warn => defmt::warn!("[{=str}] {}", tag, text),
            LogLevel::Error => defmt::error!("[{=str}] {}", tag, text),
        }
    }

    #[cfg(any(test, feature = "std", feature = "embassy"))]
    crate::core::log_router::route_log(level, tag, args);

    #[cfg(not(any(test, feature = "std", feature = "embassy", feature = "defmt")))]
    let _ = (level, tag, args);
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($tag:expr, $($arg:tt)*) => {
        $crate::core::logging::log_event(
            $crate::core::logging::LogLevel::Debug,
            $tag,
            ::core::format_args!($($arg)*),
        )
    };
}

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($tag:expr, $($arg:tt)*) => {
        $crate::core::logging::log_event(
            $crate::core::logging::LogLevel::Info,
            $tag,
            ::core::format_args!($($arg)*),
        )
    };
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($tag:expr, $($arg:tt)*) => {
        $crate::core::logging::log_event(
            $crate::core::logging::LogLevel::Warn,
            $tag,
            ::core::format_args!($($arg)*),
        )
    };
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($tag:expr, $($arg:tt)*) => {
        $crate::core::logging::log_event(
            $crate::core::logging::LogLevel::Error,
            $tag,
            ::core::format_args!($($arg)*),
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::core::log_buffer::LogLevel;
    use crate::core::log_router::{clear_buffer, get_buffered_logs};

    #[test]
    fn macros_route_with_level_and_tag() {
        clear_buffer();

        crate::log_debug!("T", "d {}", 1);
        crate::log_info!("T", "i {}", 2);
        crate::log_warn!("T", "w");
        crate::log_error!("NVS", "Fail to open namespace [{:#x}]", 0x1101);

        let logs = get_buffered_logs();
        let levels: std::vec::Vec<LogLevel> = logs.iter().map(|m| m.level).collect();
        assert_eq!(
            levels,
            [LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error]
        );
        assert_eq!(logs[1].message.as_str(), "i 2");
        assert_eq!(logs[3].tag, "NVS");
        assert_eq!(logs[3].message.as_str(), "Fail to open namespace [0x1101]");
    }
}
