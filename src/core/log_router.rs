//! Log router
//!
//! Every line emitted through the `log_*!` macros lands here. On host builds
//! the line is echoed to stdout/stderr and buffered in a thread-local ring
//! buffer, so parallel tests never observe each other's output. On
//! bare-metal targets with the `embassy` feature the buffer is a single
//! static behind a critical-section mutex.
//!
//! ## Usage
//!
//! ```ignore
//! use nvs32::core::log_router::{get_buffered_logs, buffer_len, overflow_count};
//!
//! let logs = get_buffered_logs(); // drains
//! let count = buffer_len();
//! let lost = overflow_count();
//! ```

use crate::core::log_buffer::{LogMessage, RingBufferSink};

/// Dispatches log messages to the ring buffer sink
pub struct LogRouter {
    buffer_sink: RingBufferSink,
}

impl LogRouter {
    pub const fn new() -> Self {
        Self {
            buffer_sink: RingBufferSink::new(),
        }
    }

    pub fn route(&mut self, msg: LogMessage) {
        self.buffer_sink.push(msg);
    }

    pub fn buffer_sink(&self) -> &RingBufferSink {
        &self.buffer_sink
    }

    pub fn buffer_sink_mut(&mut self) -> &mut RingBufferSink {
        &mut self.buffer_sink
    }
}

impl Default for LogRouter {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Hosted implementation (std targets and tests)
// =============================================================================

#[cfg(any(test, feature = "std"))]
mod hosted_impl {
    use super::{LogMessage, LogRouter, RingBufferSink};
    use crate::core::log_buffer::{LogLevel, LOG_BUFFER_SIZE};
    use crate::core::traits::{LocalState, SharedState};
    use core::fmt;
    use heapless::Vec;

    std::thread_local! {
        static ROUTER: LocalState<LogRouter> = const { LocalState::new(LogRouter::new()) };
    }

    /// Echo the line and store it in this thread's ring buffer.
    pub fn route_log(level: LogLevel, tag: &'static str, args: fmt::Arguments<'_>) {
        let msg = LogMessage::format(level, tag, args);
        match level {
            LogLevel::Warn | LogLevel::Error => std::eprintln!("{}", msg),
            LogLevel::Debug | LogLevel::Info => std::println!("{}", msg),
        }
        ROUTER.with(|router| router.with_mut(|r| r.route(msg)));
    }

    pub fn get_buffered_logs() -> Vec<LogMessage, LOG_BUFFER_SIZE> {
        ROUTER.with(|router| router.with_mut(|r| r.buffer_sink_mut().drain()))
    }

    pub fn peek_buffered_logs<F, R>(f: F) -> R
    where
        F: FnOnce(&RingBufferSink) -> R,
    {
        ROUTER.with(|router| router.with(|r| f(r.buffer_sink())))
    }

    pub fn buffer_len() -> usize {
        ROUTER.with(|router| router.with(|r| r.buffer_sink().len()))
    }

    pub fn overflow_count() -> u32 {
        ROUTER.with(|router| router.with(|r| r.buffer_sink().overflow_count()))
    }

    pub fn clear_buffer() {
        ROUTER.with(|router| router.with_mut(|r| r.buffer_sink_mut().clear()));
    }
}

#[cfg(any(test, feature = "std"))]
pub use hosted_impl::{
    buffer_len, clear_buffer, get_buffered_logs, overflow_count, peek_buffered_logs, route_log,
};

// =============================================================================
// Embassy implementation (bare-metal targets)
// =============================================================================

#[cfg(all(feature = "embassy", not(any(test, feature = "std"))))]
mod embassy_impl {
    use super::{LogMessage, LogRouter, RingBufferSink};
    use crate::core::log_buffer::{LogLevel, LOG_BUFFER_SIZE};
    use crate::core::traits::{EmbassyState, SharedState};
    use core::fmt;
    use heapless::Vec;

    /// Global log router
    pub static LOG_ROUTER: EmbassyState<LogRouter> = EmbassyState::new(LogRouter::new());

    /// Store the line in the global ring buffer.
    ///
    /// The message is rendered before the lock is taken so formatting never
    /// runs inside the critical section.
    pub fn route_log(level: LogLevel, tag: &'static str, args: fmt::Arguments<'_>) {
        let msg = LogMessage::format(level, tag, args);
        LOG_ROUTER.with_mut(|router| router.route(msg));
    }

    /// Get all buffered logs (drains the buffer)
    pub fn get_buffered_logs() -> Vec<LogMessage, LOG_BUFFER_SIZE> {
        LOG_ROUTER.with_mut(|router| router.buffer_sink_mut().drain())
    }

    /// Peek at buffered logs without clearing
    pub fn peek_buffered_logs<F, R>(f: F) -> R
    where
        F: FnOnce(&RingBufferSink) -> R,
    {
        LOG_ROUTER.with(|router| f(router.buffer_sink()))
    }

    pub fn buffer_len() -> usize {
        LOG_ROUTER.with(|router| router.buffer_sink().len())
    }

    pub fn overflow_count() -> u32 {
        LOG_ROUTER.with(|router| router.buffer_sink().overflow_count())
    }

    pub fn clear_buffer() {
        LOG_ROUTER.with_mut(|router| router.buffer_sink_mut().clear());
    }
}

#[cfg(all(feature = "embassy", not(any(test, feature = "std"))))]
pub use embassy_impl::{
    buffer_len, clear_buffer, get_buffered_logs, overflow_count, peek_buffered_logs, route_log,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_buffer::{LogLevel, LOG_BUFFER_SIZE};

    fn reset_router() {
        clear_buffer();
    }

    #[test]
    fn test_route_stores_in_buffer() {
        reset_router();

        route_log(LogLevel::Info, "NVS", format_args!("['k']: [{}]", 7));

        assert_eq!(buffer_len(), 1);
        let logs = get_buffered_logs();
        assert_eq!(logs[0].tag, "NVS");
        assert_eq!(logs[0].message.as_str(), "['k']: [7]");
    }

    #[test]
    fn test_get_buffered_logs_drains_in_order() {
        reset_router();

        route_log(LogLevel::Info, "NVS", format_args!("first"));
        route_log(LogLevel::Error, "NVS", format_args!("second"));

        let logs = get_buffered_logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].level, LogLevel::Info);
        assert_eq!(logs[1].message.as_str(), "second");
        assert_eq!(buffer_len(), 0);
    }

    #[test]
    fn test_peek_buffered_logs_preserves() {
        reset_router();

        route_log(LogLevel::Warn, "NVS", format_args!("message"));

        let errors = peek_buffered_logs(|sink| {
            sink.iter().filter(|m| m.level >= LogLevel::Warn).count()
        });
        assert_eq!(errors, 1);
        assert_eq!(buffer_len(), 1);
    }

    #[test]
    fn test_overflow_count_accuracy() {
        reset_router();
        let before = overflow_count();

        for i in 0..LOG_BUFFER_SIZE + 3 {
            route_log(LogLevel::Debug, "NVS", format_args!("msg {}", i));
        }

        assert_eq!(overflow_count() - before, 3);
        assert_eq!(buffer_len(), LOG_BUFFER_SIZE);
    }

    #[test]
    fn test_clear_buffer_empties() {
        reset_router();

        route_log(LogLevel::Info, "NVS", format_args!("message"));
        clear_buffer();

        assert_eq!(buffer_len(), 0);
    }
}
