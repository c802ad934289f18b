//! Log ring buffer
//!
//! Fixed-capacity history of the most recent log lines, backed by
//! `heapless::HistoryBuf` so it works without an allocator. When the buffer
//! is full the oldest line is evicted and the overflow counter advances.

use core::fmt;

use heapless::{HistoryBuf, String, Vec};

/// Buffer capacity in number of messages
pub const LOG_BUFFER_SIZE: usize = 32;

/// Maximum message size in bytes; longer messages are truncated
pub const LOG_MSG_SIZE: usize = 256;

/// Log level with ordering: Debug < Info < Warn < Error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One buffered log line: severity, component tag and rendered text
#[derive(Clone, Debug)]
pub struct LogMessage {
    pub level: LogLevel,
    pub tag: &'static str,
    pub message: String<LOG_MSG_SIZE>,
}

impl LogMessage {
    pub fn new(level: LogLevel, tag: &'static str, message: String<LOG_MSG_SIZE>) -> Self {
        Self {
            level,
            tag,
            message,
        }
    }

    /// Render `args` into a new message, truncating at `LOG_MSG_SIZE` bytes.
    pub fn format(level: LogLevel, tag: &'static str, args: fmt::Arguments<'_>) -> Self {
        let mut writer = Truncating(String::new());
        let _ = fmt::write(&mut writer, args);
        Self::new(level, tag, writer.0)
    }
}

impl fmt::Display for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.tag, self.message)
    }
}

// heapless rejects a whole chunk that does not fit, so copy char by char.
struct Truncating(String<LOG_MSG_SIZE>);

impl fmt::Write for Truncating {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                return Err(fmt::Error);
            }
        }
        Ok(())
    }
}

/// Ring buffer sink for log messages
///
/// Stores up to `LOG_BUFFER_SIZE` messages. When full, the oldest message
/// is evicted to make room.
pub struct RingBufferSink {
    buffer: HistoryBuf<LogMessage, LOG_BUFFER_SIZE>,
    overflow_count: u32,
}

impl RingBufferSink {
    pub const fn new() -> Self {
        Self {
            buffer: HistoryBuf::new(),
            overflow_count: 0,
        }
    }

    /// Push a message, evicting the oldest one when full.
    pub fn push(&mut self, msg: LogMessage) {
        if self.buffer.len() == LOG_BUFFER_SIZE {
            self.overflow_count = self.overflow_count.saturating_add(1);
        }
        self.buffer.write(msg);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    /// Number of messages lost to eviction
    pub fn overflow_count(&self) -> u32 {
        self.overflow_count
    }

    /// Iterate over messages in oldest-first order
    pub fn iter(&self) -> impl Iterator<Item = &LogMessage> {
        self.buffer.oldest_ordered()
    }

    /// Drain all messages in oldest-first order, leaving the buffer empty.
    pub fn drain(&mut self) -> Vec<LogMessage, LOG_BUFFER_SIZE> {
        let mut result = Vec::new();
        for msg in self.buffer.oldest_ordered() {
            let _ = result.push(msg.clone());
        }
        self.buffer.clear();
        result
    }

    /// Clear all messages. Does not reset `overflow_count`.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for RingBufferSink {
    fn default() -> Self {
        Self::new()
    }
}
