//! ActivityLog - Session Log Messages with Ring Buffer

use chrono::{DateTime, Local};
use std::collections::VecDeque;

use crate::constants::ACTIVITY_LOG_CAPACITY;
use crate::utils::format::format_time;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Debug,
}

impl LogLevel {
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// A single log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: u64,
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

impl LogEntry {
    /// One-line rendering for a log panel
    pub fn display_line(&self) -> String {
        format!("{} [{}] {}", format_time(&self.timestamp), self.level.label(), self.message)
    }
}

/// Bounded log of what happened in a session (fetch failures, lifecycle)
#[derive(Debug)]
pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    next_id: u64,
}

impl ActivityLog {
    /// Create a new log with the specified capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            next_id: 1,
        }
    }

    /// Push a new log entry
    pub fn push(&mut self, level: LogLevel, message: impl Into<String>, timestamp: DateTime<Local>) {
        if self.capacity == 0 {
            return;
        }
        let entry = LogEntry {
            id: self.next_id,
            level,
            message: message.into(),
            timestamp,
        };
        self.next_id += 1;

        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Push a log entry with current timestamp
    pub fn push_now(&mut self, level: LogLevel, message: impl Into<String>) {
        self.push(level, message, Local::now());
    }

    /// Get all log entries (oldest first)
    pub fn entries(&self) -> &VecDeque<LogEntry> {
        &self.entries
    }

    /// Warning and error entries only
    pub fn errors(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.level, LogLevel::Warn | LogLevel::Error))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(ACTIVITY_LOG_CAPACITY)
    }
}
