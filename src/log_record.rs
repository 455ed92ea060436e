// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log record type.
//!
//! A [`LogRecord`] accumulates the parts of one message, plus the [`CallerContext`]
//! it was issued from, if known.  Parts are stored separately and only joined when
//! the record is displayed.
//!
//! # Example
//!
//! ```rust
//! use logsite::{LogRecord, Level};
//!
//! let mut record = LogRecord::new(Level::Info);
//! record.log_caller(logsite::caller_context!());
//! record.log("Processing request ");
//! record.log_owned(format!("#{}", 42));
//!
//! let rendered = record.to_string();
//! assert!(rendered.starts_with('['));
//! assert!(rendered.ends_with("Processing request #42"));
//! assert!(record.caller().is_some());
//! ```

use crate::Level;
use crate::caller_context::CallerContext;
use std::fmt::Display;

/**
A log record.

1.  Create a new [LogRecord].
2.  Progressively write to it, optionally attaching the call site with [LogRecord::log_caller].
3.  Submit it to a [crate::Logger].
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogRecord {
    pub(crate) parts: Vec<String>,
    level: Level,
    caller: Option<CallerContext>,
}

impl LogRecord {
    /**
    Append the message to the record.
    */
    pub fn log(&mut self, message: &str) {
        self.parts.push(message.to_string());
    }

    /**
    Append the message to the record, taking ownership of the message.
    */
    pub fn log_owned(&mut self, message: String) {
        self.parts.push(message);
    }

    pub fn new(level: Level) -> Self {
        Self {
            parts: Vec::new(),
            level,
            caller: None,
        }
    }

    /**
    Write the call site as `[file.rs:42] ` and keep the context on the record.

    Loggers that want more than the file name (the short path, the function) can
    read it back with [LogRecord::caller].
    */
    pub fn log_caller(&mut self, caller: CallerContext) {
        self.log_owned(format!("[{}] ", caller));
        self.caller = Some(caller);
    }

    pub fn caller(&self) -> Option<&CallerContext> {
        self.caller.as_ref()
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl Default for LogRecord {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

impl Display for LogRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for part in &self.parts {
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}
/*
Boilerplate notes for LogRecord:

IMPLEMENTED:
- Debug/Clone: Derived, records are cloned once per logger
- PartialEq/Eq/Hash: Derived, compares parts, level and caller
- Default: Info level, no parts, no caller
- Display: joins the parts

NOT IMPLEMENTED:
- Copy: owns heap data
- Ord/PartialOrd: no meaningful ordering
*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_prefix_uses_file_and_line() {
        let mut record = LogRecord::new(Level::Error);
        let caller = crate::caller_context!();
        let line = caller.line();
        record.log_caller(caller);
        record.log("boom");
        assert_eq!(record.to_string(), format!("[log_record.rs:{line}] boom"));
        assert_eq!(record.caller().map(|c| c.line()), Some(line));
        assert_eq!(record.level(), Level::Error);
    }

    #[test]
    fn records_without_caller_render_only_parts() {
        let mut record = LogRecord::default();
        record.log("plain");
        assert_eq!(record.to_string(), "plain");
        assert!(record.caller().is_none());
    }
}
