// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Logger
//!
//! Captures log records in memory instead of writing them out, so tests can assert on
//! exactly what was logged, including the call site each record was stamped with.

use crate::caller_context::CallerContext;
use crate::log_record::LogRecord;
use crate::logger::Logger;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

/// An in-memory logger that stores each record's rendered text and call site.
///
/// # Example
///
/// ```rust
/// use logsite::{InMemoryLogger, Level, emit};
/// use logsite::global_logger::set_global_loggers;
/// use std::sync::Arc;
///
/// let logger = Arc::new(InMemoryLogger::new());
/// set_global_loggers(vec![logger.clone()]);
///
/// emit(Level::Info, "Test message 42");
///
/// let logs = logger.drain_logs();
/// assert!(logs.contains("Test message 42"));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryLogger {
    logs: Mutex<Vec<String>>,
    callers: Mutex<Vec<Option<CallerContext>>>,
}

impl InMemoryLogger {
    pub fn new() -> Self {
        Self {
            logs: Mutex::new(Vec::new()),
            callers: Mutex::new(Vec::new()),
        }
    }

    /// Drains all logs into a single string, joined by newlines, clearing the buffer.
    pub fn drain_logs(&self) -> String {
        self.callers.lock().unwrap().clear();
        let mut logs = self.logs.lock().unwrap();
        let result = logs.join("\n");
        logs.clear();
        result
    }

    /// Drains the call sites of the captured records, oldest first, clearing the buffer.
    ///
    /// Records logged without a call site appear as `None`.
    pub fn drain_callers(&self) -> Vec<Option<CallerContext>> {
        self.logs.lock().unwrap().clear();
        std::mem::take(&mut *self.callers.lock().unwrap())
    }

    /// Writes all logs to stderr (or the console on wasm), clearing the buffer.
    pub fn drain_to_console(&self) {
        self.callers.lock().unwrap().clear();
        let mut logs = self.logs.lock().unwrap();
        for log in logs.iter() {
            #[cfg(target_arch = "wasm32")]
            web_sys::console::log_1(&log.clone().into());
            #[cfg(not(target_arch = "wasm32"))]
            eprintln!("{}", log);
        }
        logs.clear();
    }
}

impl Logger for InMemoryLogger {
    fn finish_log_record(&self, record: LogRecord) {
        let log_string = record.to_string();
        self.callers.lock().unwrap().push(record.caller().cloned());
        self.logs.lock().unwrap().push(log_string);
    }

    fn finish_log_record_async<'s>(
        &'s self,
        record: LogRecord,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 's>> {
        Box::pin(async move {
            self.finish_log_record(record);
        })
    }

    fn prepare_to_die(&self) {
        //nothing buffered outside memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Level;

    #[test]
    fn records_and_callers_are_kept_in_order() {
        let logger = InMemoryLogger::new();
        let mut first = LogRecord::new(Level::Info);
        first.log_caller(crate::caller_context!());
        first.log("one");
        let mut second = LogRecord::new(Level::Info);
        second.log("two");
        logger.finish_log_record(first);
        logger.finish_log_record(second);

        let callers = logger.drain_callers();
        assert_eq!(callers.len(), 2);
        assert_eq!(
            callers[0].as_ref().map(|c| c.file_name()),
            Some("inmemory_logger.rs")
        );
        assert!(callers[1].is_none());
        assert_eq!(logger.drain_logs(), "");
    }

    #[test]
    fn drain_logs_empties_the_buffer() {
        let logger = InMemoryLogger::new();
        let mut record = LogRecord::new(Level::Warning);
        record.log("hello");
        logger.finish_log_record(record);
        assert_eq!(logger.drain_logs(), "hello");
        assert_eq!(logger.drain_logs(), "");
        assert!(logger.drain_callers().is_empty());
    }
}
