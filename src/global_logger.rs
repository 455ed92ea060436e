// SPDX-License-Identifier: MIT OR Apache-2.0

//! Global logger management.
//!
//! [`emit`](crate::emit) and [`emit_async`](crate::emit_async) send every record to all
//! loggers in this list.  Until configured, the list holds a single [`StdErrorLogger`].
//!
//! The list sits behind a spinlock rather than a `Mutex` because the wasm main thread
//! may not block.  The lock is held only long enough to clone or replace the vector.
//!
//! ```
//! use logsite::global_logger::{add_global_logger, global_loggers};
//! use logsite::InMemoryLogger;
//! use std::sync::Arc;
//!
//! let before = global_loggers().len();
//! add_global_logger(Arc::new(InMemoryLogger::new()));
//! assert_eq!(global_loggers().len(), before + 1);
//! ```

use crate::logger::Logger;
use crate::spinlock::Spinlock;
use crate::stderror_logger::StdErrorLogger;
use std::sync::{Arc, OnceLock};

static GLOBAL_LOGGERS: OnceLock<Spinlock<Vec<Arc<dyn Logger>>>> = OnceLock::new();

fn loggers() -> &'static Spinlock<Vec<Arc<dyn Logger>>> {
    GLOBAL_LOGGERS.get_or_init(|| Spinlock::new(vec![Arc::new(StdErrorLogger::new())]))
}

/// The current loggers.  Cloning the `Arc`s keeps each logger alive while a record
/// is being delivered, even if the list is replaced meanwhile.
pub fn global_loggers() -> Vec<Arc<dyn Logger>> {
    loggers().with(|loggers| loggers.clone())
}

/// Appends a logger to the global list.
pub fn add_global_logger(logger: Arc<dyn Logger>) {
    loggers().with_mut(|loggers| loggers.push(logger));
}

/// Replaces the global list.  An empty list silently drops every record.
pub fn set_global_loggers(new_loggers: Vec<Arc<dyn Logger>>) {
    loggers().with_mut(|loggers| *loggers = new_loggers);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inmemory_logger::InMemoryLogger;
    use std::sync::Mutex;

    static TEST_LOGGER_GUARD: Mutex<()> = Mutex::new(());

    #[test]
    fn test_add_logger() {
        let _guard = TEST_LOGGER_GUARD.lock().unwrap();
        set_global_loggers(vec![Arc::new(StdErrorLogger::new())]);
        add_global_logger(Arc::new(InMemoryLogger::new()));
        assert_eq!(global_loggers().len(), 2);
    }

    #[test]
    fn test_set_loggers() {
        let _guard = TEST_LOGGER_GUARD.lock().unwrap();
        let logger1 = Arc::new(InMemoryLogger::new());
        let logger2 = Arc::new(InMemoryLogger::new());
        set_global_loggers(vec![logger1, logger2]);
        assert_eq!(global_loggers().len(), 2);
        set_global_loggers(Vec::new());
        assert!(global_loggers().is_empty());
    }

    #[test]
    fn test_thread_safety() {
        let _guard = TEST_LOGGER_GUARD.lock().unwrap();
        set_global_loggers(vec![Arc::new(StdErrorLogger::new())]);

        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| add_global_logger(Arc::new(InMemoryLogger::new()))))
            .collect();
        let _ = global_loggers();
        for handle in handles {
            handle.join().expect("Thread should complete successfully");
        }
        assert_eq!(global_loggers().len(), 5);
    }
}
