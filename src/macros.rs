// SPDX-License-Identifier: MIT OR Apache-2.0

//! Producing log records that carry their call site.
//!
//! Two ways to get a [`CallerContext`] into a record:
//!
//! 1. [`emit`] and [`emit_async`] walk the stack at runtime to find whoever called them.
//!    This works through any number of plain function calls, as long as debug info is
//!    present.
//! 2. [`caller_context!`](crate::caller_context) records `file!()`, `line!()` and
//!    `module_path!()` at compile time.  It never fails, but it only ever describes the
//!    place the macro is written.
//!
//! # Example
//!
//! ```rust
//! use logsite::{InMemoryLogger, Level, emit};
//! use logsite::global_logger::set_global_loggers;
//! use std::sync::Arc;
//!
//! let logger = Arc::new(InMemoryLogger::new());
//! set_global_loggers(vec![logger.clone()]);
//!
//! emit(Level::Warning, "disk almost full");
//! let logs = logger.drain_logs();
//! assert!(logs.starts_with("WARN: "));
//! assert!(logs.ends_with("disk almost full"));
//! ```

use crate::caller_context::CallerContext;
use crate::global_logger::global_loggers;
use crate::log_record::LogRecord;
use crate::working_dir::WorkingDirectory;
use crate::Level;
use std::future::Future;
use std::pin::Pin;

/// [`record_for`] is the entry point into the resolver; `emit` (or `emit_async`) sits
/// one frame above it.
const EMIT_WRAPPER_FRAMES: usize = 1;

/// Builds a [`CallerContext`] for the place this macro is written.
///
/// No stack walking is involved, so this works in release builds without debug
/// info.  The function is reported as the enclosing module path, since Rust has no
/// `function!()` macro.  The path is whatever the compiler recorded for `file!()`,
/// normalized and shortened like a resolved path.
///
/// ```rust
/// let context = logsite::caller_context!();
/// assert_eq!(context.line(), line!() - 1);
/// assert_eq!(context.function(), module_path!());
/// ```
#[macro_export]
macro_rules! caller_context {
    () => {
        $crate::hidden::static_context(module_path!(), file!(), line!())
    };
}

/// Implementation of [`caller_context!`](crate::caller_context).
pub fn static_context(module_path: &str, file: &str, line: u32) -> CallerContext {
    CallerContext::from_parts(module_path, file, line, WorkingDirectory::process())
}

/// Builds the record for the caller of `emit`/`emit_async`.
///
/// When the call site can't be resolved the record is still built, without location.
#[inline(never)]
fn record_for(level: Level, message: &str) -> LogRecord {
    let mut record = LogRecord::new(level);
    record.log(level.label());
    record.log(": ");
    let resolved =
        crate::resolver::process_resolver().extract_caller_info(0, EMIT_WRAPPER_FRAMES);
    if let Ok(context) = resolved {
        record.log_caller(context);
    }
    record.log(message);
    record
}

/// Logs `message` at `level`, prefixed by the caller's `[file:line]`, to every global logger.
#[inline(never)]
pub fn emit(level: Level, message: &str) {
    let record = record_for(level, message);
    for logger in global_loggers() {
        logger.finish_log_record(record.clone());
    }
}

/// Like [`emit`], but lets the loggers finish asynchronously.
///
/// The call site is resolved before this returns; only delivery is deferred.
#[inline(never)]
pub fn emit_async(
    level: Level,
    message: &str,
) -> Pin<Box<dyn Future<Output = ()> + Send + 'static>> {
    let record = record_for(level, message);
    Box::pin(async move {
        for logger in global_loggers() {
            logger.finish_log_record_async(record.clone()).await;
        }
    })
}
