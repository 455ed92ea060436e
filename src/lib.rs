//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# logsite

logsite captures the call site of a log statement: which function, in which file,
on which line, and when.

# The problem

A log line like

```text
[cache.rs:88] evicted 12 entries
```

needs to know where it came from.  The logging macro is the obvious place to
record that, but a lot of logging goes through helper functions, and a helper
that records *its own* location is useless.  logsite walks the stack a chosen
number of frames and reports the user's call site instead of the helper's.

# The API

```rust
#[inline(never)]
fn log_helper(message: &str) -> String {
    // skip = 0 would be log_helper itself; 1 is whoever called it
    match logsite::specific_context(1) {
        Ok(context) => format!("[{context}] {message}"),
        Err(_) => message.to_string(),
    }
}
assert!(log_helper("hello").ends_with("hello"));
```

* [`current_context`] and [`specific_context`] resolve the caller, or a frame above it.
* [`CallerContext`] exposes the function, the full path, the path relative to the
  working directory, the file name, the line and the capture time.
* [`Resolver`] takes any [`StackWalker`] and [`WorkingDirectory`], so resolution can be
  tested with fixed frames.
* [`caller_context!`] skips the stack entirely and records the macro's own location.

Stack resolution needs debug info.  Without it, resolution fails with
[`ContextError::StackWalkFailure`], and the caller decides whether to log without a
location.

# Paths

Source paths are normalized to the host separator.  A path under the process
working directory is also available in shortened form:

| working directory   | full path                       | short path          | file name |
|---------------------|---------------------------------|---------------------|-----------|
| `/home/user/proj/`  | `/home/user/proj/pkg/file.rs`   | `pkg/file.rs`       | `file.rs` |
| `/home/user/proj/`  | `/usr/lib/external/file.rs`     | (same as full path) | `file.rs` |

The working directory is read once, on the first resolution, and kept.  A program
that changes directory before it first logs should call
[`WorkingDirectory::init_process`] at the top of `main`.

# Logging

[`emit`] and [`emit_async`] show the intended consumer: they resolve their caller,
render `LEVEL: [file.rs:42] message` into a [`LogRecord`], and hand it to every
[`Logger`] registered in [`global_logger`].
*/

mod caller_context;
mod error;
pub mod global_logger;
mod inmemory_logger;
mod level;
mod log_record;
mod logger;
mod macros;
mod path;
mod resolver;
mod spinlock;
mod stderror_logger;
mod sys;
mod walker;
mod working_dir;

pub use caller_context::CallerContext;
pub use error::ContextError;
pub use inmemory_logger::InMemoryLogger;
pub use level::Level;
pub use log_record::LogRecord;
pub use logger::Logger;
pub use macros::{emit, emit_async};
pub use path::{file_name, normalize_separators};
pub use resolver::{FRAME_OFFSET, Resolver, current_context, specific_context};
pub use stderror_logger::StdErrorLogger;
pub use sys::SystemTime;
pub use walker::{BacktraceWalker, RawFrame, StackWalker, UNKNOWN_FUNCTION};
pub use working_dir::WorkingDirectory;

#[doc(hidden)]
pub mod hidden {
    pub use crate::macros::static_context;
}
