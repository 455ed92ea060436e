// SPDX-License-Identifier: MIT OR Apache-2.0

//! Caller-context resolution.
//!
//! A [`Resolver`] combines a [`StackWalker`] with a [`WorkingDirectory`].  The free
//! functions [`current_context`] and [`specific_context`] use a process-wide resolver
//! backed by [`BacktraceWalker`].
//!
//! # Frame accounting
//!
//! Every function between the user's call and the walker is a frame the user does
//! not want to see.  Each public entry point, whether a `Resolver` method or a free
//! function, calls one shared helper, and that helper calls the walker.
//! [`FRAME_OFFSET`] skips those two frames.  Code inside the crate that reaches the
//! helper through extra functions (such as [`emit`](crate::emit)) passes the number of
//! extra frames separately, so errors still report the skip the user asked for.
//! Changing the call depth between an entry point and the walker means changing
//! these numbers.

use crate::caller_context::CallerContext;
use crate::error::ContextError;
use crate::walker::{BacktraceWalker, StackWalker};
use crate::working_dir::WorkingDirectory;
use std::sync::OnceLock;

/// Frames between a public entry point and the walker: the entry point and the shared helper.
pub const FRAME_OFFSET: usize = 2;

static PROCESS_RESOLVER: OnceLock<Resolver<BacktraceWalker>> = OnceLock::new();

/// The resolver used by the free functions.
pub(crate) fn process_resolver() -> &'static Resolver<BacktraceWalker> {
    PROCESS_RESOLVER.get_or_init(|| {
        Resolver::new(BacktraceWalker::new(), WorkingDirectory::process().clone())
    })
}

/**
Resolves call sites into [`CallerContext`]s.

Resolution has no side effects: it reads the working directory and the stack,
and returns a fresh context.  A `Resolver` can be shared between threads.

```rust
use logsite::{RawFrame, Resolver, StackWalker, WorkingDirectory};

struct OneFrame;
impl StackWalker for OneFrame {
    fn unwind(&self, _skip: usize) -> Option<RawFrame> {
        Some(RawFrame {
            program_counter: 0,
            file: "/srv/app/src/main.rs".to_string(),
            line: 7,
            function: Some("app::main".to_string()),
        })
    }
}

# #[cfg(unix)] {
let resolver = Resolver::new(OneFrame, WorkingDirectory::new("/srv/app"));
let context = resolver.specific_context(0).unwrap();
assert_eq!(context.short_path(), "src/main.rs");
assert_eq!(context.to_string(), "main.rs:7");
# }
```
*/
#[derive(Debug, Clone)]
pub struct Resolver<W = BacktraceWalker> {
    walker: W,
    working_dir: WorkingDirectory,
}

impl<W: StackWalker> Resolver<W> {
    pub fn new(walker: W, working_dir: WorkingDirectory) -> Self {
        Resolver {
            walker,
            working_dir,
        }
    }

    pub fn walker(&self) -> &W {
        &self.walker
    }

    pub fn working_dir(&self) -> &WorkingDirectory {
        &self.working_dir
    }

    /// Resolves the caller of `current_context`.
    ///
    /// Same as calling [`specific_context(0)`](Self::specific_context) from the same place.
    #[inline(never)]
    pub fn current_context(&self) -> Result<CallerContext, ContextError> {
        self.extract_caller_info(0, 0)
    }

    /// Resolves the frame `skip` levels above the caller of `specific_context`.
    ///
    /// `skip = 0` is the caller itself.  Negative values fail with
    /// [`ContextError::InvalidArgument`] without walking the stack.
    #[inline(never)]
    pub fn specific_context(&self, skip: isize) -> Result<CallerContext, ContextError> {
        self.extract_caller_info(checked_skip(skip)?, 0)
    }

    /// Shared body of every entry point.
    ///
    /// `wrapper_frames` counts frames between the user's call and the entry point that
    /// called this; they are skipped but not reported in errors.
    #[inline(never)]
    pub(crate) fn extract_caller_info(
        &self,
        skip: usize,
        wrapper_frames: usize,
    ) -> Result<CallerContext, ContextError> {
        let depth = skip
            .saturating_add(wrapper_frames)
            .saturating_add(FRAME_OFFSET);
        let frame = self
            .walker
            .unwind(depth)
            .ok_or(ContextError::StackWalkFailure { skip })?;
        Ok(CallerContext::from_frame(frame, &self.working_dir))
    }
}

fn checked_skip(skip: isize) -> Result<usize, ContextError> {
    usize::try_from(skip).map_err(|_| ContextError::InvalidArgument { skip })
}

/// Resolves the caller of the function calling `current_context`.
///
/// ```rust
/// #[inline(never)]
/// fn where_am_i() -> Option<String> {
///     logsite::current_context().ok().map(|c| c.function().to_string())
/// }
/// // None without debug info, otherwise names `where_am_i`
/// if let Some(name) = where_am_i() {
///     assert!(name.ends_with("where_am_i"));
/// }
/// ```
#[inline(never)]
pub fn current_context() -> Result<CallerContext, ContextError> {
    process_resolver().extract_caller_info(0, 0)
}

/// Resolves the frame `skip` levels above the caller of `specific_context`.
///
/// `specific_context(0)` and [`current_context()`] report the same call site.
#[inline(never)]
pub fn specific_context(skip: isize) -> Result<CallerContext, ContextError> {
    process_resolver().extract_caller_info(checked_skip(skip)?, 0)
}
