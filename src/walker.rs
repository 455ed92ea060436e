// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stack unwinding.
//!
//! The resolver never inspects the stack itself.  It asks a [`StackWalker`] for one
//! frame at a given depth.  [`BacktraceWalker`] is the implementation used in real
//! programs; tests substitute a walker that returns canned frames.

/// Function name reported when a frame's symbol cannot be resolved.
pub const UNKNOWN_FUNCTION: &str = "<unknown>";

/// One resolved stack frame, before any normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawFrame {
    /// Instruction pointer of the frame.
    pub program_counter: usize,
    /// Source file as recorded in debug info.  Separators are whatever the compiler wrote.
    pub file: String,
    pub line: u32,
    /// Fully-qualified function name, if the symbol could be resolved.
    pub function: Option<String>,
}

/// A source of stack frames.
///
/// `unwind(0)` describes the function that called `unwind`, `unwind(1)` its caller,
/// and so on.  `None` means the frame does not exist or has no source location.
///
/// The function name is resolved together with the location.  With inlining, a single
/// program counter can belong to several logical frames, so the address alone does not
/// identify which function the caller meant.
pub trait StackWalker: Send + Sync {
    fn unwind(&self, skip: usize) -> Option<RawFrame>;
}

impl<W: StackWalker + ?Sized> StackWalker for &W {
    fn unwind(&self, skip: usize) -> Option<RawFrame> {
        (**self).unwind(skip)
    }
}

impl<W: StackWalker + ?Sized> StackWalker for Box<W> {
    fn unwind(&self, skip: usize) -> Option<RawFrame> {
        (**self).unwind(skip)
    }
}

/**
Walks the real call stack with the [backtrace] crate.

Frames are counted after expanding inlined functions from debug info, so a function
the optimizer inlined still counts as its own frame.  Counting starts above the
`StackWalker::unwind` frames, located by symbol name: this walker's own, plus any
forwarding walkers (`&BacktraceWalker`, `Box<dyn StackWalker>`, or a user wrapper)
that called it.  Everything deeper (the unwinder's internals) is ignored.

Resolution needs debug info.  In a binary built without it, every call fails and the
resolver reports [`ContextError::StackWalkFailure`](crate::ContextError::StackWalkFailure).
*/
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BacktraceWalker;

impl BacktraceWalker {
    pub const fn new() -> Self {
        BacktraceWalker
    }
}

/// One symbol of a physical frame; inlined calls contribute several.
struct LogicalFrame {
    function: Option<String>,
    file: Option<String>,
    line: Option<u32>,
}

impl LogicalFrame {
    fn from_symbol(symbol: &backtrace::Symbol) -> Self {
        LogicalFrame {
            //alternate formatting drops the trailing hash
            function: symbol.name().map(|name| format!("{name:#}")),
            file: symbol
                .filename()
                .map(|path| path.to_string_lossy().into_owned()),
            line: symbol.lineno(),
        }
    }

    /// Any `<_ as StackWalker>::unwind`, including forwarding impls.
    fn is_walker_frame(&self) -> bool {
        self.function
            .as_deref()
            .is_some_and(|name| name.ends_with("StackWalker>::unwind"))
    }

    fn into_raw(self, program_counter: usize) -> Option<RawFrame> {
        Some(RawFrame {
            program_counter,
            file: self.file?,
            line: self.line.unwrap_or(0),
            function: self.function,
        })
    }
}

/// Where a walk is relative to the walker frames.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Still inside the unwinder, below the first walker frame.
    Unwinder,
    /// Inside this walker or a chain of forwarding walkers.
    Walkers,
    /// Above the walkers; every frame counts.
    Callers,
}

impl StackWalker for BacktraceWalker {
    #[inline(never)]
    fn unwind(&self, skip: usize) -> Option<RawFrame> {
        let mut phase = Phase::Unwinder;
        let mut remaining = skip;
        let mut found = None;
        backtrace::trace(|frame| {
            let program_counter = frame.ip() as usize;
            let mut logical = Vec::new();
            backtrace::resolve_frame(frame, |symbol| {
                logical.push(LogicalFrame::from_symbol(symbol));
            });
            if logical.is_empty() {
                logical.push(LogicalFrame {
                    function: None,
                    file: None,
                    line: None,
                });
            }
            for candidate in logical {
                match phase {
                    Phase::Unwinder => {
                        if candidate.is_walker_frame() {
                            phase = Phase::Walkers;
                        }
                        continue;
                    }
                    Phase::Walkers if candidate.is_walker_frame() => continue,
                    Phase::Walkers => phase = Phase::Callers,
                    Phase::Callers => {}
                }
                if remaining == 0 {
                    found = Some(candidate.into_raw(program_counter));
                    return false;
                }
                remaining -= 1;
            }
            true
        });
        found.flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline(never)]
    fn walk_here(skip: usize) -> Option<RawFrame> {
        BacktraceWalker::new().unwind(skip)
    }

    #[test]
    fn zero_is_the_calling_function() {
        let frame = walk_here(0).expect("debug builds carry symbols");
        assert!(frame.file.ends_with("walker.rs"), "{}", frame.file);
        let function = frame.function.expect("function name");
        assert!(function.ends_with("walk_here"), "{function}");
    }

    #[test]
    fn one_is_the_caller_of_that_function() {
        let frame = walk_here(1).expect("debug builds carry symbols");
        let function = frame.function.expect("function name");
        assert!(
            function.ends_with("one_is_the_caller_of_that_function"),
            "{function}"
        );
    }

    #[inline(never)]
    fn walk_by_ref(skip: usize) -> Option<RawFrame> {
        let walker = BacktraceWalker::new();
        <&BacktraceWalker as StackWalker>::unwind(&&walker, skip)
    }

    #[inline(never)]
    fn walk_boxed(skip: usize) -> Option<RawFrame> {
        let walker: Box<dyn StackWalker> = Box::new(BacktraceWalker::new());
        <Box<dyn StackWalker> as StackWalker>::unwind(&walker, skip)
    }

    #[test]
    fn forwarding_walkers_are_not_counted() {
        let by_ref = walk_by_ref(0).and_then(|f| f.function).expect("function name");
        assert!(by_ref.ends_with("walk_by_ref"), "{by_ref}");
        let boxed = walk_boxed(0).and_then(|f| f.function).expect("function name");
        assert!(boxed.ends_with("walk_boxed"), "{boxed}");
    }

    #[test]
    fn beyond_the_stack_is_none() {
        assert_eq!(walk_here(100_000), None);
    }

    #[test]
    fn boxed_walkers_forward() {
        struct Fixed;
        impl StackWalker for Fixed {
            fn unwind(&self, skip: usize) -> Option<RawFrame> {
                Some(RawFrame {
                    program_counter: skip,
                    file: "f.rs".to_string(),
                    line: 1,
                    function: None,
                })
            }
        }
        let boxed: Box<dyn StackWalker> = Box::new(Fixed);
        assert_eq!(boxed.unwind(7).map(|f| f.program_counter), Some(7));
        let by_ref = <&Fixed as StackWalker>::unwind(&&Fixed, 3);
        assert_eq!(by_ref.map(|f| f.program_counter), Some(3));
    }
}
