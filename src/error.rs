// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced while resolving a caller context.

/// The ways a caller-context resolution can fail.
///
/// Neither kind is fatal.  A logging pipeline that receives one of these typically
/// emits the message without location information.
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ContextError {
    /// A negative number of frames was requested.
    ///
    /// Detected before the stack is touched.
    #[error("cannot skip a negative number of stack frames (requested {skip})")]
    InvalidArgument { skip: isize },
    /// The stack walker could not resolve the requested frame.
    ///
    /// Either the stack is not `skip` frames deep, or the frame has no source
    /// location (for example, a release build without debug info).
    #[error("could not resolve the stack frame {skip} levels above the caller")]
    StackWalkFailure { skip: usize },
}
