// SPDX-License-Identifier: MIT OR Apache-2.0

//! The working-directory prefix used to shorten source paths.

use std::fmt::Display;
use std::path::{MAIN_SEPARATOR_STR, PathBuf};
use std::sync::OnceLock;

static PROCESS_WORKING_DIR: OnceLock<WorkingDirectory> = OnceLock::new();

/// A directory prefix, always ending in the native separator.
///
/// Paths under this directory are displayed relative to it.  Most code uses the
/// process-wide value from [`WorkingDirectory::process`], but a [`Resolver`](crate::Resolver)
/// can be built with any value, which is how tests pin the prefix without touching
/// the process environment.
///
/// ```rust
/// use logsite::WorkingDirectory;
/// # #[cfg(unix)] {
/// let dir = WorkingDirectory::new("/home/user/proj");
/// assert_eq!(dir.as_str(), "/home/user/proj/");
/// assert_eq!(dir.strip("/home/user/proj/pkg/file.rs"), "pkg/file.rs");
/// assert_eq!(dir.strip("/usr/lib/file.rs"), "/usr/lib/file.rs");
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkingDirectory {
    prefix: String,
}

impl WorkingDirectory {
    /// Creates a prefix from a directory, appending the native separator if it is missing.
    pub fn new(dir: impl Into<String>) -> Self {
        let mut prefix = dir.into();
        if !prefix.ends_with(MAIN_SEPARATOR_STR) {
            prefix.push_str(MAIN_SEPARATOR_STR);
        }
        WorkingDirectory { prefix }
    }

    /// Queries the current directory of the process.
    pub fn from_process() -> Self {
        Self::from_query(std::env::current_dir())
    }

    /// Builds a prefix from the result of a directory query.
    ///
    /// If the query failed the prefix is the bare separator.  That value is never an
    /// error: paths are simply shortened less (or not at all).
    pub fn from_query(query: std::io::Result<PathBuf>) -> Self {
        match query {
            Ok(dir) => Self::new(dir.to_string_lossy().into_owned()),
            Err(_) => WorkingDirectory {
                prefix: MAIN_SEPARATOR_STR.to_string(),
            },
        }
    }

    /// The process-wide working directory.
    ///
    /// Computed once, on first use, and never changed afterward.  Changing the current
    /// directory later does not affect it.  "First use" is the first resolution or
    /// `caller_context!` in the process, which may come after `main` has already called
    /// [`std::env::set_current_dir`]; call [`init_process`](Self::init_process) at the
    /// top of `main` to pin the startup directory instead.
    pub fn process() -> &'static WorkingDirectory {
        PROCESS_WORKING_DIR.get_or_init(Self::from_process)
    }

    /// Captures the process-wide working directory now, if nothing has yet.
    ///
    /// Returns the same value [`process`](Self::process) will return from then on.
    pub fn init_process() -> &'static WorkingDirectory {
        Self::process()
    }

    pub fn as_str(&self) -> &str {
        &self.prefix
    }

    /// Removes this prefix from `s`, or returns `s` unchanged when it doesn't start with it.
    ///
    /// The result is always a suffix of `s`.
    pub fn strip<'s>(&self, s: &'s str) -> &'s str {
        s.strip_prefix(self.prefix.as_str()).unwrap_or(s)
    }
}

impl Display for WorkingDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.prefix)
    }
}

impl AsRef<str> for WorkingDirectory {
    fn as_ref(&self) -> &str {
        &self.prefix
    }
}
