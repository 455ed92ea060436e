// SPDX-License-Identifier: MIT OR Apache-2.0

//! The resolved call-site record.

use crate::path::{file_name, normalize_separators};
use crate::sys::SystemTime;
use crate::walker::{RawFrame, UNKNOWN_FUNCTION};
use crate::working_dir::WorkingDirectory;
use std::fmt::Display;

/**
Where a log statement was issued, and when.

A `CallerContext` is built once per resolution and never changes afterward.  Each
field is owned, so the context can be moved to another thread or kept inside a
[LogRecord](crate::LogRecord) after the stack it came from is gone.

The `Display` representation is `file_name:line`, which is what formatters put in
front of a message:

```rust
let context = logsite::caller_context!();
let rendered = format!("[{context}] hello");
assert_eq!(rendered, format!("[{}:{}] hello", context.file_name(), context.line()));
```
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallerContext {
    function: String,
    short_path: String,
    full_path: String,
    file_name: String,
    line: u32,
    call_time: SystemTime,
}

impl CallerContext {
    /// Builds a context from an unwound frame, stamping the current time.
    pub(crate) fn from_frame(frame: RawFrame, working_dir: &WorkingDirectory) -> Self {
        let function = frame.function.as_deref().unwrap_or(UNKNOWN_FUNCTION);
        Self::from_parts(function, &frame.file, frame.line, working_dir)
    }

    pub(crate) fn from_parts(
        function: &str,
        raw_path: &str,
        line: u32,
        working_dir: &WorkingDirectory,
    ) -> Self {
        let full_path = normalize_separators(raw_path);
        let short_path = working_dir.strip(&full_path).to_string();
        let file_name = file_name(&full_path).to_string();
        //function names aren't paths, but they get the same prefix treatment
        let function = working_dir.strip(function).to_string();
        CallerContext {
            function,
            short_path,
            full_path,
            file_name,
            line,
            call_time: SystemTime::now(),
        }
    }

    /// Fully-qualified name of the function that made the call.
    pub fn function(&self) -> &str {
        &self.function
    }

    /// The source path relative to the working directory, or the full path when the
    /// file lies outside it.
    pub fn short_path(&self) -> &str {
        &self.short_path
    }

    /// The source path with native separators.
    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    /// The last segment of [`full_path`](Self::full_path).
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Source line of the call, or 0 if debug info had none.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// When this context was built.
    pub fn call_time(&self) -> SystemTime {
        self.call_time
    }
}

impl Display for CallerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file_name, self.line)
    }
}

/*
Boilerplate notes for CallerContext:

- Clone: yes, contexts are copied into every record sent to every logger
- PartialEq/Eq/Hash: derived, includes call_time, so two captures are rarely equal
- Copy: no, owns strings
- Default: no, there is no meaningful empty call site
- Ord: no meaningful ordering
- Send/Sync: automatic
*/

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

    fn native(path: &str) -> String {
        path.replace('/', MAIN_SEPARATOR_STR)
    }

    fn frame(file: &str, function: Option<&str>) -> RawFrame {
        RawFrame {
            program_counter: 0x1000,
            file: file.to_string(),
            line: 42,
            function: function.map(str::to_string),
        }
    }

    #[test]
    fn paths_inside_the_working_directory_are_shortened() {
        let wd = WorkingDirectory::new(native("/home/user/proj/"));
        let context = CallerContext::from_frame(
            frame("/home/user/proj/pkg/file.go", Some("proj::pkg::run")),
            &wd,
        );
        assert_eq!(context.full_path(), native("/home/user/proj/pkg/file.go"));
        assert_eq!(context.short_path(), native("pkg/file.go"));
        assert_eq!(context.file_name(), "file.go");
        assert_eq!(context.function(), "proj::pkg::run");
        assert_eq!(context.line(), 42);
        assert_eq!(context.to_string(), "file.go:42");
    }

    #[test]
    fn paths_outside_the_working_directory_are_kept() {
        let wd = WorkingDirectory::new(native("/home/user/proj/"));
        let context =
            CallerContext::from_frame(frame("/usr/lib/external/file.go", None), &wd);
        assert_eq!(context.short_path(), context.full_path());
        assert_eq!(context.file_name(), "file.go");
        assert_eq!(context.function(), UNKNOWN_FUNCTION);
    }

    #[test]
    fn foreign_separators_are_normalized_before_shortening() {
        let wd = WorkingDirectory::new(native("/home/user/proj"));
        let context = CallerContext::from_frame(
            frame("/home/user/proj\\pkg\\file.go", Some("f")),
            &wd,
        );
        assert_eq!(context.short_path(), native("pkg/file.go"));
        assert!(!context.file_name().contains(MAIN_SEPARATOR));
    }

    #[test]
    fn short_path_is_always_a_suffix() {
        let wd = WorkingDirectory::new(native("/a/b"));
        for raw in ["/a/b/c.rs", "/a/bc.rs", "c.rs", "/x/a/b/c.rs", "/a/b/"] {
            let context = CallerContext::from_frame(frame(raw, None), &wd);
            assert!(
                context.full_path().ends_with(context.short_path()),
                "{raw}"
            );
        }
    }

    #[test]
    fn function_names_lose_a_working_directory_prefix() {
        let wd = WorkingDirectory::new(native("/srv/app"));
        let prefixed = format!("{}main", wd.as_str());
        let context =
            CallerContext::from_frame(frame("/srv/app/main.rs", Some(prefixed.as_str())), &wd);
        assert_eq!(context.function(), "main");
    }

    #[test]
    fn capture_times_do_not_go_backwards() {
        let wd = WorkingDirectory::new(native("/"));
        let first = CallerContext::from_frame(frame("/a.rs", None), &wd);
        let second = CallerContext::from_frame(frame("/a.rs", None), &wd);
        assert!(second.call_time() >= first.call_time());
    }
}
