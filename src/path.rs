// SPDX-License-Identifier: MIT OR Apache-2.0

//! Normalization of the raw source paths reported by a stack walker.

use std::path::{MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

/// Rewrites every `\` and then every `/` to the native separator.
///
/// Debug info may record paths with a separator that does not match the host (for
/// example, binaries cross-compiled on Windows), so both variants are rewritten
/// unconditionally.  Mixed inputs come out fully converted, and applying this twice
/// is the same as applying it once.
pub fn normalize_separators(raw: &str) -> String {
    raw.replace('\\', MAIN_SEPARATOR_STR)
        .replace('/', MAIN_SEPARATOR_STR)
}

/// Returns the final segment of an already-normalized path.
///
/// A path without any separator is its own file name.  A path ending in a separator
/// has an empty file name.
pub fn file_name(full_path: &str) -> &str {
    match full_path.rfind(MAIN_SEPARATOR) {
        Some(idx) => &full_path[idx + MAIN_SEPARATOR.len_utf8()..],
        None => full_path,
    }
}
