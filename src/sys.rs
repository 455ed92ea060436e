// SPDX-License-Identifier: MIT OR Apache-2.0

//! Platform-specific time types for cross-platform compatibility.
//!
//! [`SystemTime`] is the wall-clock type stamped onto every
//! [`CallerContext`](crate::CallerContext). On native platforms it comes from
//! `std::time`, while on WASM it comes from `web_time`, since `std::time::SystemTime::now`
//! panics on `wasm32-unknown-unknown`.

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::SystemTime;
#[cfg(target_arch = "wasm32")]
pub use web_time::SystemTime;
