//! Utilities for interfacing with OS-specific APIs.
//!
//! The traits here are the only way the layout engine sees the system. The
//! `Actual` implementations exist on macOS only.

#[cfg(target_os = "macos")]
pub mod accessibility;
pub mod axuielement;
pub mod geometry;
pub mod screen;
pub mod window_server;
