//! Matching saved window placements to live windows and moving them back.
//!
//! Everything here works on a [`Snapshot`](crate::model::Snapshot) and the
//! provider traits in [`crate::sys`], so none of it touches the OS directly.

mod error;
pub mod matcher;
pub mod reconcile;
pub mod restore;
pub mod save;
pub mod screen_locator;
#[cfg(test)]
pub(crate) mod testing;

pub use error::LayoutError;
pub use matcher::{WindowMatch, match_window};
pub use reconcile::{needs_move, to_absolute, to_relative};
pub use restore::{RestoreOutcome, RestoreReport, Restorer, WindowReport};
pub use save::capture_layout;
pub use screen_locator::locate_anchor;
