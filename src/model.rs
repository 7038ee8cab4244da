pub mod layout;
pub mod snapshot;
pub mod store;

pub use layout::{SavedLayout, SavedScreen, SavedWindow, TitleMatcher};
pub use snapshot::Snapshot;
