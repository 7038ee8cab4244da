use tracing::debug;

use crate::sys::screen::{ScreenSet, System};
use crate::sys::window_server::{WindowServer, WindowServerInfo};

/// Displays and windows as they were at the start of a run.
///
/// Taken once; a run never re-enumerates, so every decision within it is made
/// against the same picture of the desktop.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub screens: ScreenSet,
    pub windows: Vec<WindowServerInfo>,
}

impl Snapshot {
    pub fn capture(system: &impl System, window_server: &impl WindowServer) -> Snapshot {
        let screens = ScreenSet::new(system.screens());
        let windows = window_server.visible_windows();
        debug!(
            screens = screens.len(),
            primary = ?screens.primary().map(|s| s.id),
            windows = windows.len(),
            "captured snapshot"
        );
        Snapshot { screens, windows }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;
    use crate::layout_engine::testing::{FakeSystem, FakeWindowServer, live_window, screen};
    use crate::sys::geometry::Rect;
    use crate::sys::screen::ScreenId;

    #[test]
    fn it_captures_the_primary_display_first() {
        let snapshot = Snapshot::capture(
            &FakeSystem(vec![screen(2, 1920., 0., 1920., 1080.), screen(1, 0., 0., 1920., 1080.)]),
            &FakeWindowServer(vec![live_window("Finder", "Desktop", 10, Rect::new(0., 0., 10., 10.))]),
        );
        assert_eq!(snapshot.screens.primary().map(|s| s.id), Some(ScreenId(1)));
        assert_eq!(snapshot.screens.len(), 2);
        assert_eq!(snapshot.windows.len(), 1);
    }
}
