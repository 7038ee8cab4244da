use tracing::{debug, info, warn};

use super::reconcile::to_relative;
use super::restore::short_title;
use crate::model::{SavedLayout, SavedScreen, SavedWindow, Snapshot, TitleMatcher};
use crate::sys::geometry::Rect;

/// Records every display and every on-screen window of the snapshot.
///
/// A window is saved against the display containing its top-left corner, with
/// its frame relative to that display. Windows whose corner is on no display
/// are left out.
pub fn capture_layout(snapshot: &Snapshot) -> SavedLayout {
    let mut layout = SavedLayout::default();
    if snapshot.screens.is_empty() {
        warn!("No displays found; saving an empty layout");
        return layout;
    }

    for screen in snapshot.screens.iter() {
        layout.displays.insert(screen.id, SavedScreen {
            id: screen.id,
            name: screen.name.clone(),
            frame: screen.frame,
        });
    }

    for window in &snapshot.windows {
        let Some(screen) = snapshot.screens.containing(window.bounds.origin) else {
            debug!(
                "Skipping [{}]{} at {:?}: not on any display",
                window.owner_name,
                short_title(&window.title),
                window.bounds
            );
            continue;
        };
        let origin = to_relative(window.bounds.origin, &screen.frame);
        layout.windows.push(SavedWindow {
            owner_name: window.owner_name.clone(),
            title: TitleMatcher::for_title(&window.title),
            display_id: screen.id,
            frame: Rect::from_parts(origin, window.bounds.size),
        });
    }

    info!(
        "Saved {} windows on {} displays",
        layout.windows.len(),
        layout.displays.len()
    );
    layout
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;
    use crate::layout_engine::testing::{FakeSystem, FakeWindowServer, live_window, screen};
    use crate::sys::screen::ScreenId;

    fn capture(
        screens: Vec<crate::sys::screen::ScreenInfo>,
        windows: Vec<crate::sys::window_server::WindowServerInfo>,
    ) -> SavedLayout {
        capture_layout(&Snapshot::capture(&FakeSystem(screens), &FakeWindowServer(windows)))
    }

    #[test]
    fn it_saves_windows_relative_to_their_display() {
        let layout = capture(
            vec![screen(1, 0., 0., 1920., 1080.)],
            vec![live_window("Finder", "Desktop", 10, Rect::new(50., 60., 300., 200.))],
        );
        assert_eq!(layout.displays.len(), 1);
        assert_eq!(layout.windows.len(), 1);
        let w = &layout.windows[0];
        assert_eq!(w.owner_name, "Finder");
        assert_eq!(w.title, TitleMatcher::for_title("Desktop"));
        assert_eq!(w.display_id, ScreenId(1));
        assert_eq!(w.frame, Rect::new(50., 60., 300., 200.));
    }

    #[test]
    fn it_skips_windows_off_every_display() {
        let layout = capture(
            vec![screen(1, 0., 0., 1920., 1080.)],
            vec![
                live_window("Finder", "Desktop", 10, Rect::new(-500., 60., 300., 200.)),
                live_window("Notes", "Notes", 11, Rect::new(1920., 0., 300., 200.)),
            ],
        );
        assert!(layout.windows.is_empty());
        assert_eq!(layout.displays.len(), 1);
    }

    #[test]
    fn it_saves_against_a_display_above_the_primary() {
        let layout = capture(
            vec![screen(1, 0., 0., 1920., 1080.), screen(2, 0., 1080., 2560., 1440.)],
            vec![live_window("Safari", "Docs", 10, Rect::new(100., -1400., 800., 600.))],
        );
        assert_eq!(
            layout.display(ScreenId(2)).map(|d| d.frame),
            Some(Rect::new(0., -1440., 2560., 1440.))
        );
        let w = &layout.windows[0];
        assert_eq!(w.display_id, ScreenId(2));
        assert_eq!(w.frame, Rect::new(100., 40., 800., 600.));
    }

    #[test]
    fn it_saves_nothing_without_displays() {
        let layout = capture(vec![], vec![live_window(
            "Finder",
            "Desktop",
            10,
            Rect::new(0., 0., 300., 200.),
        )]);
        assert_eq!(layout, SavedLayout::default());
    }

    #[test]
    fn it_keeps_titles_with_metacharacters_literal() {
        let layout = capture(
            vec![screen(1, 0., 0., 1920., 1080.)],
            vec![live_window("Code", "lib.rs (src) - relayout", 10, Rect::new(0., 25., 800., 600.))],
        );
        let title = &layout.windows[0].title;
        assert!(title.is_exact());
        assert!(title.matches("lib.rs (src) - relayout"));
    }
}
