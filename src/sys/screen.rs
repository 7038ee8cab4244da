use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::geometry::{Point, Rect, normalize_origin};

/// A display identifier. Only valid for the current login session; a display
/// that is unplugged and replugged may come back with a different id.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreenId(pub u32);

impl std::fmt::Display for ScreenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { self.0.fmt(f) }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenInfo {
    pub id: ScreenId,
    pub name: String,
    pub frame: Rect,
}

/// Source of the live display list.
///
/// Frames are reported in the platform's native convention; on macOS that is
/// Cocoa's bottom-left origin.
pub trait System {
    fn screens(&self) -> Vec<ScreenInfo>;
}

/// Converts between Quartz and Cocoa coordinate systems.
#[derive(Clone, Copy, Debug)]
pub struct CoordinateConverter {
    /// The native frame of the primary display. Its bottom-left origin is the
    /// Cocoa origin; its top-left corner is the Quartz origin.
    primary: Rect,
}

impl CoordinateConverter {
    pub fn new(primary: Rect) -> Self { Self { primary } }

    pub fn convert_rect(&self, rect: Rect) -> Rect { normalize_origin(rect, self.primary) }
}

/// The live displays of one run, with frames normalized into window space.
///
/// The primary display is always first. There may be no displays at all.
#[derive(Debug, Clone, Default)]
pub struct ScreenSet {
    screens: Vec<ScreenInfo>,
}

impl ScreenSet {
    pub fn new(mut screens: Vec<ScreenInfo>) -> ScreenSet {
        if screens.is_empty() {
            return ScreenSet::default();
        }

        if let Some(main_screen_idx) = screens.iter().position(|s| s.frame.origin == Point::ZERO) {
            screens.swap(0, main_screen_idx);
        } else {
            warn!("Could not find main screen. screens={screens:?}");
        }

        let converter = CoordinateConverter::new(screens[0].frame);
        for screen in &mut screens {
            screen.frame = converter.convert_rect(screen.frame);
        }
        debug!("normalized screens={screens:?}");

        ScreenSet { screens }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScreenInfo> { self.screens.iter() }

    pub fn is_empty(&self) -> bool { self.screens.is_empty() }

    pub fn len(&self) -> usize { self.screens.len() }

    pub fn by_id(&self, id: ScreenId) -> Option<&ScreenInfo> {
        self.screens.iter().find(|s| s.id == id)
    }

    /// The display other frames are measured from. Its normalized origin is
    /// always (0, 0) unless no display sat at the native origin.
    pub fn primary(&self) -> Option<&ScreenInfo> { self.screens.first() }

    /// The display whose normalized frame contains `point`, first match wins.
    pub fn containing(&self, point: Point) -> Option<&ScreenInfo> {
        self.screens.iter().find(|s| s.frame.contains(point))
    }
}

#[cfg(target_os = "macos")]
pub use self::macos::{Actual, NSScreenExt};

#[cfg(target_os = "macos")]
mod macos {
    use objc2::{ClassType, msg_send};
    use objc2_app_kit::NSScreen;
    use objc2_foundation::{MainThreadMarker, NSNumber, ns_string};
    use tracing::warn;

    use super::{ScreenId, ScreenInfo, System};
    use crate::sys::geometry::Rect;

    pub struct Actual {
        mtm: MainThreadMarker,
    }

    impl Actual {
        pub fn new(mtm: MainThreadMarker) -> Self { Actual { mtm } }
    }

    impl System for Actual {
        fn screens(&self) -> Vec<ScreenInfo> {
            NSScreen::screens(self.mtm)
                .iter()
                .flat_map(|s| {
                    let frame = s.frame();
                    Some(ScreenInfo {
                        id: s.get_number().ok()?,
                        name: s.localizedName().to_string(),
                        frame: Rect::new(
                            frame.origin.x,
                            frame.origin.y,
                            frame.size.width,
                            frame.size.height,
                        ),
                    })
                })
                .collect()
        }
    }

    pub trait NSScreenExt {
        fn get_number(&self) -> Result<ScreenId, ()>;
    }

    impl NSScreenExt for NSScreen {
        fn get_number(&self) -> Result<ScreenId, ()> {
            let desc = self.deviceDescription();
            match desc.objectForKey(ns_string!("NSScreenNumber")) {
                Some(val) if unsafe { msg_send![&*val, isKindOfClass: NSNumber::class()] } => {
                    let number: &NSNumber = unsafe { &*(&*val as *const _ as *const NSNumber) };
                    Ok(ScreenId(number.as_u32()))
                }
                val => {
                    warn!(
                        "Could not get NSScreenNumber for screen with name {:?}: {:?}",
                        self.localizedName(),
                        val,
                    );
                    Err(())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn screen(id: u32, x: f64, y: f64, w: f64, h: f64) -> ScreenInfo {
        ScreenInfo {
            id: ScreenId(id),
            name: format!("Display {id}"),
            frame: Rect::new(x, y, w, h),
        }
    }

    #[test]
    fn it_puts_the_main_screen_first_and_normalizes() {
        let set = ScreenSet::new(vec![
            screen(1, 3840., 98., 1512., 982.),
            screen(3, 0., 0., 3840., 2160.),
        ]);
        let frames: Vec<_> = set.iter().map(|s| (s.id, s.frame)).collect();
        assert_eq!(
            frames,
            vec![
                (ScreenId(3), Rect::new(0., 0., 3840., 2160.)),
                (ScreenId(1), Rect::new(3840., 1080., 1512., 982.)),
            ]
        );
        assert_eq!(set.primary().map(|s| s.id), Some(ScreenId(3)));
    }

    #[test]
    fn it_finds_the_screen_containing_a_point() {
        let set = ScreenSet::new(vec![
            screen(1, 0., 0., 1920., 1080.),
            screen(2, 1920., 0., 1920., 1080.),
        ]);
        assert_eq!(set.containing(Point::new(50., 60.)).map(|s| s.id), Some(ScreenId(1)));
        assert_eq!(set.containing(Point::new(1920., 0.)).map(|s| s.id), Some(ScreenId(2)));
        assert_eq!(set.containing(Point::new(4000., 0.)).map(|s| s.id), None);
    }

    #[test]
    fn it_handles_no_screens() {
        let set = ScreenSet::new(vec![]);
        assert!(set.is_empty());
        assert!(set.primary().is_none());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn it_flips_frames_against_the_primary() {
        let converter = CoordinateConverter::new(Rect::new(0., 0., 1920., 1080.));
        assert_eq!(
            converter.convert_rect(Rect::new(100., 80., 800., 600.)),
            Rect::new(100., 400., 800., 600.)
        );
    }
}
