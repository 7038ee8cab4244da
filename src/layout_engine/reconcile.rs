use super::LayoutError;
use super::screen_locator::locate_anchor;
use crate::common::config::RestoreSettings;
use crate::model::{SavedLayout, SavedWindow};
use crate::sys::geometry::{Point, Rect, is_close};
use crate::sys::screen::{ScreenId, ScreenSet};

/// Turns a position saved relative to `display_id` into window space, using
/// whichever live display stands in for it now.
pub fn to_absolute(
    relative: Point,
    display_id: ScreenId,
    layout: &SavedLayout,
    screens: &ScreenSet,
) -> Result<Point, LayoutError> {
    let anchor = locate_anchor(display_id, layout.display(display_id), screens)?;
    Ok(Point::new(relative.x + anchor.origin.x, relative.y + anchor.origin.y))
}

/// Inverse of [`to_absolute`] for a known display frame.
pub fn to_relative(absolute: Point, display: &Rect) -> Point {
    Point::new(absolute.x - display.origin.x, absolute.y - display.origin.y)
}

/// Where `saved` should be right now. Sizes are stored as-is.
pub fn desired_frame(
    saved: &SavedWindow,
    layout: &SavedLayout,
    screens: &ScreenSet,
) -> Result<Rect, LayoutError> {
    let origin = to_absolute(saved.frame.origin, saved.display_id, layout, screens)?;
    Ok(Rect::from_parts(origin, saved.frame.size))
}

pub fn needs_move(current: &Rect, desired: &Rect, settings: &RestoreSettings) -> bool {
    !is_close(current.origin, desired.origin, settings.position_tolerance())
        || !is_close(current.size.as_point(), desired.size.as_point(), settings.size_tolerance())
}
