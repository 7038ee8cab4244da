use tracing::debug;

use super::LayoutError;
use crate::model::SavedScreen;
use crate::sys::geometry::Rect;
use crate::sys::screen::{ScreenId, ScreenSet};

/// Picks the live display a saved window should be placed relative to.
///
/// An exact id match always wins. Display ids do not survive reconnects, so
/// otherwise the live display with the saved resolution whose origin is
/// nearest the saved origin is used. Anything else is `ScreenNotFound`; the
/// caller skips the window rather than guess.
///
/// All frames are in window space.
pub fn locate_anchor(
    saved_id: ScreenId,
    saved: Option<&SavedScreen>,
    screens: &ScreenSet,
) -> Result<Rect, LayoutError> {
    if let Some(screen) = screens.by_id(saved_id) {
        return Ok(screen.frame);
    }

    let Some(saved) = saved else {
        debug!("display {saved_id} is neither connected nor described in the layout");
        return Err(LayoutError::ScreenNotFound(saved_id));
    };

    let distance = |frame: &Rect| {
        (frame.origin.x - saved.frame.origin.x).hypot(frame.origin.y - saved.frame.origin.y)
    };

    let closest = screens
        .iter()
        .filter(|s| s.frame.size == saved.frame.size)
        .min_by(|a, b| distance(&a.frame).total_cmp(&distance(&b.frame)));

    match closest {
        Some(screen) => {
            debug!(
                "display {saved_id} ({}) is gone; using same-size display {} ({})",
                saved.name, screen.id, screen.name
            );
            Ok(screen.frame)
        }
        None => Err(LayoutError::ScreenNotFound(saved_id)),
    }
}
