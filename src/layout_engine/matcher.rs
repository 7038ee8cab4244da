use tracing::{debug, trace};

use super::LayoutError;
use crate::model::SavedWindow;
use crate::sys::axuielement::{Accessibility, AxWindow};
use crate::sys::geometry::Rect;
use crate::sys::window_server::WindowServerInfo;

/// Chrome reports its accessibility titles with this suffix appended, while
/// the window server reports the bare title.
pub const CHROME_TITLE_SUFFIX: &str = " - Chrome";

/// The first saved entry for the window's owner whose title matcher accepts
/// the window's title.
pub fn find_entry<'a>(
    window: &WindowServerInfo,
    saved: &'a [SavedWindow],
) -> Option<&'a SavedWindow> {
    saved
        .iter()
        .find(|entry| entry.owner_name == window.owner_name && entry.title.matches(&window.title))
}

/// An accessibility handle proven to be the same window as an enumerated one.
#[derive(Debug)]
pub struct Confirmed<W> {
    pub handle: W,
    /// Geometry read from the handle while confirming.
    pub frame: Rect,
}

fn ax_title_matches(live_title: &str, ax_title: &str) -> bool {
    ax_title == live_title || ax_title.strip_suffix(CHROME_TITLE_SUFFIX) == Some(live_title)
}

/// Finds the accessibility window of `window`'s process that has the same
/// title and exactly the same frame.
///
/// Titles alone are not enough: an app may show several windows with one
/// title, and only the frame tells them apart. Handles whose attributes cannot
/// be read are passed over.
pub fn confirm<A: Accessibility>(
    window: &WindowServerInfo,
    ax: &A,
) -> Result<Option<Confirmed<A::Window>>, LayoutError> {
    let handles = ax.windows(window.pid).map_err(|source| LayoutError::AutomationQueryFailed {
        pid: window.pid,
        source,
    })?;

    for handle in handles {
        let title = match handle.title() {
            Ok(title) => title,
            Err(e) => {
                debug!("could not read title of an accessibility window: {e}");
                continue;
            }
        };
        if !ax_title_matches(&window.title, &title) {
            continue;
        }

        let frame = match (handle.position(), handle.size()) {
            (Ok(pos), Ok(size)) => Rect::from_parts(pos, size),
            (Err(e), _) | (_, Err(e)) => {
                debug!("could not read frame of {title:?}: {e}");
                continue;
            }
        };
        if frame == window.bounds {
            return Ok(Some(Confirmed { handle, frame }));
        }
        trace!("{title:?} at {frame:?} is not the window at {:?}", window.bounds);
    }

    Ok(None)
}

#[derive(Debug)]
pub enum WindowMatch<'a, W> {
    NoMatch,
    /// A saved entry applies, but no accessibility window could be tied to
    /// the enumerated one yet.
    Unconfirmed(&'a SavedWindow),
    Confirmed(&'a SavedWindow, Confirmed<W>),
}

/// Matches a live window against the saved entries. Only the first entry
/// that accepts the window is considered.
pub fn match_window<'a, A: Accessibility>(
    window: &WindowServerInfo,
    saved: &'a [SavedWindow],
    ax: &A,
) -> Result<WindowMatch<'a, A::Window>, LayoutError> {
    let Some(entry) = find_entry(window, saved) else {
        return Ok(WindowMatch::NoMatch);
    };
    Ok(match confirm(window, ax)? {
        Some(confirmed) => WindowMatch::Confirmed(entry, confirmed),
        None => WindowMatch::Unconfirmed(entry),
    })
}
