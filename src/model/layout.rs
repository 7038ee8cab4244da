//! The saved layout: displays as they were at save time and the windows that
//! should be put back on them.

use std::collections::BTreeMap;

use regex::Regex;

use crate::layout_engine::LayoutError;
use crate::sys::geometry::Rect;
use crate::sys::screen::ScreenId;

/// How a saved entry's title is compared with a live window title.
#[derive(Debug, Clone)]
pub enum TitleMatcher {
    /// Matches when the pattern is found anywhere in the title.
    Regex(Regex),
    Exact(String),
}

impl TitleMatcher {
    pub fn new(pattern: &str, exact: bool) -> Result<TitleMatcher, LayoutError> {
        if exact {
            return Ok(TitleMatcher::Exact(pattern.to_string()));
        }
        Regex::new(pattern).map(TitleMatcher::Regex).map_err(|source| {
            LayoutError::PatternInvalid {
                pattern: pattern.to_string(),
                source: Box::new(source),
            }
        })
    }

    /// The matcher a freshly saved window gets. Always exact: as a regex,
    /// "Notes" would also claim "Notes 2", and an empty title would claim
    /// every window of its owner.
    pub fn for_title(title: &str) -> TitleMatcher { TitleMatcher::Exact(title.to_string()) }

    pub fn matches(&self, title: &str) -> bool {
        match self {
            TitleMatcher::Regex(re) => re.is_match(title),
            TitleMatcher::Exact(text) => text == title,
        }
    }

    pub fn pattern(&self) -> &str {
        match self {
            TitleMatcher::Regex(re) => re.as_str(),
            TitleMatcher::Exact(text) => text,
        }
    }

    pub fn is_exact(&self) -> bool { matches!(self, TitleMatcher::Exact(_)) }
}

impl PartialEq for TitleMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.is_exact() == other.is_exact() && self.pattern() == other.pattern()
    }
}

/// A display as it was when the layout was saved, in window space.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedScreen {
    pub id: ScreenId,
    pub name: String,
    pub frame: Rect,
}

/// One window placement. `frame` is relative to the origin of `display_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedWindow {
    pub owner_name: String,
    pub title: TitleMatcher,
    pub display_id: ScreenId,
    pub frame: Rect,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SavedLayout {
    pub displays: BTreeMap<ScreenId, SavedScreen>,
    /// In file order. Earlier entries win when several match a window.
    pub windows: Vec<SavedWindow>,
}

impl SavedLayout {
    pub fn is_empty(&self) -> bool { self.windows.is_empty() }

    pub fn display(&self, id: ScreenId) -> Option<&SavedScreen> { self.displays.get(&id) }
}
