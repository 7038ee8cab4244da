//! Reading and writing the saved layout as JSON.
//!
//! The on-disk records are validated once here and turned into the typed
//! model; nothing past this module looks at raw fields.

use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::layout::{SavedLayout, SavedScreen, SavedWindow, TitleMatcher};
use crate::layout_engine::LayoutError;
use crate::sys::geometry::Rect;
use crate::sys::screen::ScreenId;

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct LayoutFile {
    #[serde(default)]
    displays: Vec<DisplayGeometry>,
    #[serde(default)]
    windows: Vec<SavedWindowEntry>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct DisplayGeometry {
    id: ScreenId,
    #[serde(default)]
    name: String,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SavedWindowEntry {
    owner_name: String,
    title_pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exact_match: Option<bool>,
    display_id: ScreenId,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

fn to_rect(x: i32, y: i32, width: i32, height: i32) -> Rect {
    Rect::new(x.into(), y.into(), width.into(), height.into())
}

fn to_ints(rect: &Rect) -> (i32, i32, i32, i32) {
    (
        rect.origin.x.round() as i32,
        rect.origin.y.round() as i32,
        rect.size.width.round() as i32,
        rect.size.height.round() as i32,
    )
}

impl TryFrom<LayoutFile> for SavedLayout {
    type Error = LayoutError;

    fn try_from(file: LayoutFile) -> Result<Self, LayoutError> {
        let mut layout = SavedLayout::default();

        let mut seen = FxHashSet::default();
        for d in file.displays {
            if !seen.insert(d.id) {
                return Err(LayoutError::ConfigInvalid(format!("duplicate display id {}", d.id)));
            }
            if d.width < 0 || d.height < 0 {
                return Err(LayoutError::ConfigInvalid(format!(
                    "display {} has negative size {}x{}",
                    d.id, d.width, d.height
                )));
            }
            layout.displays.insert(d.id, SavedScreen {
                id: d.id,
                name: d.name,
                frame: to_rect(d.x, d.y, d.width, d.height),
            });
        }

        for (index, w) in file.windows.into_iter().enumerate() {
            if w.width < 0 || w.height < 0 {
                return Err(LayoutError::ConfigInvalid(format!(
                    "window {index} ([{}]{}) has negative size {}x{}",
                    w.owner_name, w.title_pattern, w.width, w.height
                )));
            }
            let title = match TitleMatcher::new(&w.title_pattern, w.exact_match.unwrap_or(false)) {
                Ok(title) => title,
                Err(e) => {
                    warn!("Skipping window {index} for {}: {e}", w.owner_name);
                    continue;
                }
            };
            if !layout.displays.contains_key(&w.display_id) {
                debug!(
                    "window {index} refers to display {} which has no saved geometry",
                    w.display_id
                );
            }
            layout.windows.push(SavedWindow {
                owner_name: w.owner_name,
                title,
                display_id: w.display_id,
                frame: to_rect(w.x, w.y, w.width, w.height),
            });
        }

        Ok(layout)
    }
}

impl From<&SavedLayout> for LayoutFile {
    fn from(layout: &SavedLayout) -> Self {
        let displays = layout
            .displays
            .values()
            .map(|d| {
                let (x, y, width, height) = to_ints(&d.frame);
                DisplayGeometry {
                    id: d.id,
                    name: d.name.clone(),
                    x,
                    y,
                    width,
                    height,
                }
            })
            .collect();
        let windows = layout
            .windows
            .iter()
            .map(|w| {
                let (x, y, width, height) = to_ints(&w.frame);
                SavedWindowEntry {
                    owner_name: w.owner_name.clone(),
                    title_pattern: w.title.pattern().to_string(),
                    exact_match: w.title.is_exact().then_some(true),
                    display_id: w.display_id,
                    x,
                    y,
                    width,
                    height,
                }
            })
            .collect();
        LayoutFile { displays, windows }
    }
}

pub fn parse(buf: &str) -> Result<SavedLayout, LayoutError> {
    let file: LayoutFile =
        serde_json::from_str(buf).map_err(|source| LayoutError::ConfigParseFailed { source })?;
    file.try_into()
}

pub fn read(path: &Path) -> Result<SavedLayout, LayoutError> {
    let buf = std::fs::read_to_string(path).map_err(|source| LayoutError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&buf)
}

/// Reads a layout, treating any failure as "nothing to restore".
pub fn read_or_empty(path: &Path) -> SavedLayout {
    match read(path) {
        Ok(layout) => layout,
        Err(e) => {
            warn!("Error reading layout: {e}");
            SavedLayout::default()
        }
    }
}

pub fn to_string_pretty(layout: &SavedLayout) -> Result<String, LayoutError> {
    serde_json::to_string_pretty(&LayoutFile::from(layout))
        .map_err(|source| LayoutError::SerializeFailed { source })
}

pub fn write(layout: &SavedLayout, path: &Path) -> anyhow::Result<()> {
    let json = to_string_pretty(layout)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, json.as_bytes())?;
    Ok(())
}
