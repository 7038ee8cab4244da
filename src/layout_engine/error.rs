use std::path::PathBuf;

use thiserror::Error;

use crate::sys::axuielement;
use crate::sys::screen::ScreenId;
use crate::sys::window_server::pid_t;

/// Everything that can go wrong for a single window or a single layout file.
///
/// None of these abort a run; the orchestrators record them and move on.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("no current display can stand in for saved display {0}")]
    ScreenNotFound(ScreenId),
    #[error("title pattern {pattern:?} is not a valid regex: {source}")]
    PatternInvalid {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },
    #[error("could not list accessibility windows of pid {pid}: {source}")]
    AutomationQueryFailed {
        pid: pid_t,
        #[source]
        source: axuielement::Error,
    },
    #[error("could not set {attribute} of [{owner}]{title}: {source}")]
    AutomationWriteFailed {
        attribute: &'static str,
        owner: String,
        title: String,
        #[source]
        source: axuielement::Error,
    },
    #[error("could not read layout file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse layout file: {source}")]
    ConfigParseFailed {
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid layout file: {0}")]
    ConfigInvalid(String),
    #[error("could not serialize layout: {source}")]
    SerializeFailed {
        #[source]
        source: serde_json::Error,
    },
}
