//! Puts live windows back where a saved layout says they belong.

use std::collections::BTreeMap;
use std::thread;
use std::time::Duration;

use strum::IntoStaticStr;
use tracing::{debug, debug_span, error, info, warn};

use super::LayoutError;
use super::matcher::{WindowMatch, match_window};
use super::reconcile::{desired_frame, needs_move};
use crate::common::config::RestoreSettings;
use crate::model::{SavedLayout, Snapshot};
use crate::sys::axuielement::{self as ax, Accessibility, AxWindow};
use crate::sys::geometry::Rect;
use crate::sys::screen::{ScreenId, ScreenSet};
use crate::sys::window_server::WindowServerInfo;

const MAX_LOGGED_TITLE: usize = 40;

/// Where a single live window ended up.
#[derive(Debug, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum RestoreOutcome {
    NoMatch,
    Unconfirmed,
    QueryFailed(LayoutError),
    ScreenNotFound(ScreenId),
    NoMoveNeeded,
    Moved { from: Rect, to: Rect },
    MoveFailed(Vec<LayoutError>),
}

#[derive(Debug)]
pub struct WindowReport {
    pub owner_name: String,
    pub title: String,
    pub outcome: RestoreOutcome,
}

#[derive(Debug, Default)]
pub struct RestoreReport {
    /// In snapshot order.
    pub windows: Vec<WindowReport>,
}

impl RestoreReport {
    pub fn counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
        for w in &self.windows {
            *counts.entry(<&'static str>::from(&w.outcome)).or_default() += 1;
        }
        counts
    }

    pub fn moved(&self) -> usize {
        self.windows
            .iter()
            .filter(|w| matches!(w.outcome, RestoreOutcome::Moved { .. }))
            .count()
    }
}

pub(crate) fn short_title(title: &str) -> String {
    if title.chars().count() <= MAX_LOGGED_TITLE {
        return title.to_string();
    }
    let mut short: String = title.chars().take(MAX_LOGGED_TITLE).collect();
    short.push_str("...");
    short
}

pub struct Restorer<'a, A> {
    settings: &'a RestoreSettings,
    ax: &'a A,
    settle: Box<dyn Fn(Duration) + 'a>,
}

impl<'a, A: Accessibility> Restorer<'a, A> {
    pub fn new(settings: &'a RestoreSettings, ax: &'a A) -> Self {
        Restorer {
            settings,
            ax,
            settle: Box::new(thread::sleep),
        }
    }

    /// Replaces the pause taken after each move that changed something.
    pub fn with_settle(mut self, settle: impl Fn(Duration) + 'a) -> Self {
        self.settle = Box::new(settle);
        self
    }

    /// Walks every window in the snapshot once. Failures are recorded per
    /// window and never stop the run.
    pub fn run(&self, layout: &SavedLayout, snapshot: &Snapshot) -> RestoreReport {
        if layout.is_empty() {
            info!("Saved layout is empty; nothing to restore");
            return RestoreReport::default();
        }

        let windows = snapshot
            .windows
            .iter()
            .map(|window| {
                let _span = debug_span!(
                    "window",
                    owner = %window.owner_name,
                    title = %short_title(&window.title)
                )
                .entered();
                WindowReport {
                    owner_name: window.owner_name.clone(),
                    title: window.title.clone(),
                    outcome: self.restore_window(window, layout, &snapshot.screens),
                }
            })
            .collect();

        RestoreReport { windows }
    }

    fn restore_window(
        &self,
        window: &WindowServerInfo,
        layout: &SavedLayout,
        screens: &ScreenSet,
    ) -> RestoreOutcome {
        let (saved, confirmed) = match match_window(window, &layout.windows, self.ax) {
            Ok(WindowMatch::NoMatch) => {
                debug!("no saved entry");
                return RestoreOutcome::NoMatch;
            }
            Ok(WindowMatch::Unconfirmed(_)) => {
                debug!("matched a saved entry but found no accessibility window at {:?}", window.bounds);
                return RestoreOutcome::Unconfirmed;
            }
            Ok(WindowMatch::Confirmed(saved, confirmed)) => (saved, confirmed),
            Err(e) => {
                warn!("{e}");
                return RestoreOutcome::QueryFailed(e);
            }
        };

        let desired = match desired_frame(saved, layout, screens) {
            Ok(desired) => desired,
            Err(LayoutError::ScreenNotFound(id)) => {
                warn!(
                    "Skipping [{}]{}: display {id} is not connected",
                    window.owner_name,
                    short_title(&window.title)
                );
                return RestoreOutcome::ScreenNotFound(id);
            }
            Err(e) => {
                error!("{e}");
                return RestoreOutcome::MoveFailed(vec![e]);
            }
        };

        let current = confirmed.frame;
        if !needs_move(&current, &desired, self.settings) {
            debug!("No need to move [{}]{}", window.owner_name, short_title(&window.title));
            return RestoreOutcome::NoMoveNeeded;
        }

        info!(
            "Moving [{}]{} from [{},{}], [{}x{}] to [{},{}], [{}x{}]",
            window.owner_name,
            short_title(&window.title),
            current.origin.x,
            current.origin.y,
            current.size.width,
            current.size.height,
            desired.origin.x,
            desired.origin.y,
            desired.size.width,
            desired.size.height,
        );

        let write_failed = |attribute: &'static str, source: ax::Error| {
            let err = LayoutError::AutomationWriteFailed {
                attribute,
                owner: window.owner_name.clone(),
                title: short_title(&window.title),
                source,
            };
            error!("{err}");
            err
        };

        let mut errors = Vec::new();
        let mut wrote = false;
        match confirmed.handle.set_position(desired.origin) {
            Ok(()) => wrote = true,
            Err(e) => errors.push(write_failed("position", e)),
        }
        match confirmed.handle.set_size(desired.size) {
            Ok(()) => wrote = true,
            Err(e) => errors.push(write_failed("size", e)),
        }

        let delay = self.settings.settle_delay();
        if wrote && !delay.is_zero() {
            (self.settle)(delay);
        }

        if errors.is_empty() {
            RestoreOutcome::Moved { from: current, to: desired }
        } else {
            RestoreOutcome::MoveFailed(errors)
        }
    }
}
