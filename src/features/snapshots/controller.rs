//! Snapshots Controller
//!
//! One snapshot visualization at a time, cached per view.

use tracing::debug;

use crate::app::page::{Effects, PageModel};
use crate::domain::mode::{DisplayMode, SnapshotView};
use crate::domain::stats::Extrema;
use crate::features::mode_select;
use crate::services::{Completion, RequestTag};
use crate::state::mode_state::{CachedDataset, ModeState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotsAction {
    SelectMode(SnapshotView),
}

/// Snapshot page model
#[derive(Debug, Clone)]
pub struct SnapshotsPage {
    modes: ModeState,
}

impl Default for SnapshotsPage {
    fn default() -> Self {
        Self {
            modes: ModeState::new(DisplayMode::Snapshot(SnapshotView::default())),
        }
    }
}

impl SnapshotsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_view(&self) -> SnapshotView {
        match self.modes.active() {
            DisplayMode::Snapshot(view) => view,
            _ => SnapshotView::default(),
        }
    }

    /// Dataset of the active view, once it has arrived
    pub fn dataset(&self) -> Option<&CachedDataset> {
        self.modes.active_dataset()
    }

    /// Extrema of the active dataset (color range of the heatmaps)
    pub fn extrema(&self) -> Extrema {
        self.dataset().map(|cached| cached.extrema).unwrap_or_default()
    }

    pub fn modes(&self) -> &ModeState {
        &self.modes
    }
}

impl PageModel for SnapshotsPage {
    type Action = SnapshotsAction;

    fn name(&self) -> &'static str {
        "snapshots"
    }

    fn on_mount(&mut self) -> Effects {
        let mode = self.modes.active();
        mode_select::select(&mut self.modes, mode)
    }

    fn on_action(&mut self, action: SnapshotsAction) -> Effects {
        match action {
            SnapshotsAction::SelectMode(view) => {
                mode_select::select(&mut self.modes, DisplayMode::Snapshot(view))
            }
        }
    }

    fn on_completion(&mut self, completion: Completion) -> Effects {
        match completion.tag {
            RequestTag::Mode(mode) => {
                mode_select::complete(&mut self.modes, mode, completion.resource, completion.result)
            }
            other => {
                debug!("Snapshots page ignoring {:?}", other);
                Effects::none()
            }
        }
    }
}
