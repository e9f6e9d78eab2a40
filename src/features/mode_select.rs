//! Mode selection glue shared by the mode-driven pages

use tracing::debug;

use crate::app::page::{Effects, ViewEvent};
use crate::domain::mode::DisplayMode;
use crate::error::Result;
use crate::services::{Payload, Resource};
use crate::state::mode_state::{ModeOutcome, ModeSelection, ModeState};

/// Select `mode`, announcing a cache hit or requesting the dataset
pub(crate) fn select(modes: &mut ModeState, mode: DisplayMode) -> Effects {
    match modes.select(mode) {
        ModeSelection::Cached(cached) => Effects::event(ViewEvent::DatasetReady {
            mode,
            extrema: cached.extrema,
        }),
        ModeSelection::Fetch(request) => Effects::request(request),
        ModeSelection::Pending => Effects::none(),
    }
}

/// Request every uncached sibling of the active mode
pub(crate) fn preload(modes: &mut ModeState) -> Effects {
    let mut effects = Effects::none();
    for mode in modes.active().siblings() {
        if let Some(request) = modes.prefetch(mode) {
            effects.push_request(request);
        }
    }
    effects
}

/// Apply a mode completion; only the active mode is announced
pub(crate) fn complete(
    modes: &mut ModeState,
    mode: DisplayMode,
    resource: Resource,
    result: Result<Payload>,
) -> Effects {
    let result = result.and_then(|payload| payload.into_dataset(&resource));
    match modes.apply(mode, result) {
        ModeOutcome::Ready { dataset, visible: true } => Effects::event(ViewEvent::DatasetReady {
            mode,
            extrema: dataset.extrema,
        }),
        ModeOutcome::Ready { visible: false, .. } => {
            debug!("Cached {} while {} is active", mode, modes.active());
            Effects::none()
        }
        ModeOutcome::Failed(err) if mode == modes.active() => {
            Effects::event(ViewEvent::fetch_failed(resource, &err))
        }
        ModeOutcome::Failed(err) => {
            debug!("Dropping failure for inactive mode {}: {}", mode, err);
            Effects::none()
        }
    }
}
