//! Page Models
//!
//! A page is a pure state machine: user actions and fetch completions go in,
//! requests and view events come out. The session does the IO.

use std::fmt;

use crate::domain::mode::DisplayMode;
use crate::domain::payload::MapCenter;
use crate::domain::stats::Extrema;
use crate::error::Error;
use crate::services::{Completion, FetchRequest, Resource};

/// Notification for the rendering layer
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// The active layer set changed; `revision` identifies the new snapshot
    LayersChanged { revision: u64 },
    /// The active metric set changed
    MetricsChanged { revision: u64 },
    /// The active mode has a dataset to render
    DatasetReady { mode: DisplayMode, extrema: Extrema },
    MapCenterChanged(MapCenter),
    /// The line network under the risk markers arrived
    EdgesChanged,
    /// A request failed; its collection or cache entry is unchanged
    FetchFailed { resource: Resource, message: String },
}

impl ViewEvent {
    pub fn fetch_failed(resource: Resource, err: &Error) -> Self {
        ViewEvent::FetchFailed {
            resource,
            message: err.to_string(),
        }
    }
}

/// What a page step asks the session to do
#[derive(Debug, Default, PartialEq)]
pub struct Effects {
    pub requests: Vec<FetchRequest>,
    pub events: Vec<ViewEvent>,
}

impl Effects {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn request(request: FetchRequest) -> Self {
        Self {
            requests: vec![request],
            events: Vec::new(),
        }
    }

    pub fn event(event: ViewEvent) -> Self {
        Self {
            requests: Vec::new(),
            events: vec![event],
        }
    }

    pub fn push_request(&mut self, request: FetchRequest) {
        self.requests.push(request);
    }

    pub fn push_event(&mut self, event: ViewEvent) {
        self.events.push(event);
    }

    pub fn merge(&mut self, other: Effects) {
        self.requests.extend(other.requests);
        self.events.extend(other.events);
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty() && self.events.is_empty()
    }
}

/// State container for one dashboard page
pub trait PageModel {
    /// User interaction the page understands
    type Action: fmt::Debug;

    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Requests to issue when the page is shown
    fn on_mount(&mut self) -> Effects;

    fn on_action(&mut self, action: Self::Action) -> Effects;

    fn on_completion(&mut self, completion: Completion) -> Effects;
}
