//! Fetch Events
//!
//! Requests emitted by page state and the completions that come back from the
//! fetch tasks. The tag carries whatever the page needs to decide whether a
//! completion is still wanted.

use crate::domain::layer::LayerType;
use crate::domain::mode::DisplayMode;
use crate::error::Result;
use crate::services::adapter::Payload;
use crate::services::resource::Resource;

/// Identity of one toggle-on; completions carrying an older ticket are stale
pub type Ticket = u64;

/// What a request is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestTag {
    /// Geometry for a toggled-on layer
    Geometry { layer: LayerType, ticket: Ticket },
    /// Bulk metrics, to be filtered to one toggled-on layer
    LayerMetrics { layer: LayerType, ticket: Ticket },
    /// Dataset for a display mode
    Mode(DisplayMode),
    /// Map center for the viewport
    MapCenter,
    /// Line network drawn under risk markers
    Edges,
}

/// A fetch the session must issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub tag: RequestTag,
    pub resource: Resource,
}

impl FetchRequest {
    pub fn new(tag: RequestTag, resource: Resource) -> Self {
        Self { tag, resource }
    }
}

/// A resolved fetch
#[derive(Debug)]
pub struct Completion {
    pub tag: RequestTag,
    pub resource: Resource,
    pub result: Result<Payload>,
}

impl Completion {
    pub fn new(request: FetchRequest, result: Result<Payload>) -> Self {
        Self {
            tag: request.tag,
            resource: request.resource,
            result,
        }
    }
}
