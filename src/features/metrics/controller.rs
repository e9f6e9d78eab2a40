//! Metrics Controller
//!
//! Risk index maps and SARDI gauges. On mount the page also needs the map
//! center and the line network drawn under the node markers.

use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::app::page::{Effects, PageModel, ViewEvent};
use crate::domain::layer::LayerType;
use crate::domain::mode::{DisplayMode, MetricView};
use crate::domain::payload::MapCenter;
use crate::domain::stats::{Extrema, loading_risk_color, node_risk_radius};
use crate::features::mode_select;
use crate::services::{Completion, FetchRequest, RequestTag, Resource};
use crate::state::mode_state::{CachedDataset, ModeState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsAction {
    SelectMode(MetricView),
    /// Load every view up front so switching never waits
    Preload,
}

const LLRI: DisplayMode = DisplayMode::Metrics(MetricView::Llri);

/// Metrics page model
#[derive(Debug, Clone)]
pub struct MetricsPage {
    modes: ModeState,
    center: MapCenter,
    edges: Option<Arc<Value>>,
}

impl Default for MetricsPage {
    fn default() -> Self {
        Self {
            modes: ModeState::new(DisplayMode::Metrics(MetricView::Nvri)),
            center: MapCenter::default(),
            edges: None,
        }
    }
}

impl MetricsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_view(&self) -> MetricView {
        match self.modes.active() {
            DisplayMode::Metrics(view) => view,
            _ => MetricView::Nvri,
        }
    }

    pub fn dataset(&self) -> Option<&CachedDataset> {
        self.modes.active_dataset()
    }

    /// Viewport center; `(0, 0)` until the backend answers
    pub fn center(&self) -> MapCenter {
        self.center
    }

    /// Line network geometry, once loaded
    pub fn edges(&self) -> Option<&Value> {
        self.edges.as_deref()
    }

    /// Extrema of the LLRI samples, available once that view has been loaded
    pub fn llri_extrema(&self) -> Extrema {
        self.modes
            .cached(LLRI)
            .map(|cached| cached.extrema)
            .unwrap_or_default()
    }

    /// Maximum LLRI as shown on the color legend
    pub fn max_llri(&self) -> String {
        self.llri_extrema().max_label()
    }

    /// Line color for an LLRI sample
    pub fn llri_color(&self, value: f64) -> [u8; 3] {
        loading_risk_color(value, &self.llri_extrema())
    }

    /// Marker radius for an NVRI/TLRI sample
    pub fn node_radius(&self, value: f64) -> f64 {
        node_risk_radius(value)
    }

    pub fn modes(&self) -> &ModeState {
        &self.modes
    }
}

impl PageModel for MetricsPage {
    type Action = MetricsAction;

    fn name(&self) -> &'static str {
        "metrics"
    }

    fn on_mount(&mut self) -> Effects {
        let mut effects = Effects::request(FetchRequest::new(RequestTag::MapCenter, Resource::MapCenter));
        effects.push_request(FetchRequest::new(
            RequestTag::Edges,
            Resource::LayerGeometry(LayerType::Lines),
        ));
        let mode = self.modes.active();
        effects.merge(mode_select::select(&mut self.modes, mode));
        effects
    }

    fn on_action(&mut self, action: MetricsAction) -> Effects {
        match action {
            MetricsAction::SelectMode(view) => {
                mode_select::select(&mut self.modes, DisplayMode::Metrics(view))
            }
            MetricsAction::Preload => mode_select::preload(&mut self.modes),
        }
    }

    fn on_completion(&mut self, completion: Completion) -> Effects {
        let Completion { tag, resource, result } = completion;
        match tag {
            RequestTag::Mode(mode) => mode_select::complete(&mut self.modes, mode, resource, result),
            RequestTag::MapCenter => match result.and_then(|payload| payload.into_map_center(&resource)) {
                Ok(center) => {
                    self.center = center;
                    Effects::event(ViewEvent::MapCenterChanged(center))
                }
                Err(err) => Effects::event(ViewEvent::fetch_failed(resource, &err)),
            },
            RequestTag::Edges => match result.and_then(|payload| payload.into_geometry(&resource)) {
                Ok(edges) => {
                    self.edges = Some(Arc::new(edges));
                    Effects::event(ViewEvent::EdgesChanged)
                }
                Err(err) => Effects::event(ViewEvent::fetch_failed(resource, &err)),
            },
            other => {
                debug!("Metrics page ignoring {:?}", other);
                Effects::none()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payload::{Coordinates, Dataset, MetricPoint};
    use crate::error::Error;
    use crate::services::Payload;
    use serde_json::json;

    fn llri(values: &[f64]) -> Payload {
        Payload::Dataset(Dataset::Points(
            values
                .iter()
                .map(|v| MetricPoint {
                    coordinates: Coordinates::Path(vec![[80.2, 13.0], [80.3, 13.1]]),
                    name: Some("Line.l1".to_string()),
                    data: Some(*v),
                    weight: None,
                })
                .collect(),
        ))
    }

    #[test]
    fn test_mount_requests_center_edges_and_default_view() {
        let mut page = MetricsPage::new();
        let effects = page.on_mount();
        let resources: Vec<Resource> = effects.requests.iter().map(|r| r.resource).collect();
        assert_eq!(
            resources,
            vec![
                Resource::MapCenter,
                Resource::LayerGeometry(LayerType::Lines),
                Resource::TimeseriesMetric(LayerType::Nvri),
            ]
        );
        assert_eq!(page.center(), MapCenter::default());
        assert_eq!(page.max_llri(), "unavailable");
    }

    #[test]
    fn test_center_and_edges_arrive() {
        let mut page = MetricsPage::new();
        let effects = page.on_mount();

        let center = MapCenter {
            longitude: 80.27,
            latitude: 13.08,
        };
        let events = page
            .on_completion(Completion::new(effects.requests[0], Ok(Payload::MapCenter(center))))
            .events;
        assert_eq!(events, vec![ViewEvent::MapCenterChanged(center)]);
        assert_eq!(page.center(), center);

        let events = page
            .on_completion(Completion::new(
                effects.requests[1],
                Ok(Payload::Geometry(json!({"type": "FeatureCollection", "features": []}))),
            ))
            .events;
        assert_eq!(events, vec![ViewEvent::EdgesChanged]);
        assert!(page.edges().is_some());
    }

    #[test]
    fn test_center_failure_keeps_default() {
        let mut page = MetricsPage::new();
        let request = page.on_mount().requests[0];
        let effects = page.on_completion(Completion::new(
            request,
            Err(Error::Fetch {
                path: "/map_center".to_string(),
                message: "connection refused".to_string(),
            }),
        ));
        assert!(matches!(effects.events.as_slice(), [ViewEvent::FetchFailed { .. }]));
        assert_eq!(page.center(), MapCenter::default());
    }

    #[test]
    fn test_preload_requests_remaining_views() {
        let mut page = MetricsPage::new();
        page.on_mount();
        let effects = page.on_action(MetricsAction::Preload);
        let resources: Vec<Resource> = effects.requests.iter().map(|r| r.resource).collect();
        // nvri is already in flight from mount
        assert_eq!(
            resources,
            vec![
                Resource::SystemMetrics,
                Resource::TimeseriesMetric(LayerType::Llri),
                Resource::TimeseriesMetric(LayerType::Tlri),
            ]
        );

        // llri lands off-screen: cached silently, legend updated
        let llri_request = effects.requests[1];
        let effects = page.on_completion(Completion::new(llri_request, Ok(llri(&[0.5, 2.0]))));
        assert!(effects.is_empty());
        assert_eq!(page.max_llri(), "2.00");
    }

    #[test]
    fn test_llri_scale_from_loaded_view() {
        let mut page = MetricsPage::new();
        let request = page.on_action(MetricsAction::SelectMode(MetricView::Llri)).requests[0];
        page.on_completion(Completion::new(request, Ok(llri(&[0.25, 1.5, 3.0]))));

        assert_eq!(page.active_view(), MetricView::Llri);
        assert_eq!(page.max_llri(), "3.00");
        assert_eq!(page.llri_color(3.0), [255, 140, 255]);
        assert_eq!(page.llri_color(1.5), [127, 140, 255]);
        assert_eq!(page.node_radius(0.5), 10.0);
    }
}
