//! Resources
//!
//! Every backend resource the engine requests, and the path it lives at.

use std::fmt;

use crate::constants::{
    PATH_ASSET_GEOJSONS, PATH_ASSET_METRICS, PATH_MAP_CENTER, PATH_SCENARIO_ASSET_METRICS,
    PATH_SCENARIO_SYSTEM_METRICS, PATH_SNAPSHOTS, PATH_SYSTEM_METRICS, PATH_TIMESERIES_METRICS,
};
use crate::domain::layer::LayerType;
use crate::domain::mode::{DisplayMode, MetricView, SnapshotView};

/// A backend resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Geometry of one layer (asset GeoJSON, or geolocated risk samples)
    LayerGeometry(LayerType),
    /// Bulk per-layer metric summaries, filtered client-side
    AssetMetrics,
    /// Time-series risk index per asset
    TimeseriesMetric(LayerType),
    /// SARDI system gauges
    SystemMetrics,
    /// One snapshot visualization
    Snapshot(SnapshotView),
    /// SARDI metrics compared across scenarios
    ScenarioSystemMetrics,
    /// Asset risk index statistics compared across scenarios
    ScenarioAssetMetric(LayerType),
    /// Map center
    MapCenter,
}

/// How a resource's body is shaped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceClass {
    Geometry,
    AssetMetrics,
    Points,
    Series,
    Gauges,
    MapCenter,
}

impl Resource {
    /// The resource a display mode renders
    pub fn for_mode(mode: DisplayMode) -> Self {
        match mode {
            DisplayMode::Snapshot(view) => Resource::Snapshot(view),
            DisplayMode::Metrics(MetricView::System) => Resource::SystemMetrics,
            DisplayMode::Metrics(MetricView::Nvri) => Resource::TimeseriesMetric(LayerType::Nvri),
            DisplayMode::Metrics(MetricView::Llri) => Resource::TimeseriesMetric(LayerType::Llri),
            DisplayMode::Metrics(MetricView::Tlri) => Resource::TimeseriesMetric(LayerType::Tlri),
            DisplayMode::Scenario(MetricView::System) => Resource::ScenarioSystemMetrics,
            DisplayMode::Scenario(MetricView::Nvri) => Resource::ScenarioAssetMetric(LayerType::Nvri),
            DisplayMode::Scenario(MetricView::Llri) => Resource::ScenarioAssetMetric(LayerType::Llri),
            DisplayMode::Scenario(MetricView::Tlri) => Resource::ScenarioAssetMetric(LayerType::Tlri),
        }
    }

    /// Request path relative to the base URL
    pub fn path(&self) -> String {
        match self {
            Resource::LayerGeometry(layer) if layer.is_risk_index() => {
                format!("{}/{}", PATH_TIMESERIES_METRICS, layer.as_str())
            }
            Resource::LayerGeometry(layer) => format!("{}/{}", PATH_ASSET_GEOJSONS, layer.as_str()),
            Resource::AssetMetrics => PATH_ASSET_METRICS.to_string(),
            Resource::TimeseriesMetric(layer) => {
                format!("{}/{}", PATH_TIMESERIES_METRICS, layer.as_str())
            }
            Resource::SystemMetrics => PATH_SYSTEM_METRICS.to_string(),
            Resource::Snapshot(view) => format!("{}/{}", PATH_SNAPSHOTS, view.endpoint()),
            Resource::ScenarioSystemMetrics => PATH_SCENARIO_SYSTEM_METRICS.to_string(),
            Resource::ScenarioAssetMetric(layer) => format!(
                "{}/{}",
                PATH_SCENARIO_ASSET_METRICS,
                layer.as_str().to_ascii_uppercase()
            ),
            Resource::MapCenter => PATH_MAP_CENTER.to_string(),
        }
    }

    pub fn class(&self) -> ResourceClass {
        match self {
            Resource::LayerGeometry(_) => ResourceClass::Geometry,
            Resource::AssetMetrics => ResourceClass::AssetMetrics,
            Resource::TimeseriesMetric(_) => ResourceClass::Points,
            Resource::SystemMetrics => ResourceClass::Gauges,
            Resource::Snapshot(view) if view.is_map() => ResourceClass::Points,
            Resource::Snapshot(_) => ResourceClass::Series,
            Resource::ScenarioSystemMetrics | Resource::ScenarioAssetMetric(_) => {
                ResourceClass::Series
            }
            Resource::MapCenter => ResourceClass::MapCenter,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
