//! Mode - Display Modes per Page

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::layer::LayerType;

/// Visualizations offered on the snapshot page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotView {
    #[default]
    VoltageHeatmap,
    VoltageByDistance,
    VoltageDistribution,
    LineLoadingHeatmap,
    XfmrLoadingHeatmap,
}

impl SnapshotView {
    pub const ALL: [SnapshotView; 5] = [
        SnapshotView::VoltageHeatmap,
        SnapshotView::VoltageByDistance,
        SnapshotView::VoltageDistribution,
        SnapshotView::LineLoadingHeatmap,
        SnapshotView::XfmrLoadingHeatmap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotView::VoltageHeatmap => "voltage_heatmap",
            SnapshotView::VoltageByDistance => "voltage_by_distance",
            SnapshotView::VoltageDistribution => "voltage_distribution",
            SnapshotView::LineLoadingHeatmap => "line_loading_heatmap",
            SnapshotView::XfmrLoadingHeatmap => "xfmr_loading_heatmap",
        }
    }

    /// Path segment under `/snapshots`
    pub fn endpoint(&self) -> &'static str {
        match self {
            SnapshotView::VoltageHeatmap => "voltage",
            SnapshotView::VoltageByDistance => "voltage-by-distance",
            SnapshotView::VoltageDistribution => "voltage-distribution",
            SnapshotView::LineLoadingHeatmap => "line_loading",
            SnapshotView::XfmrLoadingHeatmap => "xfmr_loading",
        }
    }

    /// Map views carry geolocated points; the others are chart series
    pub fn is_map(&self) -> bool {
        !matches!(
            self,
            SnapshotView::VoltageByDistance | SnapshotView::VoltageDistribution
        )
    }
}

/// Risk metric views shared by the metrics and scenario pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricView {
    /// SARDI system indices
    System,
    Nvri,
    Llri,
    Tlri,
}

impl MetricView {
    pub const ALL: [MetricView; 4] = [
        MetricView::System,
        MetricView::Nvri,
        MetricView::Llri,
        MetricView::Tlri,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricView::System => "system",
            MetricView::Nvri => "nvri",
            MetricView::Llri => "llri",
            MetricView::Tlri => "tlri",
        }
    }

    /// The risk layer this view plots, if any
    pub fn layer(&self) -> Option<LayerType> {
        match self {
            MetricView::System => None,
            MetricView::Nvri => Some(LayerType::Nvri),
            MetricView::Llri => Some(LayerType::Llri),
            MetricView::Tlri => Some(LayerType::Tlri),
        }
    }
}

/// The currently selected visualization within a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "page", content = "view", rename_all = "lowercase")]
pub enum DisplayMode {
    Snapshot(SnapshotView),
    Metrics(MetricView),
    Scenario(MetricView),
}

impl DisplayMode {
    /// Menu value of the mode (unique within its page)
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Snapshot(view) => view.as_str(),
            DisplayMode::Metrics(view) | DisplayMode::Scenario(view) => view.as_str(),
        }
    }

    /// All modes offered on the same page as this one
    pub fn siblings(&self) -> Vec<DisplayMode> {
        match self {
            DisplayMode::Snapshot(_) => SnapshotView::ALL.into_iter().map(DisplayMode::Snapshot).collect(),
            DisplayMode::Metrics(_) => MetricView::ALL.into_iter().map(DisplayMode::Metrics).collect(),
            DisplayMode::Scenario(_) => MetricView::ALL.into_iter().map(DisplayMode::Scenario).collect(),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let page = match self {
            DisplayMode::Snapshot(_) => "snapshot",
            DisplayMode::Metrics(_) => "metrics",
            DisplayMode::Scenario(_) => "scenario",
        };
        write!(f, "{}/{}", page, self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names() {
        assert_eq!(DisplayMode::Snapshot(SnapshotView::XfmrLoadingHeatmap).as_str(), "xfmr_loading_heatmap");
        assert_eq!(DisplayMode::Scenario(MetricView::Llri).to_string(), "scenario/llri");
        assert!(!SnapshotView::VoltageDistribution.is_map());
        assert!(SnapshotView::LineLoadingHeatmap.is_map());
    }

    #[test]
    fn test_siblings_stay_on_page() {
        let siblings = DisplayMode::Metrics(MetricView::Nvri).siblings();
        assert_eq!(siblings.len(), 4);
        assert!(siblings.iter().all(|m| matches!(m, DisplayMode::Metrics(_))));
    }
}
