//! Scenarios Controller
//!
//! Compares SARDI and asset risk statistics across scenarios as chart series.

use tracing::debug;

use crate::app::page::{Effects, PageModel};
use crate::domain::mode::{DisplayMode, MetricView};
use crate::domain::payload::{ChartSeries, Dataset};
use crate::features::mode_select;
use crate::services::{Completion, RequestTag};
use crate::state::mode_state::{CachedDataset, ModeState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenariosAction {
    SelectMode(MetricView),
}

#[derive(Debug, Clone)]
pub struct ScenariosPage {
    modes: ModeState,
}

impl Default for ScenariosPage {
    fn default() -> Self {
        Self {
            modes: ModeState::new(DisplayMode::Scenario(MetricView::System)),
        }
    }
}

impl ScenariosPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_view(&self) -> MetricView {
        match self.modes.active() {
            DisplayMode::Scenario(view) => view,
            _ => MetricView::System,
        }
    }

    pub fn dataset(&self) -> Option<&CachedDataset> {
        self.modes.active_dataset()
    }

    /// Chart series of the active view
    pub fn series(&self) -> &[ChartSeries] {
        match self.dataset().map(|cached| cached.data.as_ref()) {
            Some(Dataset::Series(series)) => series,
            _ => &[],
        }
    }

    pub fn modes(&self) -> &ModeState {
        &self.modes
    }
}

impl PageModel for ScenariosPage {
    type Action = ScenariosAction;

    fn name(&self) -> &'static str {
        "scenarios"
    }

    fn on_mount(&mut self) -> Effects {
        let mode = self.modes.active();
        mode_select::select(&mut self.modes, mode)
    }

    fn on_action(&mut self, action: ScenariosAction) -> Effects {
        match action {
            ScenariosAction::SelectMode(view) => {
                mode_select::select(&mut self.modes, DisplayMode::Scenario(view))
            }
        }
    }

    fn on_completion(&mut self, completion: Completion) -> Effects {
        match completion.tag {
            RequestTag::Mode(mode) => {
                mode_select::complete(&mut self.modes, mode, completion.resource, completion.result)
            }
            other => {
                debug!("Scenarios page ignoring {:?}", other);
                Effects::none()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Session;
    use crate::domain::layer::LayerType;
    use crate::services::Resource;
    use crate::services::scripted::ScriptedSource;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_views_map_to_scenario_endpoints() {
        let mut page = ScenariosPage::new();
        assert_eq!(page.on_mount().requests[0].resource, Resource::ScenarioSystemMetrics);

        let request = page.on_action(ScenariosAction::SelectMode(MetricView::Tlri)).requests[0];
        assert_eq!(request.resource, Resource::ScenarioAssetMetric(LayerType::Tlri));
        assert_eq!(request.resource.path(), "/scenarios/timeseries_asset/TLRI");
        assert!(page.series().is_empty());
    }

    #[tokio::test]
    async fn test_series_loaded_through_session() {
        let source = Arc::new(ScriptedSource::new());
        source.respond(
            "/scenarios/system_metrics",
            json!([
                {"x": ["base", "pv_50"], "y": [1.2, 2.4], "name": "SARDI_voltage", "type": "bar"},
                {"x": ["base", "pv_50"], "y": [0.1, null], "name": "SARDI_line", "type": "bar"}
            ]),
        );
        let mut session = Session::new(ScenariosPage::new(), source);
        session.mount();
        session.settle().await;

        let page = session.page();
        assert_eq!(page.series().len(), 2);
        assert_eq!(page.series()[1].y, vec![Some(0.1), None]);
        let extrema = page.dataset().expect("dataset").extrema;
        assert_eq!(extrema.max(), Some(2.4));
        assert_eq!(extrema.min(), Some(0.1));
    }
}
