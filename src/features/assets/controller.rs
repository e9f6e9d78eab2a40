//! Assets Controller
//!
//! Layer checkboxes over the registry. A toggle records intent in the toggle
//! store, then the view model reconciles and asks for the layer's geometry and
//! the bulk metrics.

use tracing::debug;

use crate::app::page::{Effects, PageModel, ViewEvent};
use crate::domain::layer::{LayerRegistry, LayerSpec, LayerType};
use crate::services::{Completion, RequestTag};
use crate::state::toggle_state::ToggleState;
use crate::state::view_model::{MergeOutcome, ViewModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetsAction {
    SetToggle(LayerType, bool),
}

/// Assets page model
#[derive(Debug, Default)]
pub struct AssetsPage {
    toggles: ToggleState,
    view: ViewModel,
}

impl AssetsPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layers offered as checkboxes
    pub fn layers() -> impl Iterator<Item = &'static LayerSpec> {
        LayerRegistry::toggleable()
    }

    /// Record a toggle and reconcile the view
    ///
    /// Re-sending the current value changes nothing.
    pub fn set_toggle(&mut self, layer: LayerType, enabled: bool) -> Effects {
        if !self.toggles.set(layer, enabled) {
            debug!("Toggle {} already {}", layer, enabled);
            return Effects::none();
        }

        let reconciliation = self.view.reconcile(layer, enabled);
        let mut effects = Effects {
            requests: reconciliation.requests,
            events: Vec::new(),
        };
        if reconciliation.layers_changed {
            effects.push_event(self.layers_changed());
        }
        if reconciliation.metrics_changed {
            effects.push_event(self.metrics_changed());
        }
        effects
    }

    pub fn toggles(&self) -> &ToggleState {
        &self.toggles
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    fn layers_changed(&self) -> ViewEvent {
        ViewEvent::LayersChanged {
            revision: self.view.revision(),
        }
    }

    fn metrics_changed(&self) -> ViewEvent {
        ViewEvent::MetricsChanged {
            revision: self.view.revision(),
        }
    }
}

impl PageModel for AssetsPage {
    type Action = AssetsAction;

    fn name(&self) -> &'static str {
        "assets"
    }

    fn on_mount(&mut self) -> Effects {
        // every layer starts off
        Effects::none()
    }

    fn on_action(&mut self, action: AssetsAction) -> Effects {
        match action {
            AssetsAction::SetToggle(layer, enabled) => self.set_toggle(layer, enabled),
        }
    }

    fn on_completion(&mut self, completion: Completion) -> Effects {
        let Completion { tag, resource, result } = completion;
        let (outcome, changed) = match tag {
            RequestTag::Geometry { layer, ticket } => {
                let result = result.and_then(|payload| payload.into_geometry(&resource));
                (self.view.apply_geometry(layer, ticket, result), self.layers_changed())
            }
            RequestTag::LayerMetrics { layer, ticket } => {
                let result = result.and_then(|payload| payload.into_asset_metrics(&resource));
                (self.view.apply_metrics(layer, ticket, result), self.metrics_changed())
            }
            other => {
                debug!("Assets page ignoring {:?}", other);
                return Effects::none();
            }
        };

        match outcome {
            MergeOutcome::Inserted => Effects::event(changed),
            MergeOutcome::EmptyMatch | MergeOutcome::Stale => Effects::none(),
            MergeOutcome::Failed(err) => Effects::event(ViewEvent::fetch_failed(resource, &err)),
        }
    }
}
