//! ViewModel - Active Layers and Metric Summaries
//!
//! Merges fetch completions into two ordered collections keyed by layer type.
//! Each toggle-on gets a fresh ticket; completions carrying any other ticket
//! are dropped, so a late answer for a layer that was switched off (or off and
//! on again) never lands.

use ahash::AHashMap;
use hashlink::LinkedHashMap;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::domain::layer::LayerType;
use crate::domain::payload::{AssetMetricsRecord, GeoFeature, MetricSummary};
use crate::error::{Error, Result};
use crate::services::{FetchRequest, RequestTag, Resource, Ticket};

/// Fetch bookkeeping for a layer that is currently switched on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LiveSlot {
    ticket: Ticket,
    geometry_pending: bool,
    metrics_pending: bool,
}

/// Result of merging one completion
#[derive(Debug)]
pub enum MergeOutcome {
    /// Entry appended to its collection
    Inserted,
    /// The bulk metrics had no entry for the layer
    EmptyMatch,
    /// The completion belongs to a superseded toggle and was dropped
    Stale,
    /// The fetch failed; the collection is unchanged
    Failed(Error),
}

/// What a reconcile call changed or asked for
#[derive(Debug, Default, PartialEq)]
pub struct Reconciliation {
    pub requests: Vec<FetchRequest>,
    pub layers_changed: bool,
    pub metrics_changed: bool,
}

/// Active geographic layers and their metric summaries
#[derive(Debug, Default)]
pub struct ViewModel {
    layers: LinkedHashMap<LayerType, Arc<GeoFeature>>,
    metrics: LinkedHashMap<LayerType, Arc<MetricSummary>>,
    live: AHashMap<LayerType, LiveSlot>,
    next_ticket: Ticket,
    revision: u64,
}

impl ViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the collections in line with a toggle
    pub fn reconcile(&mut self, layer: LayerType, enabled: bool) -> Reconciliation {
        if enabled {
            if self.live.contains_key(&layer) {
                return Reconciliation::default();
            }

            self.next_ticket += 1;
            let ticket = self.next_ticket;
            self.live.insert(
                layer,
                LiveSlot {
                    ticket,
                    geometry_pending: true,
                    metrics_pending: true,
                },
            );
            debug!("Layer {} on, ticket {}", layer, ticket);

            return Reconciliation {
                requests: vec![
                    FetchRequest::new(
                        RequestTag::Geometry { layer, ticket },
                        Resource::LayerGeometry(layer),
                    ),
                    FetchRequest::new(RequestTag::LayerMetrics { layer, ticket }, Resource::AssetMetrics),
                ],
                ..Default::default()
            };
        }

        self.live.remove(&layer);
        let layers_changed = self.layers.remove(&layer).is_some();
        let metrics_changed = self.metrics.remove(&layer).is_some();
        if layers_changed || metrics_changed {
            self.revision += 1;
        }
        debug!("Layer {} off", layer);

        Reconciliation {
            requests: Vec::new(),
            layers_changed,
            metrics_changed,
        }
    }

    /// Merge a geometry completion
    pub fn apply_geometry(&mut self, layer: LayerType, ticket: Ticket, result: Result<Value>) -> MergeOutcome {
        let Some(slot) = self.live.get_mut(&layer).filter(|slot| slot.ticket == ticket) else {
            debug!("Dropping stale geometry for {} (ticket {})", layer, ticket);
            return MergeOutcome::Stale;
        };
        slot.geometry_pending = false;

        let collection = match result {
            Ok(collection) => collection,
            Err(err) => return MergeOutcome::Failed(err),
        };
        if self.layers.contains_key(&layer) {
            return MergeOutcome::Stale;
        }

        self.layers
            .insert(layer, Arc::new(GeoFeature { layer, collection }));
        self.revision += 1;
        MergeOutcome::Inserted
    }

    /// Merge a bulk metrics completion, keeping only the entry for `layer`
    pub fn apply_metrics(
        &mut self,
        layer: LayerType,
        ticket: Ticket,
        result: Result<Vec<AssetMetricsRecord>>,
    ) -> MergeOutcome {
        let Some(slot) = self.live.get_mut(&layer).filter(|slot| slot.ticket == ticket) else {
            debug!("Dropping stale metrics for {} (ticket {})", layer, ticket);
            return MergeOutcome::Stale;
        };
        slot.metrics_pending = false;

        let records = match result {
            Ok(records) => records,
            Err(err) => return MergeOutcome::Failed(err),
        };
        let Some(summary) = MetricSummary::select(&records, layer) else {
            debug!("No metrics for {}", layer);
            return MergeOutcome::EmptyMatch;
        };
        if self.metrics.contains_key(&layer) {
            return MergeOutcome::Stale;
        }

        self.metrics.insert(layer, Arc::new(summary));
        self.revision += 1;
        MergeOutcome::Inserted
    }

    // ==================== Getters ====================

    /// Active layers in arrival order
    pub fn layers(&self) -> Vec<Arc<GeoFeature>> {
        self.layers.values().cloned().collect()
    }

    /// Active metric summaries in arrival order
    pub fn metrics(&self) -> Vec<Arc<MetricSummary>> {
        self.metrics.values().cloned().collect()
    }

    pub fn layer_order(&self) -> Vec<LayerType> {
        self.layers.keys().copied().collect()
    }

    pub fn metric_order(&self) -> Vec<LayerType> {
        self.metrics.keys().copied().collect()
    }

    pub fn layer(&self, layer: LayerType) -> Option<&GeoFeature> {
        self.layers.get(&layer).map(Arc::as_ref)
    }

    pub fn metric(&self, layer: LayerType) -> Option<&MetricSummary> {
        self.metrics.get(&layer).map(Arc::as_ref)
    }

    /// Whether any fetch for the layer's current toggle is still outstanding
    pub fn is_pending(&self, layer: LayerType) -> bool {
        self.live
            .get(&layer)
            .is_some_and(|slot| slot.geometry_pending || slot.metrics_pending)
    }

    /// Bumped on every change to either collection
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tickets(reconciliation: &Reconciliation) -> (Ticket, Ticket) {
        let mut geometry = None;
        let mut metrics = None;
        for request in &reconciliation.requests {
            match request.tag {
                RequestTag::Geometry { ticket, .. } => geometry = Some(ticket),
                RequestTag::LayerMetrics { ticket, .. } => metrics = Some(ticket),
                _ => {}
            }
        }
        (geometry.expect("geometry request"), metrics.expect("metrics request"))
    }

    fn bulk_metrics() -> Vec<AssetMetricsRecord> {
        serde_json::from_value(json!([
            {"type": "lines", "data": [{"metric": "total length km", "value": 12.5}]},
            {"type": "loads", "data": [{"metric": "count", "value": 40.0}]}
        ]))
        .expect("records")
    }

    fn geometry(tag: &str) -> Result<Value> {
        Ok(json!({"type": "FeatureCollection", "features": [], "tag": tag}))
    }

    #[test]
    fn test_toggle_on_issues_geometry_and_bulk_metrics() {
        let mut view = ViewModel::new();
        let rec = view.reconcile(LayerType::Lines, true);
        assert_eq!(rec.requests.len(), 2);
        assert_eq!(rec.requests[0].resource, Resource::LayerGeometry(LayerType::Lines));
        assert_eq!(rec.requests[1].resource, Resource::AssetMetrics);
        assert!(view.is_pending(LayerType::Lines));

        // a repeated toggle-on while live issues nothing
        assert!(view.reconcile(LayerType::Lines, true).requests.is_empty());
    }

    #[test]
    fn test_completions_in_either_order() {
        let mut view = ViewModel::new();
        let (g, m) = tickets(&view.reconcile(LayerType::Lines, true));

        assert!(matches!(
            view.apply_metrics(LayerType::Lines, m, Ok(bulk_metrics())),
            MergeOutcome::Inserted
        ));
        assert!(view.layer(LayerType::Lines).is_none());
        assert!(matches!(
            view.apply_geometry(LayerType::Lines, g, geometry("lines")),
            MergeOutcome::Inserted
        ));

        assert_eq!(view.layer_order(), vec![LayerType::Lines]);
        assert_eq!(view.metric(LayerType::Lines).expect("metric").entries[0].value, 12.5);
        assert!(!view.is_pending(LayerType::Lines));
        assert_eq!(view.revision(), 2);
    }

    #[test]
    fn test_empty_match_still_adds_geometry() {
        let mut view = ViewModel::new();
        let (g, m) = tickets(&view.reconcile(LayerType::Buses, true));

        assert!(matches!(
            view.apply_metrics(LayerType::Buses, m, Ok(bulk_metrics())),
            MergeOutcome::EmptyMatch
        ));
        assert!(matches!(
            view.apply_geometry(LayerType::Buses, g, geometry("buses")),
            MergeOutcome::Inserted
        ));
        assert!(view.metrics().is_empty());
        assert_eq!(view.layer_order(), vec![LayerType::Buses]);
    }

    #[test]
    fn test_on_off_on_drops_first_fetch() {
        let mut view = ViewModel::new();
        let (g1, m1) = tickets(&view.reconcile(LayerType::Loads, true));
        view.reconcile(LayerType::Loads, false);
        let (g2, m2) = tickets(&view.reconcile(LayerType::Loads, true));
        assert_ne!(g1, g2);

        // second toggle's answers arrive first, then the stale ones
        assert!(matches!(
            view.apply_geometry(LayerType::Loads, g2, geometry("second")),
            MergeOutcome::Inserted
        ));
        assert!(matches!(
            view.apply_geometry(LayerType::Loads, g1, geometry("first")),
            MergeOutcome::Stale
        ));
        assert!(matches!(
            view.apply_metrics(LayerType::Loads, m1, Ok(bulk_metrics())),
            MergeOutcome::Stale
        ));
        assert!(matches!(
            view.apply_metrics(LayerType::Loads, m2, Ok(bulk_metrics())),
            MergeOutcome::Inserted
        ));

        assert_eq!(view.layers().len(), 1);
        assert_eq!(view.layer(LayerType::Loads).expect("loads").collection["tag"], "second");
        assert_eq!(view.metrics().len(), 1);
    }

    #[test]
    fn test_late_result_after_off_is_dropped() {
        let mut view = ViewModel::new();
        let (g, m) = tickets(&view.reconcile(LayerType::Transformers, true));
        view.reconcile(LayerType::Transformers, false);

        assert!(matches!(
            view.apply_geometry(LayerType::Transformers, g, geometry("late")),
            MergeOutcome::Stale
        ));
        assert!(matches!(
            view.apply_metrics(LayerType::Transformers, m, Ok(bulk_metrics())),
            MergeOutcome::Stale
        ));
        assert!(view.layers().is_empty());
        assert!(!view.is_pending(LayerType::Transformers));
    }

    #[test]
    fn test_removal_preserves_order_of_the_rest() {
        let mut view = ViewModel::new();
        for layer in [LayerType::Loads, LayerType::Buses, LayerType::Lines] {
            let (g, m) = tickets(&view.reconcile(layer, true));
            view.apply_geometry(layer, g, geometry(layer.as_str()));
            view.apply_metrics(layer, m, Ok(bulk_metrics()));
        }
        assert_eq!(
            view.layer_order(),
            vec![LayerType::Loads, LayerType::Buses, LayerType::Lines]
        );
        assert_eq!(view.metric_order(), vec![LayerType::Loads, LayerType::Lines]);

        let rec = view.reconcile(LayerType::Buses, false);
        assert!(rec.layers_changed);
        assert!(!rec.metrics_changed);
        assert_eq!(view.layer_order(), vec![LayerType::Loads, LayerType::Lines]);

        view.reconcile(LayerType::Loads, false);
        assert_eq!(view.layer_order(), vec![LayerType::Lines]);
        assert_eq!(view.metric_order(), vec![LayerType::Lines]);
    }

    #[test]
    fn test_failure_is_local_to_its_layer() {
        let mut view = ViewModel::new();
        let (gl, _) = tickets(&view.reconcile(LayerType::Lines, true));
        let (gb, _) = tickets(&view.reconcile(LayerType::Buses, true));

        let failure = Err(Error::Status {
            path: "/assets/geojsons/lines".to_string(),
            status: 500,
        });
        assert!(matches!(
            view.apply_geometry(LayerType::Lines, gl, failure),
            MergeOutcome::Failed(_)
        ));
        assert!(matches!(
            view.apply_geometry(LayerType::Buses, gb, geometry("buses")),
            MergeOutcome::Inserted
        ));
        assert_eq!(view.layer_order(), vec![LayerType::Buses]);
    }

    #[test]
    fn test_distinct_layers_do_not_cross() {
        let mut view = ViewModel::new();
        let (gl, ml) = tickets(&view.reconcile(LayerType::Lines, true));
        let (gd, md) = tickets(&view.reconcile(LayerType::Loads, true));

        // interleaved, arrival order differs from toggle order
        view.apply_metrics(LayerType::Loads, md, Ok(bulk_metrics()));
        view.apply_geometry(LayerType::Loads, gd, geometry("loads"));
        view.apply_metrics(LayerType::Lines, ml, Ok(bulk_metrics()));
        view.apply_geometry(LayerType::Lines, gl, geometry("lines"));

        // a ticket from one layer means nothing to another
        assert!(matches!(
            view.apply_geometry(LayerType::Lines, gd, geometry("crossed")),
            MergeOutcome::Stale
        ));

        assert_eq!(view.layer_order(), vec![LayerType::Loads, LayerType::Lines]);
        assert_eq!(view.layer(LayerType::Lines).expect("lines").collection["tag"], "lines");
        assert_eq!(view.layer(LayerType::Loads).expect("loads").collection["tag"], "loads");
        assert_eq!(view.metric(LayerType::Loads).expect("loads").title, "loads");
        assert_eq!(view.metric(LayerType::Lines).expect("lines").title, "lines");
    }

    #[test]
    fn test_final_membership_follows_last_toggle() {
        // every on/off sequence up to length 4, answers delivered forwards or backwards
        for len in 1..=4u32 {
            for bits in 0..(1u32 << len) {
                let toggles: Vec<bool> = (0..len).map(|i| bits & (1 << i) != 0).collect();
                for reverse in [false, true] {
                    let mut view = ViewModel::new();
                    let mut issued = Vec::new();
                    for enabled in &toggles {
                        issued.extend(view.reconcile(LayerType::Buses, *enabled).requests);
                    }
                    if reverse {
                        issued.reverse();
                    }
                    for request in issued {
                        match request.tag {
                            RequestTag::Geometry { layer, ticket } => {
                                view.apply_geometry(layer, ticket, geometry("buses"));
                            }
                            RequestTag::LayerMetrics { layer, ticket } => {
                                view.apply_metrics(layer, ticket, Ok(bulk_metrics()));
                            }
                            _ => unreachable!(),
                        }
                    }

                    let last = *toggles.last().expect("non-empty");
                    assert_eq!(
                        view.layer(LayerType::Buses).is_some(),
                        last,
                        "sequence {:?} reverse={}",
                        toggles,
                        reverse
                    );
                    assert!(view.layers().len() <= 1);
                }
            }
        }
    }
}
