//! Payload - Typed Backend Responses

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::layer::LayerType;

/// Geometry of one active layer
///
/// The collection is kept opaque; only the renderer interprets it.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoFeature {
    pub layer: LayerType,
    pub collection: Value,
}

impl GeoFeature {
    /// Number of features in the collection (GeoJSON or bare array)
    pub fn feature_count(&self) -> usize {
        match &self.collection {
            Value::Array(items) => items.len(),
            Value::Object(map) => map
                .get("features")
                .and_then(Value::as_array)
                .map(Vec::len)
                .unwrap_or(0),
            _ => 0,
        }
    }
}

/// Wrapper the asset geometry endpoints answer with (`{type, data}`)
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeometryEnvelope {
    pub data: Value,
}

/// A single `{metric, value}` pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricEntry {
    pub metric: String,
    pub value: f64,
}

/// One element of the bulk asset metrics response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetMetricsRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Vec<MetricEntry>,
}

/// Metric summary card shown next to an active layer
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSummary {
    pub layer: LayerType,
    pub title: String,
    pub entries: Vec<MetricEntry>,
}

impl MetricSummary {
    /// Pick the record for `layer` out of a bulk response
    ///
    /// Returns `None` when the layer has no metric (empty match).
    pub fn select(records: &[AssetMetricsRecord], layer: LayerType) -> Option<Self> {
        let key = layer.spec().metric_key?;
        records
            .iter()
            .find(|record| record.kind == key)
            .map(|record| MetricSummary {
                layer,
                title: record.kind.clone(),
                entries: record.data.clone(),
            })
    }
}

/// Position of a metric sample: a node or a polyline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinates {
    Point([f64; 2]),
    Path(Vec<[f64; 2]>),
}

/// A geolocated metric sample (heatmaps, risk maps)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    pub coordinates: Coordinates,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub data: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl MetricPoint {
    /// The sample's magnitude: `data` when present, otherwise `weight`
    pub fn value(&self) -> Option<f64> {
        self.data.or(self.weight)
    }
}

/// A chart-ready series (bar, scatter)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    #[serde(default)]
    pub x: Vec<Value>,
    #[serde(default)]
    pub y: Vec<Option<f64>>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub mode: Option<String>,
}

/// A system-level gauge value (SARDI indices)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemMetric {
    pub name: String,
    pub value: f64,
}

/// Map center used to position the viewport
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MapCenter {
    pub longitude: f64,
    pub latitude: f64,
}

/// A dataset rendered by a display mode
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    Points(Vec<MetricPoint>),
    Series(Vec<ChartSeries>),
    Gauges(Vec<SystemMetric>),
}

impl Dataset {
    /// Numeric samples used for derived statistics
    pub fn numeric_series(&self) -> Vec<f64> {
        match self {
            Dataset::Points(points) => points.iter().filter_map(MetricPoint::value).collect(),
            Dataset::Series(series) => series
                .iter()
                .flat_map(|s| s.y.iter().filter_map(|v| *v))
                .collect(),
            Dataset::Gauges(gauges) => gauges.iter().map(|g| g.value).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Dataset::Points(points) => points.len(),
            Dataset::Series(series) => series.len(),
            Dataset::Gauges(gauges) => gauges.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_select_filters_by_type() {
        let records: Vec<AssetMetricsRecord> = serde_json::from_value(json!([
            {"type": "lines", "data": [{"metric": "total length km", "value": 12.5}]},
            {"type": "loads", "data": [{"metric": "count", "value": 40.0}]}
        ]))
        .expect("records");

        let loads = MetricSummary::select(&records, LayerType::Loads).expect("loads summary");
        assert_eq!(loads.title, "loads");
        assert_eq!(loads.entries[0].value, 40.0);

        assert!(MetricSummary::select(&records, LayerType::Buses).is_none());
        assert!(MetricSummary::select(&records, LayerType::Nvri).is_none());
    }

    #[test]
    fn test_point_and_path_coordinates() {
        let points: Vec<MetricPoint> = serde_json::from_value(json!([
            {"coordinates": [80.27, 13.08], "weight": 1.02},
            {"coordinates": [[80.27, 13.08], [80.28, 13.09]], "name": "Line.l1", "data": 0.4}
        ]))
        .expect("points");

        assert!(matches!(points[0].coordinates, Coordinates::Point(_)));
        assert!(matches!(points[1].coordinates, Coordinates::Path(ref p) if p.len() == 2));
        assert_eq!(points[0].value(), Some(1.02));
        assert_eq!(points[1].value(), Some(0.4));
    }

    #[test]
    fn test_numeric_series_skips_missing_values() {
        let dataset = Dataset::Series(vec![ChartSeries {
            x: vec![json!("0%"), json!("10%"), json!("20%")],
            y: vec![Some(1.0), None, Some(3.0)],
            name: "max".to_string(),
            kind: "scatter".to_string(),
            mode: None,
        }]);
        assert_eq!(dataset.numeric_series(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_feature_count() {
        let geo = GeoFeature {
            layer: LayerType::Buses,
            collection: json!({"type": "FeatureCollection", "features": [{}, {}, {}]}),
        };
        assert_eq!(geo.feature_count(), 3);
    }
}
