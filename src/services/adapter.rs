//! Fetch Adapter
//!
//! Issues one request per resource and decodes the JSON body into the typed
//! payload the resource class calls for.

use futures::future::join_all;
use serde::de::DeserializeOwned;
use serde_json::Value;
use snafu::ResultExt;

use crate::domain::payload::{
    AssetMetricsRecord, ChartSeries, Dataset, GeometryEnvelope, MapCenter, MetricPoint,
    SystemMetric,
};
use crate::error::{DecodeSnafu, Error, Result};
use crate::services::resource::{Resource, ResourceClass};
use crate::services::source::DataSource;

/// A decoded response
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Opaque geometry collection
    Geometry(Value),
    AssetMetrics(Vec<AssetMetricsRecord>),
    Dataset(Dataset),
    MapCenter(MapCenter),
}

impl Payload {
    fn mismatch(resource: &Resource, expected: &str) -> Error {
        Error::Invalid {
            message: format!("{} did not yield {}", resource, expected),
        }
    }

    pub fn into_geometry(self, resource: &Resource) -> Result<Value> {
        match self {
            Payload::Geometry(collection) => Ok(collection),
            _ => Err(Self::mismatch(resource, "geometry")),
        }
    }

    pub fn into_asset_metrics(self, resource: &Resource) -> Result<Vec<AssetMetricsRecord>> {
        match self {
            Payload::AssetMetrics(records) => Ok(records),
            _ => Err(Self::mismatch(resource, "asset metrics")),
        }
    }

    pub fn into_dataset(self, resource: &Resource) -> Result<Dataset> {
        match self {
            Payload::Dataset(dataset) => Ok(dataset),
            _ => Err(Self::mismatch(resource, "a dataset")),
        }
    }

    pub fn into_map_center(self, resource: &Resource) -> Result<MapCenter> {
        match self {
            Payload::MapCenter(center) => Ok(center),
            _ => Err(Self::mismatch(resource, "a map center")),
        }
    }
}

/// Typed fetches over a [`DataSource`]
#[derive(Debug)]
pub struct FetchAdapter<S> {
    source: S,
}

impl<S: DataSource> FetchAdapter<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch and decode one resource
    pub async fn fetch(&self, resource: &Resource) -> Result<Payload> {
        let path = resource.path();
        let body = self.source.get_json(&path).await?;
        decode(resource, &path, body)
    }

    /// Fetch several resources concurrently, results in input order
    pub async fn fetch_all(&self, resources: &[Resource]) -> Vec<Result<Payload>> {
        join_all(resources.iter().map(|resource| self.fetch(resource))).await
    }

    /// Fetch a resource that renders as a mode dataset
    pub async fn fetch_dataset(&self, resource: &Resource) -> Result<Dataset> {
        self.fetch(resource).await?.into_dataset(resource)
    }
}

fn parse<T: DeserializeOwned>(path: &str, body: Value) -> Result<T> {
    serde_json::from_value(body).context(DecodeSnafu { path })
}

/// Decode a JSON body according to the resource class
pub fn decode(resource: &Resource, path: &str, body: Value) -> Result<Payload> {
    let payload = match resource.class() {
        ResourceClass::Geometry => {
            // asset endpoints wrap the collection as `{type, data}`; risk layers answer bare
            let wrapped = body.as_object().is_some_and(|map| map.contains_key("data"));
            let collection = if wrapped {
                parse::<GeometryEnvelope>(path, body)?.data
            } else {
                body
            };
            Payload::Geometry(collection)
        }
        ResourceClass::AssetMetrics => Payload::AssetMetrics(parse(path, body)?),
        ResourceClass::Points => Payload::Dataset(Dataset::Points(parse::<Vec<MetricPoint>>(path, body)?)),
        ResourceClass::Series => Payload::Dataset(Dataset::Series(parse::<Vec<ChartSeries>>(path, body)?)),
        ResourceClass::Gauges => Payload::Dataset(Dataset::Gauges(parse::<Vec<SystemMetric>>(path, body)?)),
        ResourceClass::MapCenter => Payload::MapCenter(parse(path, body)?),
    };
    Ok(payload)
}
