//! Data Sources
//!
//! The remote side of the engine: anything that can answer a GET with JSON.
//! `HttpSource` talks to the dashboard backend over reqwest.

use serde_json::Value;
use snafu::ResultExt;
use std::future::Future;
use std::sync::Arc;

use crate::domain::config::DashboardConfig;
use crate::error::{HttpSnafu, Result, StatusSnafu};

/// Asynchronous JSON source
pub trait DataSource: Send + Sync + 'static {
    /// GET `path` (relative to the source's base) and parse the body as JSON
    fn get_json(&self, path: &str) -> impl Future<Output = Result<Value>> + Send;
}

impl<T: DataSource> DataSource for Arc<T> {
    fn get_json(&self, path: &str) -> impl Future<Output = Result<Value>> + Send {
        (**self).get_json(path)
    }
}

/// HTTP data source backed by a shared reqwest client
#[derive(Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    /// Build a source from the dashboard config
    pub fn new(config: &DashboardConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.normalized_base_url().to_string();

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context(HttpSnafu { path: base_url.clone() })?;

        tracing::info!("HTTP data source targeting {}", base_url);
        Ok(Self { client, base_url })
    }

    /// Absolute URL of a resource path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl DataSource for HttpSource {
    async fn get_json(&self, path: &str) -> Result<Value> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await.context(HttpSnafu { path })?;

        let status = response.status();
        if !status.is_success() {
            return StatusSnafu {
                path,
                status: status.as_u16(),
            }
            .fail();
        }

        response.json::<Value>().await.context(HttpSnafu { path })
    }
}

impl std::fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSource")
            .field("base_url", &self.base_url)
            .finish()
    }
}
