//! ModeState - Display Mode Selector and Dataset Cache
//!
//! One active mode per page. Datasets are cached per mode for the lifetime of
//! the state and never evicted; failures are never cached, so the next
//! selection retries.

use ahash::{AHashMap, AHashSet};
use std::sync::Arc;
use tracing::debug;

use crate::domain::mode::DisplayMode;
use crate::domain::payload::Dataset;
use crate::domain::stats::{Extrema, compute_extrema};
use crate::error::{Error, Result};
use crate::services::{DataSource, FetchAdapter, FetchRequest, RequestTag, Resource};

/// A resolved dataset and the extrema of its numeric samples
#[derive(Debug, Clone, PartialEq)]
pub struct CachedDataset {
    pub data: Arc<Dataset>,
    pub extrema: Extrema,
}

impl CachedDataset {
    pub fn new(dataset: Dataset) -> Self {
        let extrema = compute_extrema(&dataset.numeric_series());
        Self {
            data: Arc::new(dataset),
            extrema,
        }
    }
}

/// What selecting a mode requires
#[derive(Debug, Clone, PartialEq)]
pub enum ModeSelection {
    /// Already cached; render immediately
    Cached(CachedDataset),
    /// Not cached; issue this request
    Fetch(FetchRequest),
    /// A fetch for the mode is already outstanding
    Pending,
}

/// Result of applying a mode completion
#[derive(Debug)]
pub enum ModeOutcome {
    /// Cached; `visible` when the mode is still the active one
    Ready { dataset: CachedDataset, visible: bool },
    Failed(Error),
}

#[derive(Debug, Clone)]
pub struct ModeState {
    active: DisplayMode,
    cache: AHashMap<DisplayMode, CachedDataset>,
    in_flight: AHashSet<DisplayMode>,
}

impl ModeState {
    pub fn new(initial: DisplayMode) -> Self {
        Self {
            active: initial,
            cache: AHashMap::new(),
            in_flight: AHashSet::new(),
        }
    }

    /// Make `mode` active and report what it needs
    pub fn select(&mut self, mode: DisplayMode) -> ModeSelection {
        self.active = mode;

        if let Some(cached) = self.cache.get(&mode) {
            debug!("Mode {} served from cache", mode);
            return ModeSelection::Cached(cached.clone());
        }
        match self.prefetch(mode) {
            Some(request) => ModeSelection::Fetch(request),
            None => ModeSelection::Pending,
        }
    }

    /// Make `mode` active without issuing anything (pair with `fetch_active`)
    pub fn set_active(&mut self, mode: DisplayMode) {
        self.active = mode;
    }

    /// Request `mode` without making it active
    ///
    /// `None` when it is cached or already in flight.
    pub fn prefetch(&mut self, mode: DisplayMode) -> Option<FetchRequest> {
        if self.cache.contains_key(&mode) || !self.in_flight.insert(mode) {
            return None;
        }
        Some(FetchRequest::new(RequestTag::Mode(mode), Resource::for_mode(mode)))
    }

    /// Record the outcome of a mode fetch
    pub fn apply(&mut self, mode: DisplayMode, result: Result<Dataset>) -> ModeOutcome {
        self.in_flight.remove(&mode);

        let dataset = match result {
            Ok(dataset) => dataset,
            Err(err) => return ModeOutcome::Failed(err),
        };
        let entry = self
            .cache
            .entry(mode)
            .or_insert_with(|| CachedDataset::new(dataset))
            .clone();

        ModeOutcome::Ready {
            dataset: entry,
            visible: mode == self.active,
        }
    }

    /// Dataset of the active mode, fetching it through `adapter` on a miss
    ///
    /// Nothing is recorded before the fetch resolves, so dropping the future
    /// leaves the mode free to be fetched again. Fails with `Error::Pending`
    /// when a request issued by `select` or `prefetch` is still outstanding;
    /// its completion fills the cache.
    pub async fn fetch_active<S: DataSource>(
        &mut self,
        adapter: &FetchAdapter<S>,
    ) -> Result<CachedDataset> {
        let mode = self.active;
        if let Some(cached) = self.cache.get(&mode) {
            return Ok(cached.clone());
        }
        if self.in_flight.contains(&mode) {
            return Err(Error::Pending {
                mode: mode.to_string(),
            });
        }

        let result = adapter.fetch_dataset(&Resource::for_mode(mode)).await;
        match self.apply(mode, result) {
            ModeOutcome::Ready { dataset, .. } => Ok(dataset),
            ModeOutcome::Failed(err) => Err(err),
        }
    }

    /// Fetch every uncached sibling of the active mode concurrently
    ///
    /// Returns the modes that failed; they stay uncached.
    pub async fn preload<S: DataSource>(
        &mut self,
        adapter: &FetchAdapter<S>,
    ) -> Vec<(DisplayMode, Error)> {
        let missing: Vec<DisplayMode> = self
            .active
            .siblings()
            .into_iter()
            .filter(|mode| !self.cache.contains_key(mode) && !self.in_flight.contains(mode))
            .collect();
        let resources: Vec<Resource> = missing.iter().map(|mode| Resource::for_mode(*mode)).collect();
        debug!("Preloading {} modes", missing.len());

        let results = adapter.fetch_all(&resources).await;
        let mut failures = Vec::new();
        for ((mode, resource), result) in missing.into_iter().zip(resources).zip(results) {
            let result = result.and_then(|payload| payload.into_dataset(&resource));
            if let ModeOutcome::Failed(err) = self.apply(mode, result) {
                failures.push((mode, err));
            }
        }
        failures
    }

    // ==================== Getters ====================

    pub fn active(&self) -> DisplayMode {
        self.active
    }

    pub fn active_dataset(&self) -> Option<&CachedDataset> {
        self.cache.get(&self.active)
    }

    pub fn cached(&self, mode: DisplayMode) -> Option<&CachedDataset> {
        self.cache.get(&mode)
    }

    pub fn is_pending(&self, mode: DisplayMode) -> bool {
        self.in_flight.contains(&mode)
    }
}
