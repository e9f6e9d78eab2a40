//! Session - Drives One Page Against a Data Source
//!
//! The session owns the page model. Every user action is applied in a single
//! synchronous call: state update, then request dispatch. Fetches run as
//! tokio tasks and send their completions back over a channel; the owner
//! applies them with `pump` (from a render loop) or `next`/`settle` (from
//! async code).
//!
//! ```text
//! dispatch(action) ──▶ PageModel::on_action ──▶ Effects
//!                                                │
//!                     ┌──────── requests ────────┤
//!                     ▼                          ▼ events
//!              spawn(fetch task)            listeners + activity log
//!                     │
//!                     ▼ Completion (mpsc)
//! pump()/next() ──▶ PageModel::on_completion ──▶ Effects ...
//! ```

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::app::page::{Effects, PageModel, ViewEvent};
use crate::constants::{ACTIVITY_MESSAGE_MAX_LEN, PUMP_BATCH_SIZE};
use crate::error::Error;
use crate::services::{Completion, DataSource, FetchAdapter, FetchRequest, current_or_global};
use crate::state::activity_log::{ActivityLog, LogLevel};
use crate::utils::format::truncate;

type Listener = Box<dyn FnMut(&ViewEvent)>;

/// Mount generation a completion was requested under
type Generation = u64;

pub struct Session<P, S> {
    page: P,
    adapter: Arc<FetchAdapter<S>>,
    handle: Handle,
    tx: UnboundedSender<(Generation, Completion)>,
    rx: UnboundedReceiver<(Generation, Completion)>,
    generation: Generation,
    mounted: bool,
    in_flight: usize,
    listeners: Vec<Listener>,
    activity: ActivityLog,
}

impl<P: PageModel, S: DataSource> Session<P, S> {
    /// Create a session on the current tokio runtime, or the global one
    pub fn new(page: P, source: S) -> Self {
        Self::with_handle(page, source, current_or_global())
    }

    pub fn with_handle(page: P, source: S, handle: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            page,
            adapter: Arc::new(FetchAdapter::new(source)),
            handle,
            tx,
            rx,
            generation: 0,
            mounted: false,
            in_flight: 0,
            listeners: Vec::new(),
            activity: ActivityLog::default(),
        }
    }

    /// Register a change listener
    pub fn on_event(&mut self, listener: impl FnMut(&ViewEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Show the page: issue its initial requests
    ///
    /// Mounting an already mounted page does nothing; `unmount` first to
    /// start over.
    pub fn mount(&mut self) {
        if self.mounted {
            debug!("{} page already mounted", self.page.name());
            return;
        }
        self.mounted = true;
        info!("Mounting {} page", self.page.name());
        self.activity
            .push_now(LogLevel::Info, format!("{} page mounted", self.page.name()));
        let effects = self.page.on_mount();
        self.apply(effects);
    }

    /// Drop the page state; completions still in flight are discarded
    pub fn unmount(&mut self)
    where
        P: Default,
    {
        info!("Unmounting {} page", self.page.name());
        self.activity
            .push_now(LogLevel::Info, format!("{} page unmounted", self.page.name()));
        self.page = P::default();
        self.generation += 1;
        self.mounted = false;
    }

    /// Apply a user action
    pub fn dispatch(&mut self, action: P::Action) {
        debug!("{}: {:?}", self.page.name(), action);
        let effects = self.page.on_action(action);
        self.apply(effects);
    }

    /// Apply every completion that has already arrived, without waiting
    ///
    /// Returns the number applied. At most `PUMP_BATCH_SIZE` per call so a
    /// render loop stays responsive.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while applied < PUMP_BATCH_SIZE {
            let Ok((generation, completion)) = self.rx.try_recv() else {
                break;
            };
            self.complete(generation, completion);
            applied += 1;
        }
        applied
    }

    /// Wait for the next completion and apply it
    ///
    /// Returns false when nothing is in flight.
    pub async fn next(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.rx.recv().await {
            Some((generation, completion)) => {
                self.complete(generation, completion);
                true
            }
            None => false,
        }
    }

    /// Apply completions until nothing is in flight
    ///
    /// A fetch that never resolves keeps this pending.
    pub async fn settle(&mut self) {
        while self.next().await {}
    }

    // ==================== Getters ====================

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    // ==================== Internals ====================

    fn complete(&mut self, generation: Generation, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if generation != self.generation {
            debug!("Discarding {} from an earlier mount", completion.resource);
            return;
        }
        let effects = self.page.on_completion(completion);
        self.apply(effects);
    }

    fn apply(&mut self, effects: Effects) {
        for request in effects.requests {
            self.spawn(request);
        }
        for event in &effects.events {
            if let ViewEvent::FetchFailed { resource, message } = event {
                warn!("{}: {} failed: {}", self.page.name(), resource, message);
                let line = format!("{} failed: {}", resource, message);
                self.activity
                    .push_now(LogLevel::Error, truncate(&line, ACTIVITY_MESSAGE_MAX_LEN));
            }
            for listener in &mut self.listeners {
                listener(event);
            }
        }
    }

    fn spawn(&mut self, request: FetchRequest) {
        debug!("{}: fetching {}", self.page.name(), request.resource);
        self.in_flight += 1;

        let adapter = Arc::clone(&self.adapter);
        let tx = self.tx.clone();
        let generation = self.generation;
        self.handle.spawn(async move {
            let result = AssertUnwindSafe(adapter.fetch(&request.resource))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| {
                    Err(Error::Fetch {
                        path: request.resource.path(),
                        message: "fetch task panicked".to_string(),
                    })
                });
            // the session may be gone; its completions no longer matter
            let _ = tx.send((generation, Completion::new(request, result)));
        });
    }
}

impl<P: std::fmt::Debug, S> std::fmt::Debug for Session<P, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("page", &self.page)
            .field("generation", &self.generation)
            .field("in_flight", &self.in_flight)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
