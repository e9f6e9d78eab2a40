//! Scripted data source for tests
//!
//! Canned JSON per path, failure injection, call counting, and per-path gates
//! that hold responses until released so tests can choose completion order.

use ahash::AHashMap;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

use crate::error::{Error, Result};
use crate::services::source::DataSource;

#[derive(Debug, Clone)]
enum Reply {
    Json(Value),
    Status(u16),
}

#[derive(Debug, Default)]
struct Script {
    replies: AHashMap<String, Reply>,
    calls: Vec<String>,
    gates: AHashMap<String, Arc<Semaphore>>,
}

#[derive(Debug, Default)]
pub struct ScriptedSource {
    script: Mutex<Script>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `path` with `body`
    pub fn respond(&self, path: &str, body: Value) {
        self.lock().replies.insert(path.to_string(), Reply::Json(body));
    }

    /// Answer `path` with a non-success status
    pub fn fail(&self, path: &str, status: u16) {
        self.lock().replies.insert(path.to_string(), Reply::Status(status));
    }

    /// Hold every response for `path` until released
    pub fn gate(&self, path: &str) {
        self.lock()
            .gates
            .insert(path.to_string(), Arc::new(Semaphore::new(0)));
    }

    /// Let `count` held responses for `path` through
    pub fn release(&self, path: &str, count: usize) {
        if let Some(gate) = self.lock().gates.get(path) {
            gate.add_permits(count);
        }
    }

    /// Number of requests made for `path`
    pub fn calls(&self, path: &str) -> usize {
        self.lock().calls.iter().filter(|p| p.as_str() == path).count()
    }

    pub fn total_calls(&self) -> usize {
        self.lock().calls.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().expect("script lock")
    }
}

impl DataSource for ScriptedSource {
    async fn get_json(&self, path: &str) -> Result<Value> {
        let gate = {
            let mut script = self.lock();
            script.calls.push(path.to_string());
            script.gates.get(path).cloned()
        };

        if let Some(gate) = gate {
            gate.acquire().await.expect("gate closed").forget();
        }

        let reply = self.lock().replies.get(path).cloned();
        match reply {
            Some(Reply::Json(body)) => Ok(body),
            Some(Reply::Status(status)) => Err(Error::Status {
                path: path.to_string(),
                status,
            }),
            None => Err(Error::Fetch {
                path: path.to_string(),
                message: "no scripted response".to_string(),
            }),
        }
    }
}
