//! Tokio Runtime Bridge
//!
//! Sessions spawn their fetch tasks on the caller's tokio runtime when there
//! is one. Hosts that drive the engine from a plain thread (an immediate-mode
//! UI loop, for instance) get a lazily created global runtime instead.
//!
//! ```text
//! Session::dispatch()
//!       │
//!       ▼
//! Handle::try_current() ──none──▶ global runtime
//!       │
//!       ▼
//! spawn(fetch) ──completion──▶ channel ──▶ Session::pump()
//! ```

use std::future::Future;
use std::sync::OnceLock;
use tokio::runtime::{Handle, Runtime};

/// Global tokio runtime instance
static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the global tokio runtime
fn get_runtime() -> &'static Runtime {
    TOKIO_RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .thread_name("feeder-view-fetch")
            .enable_all()
            .build()
            .expect("Failed to create tokio runtime")
    })
}

/// Handle of the global runtime
pub fn runtime_handle() -> Handle {
    get_runtime().handle().clone()
}

/// The current runtime's handle, falling back to the global one
pub fn current_or_global() -> Handle {
    Handle::try_current().unwrap_or_else(|_| {
        tracing::debug!("No ambient tokio runtime, using the global one");
        runtime_handle()
    })
}

/// Block on a future synchronously on the global runtime
///
/// **Warning**: This blocks the current thread. Never call it from inside an
/// async context.
pub fn block_on<F, T>(future: F) -> T
where
    F: Future<Output = T>,
{
    get_runtime().block_on(future)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_runtime_used_outside_tokio() {
        let handle = current_or_global();
        let value = block_on(async move { handle.spawn(async { 21 * 2 }).await });
        assert_eq!(value.expect("join"), 42);
    }

    #[tokio::test]
    async fn test_current_runtime_preferred() {
        // the test runtime is current-thread, the global one is not
        let handle = current_or_global();
        assert_eq!(
            handle.runtime_flavor(),
            tokio::runtime::RuntimeFlavor::CurrentThread
        );
    }
}
