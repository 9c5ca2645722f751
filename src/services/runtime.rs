//! Tokio Runtime Bridge
//!
//! The console front-end is driven from `main` on a plain thread, while the
//! telemetry loop needs a tokio runtime to live on. This module owns one
//! process-wide runtime and hands out handles to it.
//!
//! ## Pattern
//!
//! ```text
//! main thread
//!       │
//!       ▼
//! block_on(console loop) ──► SessionGate ──► TickHandle::spawn(runtime_handle())
//! ```

use std::future::Future;
use std::sync::OnceLock;
use tokio::runtime::Runtime;

/// Global tokio runtime instance
static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the global tokio runtime
fn get_runtime() -> &'static Runtime {
    TOKIO_RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .thread_name("orca-fleet-worker")
            .enable_all()
            .build()
            .expect("Failed to create tokio runtime")
    })
}

/// Block on a future synchronously
///
/// **Warning**: This blocks the current thread. Use only from `main`, never
/// from inside a runtime task.
pub fn block_on<F, T>(future: F) -> T
where
    F: Future<Output = T>,
{
    get_runtime().block_on(future)
}

/// Get a handle to the tokio runtime for spawning background tasks
///
/// Inside an existing runtime (tests, nested calls) that runtime's handle is
/// returned instead of the global one.
pub fn runtime_handle() -> tokio::runtime::Handle {
    tokio::runtime::Handle::try_current().unwrap_or_else(|_| get_runtime().handle().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_on_spawned_task() {
        let value = block_on(async {
            let handle = runtime_handle();
            handle.spawn(async { 21 * 2 }).await.expect("task panicked")
        });
        assert_eq!(value, 42);
    }
}
