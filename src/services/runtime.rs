//! Tokio Runtime Bridge
//!
//! The CLI entry point and the store thunks run on one shared multi-thread
//! runtime. Synchronous callers go through [`block_on`]; detached work
//! goes through [`spawn_in_tokio`].

use crate::error::Result;
use std::future::Future;
use std::sync::OnceLock;
use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinHandle;

static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the global tokio runtime
fn get_runtime() -> Result<&'static Runtime> {
    if let Some(runtime) = TOKIO_RUNTIME.get() {
        return Ok(runtime);
    }
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .thread_name("rentdesk-io")
        .build()?;
    // A concurrent initializer may win; the spare runtime is dropped here
    Ok(TOKIO_RUNTIME.get_or_init(|| runtime))
}

/// Execute a future in the shared runtime and wait for the result
///
/// Must not be called from inside the runtime itself.
pub fn block_on<F, T>(future: F) -> Result<T>
where
    F: Future<Output = T>,
{
    Ok(get_runtime()?.block_on(future))
}

/// Spawn a detached task on the shared runtime
pub fn spawn_in_tokio<F>(name: &'static str, future: F) -> Result<JoinHandle<()>>
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::debug!("Spawning tokio task: {}", name);
    Ok(get_runtime()?.spawn(future))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_on_returns_value() {
        assert_eq!(block_on(async { 40 + 2 }).expect("runtime"), 42);
    }

    #[test]
    fn runtime_is_shared() {
        let first = get_runtime().expect("runtime") as *const Runtime;
        let second = get_runtime().expect("runtime") as *const Runtime;
        assert_eq!(first, second);
    }

    #[test]
    fn spawned_task_reports_back() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let handle = spawn_in_tokio("ping", async move {
            let _ = tx.send("pong");
        })
        .expect("spawn");
        block_on(handle).expect("runtime").expect("join");
        assert_eq!(rx.try_recv(), Ok("pong"));
    }

    #[test]
    fn block_on_drives_timers() {
        let waited = block_on(async {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            "done"
        })
        .expect("runtime");
        assert_eq!(waited, "done");
    }
}
