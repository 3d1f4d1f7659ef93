//! Script loading collaborator — trait for injecting a vendor script into the
//! host environment.
//!
//! Destinations ask an `Arc<dyn ScriptLoader>` to fetch and execute their
//! vendor agent. Completion is signalled back to the destination by the host
//! once the vendor global is callable, not by the loader itself.

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::{DispatchError, DispatchResult};

/// Trait for injecting external vendor scripts. Implementations fetch the
/// URL, execute it, signal completion exactly once, and report a failed
/// fetch as an error.
pub trait ScriptLoader: Send + Sync {
    fn inject(&self, url: &str) -> DispatchResult<()>;
}

/// No-op loader for tests and headless hosts.
pub struct NoOpLoader;

impl ScriptLoader for NoOpLoader {
    fn inject(&self, _url: &str) -> DispatchResult<()> {
        Ok(())
    }
}

/// In-memory loader that records injected URLs for testing.
#[derive(Default)]
pub struct RecordingLoader {
    urls: Mutex<Vec<String>>,
    failure: Mutex<Option<String>>,
}

impl RecordingLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the loader to fail every subsequent injection with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock().expect("loader mutex poisoned") = Some(message.into());
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().expect("loader mutex poisoned").clone()
    }

    pub fn count(&self) -> usize {
        self.urls.lock().expect("loader mutex poisoned").len()
    }
}

impl ScriptLoader for RecordingLoader {
    fn inject(&self, url: &str) -> DispatchResult<()> {
        if let Some(message) = self.failure.lock().expect("loader mutex poisoned").clone() {
            return Err(DispatchError::ScriptLoad(message));
        }
        debug!(url, "script injection recorded");
        self.urls
            .lock()
            .expect("loader mutex poisoned")
            .push(url.to_string());
        Ok(())
    }
}

/// Convenience: create a no-op loader for hosts that skip script injection.
pub fn noop_loader() -> Arc<dyn ScriptLoader> {
    Arc::new(NoOpLoader)
}

/// Convenience: create a recording loader for tests.
pub fn recording_loader() -> Arc<RecordingLoader> {
    Arc::new(RecordingLoader::new())
}
