//! Injected Pendo client capability — the adapter's only handle on the vendor
//! agent, supplied by the host environment so the adapter itself stays free of
//! ambient globals and is independently testable.

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::options::ClientOptions;

/// Trait over the vendor agent. Both identify and group funnel through the
/// single `identify` entry point; the id accessors mirror the agent's
/// `getVisitorId`/`getAccountId` and exist for verification only — the
/// adapter never calls them.
pub trait PendoClient: Send + Sync {
    fn identify(&self, options: &ClientOptions);

    fn visitor_id(&self) -> Option<String>;

    fn account_id(&self) -> Option<String>;
}

/// No-op client for tests and hosts without a loaded agent.
pub struct NoOpClient;

impl PendoClient for NoOpClient {
    fn identify(&self, _options: &ClientOptions) {}

    fn visitor_id(&self) -> Option<String> {
        None
    }

    fn account_id(&self) -> Option<String> {
        None
    }
}

/// In-memory client that captures every identify payload for testing.
#[derive(Default)]
pub struct RecordingClient {
    payloads: Mutex<Vec<ClientOptions>>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payloads(&self) -> Vec<ClientOptions> {
        self.payloads.lock().expect("client mutex poisoned").clone()
    }

    pub fn count(&self) -> usize {
        self.payloads.lock().expect("client mutex poisoned").len()
    }

    pub fn last(&self) -> Option<ClientOptions> {
        self.payloads
            .lock()
            .expect("client mutex poisoned")
            .last()
            .cloned()
    }
}

impl PendoClient for RecordingClient {
    fn identify(&self, options: &ClientOptions) {
        debug!(api_key = %options.api_key, "pendo identify captured");
        self.payloads
            .lock()
            .expect("client mutex poisoned")
            .push(options.clone());
    }

    fn visitor_id(&self) -> Option<String> {
        self.last().and_then(|p| p.visitor).map(|v| v.id)
    }

    fn account_id(&self) -> Option<String> {
        self.last()
            .and_then(|p| p.account)
            .map(|a| a.id)
            .filter(|id| !id.is_empty())
    }
}

/// Convenience: create a no-op client for hosts without a vendor agent.
pub fn noop_client() -> Arc<dyn PendoClient> {
    Arc::new(NoOpClient)
}

/// Convenience: create a recording client for tests.
pub fn recording_client() -> Arc<RecordingClient> {
    Arc::new(RecordingClient::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_client_captures_payloads() {
        let client = recording_client();
        assert_eq!(client.count(), 0);
        assert!(client.visitor_id().is_none());

        let mut options = ClientOptions::new("key");
        options.visitor_mut().id = "user-1".into();
        client.identify(&options);

        options.account_mut().id = "acct-1".into();
        client.identify(&options);

        assert_eq!(client.count(), 2);
        assert_eq!(client.visitor_id().as_deref(), Some("user-1"));
        assert_eq!(client.account_id().as_deref(), Some("acct-1"));
        assert!(client.payloads()[0].account.is_none());
    }

    #[test]
    fn test_empty_account_id_reads_as_unset() {
        let client = recording_client();

        let mut options = ClientOptions::new("key");
        options.account_mut();
        client.identify(&options);

        assert!(client.account_id().is_none());
    }

    #[test]
    fn test_noop_client() {
        let client = noop_client();
        client.identify(&ClientOptions::new("key"));
        assert!(client.visitor_id().is_none());
        assert!(client.account_id().is_none());
    }
}
