//! Pendo destination for the dispatch layer — translates generic identify and
//! group lifecycle calls into Pendo's visitor/account model and forwards them
//! through an injected vendor client.
//!
//! # Modules
//!
//! - [`config`] — Destination configuration (`api_key`)
//! - [`options`] — Session-scoped client options state (visitor, account)
//! - [`client`] — Injected vendor client capability and test doubles
//! - [`destination`] — The adapter driving load, identify, and group

pub mod client;
pub mod config;
pub mod destination;
pub mod options;

pub use client::{noop_client, recording_client, NoOpClient, PendoClient, RecordingClient};
pub use config::PendoConfig;
pub use destination::PendoDestination;
pub use options::{AccountRecord, ClientOptions, VisitorRecord, ANONYMOUS_ID_MARKER};
