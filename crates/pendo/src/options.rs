//! Session-scoped Pendo client options — the mutable visitor/account state the
//! vendor agent reads on every identify call.
//!
//! The options object is created once on `initialize` and then mutated in
//! place: identify/group calls merge fields into it, they never replace it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dispatch_core::types::{merge_traits, TraitMap};

/// Marker substring carried by every synthesized anonymous visitor id.
pub const ANONYMOUS_ID_MARKER: &str = "_PENDO_T_";

/// The visitor (end user) being tracked. Traits are flattened next to the id
/// on the wire: `{ "id": "...", "plan": "pro", ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitorRecord {
    pub id: String,
    #[serde(flatten)]
    pub traits: TraitMap,
}

impl VisitorRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            traits: TraitMap::new(),
        }
    }

    /// Create a visitor with a synthesized anonymous id: the `_PENDO_T_`
    /// marker plus a unique suffix, so it can never collide with a real
    /// caller-supplied id.
    pub fn anonymous() -> Self {
        Self::new(format!(
            "{}{}",
            ANONYMOUS_ID_MARKER,
            Uuid::new_v4().simple()
        ))
    }

    /// Whether the id was synthesized rather than supplied by a caller.
    pub fn is_anonymous(&self) -> bool {
        self.id.contains(ANONYMOUS_ID_MARKER)
    }

    /// Merge traits in place: same-named keys are overwritten, others persist.
    pub fn merge_traits(&mut self, traits: &TraitMap) {
        merge_traits(&mut self.traits, traits);
    }
}

/// The organization/account the visitor belongs to. Present only once a group
/// call has occurred; the id stays empty (and off the wire) until one is
/// given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(flatten)]
    pub traits: TraitMap,
}

impl AccountRecord {
    /// Merge traits in place: same-named keys are overwritten, others persist.
    pub fn merge_traits(&mut self, traits: &TraitMap) {
        merge_traits(&mut self.traits, traits);
    }
}

/// Payload handed to the vendor agent, serialized as
/// `{ "apiKey": ..., "usePendoAgentAPI": true, "visitor": ..., "account": ... }`
/// with visitor and account omitted until identify/group have occurred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientOptions {
    pub api_key: String,
    #[serde(rename = "usePendoAgentAPI")]
    pub use_pendo_agent_api: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visitor: Option<VisitorRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountRecord>,
}

impl ClientOptions {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            use_pendo_agent_api: true,
            visitor: None,
            account: None,
        }
    }

    /// Visitor record, created with an anonymous id on first access.
    pub fn visitor_mut(&mut self) -> &mut VisitorRecord {
        self.visitor.get_or_insert_with(VisitorRecord::anonymous)
    }

    /// Account record, created empty on first access.
    pub fn account_mut(&mut self) -> &mut AccountRecord {
        self.account.get_or_insert_with(AccountRecord::default)
    }
}
