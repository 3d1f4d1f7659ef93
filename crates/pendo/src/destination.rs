//! The Pendo destination adapter — owns the session-scoped client options and
//! translates dispatcher lifecycle calls into vendor client identify calls.

use std::sync::Arc;

use tracing::{debug, info};

use dispatch_core::destination::Destination;
use dispatch_core::error::DispatchResult;
use dispatch_core::loader::{noop_loader, ScriptLoader};
use dispatch_core::types::TraitMap;

use crate::client::{noop_client, PendoClient};
use crate::config::PendoConfig;
use crate::options::ClientOptions;

const AGENT_URL_BASE: &str = "https://cdn.pendo.io/agent/static";

/// Vendor script load progress. Injection only ever happens from `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Session-scoped Pendo adapter. Constructed once per page/session context;
/// the hosting dispatch layer is the single caller driving all mutations.
pub struct PendoDestination {
    config: PendoConfig,
    options: Option<ClientOptions>,
    load_state: LoadState,
    client: Arc<dyn PendoClient>,
    loader: Arc<dyn ScriptLoader>,
}

impl PendoDestination {
    pub fn new(config: PendoConfig) -> Self {
        Self {
            config,
            options: None,
            load_state: LoadState::Idle,
            client: noop_client(),
            loader: noop_loader(),
        }
    }

    /// Attach the vendor client the adapter forwards to.
    pub fn with_client(mut self, client: Arc<dyn PendoClient>) -> Self {
        self.client = client;
        self
    }

    /// Attach the script loader used to inject the vendor agent.
    pub fn with_loader(mut self, loader: Arc<dyn ScriptLoader>) -> Self {
        self.loader = loader;
        self
    }

    pub fn config(&self) -> &PendoConfig {
        &self.config
    }

    /// The session options state, once `initialize` (or a lifecycle call) has
    /// created it.
    pub fn options(&self) -> Option<&ClientOptions> {
        self.options.as_ref()
    }

    /// Create the options object with `apiKey` and `usePendoAgentAPI`, then
    /// start loading the vendor agent.
    pub fn initialize(&mut self) -> DispatchResult<()> {
        if self.options.is_none() {
            self.options = Some(ClientOptions::new(self.config.api_key.clone()));
            info!("pendo client options created");
        }
        self.load()
    }

    /// Bind the visitor and merge traits, then resend the full options
    /// payload.
    ///
    /// An omitted id on the first call synthesizes an anonymous visitor id;
    /// an explicit id always overwrites; an omitted id on later calls leaves
    /// the previous id untouched. The visitor record is never reset between
    /// calls.
    pub fn identify(&mut self, user_id: Option<&str>, traits: &TraitMap) {
        let options = self.ensure_options();
        let visitor = options.visitor_mut();
        if let Some(id) = user_id {
            visitor.id = id.to_string();
        }
        visitor.merge_traits(traits);
        debug!(
            visitor_id = %visitor.id,
            trait_count = traits.len(),
            "pendo identify"
        );
        self.forward();
    }

    /// Bind the account and merge traits, then resend the full options
    /// payload through the same client entry point as `identify`, so visitor
    /// and account state travel together.
    ///
    /// A traits-only call updates the trait map without changing a previously
    /// set account id.
    pub fn group(&mut self, group_id: Option<&str>, traits: &TraitMap) {
        let options = self.ensure_options();
        let account = options.account_mut();
        if let Some(id) = group_id {
            account.id = id.to_string();
        }
        account.merge_traits(traits);
        debug!(
            account_id = %account.id,
            trait_count = traits.len(),
            "pendo group"
        );
        self.forward();
    }

    /// Page views are not forwarded; the vendor agent tracks them itself once
    /// loaded.
    pub fn page(&mut self, name: Option<&str>, _properties: &TraitMap) {
        debug!(page = name.unwrap_or(""), "pendo page passthrough");
    }

    /// Inject the vendor agent script. Idempotent: a call while a load is in
    /// flight (or after completion) does not inject again.
    pub fn load(&mut self) -> DispatchResult<()> {
        if self.load_state != LoadState::Idle {
            return Ok(());
        }
        self.load_state = LoadState::Loading;
        let url = agent_url(&self.config.api_key);
        match self.loader.inject(&url) {
            Ok(()) => {
                debug!(%url, "pendo agent injection started");
                Ok(())
            }
            Err(err) => {
                self.load_state = LoadState::Failed;
                Err(err)
            }
        }
    }

    /// One-shot completion signal from the host once the vendor global is
    /// callable. Repeat calls are ignored.
    pub fn ready(&mut self) {
        if self.load_state == LoadState::Ready {
            return;
        }
        self.load_state = LoadState::Ready;
        info!("pendo agent ready");
    }

    pub fn is_ready(&self) -> bool {
        self.load_state == LoadState::Ready
    }

    /// Current visitor id, mirroring the vendor `getVisitorId` accessor.
    pub fn visitor_id(&self) -> Option<&str> {
        self.options
            .as_ref()
            .and_then(|o| o.visitor.as_ref())
            .map(|v| v.id.as_str())
    }

    /// Current account id, mirroring the vendor `getAccountId` accessor.
    pub fn account_id(&self) -> Option<&str> {
        self.options
            .as_ref()
            .and_then(|o| o.account.as_ref())
            .map(|a| a.id.as_str())
            .filter(|id| !id.is_empty())
    }

    fn ensure_options(&mut self) -> &mut ClientOptions {
        let api_key = self.config.api_key.clone();
        self.options.get_or_insert_with(|| ClientOptions::new(api_key))
    }

    fn forward(&self) {
        if let Some(options) = &self.options {
            self.client.identify(options);
        }
    }
}

impl Destination for PendoDestination {
    fn name(&self) -> &'static str {
        "pendo"
    }

    fn validate_config(&self) -> DispatchResult<()> {
        self.config.validate()
    }

    fn initialize(&mut self) -> DispatchResult<()> {
        PendoDestination::initialize(self)
    }

    fn identify(&mut self, user_id: Option<&str>, traits: &TraitMap) {
        PendoDestination::identify(self, user_id, traits);
    }

    fn group(&mut self, group_id: Option<&str>, traits: &TraitMap) {
        PendoDestination::group(self, group_id, traits);
    }

    fn page(&mut self, name: Option<&str>, properties: &TraitMap) {
        PendoDestination::page(self, name, properties);
    }
}

/// CDN URL of the Pendo agent for a subscription api key.
fn agent_url(api_key: &str) -> String {
    format!("{AGENT_URL_BASE}/{api_key}/pendo.js")
}
