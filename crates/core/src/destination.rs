//! Destination plugin interface — the seam between the generic dispatch layer
//! and vendor analytics destinations.

use crate::error::DispatchResult;
use crate::types::TraitMap;

/// A vendor destination driven by the dispatch layer.
///
/// The dispatcher validates and orders lifecycle calls; destinations translate
/// them into vendor SDK operations. `identify` and `group` never fail: a
/// missing id or malformed trait bag is tolerated, not rejected.
pub trait Destination: Send {
    /// Destination identifier (e.g. "pendo").
    fn name(&self) -> &'static str;

    /// Validate that the destination configuration is correct.
    fn validate_config(&self) -> DispatchResult<()>;

    /// Set up vendor state and start loading the vendor SDK.
    fn initialize(&mut self) -> DispatchResult<()>;

    /// Bind the current user (or an anonymous stand-in) and merge traits.
    fn identify(&mut self, user_id: Option<&str>, traits: &TraitMap);

    /// Bind the user's organization/account and merge traits.
    fn group(&mut self, group_id: Option<&str>, traits: &TraitMap);

    /// Page-view passthrough. Default implementation does nothing.
    fn page(&mut self, _name: Option<&str>, _properties: &TraitMap) {}
}
