//! End-to-end destination flow: initialize against recording doubles, then
//! drive identify/group through the generic `Destination` trait and assert the
//! payloads the vendor client receives.

use std::sync::Arc;

use dispatch_core::destination::Destination;
use dispatch_core::loader::{recording_loader, RecordingLoader};
use dispatch_core::types::{TraitMap, TraitValue};
use dispatch_pendo::{
    recording_client, PendoClient, PendoConfig, PendoDestination, RecordingClient,
    ANONYMOUS_ID_MARKER,
};

fn setup() -> (PendoDestination, Arc<RecordingClient>, Arc<RecordingLoader>) {
    let client = recording_client();
    let loader = recording_loader();
    let destination = PendoDestination::new(PendoConfig::new("an-id-to-test-with"))
        .with_client(client.clone())
        .with_loader(loader.clone());
    (destination, client, loader)
}

#[test]
fn initialize_creates_bare_options_before_any_identify() {
    let (mut destination, client, loader) = setup();

    destination.initialize().unwrap();

    assert_eq!(loader.count(), 1);
    assert_eq!(client.count(), 0);
    let options = serde_json::to_value(destination.options().unwrap()).unwrap();
    assert_eq!(
        options,
        serde_json::json!({
            "apiKey": "an-id-to-test-with",
            "usePendoAgentAPI": true,
        })
    );
}

#[test]
fn full_lifecycle_through_the_destination_trait() {
    let (mut destination, client, loader) = setup();
    let destination: &mut dyn Destination = &mut destination;

    destination.validate_config().unwrap();
    assert_eq!(destination.name(), "pendo");

    destination.initialize().unwrap();
    destination.page(Some("Home"), &TraitMap::new());
    assert_eq!(client.count(), 0);

    destination.identify(None, &TraitMap::new());
    assert_eq!(client.count(), 1);
    assert!(client.visitor_id().unwrap().contains(ANONYMOUS_ID_MARKER));

    assert_eq!(loader.count(), 1);
}

#[test]
fn identify_then_group_builds_the_combined_payload() {
    let (mut destination, client, _) = setup();
    destination.initialize().unwrap();
    destination.ready();

    destination.identify(
        Some("id"),
        &TraitMap::from([("trait".to_string(), TraitValue::from("goog"))]),
    );
    destination.group(
        Some("id2"),
        &TraitMap::from([("trait2".to_string(), TraitValue::from("v"))]),
    );

    assert_eq!(client.count(), 2);
    let payload = serde_json::to_value(client.last().unwrap()).unwrap();
    assert_eq!(
        payload,
        serde_json::json!({
            "apiKey": "an-id-to-test-with",
            "usePendoAgentAPI": true,
            "visitor": { "id": "id", "trait": "goog" },
            "account": { "id": "id2", "trait2": "v" },
        })
    );
    assert_eq!(destination.visitor_id(), Some("id"));
    assert_eq!(destination.account_id(), Some("id2"));
}

#[test]
fn group_with_traits_only_creates_account_without_id() {
    let (mut destination, client, _) = setup();
    destination.initialize().unwrap();

    destination.group(
        None,
        &TraitMap::from([("trait".to_string(), TraitValue::from("goog"))]),
    );

    assert_eq!(client.count(), 1);
    let payload = serde_json::to_value(client.last().unwrap()).unwrap();
    assert_eq!(payload["account"], serde_json::json!({ "trait": "goog" }));
    assert!(client.account_id().is_none());
}

#[test]
fn group_sends_a_flat_map_of_mixed_traits() {
    let (mut destination, client, _) = setup();
    destination.initialize().unwrap();

    let traits = TraitMap::from([
        ("sysId".to_string(), TraitValue::from(30i64)),
        ("sysName".to_string(), TraitValue::from("Mocha test")),
        ("sysTrialStatus".to_string(), TraitValue::from("Robot")),
        ("sysProduct".to_string(), TraitValue::from("unlimited")),
        ("sysType".to_string(), TraitValue::from("unknown")),
    ]);
    destination.group(Some("id"), &traits);

    assert_eq!(client.count(), 1);
    assert_eq!(client.account_id().as_deref(), Some("id"));
    let account = client.last().unwrap().account.unwrap();
    for (key, value) in &traits {
        assert_eq!(&account.traits[key], value);
    }
}

#[test]
fn default_settings_fail_validation_until_an_api_key_is_set() {
    let unconfigured = PendoDestination::new(PendoConfig::default());
    assert!(unconfigured.validate_config().is_err());

    let configured = PendoDestination::new(PendoConfig::new("an-id-to-test-with"));
    assert!(configured.validate_config().is_ok());
}

#[test]
fn ready_is_a_one_shot_signal() {
    let (mut destination, _, _) = setup();
    destination.initialize().unwrap();
    assert!(!destination.is_ready());

    destination.ready();
    assert!(destination.is_ready());
    destination.ready();
    assert!(destination.is_ready());
}
