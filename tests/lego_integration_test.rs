//! Integration tests for Lego world models

mod common;

use chrono::{TimeZone, Utc};
use common::{accessible_lego_world_json, lego_grant_json, lego_world_json};
use fnmodels::models::lego::{DefaultLegoWorldMetadata, LegoWorld, LegoWorldMetadata};
use fnmodels::models::{
    AccessibleLegoWorld, LegoWorldGrantRole, LegoWorldGrantType, LegoWorldMetadataConstraint,
    LegoWorldMode,
};
use fnmodels::{Error, FromPayload};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_accessible_world_decodes() {
    let accessible = AccessibleLegoWorld::from_value(&accessible_lego_world_json())
        .expect("Should decode accessible world");

    let world = &accessible.world;
    assert_eq!(world.id, "world-1");
    assert_eq!(world.name, "Home");
    assert!(world.session.is_none());
    assert_eq!(world.created_at, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());

    let roles: Vec<LegoWorldGrantRole> = accessible.grants.iter().map(|g| g.role).collect();
    assert_eq!(roles, vec![LegoWorldGrantRole::WorldOwner, LegoWorldGrantRole::Keyholder]);
    assert_eq!(accessible.grants[0].grant_type, LegoWorldGrantType::Persistent);

    let session = accessible.session.as_ref().expect("Should have live session");
    assert_eq!(session.session_key.as_deref(), Some("key"));
    assert!(session.last_server_heartbeat.is_none());
    assert_eq!(session.total_seconds_played, 3600);
}

#[test]
fn test_accessible_world_falsy_session() {
    for session in [json!(null), json!({}), json!("")] {
        let mut json = accessible_lego_world_json();
        json["session"] = session;
        let accessible =
            AccessibleLegoWorld::from_value(&json).expect("Should decode without session");
        assert!(accessible.session.is_none());
    }

    let mut json = accessible_lego_world_json();
    json.as_object_mut()
        .expect("fixture should be an object")
        .remove("session");
    let err = AccessibleLegoWorld::from_value(&json).unwrap_err();
    assert_eq!(err.missing_field().as_deref(), Some("session"));
}

#[test]
fn test_world_default_metadata() {
    let world = LegoWorld::from_value(&lego_world_json(
        "juno_default",
        json!({"mode": "Hardcore", "difficulty": "Hardcore", "death": "Permanent", "hunger": "On"}),
    ))
    .expect("Should decode world");

    assert_eq!(world.metadata.constraint(), LegoWorldMetadataConstraint::Default);
    let LegoWorldMetadata::Default(metadata) = &world.metadata else {
        panic!("Should decode default metadata");
    };
    assert_eq!(metadata.mode, Some(LegoWorldMode::Hardcore));
    assert_eq!(metadata.hunger, Some(true));
    assert_eq!(metadata.temperature, None);

    assert_eq!(
        world.metadata.to_payload(),
        json!({"mode": "Hardcore", "difficulty": "Hardcore", "hunger": "On", "death": "Permanent"})
    );
}

#[test]
fn test_world_no_metadata() {
    let world = LegoWorld::from_value(&lego_world_json("nometadata", json!({"mode": "Cozy"})))
        .expect("Should decode world");

    assert_eq!(world.metadata.constraint(), LegoWorldMetadataConstraint::NoMetadata);
    assert_eq!(world.metadata.to_payload(), json!({}));
}

#[test]
fn test_world_unknown_constraint_fails() {
    let err = LegoWorld::from_value(&lego_world_json("juno_creative", json!({}))).unwrap_err();

    assert!(matches!(err, Error::Decode { entity: "LegoWorld", .. }));
    assert!(err.to_string().contains("metadataConstraint"));
}

#[test]
fn test_world_invalid_difficulty_fails() {
    let json = lego_world_json(
        "juno_default",
        json!({"mode": "Cozy", "difficulty": "Nightmare", "death": "On"}),
    );
    let err = LegoWorld::from_value(&json).unwrap_err();
    assert!(err.to_string().contains("Nightmare"));
}

#[test]
fn test_world_default_metadata_requires_mode() {
    let err = LegoWorld::from_value(&lego_world_json("juno_default", json!({}))).unwrap_err();

    assert!(matches!(err, Error::Decode { entity: "LegoWorld", .. }));
    assert!(err.to_string().contains("`mode`"));
}

#[test]
fn test_preset_matches_decoded_world() {
    let preset = DefaultLegoWorldMetadata::default_from_world_mode(LegoWorldMode::Survival);
    let world = LegoWorld::from_value(&lego_world_json("juno_default", preset.to_payload()))
        .expect("Should decode world built from preset");

    assert_eq!(world.metadata, LegoWorldMetadata::Default(preset));
}

#[test]
fn test_grant_without_expiry() {
    let mut json = lego_grant_json("juno_keyholder");
    json["expiresAt"] = json!(null);
    let mut accessible = accessible_lego_world_json();
    accessible["grants"] = json!([json]);

    let decoded = AccessibleLegoWorld::from_value(&accessible).expect("Should decode world");
    assert!(decoded.grants[0].expires_at.is_none());
}

#[test]
fn test_grant_unknown_role_fails() {
    let mut accessible = accessible_lego_world_json();
    accessible["grants"] = json!([lego_grant_json("juno_admin")]);

    assert!(AccessibleLegoWorld::from_value(&accessible).is_err());
}
