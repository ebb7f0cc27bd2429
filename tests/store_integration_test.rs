//! Integration tests for the item shop storefront and catalog models
//!
//! These tests decode full storefront and catalog payloads through the
//! public decoding entry points.

mod common;

use chrono::{TimeZone, Utc};
use common::{catalog_entry_json, remove_key, store_json};
use fnmodels::models::store::{CatalogEntry, ItemPurchase, Store};
use fnmodels::{Error, FromPayload};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_store_decodes_battle_royale_storefronts() {
    let store = Store::from_value(&store_json()).expect("Should decode store");

    assert_eq!(store.daily_purchase_hours, 24);
    assert_eq!(store.refresh_interval_hours, 24);
    assert_eq!(store.featured_items.len(), 2);
    assert_eq!(store.daily_items.len(), 1);
    assert!(store.special_featured_items.is_empty());
    assert!(store.special_daily_items.is_empty());

    assert_eq!(store.expires_at, Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap());
    assert_eq!(store.created_at(), Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
}

#[test]
fn test_store_featured_items() {
    let store = Store::from_value(&store_json()).expect("Should decode store");

    let panels: Vec<u32> = store.featured_items.iter().map(|f| f.panel).collect();
    assert_eq!(panels, vec![1, 2]);

    let bundle = &store.featured_items[1];
    assert_eq!(
        bundle.display_names(),
        vec!["Mako".to_string(), "Raven".to_string()]
    );
    assert_eq!(bundle.price, 500);
    assert_eq!(bundle.asset.as_deref(), Some("DA_Featured_Glider_ID_001"));
    assert_eq!(bundle.grants[0].item_type, "AthenaGlider");
    assert_eq!(bundle.grants[0].asset, "glider_id_001");
}

#[test]
fn test_store_all_items_order() {
    let store = Store::from_value(&store_json()).expect("Should decode store");

    let names: Vec<String> = store.all_items().map(|i| i.to_string()).collect();
    assert_eq!(
        names,
        vec![
            "[VIRTUAL]1 x Mako for 500 MtxCurrency".to_string(),
            "[VIRTUAL]2 x Mako, 1 x Raven for 2000 MtxCurrency".to_string(),
            "daily".to_string(),
        ]
    );
}

#[test]
fn test_store_missing_storefront_fails() {
    let mut json = store_json();
    json["storefronts"]
        .as_array_mut()
        .expect("storefronts should be an array")
        .retain(|s| s["name"] != "BRSpecialDaily");

    let err = Store::from_value(&json).unwrap_err();
    assert!(matches!(err, Error::Decode { entity: "Store", .. }));
    assert!(err.to_string().contains("BRSpecialDaily"));
}

#[test]
fn test_store_featured_item_without_panel_fails() {
    let mut json = store_json();
    json["storefronts"][1]["catalogEntries"][0]["categories"] = json!([]);

    assert!(Store::from_value(&json).is_err());
}

#[test]
fn test_store_missing_expiration_fails() {
    let mut json = store_json();
    remove_key(&mut json, "expiration");

    let err = Store::from_value(&json).unwrap_err();
    assert_eq!(err.missing_field().as_deref(), Some("expiration"));
}

#[test]
fn test_catalog_entry_decodes() {
    let entry = CatalogEntry::from_value(&catalog_entry_json()).expect("Should decode entry");

    assert_eq!(entry.id, "offer-1");
    assert_eq!(entry.sort_title, "Save the World");
    assert_eq!(entry.seller.name, "Epic Games");
    assert_eq!(entry.currency_decimals, 2);
    assert_eq!(entry.created_at, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(entry.key_images_of_type("Thumbnail").count(), 1);
    assert_eq!(entry.key_images_of_type("DieselStoreFrontWide").count(), 0);

    let item = &entry.items[0];
    assert!(item.title.is_none());
    assert!(item.created_at.is_none());
    assert!(!item.unsearchable);
}

#[test]
fn test_catalog_entry_required_keys() {
    for key in ["title4Sort", "seller", "upgradeMode"] {
        let mut json = catalog_entry_json();
        remove_key(&mut json, key);
        let err = CatalogEntry::from_value(&json).unwrap_err();
        assert_eq!(err.missing_field().as_deref(), Some(key));
    }

    let mut json = catalog_entry_json();
    remove_key(&mut json, "keyImages");
    let entry = CatalogEntry::from_value(&json).expect("Should decode without key images");
    assert!(entry.key_images.is_empty());
}

#[test]
fn test_purchase_payload_for_catalog_offer() {
    let entry = CatalogEntry::from_value(&catalog_entry_json()).expect("Should decode entry");
    let purchase = ItemPurchase::new(entry.id.as_str(), "RealMoney", "", entry.current_price);

    assert_eq!(
        purchase.to_payload(),
        json!({
            "offerId": "offer-1",
            "purchaseQuantity": 1,
            "currency": "RealMoney",
            "currencySubType": "",
            "expectedTotalPrice": 1999,
            "gameContext": "GameContext: Frontend.CatabaScreen"
        })
    );
}
