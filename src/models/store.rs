//! Item shop storefront and catalog offer models
//!
//! The storefront payload lists several named storefronts; the four Battle
//! Royale ones are decoded into [`FeaturedStoreItem`] / [`StoreItem`] lists.
//! Catalog offers ([`CatalogEntry`]) come from the separate catalog service.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::convert::TryFrom;

use super::error::{ValidationError, ValidationErrorKind};
use super::validation::{
    extract_asset, iso_datetime, iso_datetime_opt, parse_bundle_display_names,
    parse_iso_datetime, split_template_id, split_words,
};

/// Storefront names, in the order their lists appear on [`Store`]
pub const FEATURED_STOREFRONT: &str = "BRWeeklyStorefront";
pub const DAILY_STOREFRONT: &str = "BRDailyStorefront";
pub const SPECIAL_FEATURED_STOREFRONT: &str = "BRSpecialFeatured";
pub const SPECIAL_DAILY_STOREFRONT: &str = "BRSpecialDaily";

/// Game context sent with every catalog purchase
pub const PURCHASE_GAME_CONTEXT: &str = "GameContext: Frontend.CatabaScreen";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StorefrontWire {
    name: String,
    catalog_entries: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreWire {
    daily_purchase_hrs: i64,
    refresh_interval_hrs: i64,
    expiration: String,
    storefronts: Vec<StorefrontWire>,
}

/// The Battle Royale item shop
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "StoreWire")]
pub struct Store {
    /// How many hours a day items can be purchased, usually 24
    pub daily_purchase_hours: i64,
    pub refresh_interval_hours: i64,
    pub expires_at: DateTime<Utc>,
    pub featured_items: Vec<FeaturedStoreItem>,
    pub daily_items: Vec<StoreItem>,
    pub special_featured_items: Vec<FeaturedStoreItem>,
    pub special_daily_items: Vec<StoreItem>,
}

impl Store {
    /// When this shop rotation went live
    pub fn created_at(&self) -> DateTime<Utc> {
        self.expires_at - Duration::days(1)
    }

    /// Every listed item, featured lists first
    pub fn all_items(&self) -> impl Iterator<Item = &StoreItem> {
        self.featured_items
            .iter()
            .map(|f| &f.item)
            .chain(self.daily_items.iter())
            .chain(self.special_featured_items.iter().map(|f| &f.item))
            .chain(self.special_daily_items.iter())
    }
}

fn find_storefront<'a>(
    storefronts: &'a [StorefrontWire],
    name: &str,
) -> Result<&'a StorefrontWire, ValidationError> {
    storefronts
        .iter()
        .find(|s| s.name == name)
        .ok_or_else(|| {
            ValidationError::with_context(
                ValidationErrorKind::RequiredField,
                name,
                "Storefront not present in payload",
            )
        })
}

fn decode_entries<T>(storefront: &StorefrontWire) -> Result<Vec<T>, ValidationError>
where
    T: TryFrom<StoreItemWire, Error = ValidationError>,
{
    storefront
        .catalog_entries
        .iter()
        .map(|entry| {
            let wire = StoreItemWire::deserialize(entry).map_err(|e| {
                ValidationError::with_context(
                    ValidationErrorKind::Custom(e.to_string()),
                    storefront.name.as_str(),
                    "Malformed catalog entry",
                )
            })?;
            T::try_from(wire)
        })
        .collect()
}

impl TryFrom<StoreWire> for Store {
    type Error = ValidationError;

    fn try_from(raw: StoreWire) -> Result<Self, Self::Error> {
        let expires_at = parse_iso_datetime(&raw.expiration, "expiration")?;

        let featured = find_storefront(&raw.storefronts, FEATURED_STOREFRONT)?;
        let daily = find_storefront(&raw.storefronts, DAILY_STOREFRONT)?;
        let special_featured = find_storefront(&raw.storefronts, SPECIAL_FEATURED_STOREFRONT)?;
        let special_daily = find_storefront(&raw.storefronts, SPECIAL_DAILY_STOREFRONT)?;

        Ok(Store {
            daily_purchase_hours: raw.daily_purchase_hrs,
            refresh_interval_hours: raw.refresh_interval_hrs,
            expires_at,
            featured_items: decode_entries(featured)?,
            daily_items: decode_entries(daily)?,
            special_featured_items: decode_entries(special_featured)?,
            special_daily_items: decode_entries(special_daily)?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct GiftInfoWire {
    #[serde(rename = "bIsEnabled")]
    is_enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceWire {
    final_price: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemGrantWire {
    template_id: String,
    quantity: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoreItemWire {
    dev_name: String,
    #[serde(default)]
    display_asset_path: Option<String>,
    #[serde(default)]
    gift_info: Option<GiftInfoWire>,
    daily_limit: i64,
    weekly_limit: i64,
    monthly_limit: i64,
    offer_id: String,
    offer_type: String,
    prices: Vec<PriceWire>,
    refundable: bool,
    item_grants: Vec<ItemGrantWire>,
    #[serde(default)]
    meta_info: Vec<StoreMetaInfo>,
    #[serde(default)]
    meta: Map<String, Value>,
    #[serde(default)]
    categories: Vec<String>,
}

/// Key/value pair from an offer's `metaInfo` list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoreMetaInfo {
    pub key: String,
    pub value: String,
}

/// One item granted by a shop offer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoreItemGrant {
    pub quantity: i64,
    #[serde(rename = "type")]
    pub item_type: String,
    pub asset: String,
}

/// An offer in one of the storefronts
///
/// Account purchase limits use `-1` for unlimited.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "StoreItemWire")]
pub struct StoreItem {
    pub dev_name: String,
    pub asset_path: Option<String>,
    /// Usually a cosmetic id, taken from the asset path
    pub asset: Option<String>,
    pub gifts_enabled: bool,
    pub daily_limit: i64,
    pub weekly_limit: i64,
    pub monthly_limit: i64,
    pub offer_id: String,
    pub offer_type: String,
    /// Price in V-Bucks
    pub price: i64,
    pub refundable: bool,
    pub grants: Vec<StoreItemGrant>,
    pub meta_info: Vec<StoreMetaInfo>,
    pub meta: Map<String, Value>,
    pub categories: Vec<String>,
}

impl StoreItem {
    /// Display names parsed out of a bundle's dev name
    pub fn display_names(&self) -> Vec<String> {
        parse_bundle_display_names(&self.dev_name)
    }

    pub fn encryption_key(&self) -> Option<&str> {
        self.meta_info
            .iter()
            .find(|m| m.key == "EncryptionKey")
            .map(|m| m.value.as_str())
    }

    /// Whether the item is in the shop for the first time
    pub fn is_new(&self) -> bool {
        self.meta_info
            .iter()
            .any(|m| m.value.eq_ignore_ascii_case("new"))
    }

    /// The red tag shown above the tile, e.g. `Selectable Styles`
    pub fn violator(&self) -> Option<String> {
        self.meta
            .get("BannerOverride")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .and_then(split_words)
    }
}

impl std::fmt::Display for StoreItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dev_name)
    }
}

impl TryFrom<StoreItemWire> for StoreItem {
    type Error = ValidationError;

    fn try_from(raw: StoreItemWire) -> Result<Self, Self::Error> {
        let price = raw
            .prices
            .first()
            .map(|p| p.final_price)
            .ok_or_else(|| {
                ValidationError::with_context(
                    ValidationErrorKind::RequiredField,
                    "prices",
                    format!("Offer {} has no price", raw.offer_id),
                )
            })?;

        let grants = raw
            .item_grants
            .iter()
            .map(|grant| {
                let (item_type, asset) = split_template_id(&grant.template_id, "itemGrants")?;
                Ok(StoreItemGrant {
                    quantity: grant.quantity,
                    item_type,
                    asset,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Ok(StoreItem {
            asset: extract_asset(raw.display_asset_path.as_deref()),
            asset_path: raw.display_asset_path,
            gifts_enabled: raw.gift_info.map_or(false, |g| g.is_enabled),
            dev_name: raw.dev_name,
            daily_limit: raw.daily_limit,
            weekly_limit: raw.weekly_limit,
            monthly_limit: raw.monthly_limit,
            offer_id: raw.offer_id,
            offer_type: raw.offer_type,
            price,
            refundable: raw.refundable,
            grants,
            meta_info: raw.meta_info,
            meta: raw.meta,
            categories: raw.categories,
        })
    }
}

/// A featured offer, which also knows its panel position
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "StoreItemWire")]
pub struct FeaturedStoreItem {
    #[serde(flatten)]
    pub item: StoreItem,
    /// Panel the item is listed in, counted from the left
    pub panel: u32,
}

impl std::ops::Deref for FeaturedStoreItem {
    type Target = StoreItem;

    fn deref(&self) -> &StoreItem {
        &self.item
    }
}

impl TryFrom<StoreItemWire> for FeaturedStoreItem {
    type Error = ValidationError;

    fn try_from(raw: StoreItemWire) -> Result<Self, Self::Error> {
        // "Panel 02" -> 2
        let panel = raw
            .categories
            .first()
            .and_then(|c| c.split(' ').nth(1))
            .and_then(|n| n.parse::<u32>().ok())
            .ok_or_else(|| {
                ValidationError::with_context(
                    ValidationErrorKind::Custom("Missing panel number".to_string()),
                    "categories",
                    format!("Featured offer {} has no `Panel N` category", raw.offer_id),
                )
            })?;

        Ok(FeaturedStoreItem {
            item: StoreItem::try_from(raw)?,
            panel,
        })
    }
}

/// An offer from the catalog service
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    pub long_description: String,
    #[serde(default)]
    pub key_images: Vec<CatalogEntryKeyImage>,
    pub categories: Vec<Value>,
    pub namespace: String,
    pub status: String,
    #[serde(rename = "creationDate", deserialize_with = "iso_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "lastModifiedDate", deserialize_with = "iso_datetime")]
    pub last_modified_at: DateTime<Utc>,
    pub custom_attributes: Value,
    pub internal_name: String,
    pub recurrence: String,
    pub items: Vec<CatalogEntryItem>,
    pub currency_code: String,
    pub current_price: i64,
    pub price: i64,
    pub base_price: i64,
    pub recurring_price: i64,
    pub free_days: i64,
    pub max_billing_cycles: i64,
    pub seller: CatalogEntrySeller,
    #[serde(rename = "effectiveDate", deserialize_with = "iso_datetime")]
    pub effective_at: DateTime<Utc>,
    pub vat_included: bool,
    pub is_code_redemption_only: bool,
    pub is_featured: bool,
    pub tax_sku_id: String,
    pub merchant_group: String,
    pub price_tier: String,
    pub url_slug: String,
    pub role_names_to_grant: Vec<Value>,
    pub tags: Vec<Value>,
    pub purchase_limit: i64,
    pub ignore_order: bool,
    pub fulfill_to_group: bool,
    pub fraud_item_type: String,
    pub share_revenue: bool,
    pub unsearchable: bool,
    pub release_offer: String,
    #[serde(rename = "title4Sort")]
    pub sort_title: String,
    pub self_refundable: bool,
    pub refund_type: String,
    pub price_calculation_mode: String,
    pub assemble_mode: String,
    pub currency_decimals: u32,
    pub allow_purchase_for_partial_owned: bool,
    pub share_revenue_with_underage_affiliates: bool,
    pub platform_whitelist: Vec<Value>,
    pub platform_blacklist: Vec<Value>,
    pub partial_item_prerequisite_check: bool,
    pub upgrade_mode: String,
}

impl CatalogEntry {
    /// Images of the given type, e.g. `Thumbnail` or `DieselStoreFrontWide`
    pub fn key_images_of_type<'a>(
        &'a self,
        image_type: &'a str,
    ) -> impl Iterator<Item = &'a CatalogEntryKeyImage> + 'a {
        self.key_images.iter().filter(move |i| i.image_type == image_type)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntryKeyImage {
    #[serde(rename = "type")]
    pub image_type: String,
    pub url: String,
    pub md5: String,
    pub width: u32,
    pub height: u32,
    pub size: u64,
    #[serde(rename = "uploadedDate", deserialize_with = "iso_datetime")]
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntryItem {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub categories: Vec<Value>,
    pub namespace: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "creationDate", default, deserialize_with = "iso_datetime_opt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "lastModifiedDate", default, deserialize_with = "iso_datetime_opt")]
    pub last_modified_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub custom_attributes: Option<Value>,
    #[serde(default)]
    pub entitlement_name: Option<String>,
    #[serde(default)]
    pub entitlement_type: Option<String>,
    #[serde(default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub release_info: Option<Vec<Value>>,
    #[serde(default)]
    pub developer: Option<String>,
    #[serde(default)]
    pub developer_id: Option<String>,
    #[serde(default)]
    pub use_count: Option<i64>,
    #[serde(default)]
    pub eula_ids: Option<Vec<Value>>,
    #[serde(default)]
    pub end_of_support: Option<bool>,
    #[serde(default)]
    pub ns_major_items: Option<Vec<Value>>,
    #[serde(default)]
    pub ns_depends_on_dlc_items: Option<Vec<Value>>,
    #[serde(default)]
    pub age_gatings: Option<Value>,
    #[serde(default)]
    pub application_id: Option<String>,
    #[serde(default)]
    pub requires_secure_account: Option<bool>,
    pub unsearchable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogEntrySeller {
    pub id: String,
    pub name: String,
}

/// A purchase request for a catalog offer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPurchase {
    pub offer_id: String,
    pub currency_type: String,
    pub currency_sub_type: String,
    pub expected_price: i64,
    pub quantity: u32,
}

impl ItemPurchase {
    /// A single-quantity purchase
    pub fn new(
        offer_id: impl Into<String>,
        currency_type: impl Into<String>,
        currency_sub_type: impl Into<String>,
        expected_price: i64,
    ) -> Self {
        Self {
            offer_id: offer_id.into(),
            currency_type: currency_type.into(),
            currency_sub_type: currency_sub_type.into(),
            expected_price,
            quantity: 1,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Request body for the purchase endpoint
    pub fn to_payload(&self) -> Value {
        json!({
            "offerId": self.offer_id,
            "purchaseQuantity": self.quantity,
            "currency": self.currency_type,
            "currencySubType": self.currency_sub_type,
            "expectedTotalPrice": self.expected_price,
            "gameContext": PURCHASE_GAME_CONTEXT,
        })
    }
}
