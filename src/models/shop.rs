//! Web shop catalog models
//!
//! The web shop payload is a tree of categories, sections and offer groups,
//! with the purchasable items at the leaves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{falsy_as_none, unix_seconds, unix_seconds_falsy};

/// The whole web shop
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WebShop {
    #[serde(default)]
    pub categories: Vec<WebShopCategory>,
}

impl WebShop {
    /// Every item in the shop, walking categories, sections and offer groups in order
    pub fn items(&self) -> impl Iterator<Item = &WebShopItem> {
        self.categories
            .iter()
            .flat_map(|c| c.sections.iter())
            .flat_map(|s| s.offer_groups.iter())
            .flat_map(|g| g.items.iter())
    }

    /// The first item carrying the given offer id
    pub fn find_offer(&self, offer_id: &str) -> Option<&WebShopItem> {
        self.items().find(|item| item.offer_id.as_deref() == Some(offer_id))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebShopCategory {
    pub nav_label: String,
    #[serde(default)]
    pub sections: Vec<WebShopSection>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebShopSection {
    #[serde(rename = "sectionID")]
    pub id: String,
    pub stack_rank: i64,
    pub display_name: String,
    pub section_id: String,
    pub category_name: String,
    #[serde(default)]
    pub offer_groups: Vec<WebShopOfferGroup>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebShopOfferGroup {
    #[serde(rename = "offerGroupId")]
    pub id: String,
    pub display_type: String,
    #[serde(default)]
    pub items: Vec<WebShopItem>,
}

/// A purchasable tile in the web shop
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebShopItem {
    pub asset_type: String,
    pub has_variants: bool,
    pub has_tags: bool,
    #[serde(default)]
    pub offer_id: Option<String>,
    pub image: WebShopItemImage,
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    pub english_title: String,
    pub url_name: String,
    #[serde(default, deserialize_with = "falsy_as_none")]
    pub callout: Option<WebShopItemCallout>,
    pub size: WebShopItemSize,
    #[serde(default)]
    pub color1: Option<String>,
    #[serde(default)]
    pub color2: Option<String>,
    #[serde(default)]
    pub color3: Option<String>,
    #[serde(default)]
    pub text_background_color: Option<String>,
    pub layout_id: String,
    pub pricing: WebShopItemPricing,
    #[serde(rename = "ownershipCalculationData")]
    pub ownership_calculation: WebShopItemOwnershipCalculation,
    #[serde(rename = "appStoreId", default)]
    pub app_store_ids: Vec<String>,
    #[serde(deserialize_with = "unix_seconds")]
    pub in_date: DateTime<Utc>,
    #[serde(deserialize_with = "unix_seconds")]
    pub out_date: DateTime<Utc>,
    #[serde(default, deserialize_with = "unix_seconds_falsy")]
    pub new_until: Option<DateTime<Utc>>,
}

impl WebShopItem {
    /// Whether the item is listed at `at`
    pub fn is_available_at(&self, at: DateTime<Utc>) -> bool {
        self.in_date <= at && at < self.out_date
    }

    /// Whether the item still carries its "new" badge at `at`
    pub fn is_new_at(&self, at: DateTime<Utc>) -> bool {
        self.new_until.map_or(false, |until| at < until)
    }
}

/// Image urls by size
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WebShopItemImage {
    #[serde(rename = "sm")]
    pub small: String,
    #[serde(rename = "md")]
    pub medium: String,
    #[serde(rename = "lg")]
    pub large: String,
    pub tall: String,
    pub wide: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WebShopItemCallout {
    pub text: String,
    pub intensity: String,
}

/// Tile dimensions in grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct WebShopItemSize {
    pub rows: u32,
    pub columns: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebShopItemPricing {
    pub final_price: i64,
    pub base_price: i64,
    pub amount_off: i64,
    #[serde(default)]
    pub currency_type: Option<String>,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub currency_decimals: Option<u32>,
}

impl WebShopItemPricing {
    pub fn is_discounted(&self) -> bool {
        self.amount_off > 0 || self.final_price < self.base_price
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebShopItemOwnershipCalculation {
    pub item_grant_template_ids: Vec<String>,
    #[serde(
        rename = "dynamicBundlePricingData",
        default,
        deserialize_with = "falsy_as_none"
    )]
    pub dynamic_bundle_pricing: Option<WebShopItemDynamicBundlePricing>,
}

/// Bundle pricing that discounts items the player already owns
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebShopItemDynamicBundlePricing {
    pub item_grant_template_ids: Vec<String>,
    pub floor_price: i64,
    pub discounted_base_price: i64,
    pub currency_type: String,
    pub bundle_items: Vec<WebShopItemDynamicBundlePricingItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebShopItemDynamicBundlePricingItem {
    pub regular_price: i64,
    pub already_owned_price_reduction: i64,
    #[serde(with = "template_ref")]
    pub item: String,
}

/// `{"templateId": "..."}` on the wire, the bare template id in memory
mod template_ref {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    struct TemplateRef {
        template_id: String,
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        TemplateRef::deserialize(deserializer).map(|r| r.template_id)
    }

    pub fn serialize<S>(template_id: &str, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        TemplateRef {
            template_id: template_id.to_string(),
        }
        .serialize(serializer)
    }
}
