//! Player profile models
//!
//! Profiles share one envelope: an `items` map keyed by item GUID and a
//! `stats.attributes` object whose shape depends on the profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::convert::TryFrom;

use super::enums::{CosmeticType, PaymentPlatform};
use super::error::{ValidationError, ValidationErrorKind, ValidationResult};
use super::validation::{
    add_days, falsy_as_none, iso_datetime, iso_datetime_opt, ordered_entries, parse_iso_datetime,
    split_template_id,
};

/// Days after the reference time at which a refund token is granted back
pub const REFUND_GRANT_DAYS: i64 = 365;

#[derive(Debug, Clone, Deserialize)]
struct StatsWire<A> {
    attributes: A,
}

#[derive(Debug, Clone, Deserialize)]
struct ProfileWire<A> {
    #[serde(deserialize_with = "ordered_entries")]
    items: Vec<(String, ItemProfile)>,
    stats: StatsWire<A>,
}

impl<A> ProfileWire<A> {
    /// Items in payload order, each tagged with its GUID
    fn into_parts(self) -> (Vec<ItemProfile>, A) {
        let items = self
            .items
            .into_iter()
            .map(|(guid, mut item)| {
                item.guid = guid;
                item
            })
            .collect();
        (items, self.stats.attributes)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemProfileWire {
    template_id: String,
    attributes: Value,
    quantity: i64,
}

/// An item stored in a profile
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "ItemProfileWire")]
pub struct ItemProfile {
    /// Key of the item in its profile's `items` map; empty when decoded alone
    pub guid: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub id: String,
    pub attributes: Value,
    pub quantity: i64,
}

impl ItemProfile {
    /// The cosmetic type, when the item is a cosmetic
    pub fn cosmetic_type(&self) -> Option<CosmeticType> {
        CosmeticType::parse(&self.item_type).ok()
    }

    fn is(&self, item_type: &str, id: &str) -> bool {
        self.item_type == item_type && self.id == id
    }
}

impl TryFrom<ItemProfileWire> for ItemProfile {
    type Error = ValidationError;

    fn try_from(raw: ItemProfileWire) -> Result<Self, Self::Error> {
        let (item_type, id) = split_template_id(&raw.template_id, "templateId")?;
        Ok(Self {
            guid: String::new(),
            item_type,
            id,
            attributes: raw.attributes,
            quantity: raw.quantity,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemWire {
    item_type: String,
    item_guid: String,
    item_profile: String,
    quantity: i64,
}

/// An item granted by a purchase
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "ItemWire")]
pub struct Item {
    #[serde(rename = "type")]
    pub item_type: String,
    pub id: String,
    pub guid: String,
    /// Profile the item was granted into, e.g. `athena`
    pub profile: String,
    pub quantity: i64,
}

impl TryFrom<ItemWire> for Item {
    type Error = ValidationError;

    fn try_from(raw: ItemWire) -> Result<Self, Self::Error> {
        let (item_type, id) = split_template_id(&raw.item_type, "itemType")?;
        Ok(Self {
            item_type,
            id,
            guid: raw.item_guid,
            profile: raw.item_profile,
            quantity: raw.quantity,
        })
    }
}

// ---------------------------------------------------------------------------
// Battle Royale
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct SeasonWire {
    #[serde(default)]
    num_wins: i64,
}

/// `stats.attributes` of the `athena` profile
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BattleRoyaleStats {
    #[serde(rename = "accountLevel")]
    pub account_level: i64,
    #[serde(rename = "season_num")]
    pub season: i64,
    #[serde(rename = "level")]
    pub season_level: i64,
    #[serde(rename = "season", default, skip_serializing)]
    season_detail: SeasonWire,
    #[serde(rename = "last_match_end_datetime", deserialize_with = "iso_datetime_opt")]
    pub last_match_ended_at: Option<DateTime<Utc>>,
    #[serde(rename = "battlestars_season_total")]
    pub total_season_battle_stars: i64,
    #[serde(rename = "battlestars", default)]
    pub battle_stars: i64,
    #[serde(rename = "purchased_bp_offers", default)]
    pub purchased_battle_pass_offers: Vec<PurchasedBattlePassOffer>,
    #[serde(rename = "style_points_season_total", default)]
    pub total_season_style_points: i64,
    #[serde(default)]
    pub style_points: i64,
    pub lifetime_wins: i64,
    #[serde(rename = "past_seasons", default)]
    pub past_season_stats: Vec<PastSeasonStats>,
    #[serde(rename = "loadouts")]
    pub saved_loadout_ids: Vec<String>,
    #[serde(default)]
    pub use_random_loadout: bool,
    #[serde(rename = "last_applied_loadout", default)]
    pub last_applied_loadout_id: Option<String>,
    #[serde(default)]
    pub season_match_boost: i64,
    #[serde(default)]
    pub season_friend_match_boost: i64,
    #[serde(rename = "mfa_reward_claimed")]
    pub has_claimed_2fa_reward: bool,
    #[serde(default)]
    pub party_assist_quest: Option<String>,
    pub xp: i64,
    #[serde(deserialize_with = "iso_datetime")]
    pub last_xp_interaction: DateTime<Utc>,
    #[serde(rename = "rested_xp", default)]
    pub supercharged_xp: i64,
    #[serde(rename = "rested_xp_mult")]
    pub supercharged_xp_multiplier: f64,
    #[serde(rename = "rested_xp_overflow")]
    pub supercharged_xp_overflow: i64,
    #[serde(rename = "rested_xp_exchange")]
    pub supercharged_xp_exchange: f64,
    #[serde(rename = "rested_xp_golden_path_granted", default)]
    pub supercharged_xp_golden_path_granted: i64,
    #[serde(rename = "rested_xp_cumulative", default)]
    pub supercharged_xp_cumulative: i64,
    #[serde(rename = "rested_xp_consumed_cumulative", default)]
    pub supercharged_xp_consumed_cumulative: i64,
    #[serde(rename = "book_purchased", default)]
    pub has_purchased_book: bool,
    pub book_level: i64,
    #[serde(default)]
    pub book_xp: Option<i64>,
    #[serde(default)]
    pub creative_dynamic_xp: Option<Value>,
    #[serde(default)]
    pub vote_data: Option<Value>,
}

impl BattleRoyaleStats {
    /// Wins this season, zero when the season block is absent
    pub fn season_wins(&self) -> i64 {
        self.season_detail.num_wins
    }
}

/// The `athena` profile
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(from = "ProfileWire<BattleRoyaleStats>")]
pub struct BattleRoyaleProfile {
    pub items: Vec<ItemProfile>,
    pub stats: BattleRoyaleStats,
}

impl From<ProfileWire<BattleRoyaleStats>> for BattleRoyaleProfile {
    fn from(raw: ProfileWire<BattleRoyaleStats>) -> Self {
        let (items, stats) = raw.into_parts();
        Self { items, stats }
    }
}

impl BattleRoyaleProfile {
    /// Cosmetics of the given types; an empty slice selects every cosmetic type
    pub fn get_cosmetics(&self, types: &[CosmeticType]) -> Vec<&ItemProfile> {
        self.items
            .iter()
            .filter(|item| match item.cosmetic_type() {
                Some(cosmetic) => types.is_empty() || types.contains(&cosmetic),
                None => false,
            })
            .collect()
    }

    /// Number of owned cosmetics per type; non-cosmetic items are skipped
    pub fn count_cosmetics(&self) -> BTreeMap<CosmeticType, usize> {
        let mut counts = BTreeMap::new();
        for cosmetic in self.items.iter().filter_map(ItemProfile::cosmetic_type) {
            *counts.entry(cosmetic).or_insert(0) += 1;
        }
        counts
    }

    pub fn get_legacies(&self) -> Vec<&ItemProfile> {
        self.items
            .iter()
            .filter(|item| item.item_type == "Accolades")
            .collect()
    }

    /// The locker, decoded from the first `CosmeticLocker` item
    pub fn get_locker(&self) -> ValidationResult<Locker> {
        let item = self
            .items
            .iter()
            .find(|item| item.item_type == "CosmeticLocker")
            .ok_or_else(|| {
                ValidationError::with_context(
                    ValidationErrorKind::RequiredField,
                    "items",
                    "Profile has no CosmeticLocker item",
                )
            })?;

        Locker::deserialize(&item.attributes).map_err(|e| {
            ValidationError::with_context(
                ValidationErrorKind::Custom(e.to_string()),
                "attributes",
                format!("Malformed locker {}", item.guid),
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PastSeasonStats {
    #[serde(rename = "seasonNumber")]
    pub season: i64,
    #[serde(rename = "numWins")]
    pub wins: i64,
    #[serde(rename = "seasonXp")]
    pub xp: i64,
    #[serde(rename = "seasonLevel")]
    pub level: i64,
    #[serde(rename = "purchasedVIP")]
    pub has_purchased_battle_pass: bool,
    #[serde(rename = "numRoyalRoyales")]
    pub crown_wins: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasedBattlePassOffer {
    pub offer_id: String,
    #[serde(rename = "bIsFreePassReward")]
    pub free_reward: bool,
    #[serde(deserialize_with = "iso_datetime")]
    pub purchase_date: DateTime<Utc>,
    #[serde(rename = "lootResult")]
    pub items: Vec<Item>,
    #[serde(rename = "currencyType")]
    pub currency: String,
    #[serde(rename = "totalCurrencyPaid")]
    pub currency_paid: i64,
    #[serde(default)]
    pub attributes: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LockerSlotsWire {
    character: LockerSlot,
    backpack: LockerSlot,
    pickaxe: LockerSlot,
    glider: LockerSlot,
    sky_dive_contrail: LockerSlot,
    dance: LockerSlot,
    music_pack: LockerSlot,
    item_wrap: LockerSlot,
    loading_screen: LockerSlot,
}

#[derive(Debug, Clone, Deserialize)]
struct LockerSlotsDataWire {
    slots: LockerSlotsWire,
}

#[derive(Debug, Clone, Deserialize)]
struct LockerWire {
    locker_slots_data: LockerSlotsDataWire,
    #[serde(default)]
    locker_name: Option<String>,
    #[serde(default)]
    banner_icon_template: Option<String>,
    #[serde(default)]
    banner_color_template: Option<String>,
    #[serde(rename = "useCount", default)]
    use_count: Option<i64>,
}

/// The equipped loadout
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(from = "LockerWire")]
pub struct Locker {
    pub outfit: LockerSlot,
    pub backpack: LockerSlot,
    pub harvesting_tool: LockerSlot,
    pub glider: LockerSlot,
    pub contrail: LockerSlot,
    pub emote: LockerSlot,
    pub music: LockerSlot,
    pub wrap: LockerSlot,
    pub loading_screen: LockerSlot,
    pub name: Option<String>,
    pub banner_icon_id: Option<String>,
    pub banner_color_id: Option<String>,
    pub use_count: Option<i64>,
}

impl From<LockerWire> for Locker {
    fn from(raw: LockerWire) -> Self {
        let slots = raw.locker_slots_data.slots;
        Self {
            outfit: slots.character,
            backpack: slots.backpack,
            harvesting_tool: slots.pickaxe,
            glider: slots.glider,
            contrail: slots.sky_dive_contrail,
            emote: slots.dance,
            music: slots.music_pack,
            wrap: slots.item_wrap,
            loading_screen: slots.loading_screen,
            name: raw.locker_name,
            banner_icon_id: raw.banner_icon_template,
            banner_color_id: raw.banner_color_template,
            use_count: raw.use_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LockerSlot {
    #[serde(rename = "locker_slot_name", default)]
    pub name: Option<String>,
    #[serde(rename = "useCount")]
    pub use_count: i64,
    #[serde(default)]
    pub item: Option<Value>,
}

// ---------------------------------------------------------------------------
// Common core
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
struct InAppPurchasesWire {
    #[serde(default)]
    receipts: Vec<String>,
}

/// `stats.attributes` of the `common_core` profile
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CommonCoreStats {
    pub survey_data: Value,
    pub intro_game_played: bool,
    #[serde(rename = "mtx_purchase_history", default, deserialize_with = "falsy_as_none")]
    pub vbucks_purchase_history: Option<VBucksPurchaseHistory>,
    #[serde(rename = "rmt_purchase_history", default, deserialize_with = "falsy_as_none")]
    pub money_purchase_history: Option<MoneyPurchaseHistory>,
    #[serde(default, deserialize_with = "falsy_as_none")]
    pub gift_history: Option<GiftHistory>,
    #[serde(default)]
    pub undo_cooldowns: Vec<UndoCooldown>,
    #[serde(rename = "mtx_affiliate", default)]
    pub creator_code: Option<String>,
    #[serde(rename = "mtx_affiliate_id", default)]
    pub creator_code_owner_id: Option<String>,
    #[serde(rename = "mtx_affiliate_set_time", default, deserialize_with = "iso_datetime_opt")]
    pub creator_code_set_at: Option<DateTime<Utc>>,
    #[serde(rename = "current_mtx_platform")]
    pub current_vbucks_platform: PaymentPlatform,
    #[serde(rename = "in_app_purchases", skip_serializing)]
    in_app_purchases: InAppPurchasesWire,
    #[serde(rename = "allowed_to_send_gifts")]
    pub allowed_sending_gifts: bool,
    #[serde(rename = "allowed_to_receive_gifts")]
    pub allowed_receiving_gifts: bool,
    #[serde(rename = "mfa_enabled")]
    pub enabled_2fa: bool,
}

impl CommonCoreStats {
    pub fn receipt_ids(&self) -> &[String] {
        &self.in_app_purchases.receipts
    }
}

/// The `common_core` profile
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(from = "ProfileWire<CommonCoreStats>")]
pub struct CommonCoreProfile {
    pub items: Vec<ItemProfile>,
    pub stats: CommonCoreStats,
}

impl From<ProfileWire<CommonCoreStats>> for CommonCoreProfile {
    fn from(raw: ProfileWire<CommonCoreStats>) -> Self {
        let (items, stats) = raw.into_parts();
        Self { items, stats }
    }
}

fn platform_matches(
    item: &ItemProfile,
    platform: Option<PaymentPlatform>,
    strict: bool,
) -> bool {
    let Some(wanted) = platform else {
        return true;
    };
    let Some(actual) = item
        .attributes
        .get("platform")
        .and_then(Value::as_str)
        .and_then(|p| PaymentPlatform::parse(p).ok())
    else {
        return false;
    };

    if strict || wanted == PaymentPlatform::Nintendo {
        actual == wanted
    } else {
        // V-Bucks bought anywhere but Nintendo are shared across platforms
        actual != PaymentPlatform::Nintendo
    }
}

impl CommonCoreProfile {
    pub fn save_the_world_vbucks(&self) -> i64 {
        self.sum_quantity(|item| item.is("Currency", "MtxComplimentary"))
    }

    /// Purchased V-Bucks usable on `platform`
    ///
    /// With no platform every purchase counts. `strict` limits the count to
    /// purchases made on exactly that platform.
    pub fn purchased_vbucks(&self, platform: Option<PaymentPlatform>, strict: bool) -> i64 {
        self.sum_quantity(|item| {
            item.is("Currency", "MtxPurchased") && platform_matches(item, platform, strict)
        })
    }

    pub fn free_obtained_vbucks(&self) -> i64 {
        self.sum_quantity(|item| item.id == "MtxGiveaway")
    }

    pub fn vbucks_debt(&self) -> i64 {
        self.sum_quantity(|item| item.id == "MtxDebt")
    }

    pub fn overall_vbucks(&self, platform: Option<PaymentPlatform>, strict: bool) -> i64 {
        self.save_the_world_vbucks()
            + self.purchased_vbucks(platform, strict)
            + self.free_obtained_vbucks()
            - self.vbucks_debt()
    }

    pub fn banner(&self) -> Vec<&ItemProfile> {
        self.items_of_type("HomebaseBannerIcon")
    }

    pub fn banner_color(&self) -> Vec<&ItemProfile> {
        self.items_of_type("HomebaseBannerColor")
    }

    pub fn has_custom_games_access(&self) -> bool {
        self.items
            .iter()
            .any(|item| item.id == "athenacancreatecustomgames_token")
    }

    pub fn has_save_the_world_access(&self) -> bool {
        self.items.iter().any(|item| item.id == "campaignaccess")
    }

    fn sum_quantity(&self, predicate: impl Fn(&ItemProfile) -> bool) -> i64 {
        self.items
            .iter()
            .filter(|&item| predicate(item))
            .map(|item| item.quantity)
            .sum()
    }

    fn items_of_type(&self, item_type: &str) -> Vec<&ItemProfile> {
        self.items
            .iter()
            .filter(|item| item.item_type == item_type)
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VBucksPurchaseHistoryWire {
    refunds_used: i64,
    refund_credits: i64,
    #[serde(default, deserialize_with = "iso_datetime_opt")]
    token_refresh_reference_time: Option<DateTime<Utc>>,
    purchases: Vec<VBucksPurchase>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(from = "VBucksPurchaseHistoryWire")]
pub struct VBucksPurchaseHistory {
    pub refunds_used: i64,
    pub refund_credits: i64,
    /// When the next refund token is granted back
    pub next_refund_grant_at: Option<DateTime<Utc>>,
    pub purchases: Vec<VBucksPurchase>,
}

impl From<VBucksPurchaseHistoryWire> for VBucksPurchaseHistory {
    fn from(raw: VBucksPurchaseHistoryWire) -> Self {
        Self {
            refunds_used: raw.refunds_used,
            refund_credits: raw.refund_credits,
            next_refund_grant_at: raw
                .token_refresh_reference_time
                .map(|t| add_days(t, REFUND_GRANT_DAYS)),
            purchases: raw.purchases,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MoneyPurchaseHistory {
    pub purchases: Vec<MoneyPurchase>,
}

/// Account that sent or received a gift, and when
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GiftUser {
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Gift {
    #[serde(deserialize_with = "iso_datetime")]
    pub date: DateTime<Utc>,
    #[serde(rename = "offerId")]
    pub offer_id: String,
    #[serde(rename = "toAccountId")]
    pub recipient_user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GiftHistoryWire {
    #[serde(rename = "num_sent")]
    sent_count: i64,
    #[serde(rename = "num_received")]
    received_count: i64,
    #[serde(deserialize_with = "ordered_entries")]
    sent_to: Vec<(String, String)>,
    #[serde(deserialize_with = "ordered_entries")]
    received_from: Vec<(String, String)>,
    gifts: Vec<Gift>,
}

fn gift_users(
    users: Vec<(String, String)>,
    field: &str,
) -> Result<Vec<GiftUser>, ValidationError> {
    users
        .into_iter()
        .map(|(user_id, raw)| {
            let timestamp = parse_iso_datetime(&raw, field)?;
            Ok(GiftUser { user_id, timestamp })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "GiftHistoryWire")]
pub struct GiftHistory {
    pub sent_count: i64,
    pub received_count: i64,
    pub sent_to: Vec<GiftUser>,
    pub received_from: Vec<GiftUser>,
    pub gifts: Vec<Gift>,
}

impl TryFrom<GiftHistoryWire> for GiftHistory {
    type Error = ValidationError;

    fn try_from(raw: GiftHistoryWire) -> Result<Self, Self::Error> {
        Ok(Self {
            sent_count: raw.sent_count,
            received_count: raw.received_count,
            sent_to: gift_users(raw.sent_to, "sentTo")?,
            received_from: gift_users(raw.received_from, "receivedFrom")?,
            gifts: raw.gifts,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PurchaseMetadata {
    #[serde(rename = "mtx_affiliate", default)]
    pub creator_code: Option<String>,
    #[serde(rename = "mtx_affiliate_id", default)]
    pub creator_code_owner_id: Option<String>,
}

/// A V-Bucks purchase from the item shop
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VBucksPurchase {
    #[serde(rename = "purchaseId")]
    pub id: String,
    pub offer_id: String,
    #[serde(rename = "purchaseDate", deserialize_with = "iso_datetime")]
    pub purchased_at: DateTime<Utc>,
    pub free_refund_eligible: bool,
    pub fulfillments: Vec<Value>,
    #[serde(rename = "totalMtxPaid")]
    pub price: i64,
    pub metadata: PurchaseMetadata,
    #[serde(default)]
    pub game_context: Option<String>,
    #[serde(rename = "lootResult")]
    pub items: Vec<Item>,
}

/// A real-money purchase
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyPurchase {
    pub fulfillment_id: String,
    #[serde(rename = "purchaseDate", deserialize_with = "iso_datetime")]
    pub purchased_at: DateTime<Utc>,
    #[serde(rename = "lootResult")]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UndoCooldown {
    #[serde(rename = "offerId")]
    pub offer_id: String,
    #[serde(rename = "cooldownExpires", deserialize_with = "iso_datetime")]
    pub expires_at: DateTime<Utc>,
}
