//! Generic decoding entry point
//!
//! Every top-level record implements [`FromPayload`], which wraps serde
//! decoding with the crate error type and tracing. [`decode_kind`] picks the
//! record type at runtime from a [`PayloadKind`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::logging::Timer;
use crate::models::code::{Code, CodeRedemption};
use crate::models::creative::{CreativeDiscovery, CreativeDiscoveryV2, CreativeIsland};
use crate::models::enums::wire_enum;
use crate::models::lego::{AccessibleLegoWorld, LegoWorld};
use crate::models::profile::{BattleRoyaleProfile, CommonCoreProfile};
use crate::models::sac::{SacEarnedProducts, SacEarnings};
use crate::models::shop::WebShop;
use crate::models::store::{CatalogEntry, Store};

/// A record that can be decoded from an endpoint's JSON body
pub trait FromPayload: DeserializeOwned {
    /// Name used in errors and logs
    const ENTITY: &'static str;

    fn from_value(value: &Value) -> Result<Self> {
        decode_with::<Self, _>(|| Self::deserialize(value))
    }

    fn from_json(json: &str) -> Result<Self> {
        decode_with::<Self, _>(|| serde_json::from_str(json))
    }

    fn from_slice(bytes: &[u8]) -> Result<Self> {
        decode_with::<Self, _>(|| serde_json::from_slice(bytes))
    }
}

fn decode_with<T, F>(decode: F) -> Result<T>
where
    T: FromPayload,
    F: FnOnce() -> serde_json::Result<T>,
{
    let span = crate::decode_span!(T::ENTITY);
    let _guard = span.enter();
    let timer = Timer::start(format!("decode {}", T::ENTITY));

    match decode() {
        Ok(record) => {
            let duration = timer.stop();
            span.record("duration_ms", duration.as_millis() as u64);
            Ok(record)
        },
        Err(source) => {
            let error = Error::decode(T::ENTITY, source);
            tracing::warn!(
                entity = T::ENTITY,
                error = %error,
                missing_field = ?error.missing_field(),
                "Payload rejected"
            );
            Err(error)
        },
    }
}

macro_rules! impl_from_payload {
    ($($ty:ty => $entity:literal),+ $(,)?) => {
        $(
            impl FromPayload for $ty {
                const ENTITY: &'static str = $entity;
            }
        )+
    };
}

impl_from_payload! {
    WebShop => "WebShop",
    Store => "Store",
    CatalogEntry => "CatalogEntry",
    CreativeDiscovery => "CreativeDiscovery",
    CreativeDiscoveryV2 => "CreativeDiscoveryV2",
    CreativeIsland => "CreativeIsland",
    Code => "Code",
    CodeRedemption => "CodeRedemption",
    BattleRoyaleProfile => "BattleRoyaleProfile",
    CommonCoreProfile => "CommonCoreProfile",
    AccessibleLegoWorld => "AccessibleLegoWorld",
    LegoWorld => "LegoWorld",
    SacEarnings => "SacEarnings",
    SacEarnedProducts => "SacEarnedProducts",
}

/// A decoded record together with the JSON it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Payload<T> {
    pub data: T,
    pub raw: Value,
}

impl<T: FromPayload> Payload<T> {
    pub fn decode(raw: Value) -> Result<Self> {
        let data = T::from_value(&raw)?;
        Ok(Self { data, raw })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(json).map_err(|e| Error::decode(T::ENTITY, e))?;
        Self::decode(raw)
    }
}

impl<T> std::ops::Deref for Payload<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

wire_enum! {
    /// Top-level record kinds the decoder knows about
    PayloadKind {
        WebShop => "web-shop",
        Store => "store",
        CatalogEntry => "catalog-entry",
        CreativeDiscovery => "creative-discovery",
        CreativeDiscoveryV2 => "creative-discovery-v2",
        CreativeIsland => "creative-island",
        Code => "code",
        CodeRedemption => "code-redemption",
        BattleRoyaleProfile => "battle-royale-profile",
        CommonCoreProfile => "common-core-profile",
        AccessibleLegoWorld => "accessible-lego-world",
        LegoWorld => "lego-world",
        SacEarnings => "sac-earnings",
        SacEarnedProducts => "sac-earned-products",
    }
}

impl PayloadKind {
    /// Parse a kind name, reporting unknown names as [`Error::UnknownKind`]
    pub fn from_name(name: &str) -> Result<Self> {
        Self::parse(name).map_err(|_| Error::UnknownKind(name.to_string()))
    }
}

/// Any decodable top-level record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Decoded {
    WebShop(WebShop),
    Store(Store),
    CatalogEntry(CatalogEntry),
    CreativeDiscovery(CreativeDiscovery),
    CreativeDiscoveryV2(CreativeDiscoveryV2),
    CreativeIsland(CreativeIsland),
    Code(Code),
    CodeRedemption(CodeRedemption),
    BattleRoyaleProfile(BattleRoyaleProfile),
    CommonCoreProfile(CommonCoreProfile),
    AccessibleLegoWorld(AccessibleLegoWorld),
    LegoWorld(LegoWorld),
    SacEarnings(SacEarnings),
    SacEarnedProducts(SacEarnedProducts),
}

/// Decode `value` as a record of the given kind
pub fn decode_kind(kind: PayloadKind, value: &Value) -> Result<Decoded> {
    let decoded = match kind {
        PayloadKind::WebShop => Decoded::WebShop(FromPayload::from_value(value)?),
        PayloadKind::Store => Decoded::Store(FromPayload::from_value(value)?),
        PayloadKind::CatalogEntry => Decoded::CatalogEntry(FromPayload::from_value(value)?),
        PayloadKind::CreativeDiscovery => {
            Decoded::CreativeDiscovery(FromPayload::from_value(value)?)
        },
        PayloadKind::CreativeDiscoveryV2 => {
            Decoded::CreativeDiscoveryV2(FromPayload::from_value(value)?)
        },
        PayloadKind::CreativeIsland => Decoded::CreativeIsland(FromPayload::from_value(value)?),
        PayloadKind::Code => Decoded::Code(FromPayload::from_value(value)?),
        PayloadKind::CodeRedemption => Decoded::CodeRedemption(FromPayload::from_value(value)?),
        PayloadKind::BattleRoyaleProfile => {
            Decoded::BattleRoyaleProfile(FromPayload::from_value(value)?)
        },
        PayloadKind::CommonCoreProfile => {
            Decoded::CommonCoreProfile(FromPayload::from_value(value)?)
        },
        PayloadKind::AccessibleLegoWorld => {
            Decoded::AccessibleLegoWorld(FromPayload::from_value(value)?)
        },
        PayloadKind::LegoWorld => Decoded::LegoWorld(FromPayload::from_value(value)?),
        PayloadKind::SacEarnings => Decoded::SacEarnings(FromPayload::from_value(value)?),
        PayloadKind::SacEarnedProducts => {
            Decoded::SacEarnedProducts(FromPayload::from_value(value)?)
        },
    };

    tracing::debug!(kind = %kind, summary = %decoded.summary(), "Payload decoded");
    Ok(decoded)
}

/// Decode raw JSON bytes as a record of the given kind
///
/// Bytes that are not JSON at all are reported as [`Error::Decode`] against
/// the kind name.
pub fn decode_kind_slice(kind: PayloadKind, bytes: &[u8]) -> Result<Decoded> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| Error::decode(kind.as_str(), e))?;
    decode_kind(kind, &value)
}

impl Decoded {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Decoded::WebShop(_) => PayloadKind::WebShop,
            Decoded::Store(_) => PayloadKind::Store,
            Decoded::CatalogEntry(_) => PayloadKind::CatalogEntry,
            Decoded::CreativeDiscovery(_) => PayloadKind::CreativeDiscovery,
            Decoded::CreativeDiscoveryV2(_) => PayloadKind::CreativeDiscoveryV2,
            Decoded::CreativeIsland(_) => PayloadKind::CreativeIsland,
            Decoded::Code(_) => PayloadKind::Code,
            Decoded::CodeRedemption(_) => PayloadKind::CodeRedemption,
            Decoded::BattleRoyaleProfile(_) => PayloadKind::BattleRoyaleProfile,
            Decoded::CommonCoreProfile(_) => PayloadKind::CommonCoreProfile,
            Decoded::AccessibleLegoWorld(_) => PayloadKind::AccessibleLegoWorld,
            Decoded::LegoWorld(_) => PayloadKind::LegoWorld,
            Decoded::SacEarnings(_) => PayloadKind::SacEarnings,
            Decoded::SacEarnedProducts(_) => PayloadKind::SacEarnedProducts,
        }
    }

    /// One-line human readable description of the record
    pub fn summary(&self) -> String {
        match self {
            Decoded::WebShop(shop) => format!(
                "web shop with {} categories and {} items",
                shop.categories.len(),
                shop.items().count()
            ),
            Decoded::Store(store) => format!(
                "store with {} featured and {} daily items, expires {}",
                store.featured_items.len(),
                store.daily_items.len(),
                store.expires_at.to_rfc3339()
            ),
            Decoded::CatalogEntry(entry) => format!(
                "catalog entry {} \"{}\" at {} {}",
                entry.id, entry.title, entry.current_price, entry.currency_code
            ),
            Decoded::CreativeDiscovery(discovery) => format!(
                "discovery with {} panels and {} islands",
                discovery.panels.len(),
                discovery.link_codes().count()
            ),
            Decoded::CreativeDiscoveryV2(discovery) => format!(
                "discovery test {} with {} panels",
                discovery.test_name,
                discovery.panels.len()
            ),
            Decoded::CreativeIsland(island) => format!(
                "island {} \"{}\" by {}",
                island.mnemonic, island.metadata.title, island.creator_name
            ),
            Decoded::Code(code) => format!(
                "code {} ({}) with {} uses left",
                code.code,
                code.code_status,
                code.remaining_uses()
            ),
            Decoded::CodeRedemption(redemption) => format!(
                "redemption of {} granting {} entitlements",
                redemption.offer_id,
                redemption.details.len()
            ),
            Decoded::BattleRoyaleProfile(profile) => format!(
                "battle royale profile, season {} level {}, {} cosmetics",
                profile.stats.season,
                profile.stats.season_level,
                profile.get_cosmetics(&[]).len()
            ),
            Decoded::CommonCoreProfile(profile) => format!(
                "common core profile with {} V-Bucks on {}",
                profile.overall_vbucks(None, false),
                profile.stats.current_vbucks_platform
            ),
            Decoded::AccessibleLegoWorld(accessible) => format!(
                "world \"{}\" with {} grants{}",
                accessible.world.name,
                accessible.grants.len(),
                if accessible.session.is_some() {
                    ", session live"
                } else {
                    ""
                }
            ),
            Decoded::LegoWorld(world) => format!(
                "world \"{}\" ({})",
                world.name,
                world.metadata.constraint()
            ),
            Decoded::SacEarnings(earnings) => format!(
                "lifetime payouts {} {}, eligible {} {}",
                earnings.lifetime_payouts,
                earnings.lifetime_payout_currency,
                earnings.eligible_earnings,
                earnings.eligible_earnings_currency
            ),
            Decoded::SacEarnedProducts(products) => {
                format!("{} earned products", products.products.len())
            },
        }
    }
}
