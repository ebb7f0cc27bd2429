//! Creative island and discovery models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::convert::TryFrom;

use super::error::ValidationError;
use super::rating::{authority_for_board, AgeRating, RatingAuthority};
use super::validation::{falsy_as_none, iso_datetime, iso_datetime_opt, nullable};

/// Discovery surface, as returned by the v1 discovery endpoint
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CreativeDiscovery {
    pub panels: Vec<CreativeDiscoveryPanel>,
}

impl CreativeDiscovery {
    /// Every link code on every panel, in display order
    pub fn link_codes(&self) -> impl Iterator<Item = &str> {
        self.panels
            .iter()
            .flat_map(|p| p.pages.iter())
            .map(|page| page.link_code.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
struct DiscoveryResultsWire {
    results: Vec<CreativeDiscoveryPage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiscoveryPanelWire {
    panel_name: String,
    pages: Vec<DiscoveryResultsWire>,
}

/// A discovery row; results of every page are flattened into `pages`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(from = "DiscoveryPanelWire")]
pub struct CreativeDiscoveryPanel {
    pub name: String,
    pub pages: Vec<CreativeDiscoveryPage>,
}

impl From<DiscoveryPanelWire> for CreativeDiscoveryPanel {
    fn from(raw: DiscoveryPanelWire) -> Self {
        Self {
            name: raw.panel_name,
            pages: raw.pages.into_iter().flat_map(|p| p.results).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeDiscoveryPage {
    #[serde(default, deserialize_with = "iso_datetime_opt")]
    pub last_visited: Option<DateTime<Utc>>,
    pub link_code: String,
    pub is_favorite: bool,
    #[serde(rename = "globalCCU")]
    pub global_player_count: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeDiscoveryV2 {
    pub test_variant_name: String,
    pub test_name: String,
    pub test_analytics_id: String,
    pub test_variant_analytics_id: String,
    pub panels: Vec<CreativeDiscoveryV2Panel>,
}

impl CreativeDiscoveryV2 {
    pub fn panel(&self, name: &str) -> Option<&CreativeDiscoveryV2Panel> {
        self.panels.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeDiscoveryV2Panel {
    #[serde(rename = "panelName")]
    pub name: String,
    #[serde(rename = "panelDisplayName")]
    pub display_name: String,
    pub feature_tags: Vec<String>,
    pub first_page: CreativeDiscoveryV2Page,
    #[serde(rename = "panelType")]
    pub panel_type: String,
    #[serde(deserialize_with = "nullable")]
    pub play_history_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeDiscoveryV2Page {
    #[serde(rename = "results")]
    pub entries: Vec<CreativeDiscoveryV2PageEntry>,
    pub has_more: bool,
    #[serde(deserialize_with = "nullable")]
    pub panel_target_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeDiscoveryV2PageEntry {
    #[serde(default, deserialize_with = "iso_datetime_opt")]
    pub last_visited: Option<DateTime<Utc>>,
    pub link_code: String,
    pub is_favorite: bool,
    #[serde(rename = "globalCCU")]
    pub global_player_count: i64,
    pub lock_status: String,
    pub lock_status_reason: String,
    pub is_visible: bool,
}

/// A published island or playlist link
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeIsland {
    pub namespace: String,
    pub account_id: String,
    pub creator_name: String,
    /// The island code, e.g. `1111-1111-1111`
    pub mnemonic: String,
    pub link_type: String,
    pub metadata: CreativeIslandMetadata,
    pub version: i64,
    pub active: bool,
    pub disabled: bool,
    #[serde(rename = "created", deserialize_with = "iso_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "published", deserialize_with = "iso_datetime")]
    pub published_at: DateTime<Utc>,
    pub description_tags: Vec<String>,
    pub moderation_status: String,
    #[serde(rename = "lastActivatedDate", default, deserialize_with = "iso_datetime_opt")]
    pub last_activated_at: Option<DateTime<Utc>>,
    pub discovery_intent: String,
    #[serde(default)]
    pub link_category: Option<String>,
}

impl CreativeIsland {
    /// Whether the island can currently be joined
    pub fn is_playable(&self) -> bool {
        self.active && !self.disabled
    }
}

/// `url`, `url_m` and `url_s` variants of one image
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImageUrlSet {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_m: Option<String>,
    #[serde(default)]
    pub url_s: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneratedImageUrlSet {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_m: Option<String>,
    #[serde(default)]
    pub url_s: Option<String>,
    #[serde(default)]
    pub compressed: ImageUrlSet,
}

/// Creator-supplied island metadata
///
/// Only `title` is guaranteed; the other keys vary with island type and age.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeIslandMetadata {
    pub title: String,
    #[serde(rename = "lobby_background_image_urls", default)]
    pub lobby_background_image_urls: ImageUrlSet,
    #[serde(default)]
    pub frontend_plugin: Option<String>,
    #[serde(default)]
    pub game_featuresets: Vec<String>,
    #[serde(rename = "product_modes", default)]
    pub product_modes: Vec<String>,
    #[serde(rename = "quicksilver_id", default)]
    pub quicksilver_id: Option<String>,
    #[serde(rename = "public_modules", default)]
    pub public_modules: BTreeMap<String, Value>,
    #[serde(rename = "image_url", default)]
    pub image_url: Option<String>,
    #[serde(rename = "image_urls", default)]
    pub image_urls: ImageUrlSet,
    #[serde(rename = "square_image_urls", default)]
    pub square_image_urls: ImageUrlSet,
    #[serde(rename = "generated_image_urls", default)]
    pub generated_image_urls: GeneratedImageUrlSet,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default, deserialize_with = "falsy_as_none")]
    pub matchmaking: Option<CreativeIslandMatchmaking>,
    #[serde(rename = "matchmakingV2", default, deserialize_with = "falsy_as_none")]
    pub matchmaking_v2: Option<CreativeIslandMatchmakingV2>,
    #[serde(default)]
    pub disable_discovery_features: Vec<Value>,
    #[serde(rename = "video_url", default)]
    pub video_url: Option<String>,
    #[serde(rename = "video_vuid", default)]
    pub video_vuid: Option<String>,
    #[serde(default)]
    pub sub_link_codes: Vec<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default, deserialize_with = "falsy_as_none")]
    pub ratings: Option<CreativeIslandRatings>,
    #[serde(default)]
    pub product_tag: Option<String>,
    #[serde(default)]
    pub fallback_links: BTreeMap<String, String>,
    #[serde(default)]
    pub corresponding_sets: BTreeMap<String, String>,
    #[serde(default)]
    pub default_sub_link_code: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(rename = "alt_tagline", default)]
    pub alt_tagline: BTreeMap<String, String>,
    #[serde(default)]
    pub support_code: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub introduction: Option<String>,
    #[serde(rename = "alt_introduction", default)]
    pub alt_introduction: BTreeMap<String, String>,
    #[serde(default)]
    pub island_type: Option<String>,
    #[serde(default, deserialize_with = "falsy_as_none")]
    pub dynamic_xp: Option<CreativeIslandDynamicXp>,
    #[serde(default)]
    pub attributions: Vec<CreativeIslandAttribution>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeIslandMatchmaking {
    #[serde(default)]
    pub player_count: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub playlists: Vec<String>,
    #[serde(rename = "override_playlist", default)]
    pub override_playlist: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeIslandMatchmakingV2 {
    #[serde(default)]
    pub allow_join_in_progress: bool,
    #[serde(default)]
    pub allow_squad_fill_option: bool,
    #[serde(default)]
    pub max_players: Option<i64>,
    #[serde(default)]
    pub max_party_size: Option<i64>,
    #[serde(default)]
    pub max_team_count: Option<i64>,
    #[serde(default)]
    pub max_team_size: Option<i64>,
    #[serde(default)]
    pub rating_type: Option<String>,
    #[serde(default)]
    pub is_ranked: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct RatingBoardWire {
    descriptors: Vec<String>,
    #[serde(default)]
    rating_overridden: bool,
    rating: String,
    initial_rating: String,
    interactive_elements: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RatingsWire {
    #[serde(default, deserialize_with = "iso_datetime_opt")]
    rating_received_time: Option<DateTime<Utc>>,
    boards: BTreeMap<String, RatingBoardWire>,
}

/// Age ratings, one board per authority
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "RatingsWire")]
pub struct CreativeIslandRatings {
    pub rating_received_at: Option<DateTime<Utc>>,
    /// Boards keyed by authority name
    pub boards: BTreeMap<String, CreativeIslandRatingBoard>,
}

impl CreativeIslandRatings {
    pub fn board(&self, authority: RatingAuthority) -> Option<&CreativeIslandRatingBoard> {
        self.boards.get(authority.as_str())
    }
}

impl TryFrom<RatingsWire> for CreativeIslandRatings {
    type Error = ValidationError;

    fn try_from(raw: RatingsWire) -> Result<Self, Self::Error> {
        let boards = raw
            .boards
            .into_iter()
            .map(|(name, board)| {
                let authority = authority_for_board(&name)?;
                let board = CreativeIslandRatingBoard {
                    authority,
                    descriptors: board.descriptors,
                    rating_overridden: board.rating_overridden,
                    rating: AgeRating::parse(authority, &board.rating)?,
                    initial_rating: AgeRating::parse(authority, &board.initial_rating)?,
                    interactive_elements: board.interactive_elements,
                };
                Ok((name, board))
            })
            .collect::<Result<BTreeMap<_, _>, ValidationError>>()?;

        Ok(Self {
            rating_received_at: raw.rating_received_time,
            boards,
        })
    }
}

/// Decoded through [`CreativeIslandRatings`], which knows the board's authority
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreativeIslandRatingBoard {
    pub authority: RatingAuthority,
    pub descriptors: Vec<String>,
    pub rating_overridden: bool,
    pub rating: AgeRating,
    pub initial_rating: AgeRating,
    pub interactive_elements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeIslandDynamicXp {
    pub unique_game_version: String,
    pub calibration_phase: String,
}

/// Credit for third-party content used on an island
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreativeIslandAttribution {
    pub license: String,
    #[serde(default)]
    pub license_url: Option<String>,
    pub author: String,
    pub title: String,
    #[serde(default)]
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeDiscoverySearchEntry {
    pub link_code: String,
    pub is_favorite: bool,
    #[serde(default, deserialize_with = "iso_datetime_opt")]
    pub last_visited: Option<DateTime<Utc>>,
    #[serde(rename = "globalCCU")]
    pub global_player_count: i64,
    pub score: i64,
    pub lock_status: String,
    pub lock_status_reason: String,
    pub is_visible: bool,
}

/// One entry of a bulk island lookup request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IslandLookup {
    pub code: String,
    pub link_type: Option<String>,
    pub version: Option<i64>,
    pub filter: bool,
}

impl IslandLookup {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            link_type: None,
            version: None,
            filter: false,
        }
    }

    pub fn with_type(mut self, link_type: impl Into<String>) -> Self {
        self.link_type = Some(link_type.into());
        self
    }

    pub fn with_version(mut self, version: i64) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_filter(mut self, filter: bool) -> Self {
        self.filter = filter;
        self
    }

    pub fn to_payload(&self) -> Value {
        json!({
            "mnemonic": self.code,
            "type": self.link_type,
            "v": self.version,
            "filter": self.filter,
        })
    }
}
