//! Lego world models
//!
//! A world's `metadata` object takes the shape selected by its
//! `metadataConstraint` discriminator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::convert::TryFrom;

use super::enums::{
    LegoWorldDeathType, LegoWorldDifficulty, LegoWorldGrantRole, LegoWorldGrantType,
    LegoWorldMetadataConstraint, LegoWorldMode,
};
use super::error::{ValidationError, ValidationErrorKind};
use super::validation::{
    bool_to_on_off, falsy_as_none, iso_datetime, iso_datetime_lenient, iso_datetime_opt, nullable,
    on_off_to_bool,
};

/// A world the account can join, with its grants and live session
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AccessibleLegoWorld {
    pub world: LegoWorld,
    pub grants: Vec<LegoWorldGrant>,
    #[serde(deserialize_with = "falsy_as_none")]
    pub session: Option<LegoWorldSession>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegoWorldWire {
    namespace_id: String,
    world_id: String,
    owner_account_id: String,
    version: i64,
    current_version: i64,
    name: String,
    #[serde(deserialize_with = "iso_datetime")]
    created_at: DateTime<Utc>,
    #[serde(deserialize_with = "iso_datetime")]
    updated_at: DateTime<Utc>,
    sanction: Value,
    #[serde(deserialize_with = "falsy_as_none")]
    session: Option<LegoWorldSession>,
    metadata_constraint: String,
    metadata: Value,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "LegoWorldWire")]
pub struct LegoWorld {
    pub namespace_id: String,
    pub id: String,
    pub owner_account_id: String,
    pub version: i64,
    pub current_version: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub sanction: Value,
    pub session: Option<LegoWorldSession>,
    pub metadata: LegoWorldMetadata,
}

impl TryFrom<LegoWorldWire> for LegoWorld {
    type Error = ValidationError;

    fn try_from(raw: LegoWorldWire) -> Result<Self, Self::Error> {
        let metadata = LegoWorldMetadata::decode(&raw.metadata_constraint, &raw.metadata)?;

        Ok(Self {
            namespace_id: raw.namespace_id,
            id: raw.world_id,
            owner_account_id: raw.owner_account_id,
            version: raw.version,
            current_version: raw.current_version,
            name: raw.name,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            sanction: raw.sanction,
            session: raw.session,
            metadata,
        })
    }
}

/// World settings, one variant per metadata constraint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LegoWorldMetadata {
    Default(DefaultLegoWorldMetadata),
    NoMetadata(NoLegoWorldMetadata),
}

impl LegoWorldMetadata {
    /// Decode `metadata` into the variant named by `constraint`
    pub fn decode(constraint: &str, metadata: &Value) -> Result<Self, ValidationError> {
        let constraint = LegoWorldMetadataConstraint::parse(constraint).map_err(|e| {
            ValidationError::with_context(
                ValidationErrorKind::UnknownDiscriminator,
                "metadataConstraint",
                e.context.unwrap_or_default(),
            )
        })?;

        match constraint {
            LegoWorldMetadataConstraint::Default => {
                let wire = DefaultMetadataWire::deserialize(metadata).map_err(|e| {
                    ValidationError::with_context(
                        ValidationErrorKind::Custom(e.to_string()),
                        "metadata",
                        "Malformed juno_default metadata",
                    )
                })?;
                DefaultLegoWorldMetadata::try_from(wire).map(LegoWorldMetadata::Default)
            },
            LegoWorldMetadataConstraint::NoMetadata => {
                Ok(LegoWorldMetadata::NoMetadata(NoLegoWorldMetadata {}))
            },
        }
    }

    pub fn constraint(&self) -> LegoWorldMetadataConstraint {
        match self {
            LegoWorldMetadata::Default(_) => LegoWorldMetadataConstraint::Default,
            LegoWorldMetadata::NoMetadata(_) => LegoWorldMetadataConstraint::NoMetadata,
        }
    }

    pub fn to_payload(&self) -> Value {
        match self {
            LegoWorldMetadata::Default(metadata) => metadata.to_payload(),
            LegoWorldMetadata::NoMetadata(metadata) => metadata.to_payload(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DefaultMetadataWire {
    mode: String,
    #[serde(default)]
    thumbnail_table_row_name: Option<String>,
    #[serde(default)]
    seed: Option<i64>,
    #[serde(default)]
    hostile_creatures: Option<Value>,
    difficulty: String,
    #[serde(default)]
    elite_hostile_creatures: Option<Value>,
    #[serde(default)]
    hunger: Option<Value>,
    #[serde(default)]
    temperature: Option<Value>,
    #[serde(default)]
    stamina_drain: Option<Value>,
    death: String,
    #[serde(default)]
    drop_inventory_on_death: Option<Value>,
    #[serde(default)]
    friendly_creatures: Option<Value>,
    #[serde(default)]
    friendly_fire: Option<Value>,
    #[serde(default)]
    npcs: Option<Value>,
    #[serde(default)]
    power_system: Option<Value>,
    #[serde(default)]
    recruited_creature_perma_death: Option<Value>,
}

fn toggle(value: Option<&Value>) -> Option<bool> {
    on_off_to_bool(value.and_then(Value::as_str))
}

/// Settings of a `juno_default` world
///
/// A decoded world always carries `mode`, `difficulty` and `death`; the other
/// settings may be absent. Unset fields are left out of the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "DefaultMetadataWire")]
pub struct DefaultLegoWorldMetadata {
    pub mode: Option<LegoWorldMode>,
    pub thumbnail_table_row_name: Option<String>,
    pub seed: Option<i64>,
    pub hostile_creatures: Option<bool>,
    pub difficulty: Option<LegoWorldDifficulty>,
    pub elite_hostile_creatures: Option<bool>,
    pub hunger: Option<bool>,
    pub temperature: Option<bool>,
    pub stamina_drain: Option<bool>,
    pub death: Option<LegoWorldDeathType>,
    pub drop_inventory_on_death: Option<bool>,
    pub friendly_creatures: Option<bool>,
    pub friendly_fire: Option<bool>,
    pub npcs: Option<bool>,
    pub power_system: Option<bool>,
    pub recruited_creature_perma_death: Option<bool>,
}

impl TryFrom<DefaultMetadataWire> for DefaultLegoWorldMetadata {
    type Error = ValidationError;

    fn try_from(raw: DefaultMetadataWire) -> Result<Self, Self::Error> {
        Ok(Self {
            mode: Some(LegoWorldMode::parse(&raw.mode)?),
            thumbnail_table_row_name: raw.thumbnail_table_row_name,
            seed: raw.seed,
            hostile_creatures: toggle(raw.hostile_creatures.as_ref()),
            difficulty: Some(LegoWorldDifficulty::parse(&raw.difficulty)?),
            elite_hostile_creatures: toggle(raw.elite_hostile_creatures.as_ref()),
            hunger: toggle(raw.hunger.as_ref()),
            temperature: toggle(raw.temperature.as_ref()),
            stamina_drain: toggle(raw.stamina_drain.as_ref()),
            death: Some(LegoWorldDeathType::parse(&raw.death)?),
            drop_inventory_on_death: toggle(raw.drop_inventory_on_death.as_ref()),
            friendly_creatures: toggle(raw.friendly_creatures.as_ref()),
            friendly_fire: toggle(raw.friendly_fire.as_ref()),
            npcs: toggle(raw.npcs.as_ref()),
            power_system: toggle(raw.power_system.as_ref()),
            recruited_creature_perma_death: toggle(raw.recruited_creature_perma_death.as_ref()),
        })
    }
}

impl DefaultLegoWorldMetadata {
    /// The settings the game applies when a world is created in `mode`
    pub fn default_from_world_mode(mode: LegoWorldMode) -> Self {
        let base = Self {
            mode: Some(mode),
            friendly_creatures: Some(true),
            friendly_fire: Some(false),
            npcs: Some(true),
            death: Some(LegoWorldDeathType::On),
            ..Self::default()
        };

        match mode {
            LegoWorldMode::Cozy => Self {
                hostile_creatures: Some(true),
                difficulty: Some(LegoWorldDifficulty::Easy),
                elite_hostile_creatures: Some(false),
                hunger: Some(false),
                temperature: Some(false),
                stamina_drain: Some(false),
                drop_inventory_on_death: Some(false),
                power_system: Some(false),
                recruited_creature_perma_death: Some(false),
                ..base
            },
            LegoWorldMode::Survival => Self {
                hostile_creatures: Some(true),
                difficulty: Some(LegoWorldDifficulty::Normal),
                elite_hostile_creatures: Some(false),
                hunger: Some(true),
                temperature: Some(true),
                stamina_drain: Some(true),
                drop_inventory_on_death: Some(true),
                power_system: Some(true),
                recruited_creature_perma_death: Some(true),
                ..base
            },
            // Sandbox worlds never drop inventory, so the toggle is left unset
            LegoWorldMode::Sandbox => Self {
                hostile_creatures: Some(false),
                difficulty: Some(LegoWorldDifficulty::Normal),
                elite_hostile_creatures: Some(false),
                hunger: Some(false),
                temperature: Some(false),
                stamina_drain: Some(false),
                power_system: Some(false),
                recruited_creature_perma_death: Some(false),
                ..base
            },
            LegoWorldMode::Hardcore => Self {
                hostile_creatures: Some(true),
                difficulty: Some(LegoWorldDifficulty::Hardcore),
                elite_hostile_creatures: Some(true),
                hunger: Some(true),
                temperature: Some(true),
                stamina_drain: Some(true),
                death: Some(LegoWorldDeathType::Permanent),
                drop_inventory_on_death: Some(true),
                power_system: Some(true),
                recruited_creature_perma_death: Some(true),
                ..base
            },
        }
    }

    /// Metadata object for world create/update requests
    ///
    /// Toggles are written as the `"On"`/`"Off"` strings the world endpoints
    /// return, not as JSON booleans, so the payload decodes back to `self`.
    pub fn to_payload(&self) -> Value {
        let mut payload = Map::new();
        let mut put = |key: &str, value: Option<Value>| {
            if let Some(value) = value {
                payload.insert(key.to_string(), value);
            }
        };
        let flag = |value: Option<bool>| value.map(|v| Value::from(bool_to_on_off(v)));

        put("mode", self.mode.map(|m| Value::from(m.as_str())));
        put(
            "thumbnailTableRowName",
            self.thumbnail_table_row_name.clone().map(Value::from),
        );
        put("seed", self.seed.map(Value::from));
        put("hostileCreatures", flag(self.hostile_creatures));
        put("difficulty", self.difficulty.map(|d| Value::from(d.as_str())));
        put("eliteHostileCreatures", flag(self.elite_hostile_creatures));
        put("hunger", flag(self.hunger));
        put("temperature", flag(self.temperature));
        put("staminaDrain", flag(self.stamina_drain));
        put("death", self.death.map(|d| Value::from(d.as_str())));
        put("dropInventoryOnDeath", flag(self.drop_inventory_on_death));
        put("friendlyCreatures", flag(self.friendly_creatures));
        put("friendlyFire", flag(self.friendly_fire));
        put("npcs", flag(self.npcs));
        put("powerSystem", flag(self.power_system));
        put(
            "recruitedCreaturePermaDeath",
            flag(self.recruited_creature_perma_death),
        );

        Value::Object(payload)
    }
}

/// Metadata of a `nometadata` world
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoLegoWorldMetadata {}

impl NoLegoWorldMetadata {
    pub fn to_payload(&self) -> Value {
        Value::Object(Map::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegoWorldSession {
    #[serde(default)]
    pub namespace_id: Option<String>,
    #[serde(default)]
    pub world_id: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub owning_session_id: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub session_key: Option<String>,
    #[serde(rename = "currentPlayers", deserialize_with = "nullable")]
    pub current_player_ids: Option<Vec<String>>,
    #[serde(rename = "sessionCreatedAt", deserialize_with = "iso_datetime_opt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "iso_datetime_opt")]
    pub last_server_heartbeat: Option<DateTime<Utc>>,
    pub total_seconds_played: i64,
}

/// Access granted to an account on a world
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegoWorldGrant {
    pub namespace_id: String,
    pub world_id: String,
    pub account_id: String,
    #[serde(rename = "roleId")]
    pub role: LegoWorldGrantRole,
    #[serde(rename = "type")]
    pub grant_type: LegoWorldGrantType,
    pub granted_by: String,
    #[serde(deserialize_with = "iso_datetime")]
    pub granted_at: DateTime<Utc>,
    /// `None` for grants that never expire
    #[serde(deserialize_with = "iso_datetime_lenient")]
    pub expires_at: Option<DateTime<Utc>>,
}
