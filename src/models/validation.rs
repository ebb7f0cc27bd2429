//! Field parsers and serde adapters shared by the models
//!
//! The `parse_*` functions turn a single wire value into its typed form and
//! report failures as [`ValidationError`]. The serde adapters at the bottom of
//! the module wrap them for use with `#[serde(deserialize_with = "...")]`, and
//! also encode the required/optional conventions of the web API:
//!
//! - [`nullable`]: the key must be present, but its value may be `null`.
//! - [`falsy_as_none`]: a child object that counts as absent when its value is
//!   missing, `null`, empty, `false` or zero.
//! - [`ordered_entries`]: an object read as a list of entries in payload order.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use serde::de::{DeserializeOwned, Error as DeError};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::sync::OnceLock;

use super::error::{ValidationError, ValidationErrorKind, ValidationResult};

static ASSET_REGEX: OnceLock<Regex> = OnceLock::new();
static BUNDLE_NAME_REGEX: OnceLock<Regex> = OnceLock::new();
static BUNDLE_SPLIT_REGEX: OnceLock<Regex> = OnceLock::new();
static WORD_REGEX: OnceLock<Regex> = OnceLock::new();

fn asset_regex() -> &'static Regex {
    ASSET_REGEX.get_or_init(|| Regex::new(r"\.(.+)").expect("Invalid asset regex pattern"))
}

fn bundle_name_regex() -> &'static Regex {
    BUNDLE_NAME_REGEX.get_or_init(|| {
        Regex::new(r"^\[VIRTUAL\][0-9]+ x (.*) for [0-9]+ .*$")
            .expect("Invalid bundle name regex pattern")
    })
}

fn bundle_split_regex() -> &'static Regex {
    BUNDLE_SPLIT_REGEX
        .get_or_init(|| Regex::new(r", [0-9]+ x ").expect("Invalid bundle split regex pattern"))
}

fn word_regex() -> &'static Regex {
    WORD_REGEX.get_or_init(|| Regex::new(r"[A-Z][^A-Z]*").expect("Invalid word regex pattern"))
}

/// Parse an ISO-8601 timestamp into UTC
///
/// Accepts RFC 3339 (`Z` or numeric offset, optional fraction) and naive
/// `YYYY-MM-DDTHH:MM:SS[.f]` values, which are taken to be UTC.
pub fn parse_iso_datetime(value: &str, field_name: &str) -> ValidationResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|e| {
            ValidationError::with_context(
                ValidationErrorKind::InvalidTimestamp,
                field_name,
                format!("Failed to parse ISO-8601 timestamp {:?}: {}", value, e),
            )
        })
}

/// Convert (possibly fractional) seconds since the unix epoch into UTC
pub fn parse_unix_seconds(seconds: f64, field_name: &str) -> ValidationResult<DateTime<Utc>> {
    let whole = seconds.trunc();
    let nanos = ((seconds - whole) * 1_000_000_000.0).round() as u32;

    if !whole.is_finite() || whole < i64::MIN as f64 || whole > i64::MAX as f64 {
        return Err(ValidationError::with_context(
            ValidationErrorKind::InvalidTimestamp,
            field_name,
            format!("Unix timestamp out of range: {}", seconds),
        ));
    }

    DateTime::from_timestamp(whole as i64, nanos.min(999_999_999)).ok_or_else(|| {
        ValidationError::with_context(
            ValidationErrorKind::InvalidTimestamp,
            field_name,
            format!("Unix timestamp out of range: {}", seconds),
        )
    })
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(value: &str, field_name: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        ValidationError::with_context(
            ValidationErrorKind::InvalidDate,
            field_name,
            format!("Failed to parse date {:?}: {}", value, e),
        )
    })
}

/// Split a `Type:id` template id into its two halves
pub fn split_template_id(value: &str, field_name: &str) -> ValidationResult<(String, String)> {
    match value.split_once(':') {
        Some((kind, id)) => {
            // Extra segments belong to neither half.
            let id = id.split(':').next().unwrap_or(id);
            Ok((kind.to_string(), id.to_string()))
        },
        None => Err(ValidationError::with_context(
            ValidationErrorKind::InvalidTemplateId,
            field_name,
            format!("No ':' separator in {:?}", value),
        )),
    }
}

/// `"On"` / `"Off"` toggle to a boolean; anything else is unset
pub fn on_off_to_bool(value: Option<&str>) -> Option<bool> {
    match value {
        Some("On") => Some(true),
        Some("Off") => Some(false),
        _ => None,
    }
}

/// Boolean to the `"On"` / `"Off"` toggle spelling
pub fn bool_to_on_off(value: bool) -> &'static str {
    if value {
        "On"
    } else {
        "Off"
    }
}

/// The part of an asset path after its first `.`
///
/// `/Game/Catalog/DisplayAssets/DA_Featured_CID_318.CID_318` -> `CID_318`
pub fn extract_asset(path: Option<&str>) -> Option<String> {
    let path = path?;
    asset_regex()
        .captures(path)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Split CamelCase text into space-separated words
///
/// Text before the first uppercase letter is dropped, matching how banner
/// overrides are rendered in the client.
pub fn split_words(value: &str) -> Option<String> {
    let words: Vec<&str> = word_regex().find_iter(value).map(|m| m.as_str()).collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// Display names embedded in a bundle dev name
///
/// `[VIRTUAL]2 x Dark Bomber, 1 x Crystal for 1500 MtxCurrency` yields
/// `["Dark Bomber", "Crystal"]`. Returns an empty list when the dev name is
/// not a bundle description.
pub fn parse_bundle_display_names(dev_name: &str) -> Vec<String> {
    bundle_name_regex()
        .captures(dev_name)
        .and_then(|caps| caps.get(1))
        .map(|m| {
            bundle_split_regex()
                .split(m.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Shift a timestamp forward by whole days
pub fn add_days(reference: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    reference + Duration::days(days)
}

/// Whether a JSON value counts as "not provided"
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

// ---------------------------------------------------------------------------
// serde adapters
// ---------------------------------------------------------------------------

/// Required key whose value may be `null`
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

/// Child object that is `None` when its value is falsy
pub fn falsy_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(value) if !is_falsy(&value) => T::deserialize(value).map(Some).map_err(D::Error::custom),
        _ => Ok(None),
    }
}

/// Object whose entries are kept as `(key, value)` pairs in payload order
pub fn ordered_entries<'de, D, T>(deserializer: D) -> Result<Vec<(String, T)>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Map::<String, Value>::deserialize(deserializer)?
        .into_iter()
        .map(|(key, value)| {
            let entry = T::deserialize(value).map_err(D::Error::custom)?;
            Ok((key, entry))
        })
        .collect()
}

/// Required ISO-8601 timestamp
pub fn iso_datetime<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_iso_datetime(&raw, "timestamp").map_err(D::Error::custom)
}

/// ISO-8601 timestamp that is `None` when null or empty
pub fn iso_datetime_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.is_empty() => parse_iso_datetime(&raw, "timestamp")
            .map(Some)
            .map_err(D::Error::custom),
        _ => Ok(None),
    }
}

/// ISO-8601 timestamp that is `None` when it cannot be parsed
pub fn iso_datetime_lenient<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|raw| parse_iso_datetime(raw, "timestamp").ok()))
}

/// Required unix timestamp in seconds
pub fn unix_seconds<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let seconds = f64::deserialize(deserializer)?;
    parse_unix_seconds(seconds, "timestamp").map_err(D::Error::custom)
}

/// Unix timestamp in seconds that is `None` when null or zero
pub fn unix_seconds_falsy<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        Some(seconds) if seconds != 0.0 => parse_unix_seconds(seconds, "timestamp")
            .map(Some)
            .map_err(D::Error::custom),
        _ => Ok(None),
    }
}

/// Required `YYYY-MM-DD` date
pub fn iso_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw, "date").map_err(D::Error::custom)
}
