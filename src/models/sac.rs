//! Support-a-Creator earnings models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::convert::TryFrom;

use super::error::{ValidationError, ValidationErrorKind, ValidationErrors, ValidationResult};
use super::validation::{iso_date, iso_datetime, nullable};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SacEarnedProductWire {
    title: String,
    icon: String,
    #[serde(deserialize_with = "nullable")]
    link: Option<String>,
    share_rate: f64,
    url_slug: String,
    page_slug: String,
    data: Vec<SacEarnedProductDataEntry>,
    total_unique_supporters: i64,
    total_estimated_earnings: f64,
}

/// A product a creator earned referrals on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SacEarnedProduct {
    pub id: String,
    pub title: String,
    pub icon_url: String,
    pub link: Option<String>,
    pub share_rate: f64,
    pub url_slug: String,
    pub page_slug: String,
    pub data_entries: Vec<SacEarnedProductDataEntry>,
    pub total_unique_supporters: i64,
    pub total_estimated_earnings: f64,
}

impl SacEarnedProduct {
    /// Build a product from its id and the object stored under that id
    pub fn from_entry(id: impl Into<String>, data: &Value) -> ValidationResult<Self> {
        let id = id.into();
        let raw = SacEarnedProductWire::deserialize(data).map_err(|e| {
            ValidationError::with_context(
                ValidationErrorKind::Custom(e.to_string()),
                id.as_str(),
                "Malformed earned product",
            )
        })?;

        Ok(Self {
            id,
            title: raw.title,
            icon_url: raw.icon,
            link: raw.link,
            share_rate: raw.share_rate,
            url_slug: raw.url_slug,
            page_slug: raw.page_slug,
            data_entries: raw.data,
            total_unique_supporters: raw.total_unique_supporters,
            total_estimated_earnings: raw.total_estimated_earnings,
        })
    }

    /// Referrals summed over every data entry
    pub fn total_referrals(&self) -> i64 {
        self.data_entries.iter().map(|e| e.referrals).sum()
    }
}

/// Earned products keyed by product id
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct SacEarnedProducts {
    pub products: Vec<SacEarnedProduct>,
}

impl SacEarnedProducts {
    pub fn get(&self, id: &str) -> Option<&SacEarnedProduct> {
        self.products.iter().find(|p| p.id == id)
    }
}

impl TryFrom<Map<String, Value>> for SacEarnedProducts {
    type Error = ValidationErrors;

    fn try_from(raw: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut errors = ValidationErrors::new();
        let products = raw
            .iter()
            .filter_map(|(id, data)| errors.check(SacEarnedProduct::from_entry(id.as_str(), data)))
            .collect();
        errors.into_result(Self { products })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SacEarnedProductDataEntry {
    #[serde(deserialize_with = "iso_date")]
    pub date: NaiveDate,
    pub referrals: i64,
    #[serde(rename = "avgShareRate")]
    pub average_share_rate: f64,
    pub currency: String,
}

/// Payout summary of a creator code
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SacEarnings {
    pub lifetime_payouts: f64,
    pub lifetime_payout_currency: String,
    pub last_payout: f64,
    pub last_payout_currency: String,
    #[serde(rename = "lastPayoutDate", deserialize_with = "iso_datetime")]
    pub last_payout_at: DateTime<Utc>,
    pub eligible_earnings: f64,
    pub eligible_earnings_currency: String,
}
