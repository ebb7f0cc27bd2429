//! Redeemable code models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::{falsy_as_none, iso_datetime};

/// Status the code service reports for a redeemable code
pub const ACTIVE_CODE_STATUS: &str = "ACTIVE";

/// A redeemable code as returned by the code lookup endpoint
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Code {
    pub code: String,
    pub namespace: String,
    pub creator: String,
    #[serde(rename = "dateCreated", deserialize_with = "iso_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "startDate", deserialize_with = "iso_datetime")]
    pub starts_at: DateTime<Utc>,
    #[serde(rename = "endDate", deserialize_with = "iso_datetime")]
    pub ends_at: DateTime<Utc>,
    pub allowed_users: Vec<Value>,
    pub allowed_countries: Vec<Value>,
    pub allowed_clients: Vec<Value>,
    pub distribution_metadata: Value,
    pub allowed_distribution_clients: Vec<Value>,
    pub code_type: String,
    #[serde(rename = "maxNumberOfUses")]
    pub max_uses: i64,
    pub allow_repeated_uses_by_same_user: bool,
    pub use_count: i64,
    pub completed_count: i64,
    pub consumption_metadata: CodeConsumptionMetadata,
    pub code_status: String,
    pub batch_id: String,
    pub batch_number: i64,
    pub labels: Vec<String>,
    pub blocked_countries: Vec<Value>,
}

impl Code {
    /// Whether the code is active and inside its validity window at `at`
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        self.code_status == ACTIVE_CODE_STATUS && self.starts_at <= at && at < self.ends_at
    }

    /// Redemptions left before the code is exhausted
    pub fn remaining_uses(&self) -> i64 {
        (self.max_uses - self.use_count).max(0)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeConsumptionMetadata {
    #[serde(default, deserialize_with = "falsy_as_none")]
    pub criteria: Option<CodeConsumptionCriteria>,
    pub namespace: String,
    pub offer_id: String,
}

/// Checks the code service runs before granting the offer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeConsumptionCriteria {
    pub checks: Vec<CodeConsumptionCheck>,
    pub else_action: String,
    pub reject_error_type: String,
    pub action: String,
    pub operator: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CodeConsumptionCheck {
    pub data: String,
    #[serde(rename = "type")]
    pub check_type: String,
}

/// Result of redeeming a code
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeRedemption {
    pub offer_id: String,
    pub account_id: String,
    pub identity_id: String,
    pub details: Vec<CodeRedemptionDetail>,
}

impl CodeRedemption {
    pub fn entitlement_names(&self) -> impl Iterator<Item = &str> {
        self.details.iter().map(|d| d.entitlement_name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeRedemptionDetail {
    pub entitlement_id: String,
    pub entitlement_name: String,
    pub item_id: String,
    pub namespace: String,
    pub country: String,
}
