use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;

/// One application record as reported by an external gateway.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub external_id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throttling_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<Timestamp>,

    /// Gateway-specific payload carried through import unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_artifact: Option<String>,

    #[serde(default)]
    pub already_imported: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imported_application_id: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_info_list: Vec<KeyInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subscribed_apis: Vec<SubscribedApi>,
}

impl CatalogItem {
    pub fn new(external_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            name: name.into(),
            owner: None,
            tier: None,
            throttling_policy: None,
            description: None,
            created_time: None,
            reference_artifact: None,
            already_imported: false,
            imported_application_id: None,
            attributes: BTreeMap::new(),
            key_info_list: Vec::new(),
            subscribed_apis: Vec::new(),
        }
    }

    pub fn owner_label(&self) -> &str {
        self.owner.as_deref().unwrap_or("-")
    }

    /// Throttling column in list rows: explicit policy, then tier.
    pub fn policy_label(&self) -> &str {
        self.throttling_policy
            .as_deref()
            .or(self.tier.as_deref())
            .unwrap_or("-")
    }

    pub fn tier_label(&self) -> &str {
        self.tier.as_deref().unwrap_or("Unlimited")
    }

    /// The reference artifact when the gateway supplied a usable one.
    pub fn artifact(&self) -> Option<&str> {
        self.reference_artifact
            .as_deref()
            .filter(|a| !a.trim().is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyInfo {
    pub key_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masked_key_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl KeyInfo {
    pub fn state_label(&self) -> &str {
        self.state.as_deref().unwrap_or("ACTIVE")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribedApi {
    pub api_name: String,
    pub api_version: String,
    pub api_context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_status: Option<String>,
}

impl SubscribedApi {
    pub fn status_label(&self) -> &str {
        self.subscription_status.as_deref().unwrap_or("ACTIVE")
    }
}

/// Gateways report creation time either as epoch milliseconds or as text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(i64),
    Text(String),
}

fn ts_display_format() -> &'static [FormatItem<'static>] {
    static FMT: OnceLock<Vec<FormatItem<'static>>> = OnceLock::new();
    FMT.get_or_init(|| {
        time::format_description::parse(
            "[year]-[month repr:numerical padding:zero]-[day padding:zero] [hour padding:zero]:[minute padding:zero]:[second padding:zero]Z",
        )
        .expect("valid time format")
    })
}

impl Timestamp {
    pub fn to_datetime(&self) -> Option<OffsetDateTime> {
        match self {
            Timestamp::Millis(ms) => {
                OffsetDateTime::from_unix_timestamp_nanos(i128::from(*ms) * 1_000_000).ok()
            }
            Timestamp::Text(s) => {
                if let Ok(ms) = s.trim().parse::<i64>() {
                    return Timestamp::Millis(ms).to_datetime();
                }
                OffsetDateTime::parse(s, &Rfc3339).ok()
            }
        }
    }

    /// UTC rendering; unparseable text is shown as received.
    pub fn display(&self) -> String {
        let formatted = self
            .to_datetime()
            .and_then(|dt| dt.to_offset(time::UtcOffset::UTC).format(ts_display_format()).ok());
        match (formatted, self) {
            (Some(s), _) => s,
            (None, Timestamp::Millis(ms)) => ms.to_string(),
            (None, Timestamp::Text(s)) => s.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/model/application_tests.rs"]
mod tests;
