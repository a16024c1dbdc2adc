use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observed redirect. Serialized as the JSON record carried on the click topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickEvent {
    pub short_code: String,
    pub timestamp: DateTime<Utc>,
    pub user_agent: String,
    pub ip: String,
}

impl ClickEvent {
    pub fn new(
        short_code: impl Into<String>,
        user_agent: impl Into<String>,
        ip: impl Into<String>,
    ) -> Self {
        Self {
            short_code: short_code.into(),
            timestamp: Utc::now(),
            user_agent: user_agent.into(),
            ip: ip.into(),
        }
    }

    /// Events for one code always share a key, so they land in one partition.
    pub fn partition_key(&self) -> &str {
        &self.short_code
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(payload: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(payload)
    }
}
