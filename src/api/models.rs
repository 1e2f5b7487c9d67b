use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::records::DnsRecord;

#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub result: Option<T>,
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiError>,
    pub result_info: Option<ResultInfo>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ResultInfo {
    #[serde(default)]
    pub total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiDnsRecord {
    pub id: String,
    pub name: String,
    pub content: String,
    pub r#type: String,
    #[serde(default)]
    pub proxied: Option<bool>,
    pub ttl: u32,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified_on: Option<DateTime<Utc>>,
}

impl ApiDnsRecord {
    pub fn into_record(self, zone: &Zone) -> DnsRecord {
        DnsRecord {
            id: self.id,
            zone_id: zone.id.clone(),
            zone_name: zone.name.clone(),
            name: self.name,
            record_type: self.r#type,
            content: self.content,
            ttl: self.ttl,
            proxied: self.proxied.unwrap_or(false),
            created_at: self.created_on,
            modified_at: self.modified_on,
        }
    }
}

/// Body for create and full-replace update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPayload {
    pub r#type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedZone {
    pub zone_name: String,
    pub reason: String,
}

/// Outcome of a full fetch: every record that could be listed, plus the zones
/// whose listing failed.
#[derive(Debug, Clone, Default)]
pub struct RecordListing {
    pub records: Vec<DnsRecord>,
    pub skipped: Vec<SkippedZone>,
}
