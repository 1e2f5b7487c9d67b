use super::models::*;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait DnsApiClient: Send + Sync {
    async fn list_zones(&self) -> Result<Vec<Zone>>;
    async fn list_records(&self, zone_id: &str) -> Result<Vec<ApiDnsRecord>>;
    async fn create_record(&self, zone_id: &str, record: &RecordPayload) -> Result<ApiDnsRecord>;
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record: &RecordPayload,
    ) -> Result<ApiDnsRecord>;
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()>;
}
