use log::{debug, info, warn};

use super::client::DnsApiClient;
use super::models::*;
use crate::error::{Error, Result};
use crate::records::DnsRecord;

/// Account-wide record operations composed from the per-zone API calls.
pub struct DnsManager<C> {
    client: C,
}

impl<C: DnsApiClient> DnsManager<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Fetches the records of every visible zone. A zone whose listing fails
    /// is skipped and reported in [`RecordListing::skipped`].
    pub async fn list_all_records(&self) -> Result<RecordListing> {
        let zones = self.client.list_zones().await?;
        debug!("Found {} zones", zones.len());

        let mut listing = RecordListing::default();
        for zone in &zones {
            match self.client.list_records(&zone.id).await {
                Ok(records) => listing
                    .records
                    .extend(records.into_iter().map(|r| r.into_record(zone))),
                Err(e) => {
                    warn!("Skipping zone {}: {}", zone.name, e);
                    listing.skipped.push(SkippedZone {
                        zone_name: zone.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(listing)
    }

    /// Looks up a zone identifier by exact zone name.
    pub async fn resolve_zone(&self, zone_name: &str) -> Result<Zone> {
        self.client
            .list_zones()
            .await?
            .into_iter()
            .find(|zone| zone.name == zone_name)
            .ok_or_else(|| Error::ZoneNotFound(zone_name.to_string()))
    }

    pub async fn resolve_zone_id(&self, zone_name: &str) -> Result<String> {
        Ok(self.resolve_zone(zone_name).await?.id)
    }

    pub async fn create_record(
        &self,
        zone_name: &str,
        record: &RecordPayload,
    ) -> Result<DnsRecord> {
        let zone = self.resolve_zone(zone_name).await?;
        let created = self.client.create_record(&zone.id, record).await?;
        info!("Created {} record {} in {}", created.r#type, created.id, zone.name);
        Ok(created.into_record(&zone))
    }

    /// Replaces every mutable field of the record with `record`.
    pub async fn update_record(
        &self,
        record_id: &str,
        zone_id: &str,
        record: &RecordPayload,
    ) -> Result<ApiDnsRecord> {
        let updated = self
            .client
            .update_record(zone_id, record_id, record)
            .await?;
        info!("Updated record {}", record_id);
        Ok(updated)
    }

    pub async fn delete_record(&self, record_id: &str, zone_id: &str) -> Result<()> {
        self.client.delete_record(zone_id, record_id).await?;
        info!("Deleted record {}", record_id);
        Ok(())
    }
}
