use std::time::Duration;

use super::{client::DnsApiClient, models::*};
use crate::config::Config;
use crate::error::{Error, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

pub const API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

const ZONES_PER_PAGE: u32 = 50;
const RECORDS_PER_PAGE: u32 = 100;

// Provider error codes for invalid or unauthorized tokens.
const AUTH_ERROR_CODES: [i64; 2] = [9109, 10000];

pub struct CloudflareClient {
    client: reqwest::Client,
    api_token: String,
    account_id: Option<String>,
    base_url: String,
}

#[async_trait]
impl DnsApiClient for CloudflareClient {
    async fn list_zones(&self) -> Result<Vec<Zone>> {
        let mut query = Vec::new();
        if let Some(account_id) = &self.account_id {
            query.push(("account.id", account_id.clone()));
        }
        self.get_all_pages("/zones", ZONES_PER_PAGE, &query).await
    }

    async fn list_records(&self, zone_id: &str) -> Result<Vec<ApiDnsRecord>> {
        self.get_all_pages(
            &format!("/zones/{}/dns_records", zone_id),
            RECORDS_PER_PAGE,
            &[],
        )
        .await
    }

    async fn create_record(&self, zone_id: &str, record: &RecordPayload) -> Result<ApiDnsRecord> {
        let request = self
            .client
            .post(self.url(&format!("/zones/{}/dns_records", zone_id)))
            .json(record);

        let response: ApiResponse<ApiDnsRecord> = self.send(request).await?;
        Self::require_result(response)
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record: &RecordPayload,
    ) -> Result<ApiDnsRecord> {
        let request = self
            .client
            .put(self.url(&format!("/zones/{}/dns_records/{}", zone_id, record_id)))
            .json(record);

        let response: ApiResponse<ApiDnsRecord> = self.send(request).await?;
        Self::require_result(response)
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        let request = self
            .client
            .delete(self.url(&format!("/zones/{}/dns_records/{}", zone_id, record_id)));

        let _: ApiResponse<serde_json::Value> = self.send(request).await?;
        Ok(())
    }
}

impl CloudflareClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_token: config.cloudflare_token.clone(),
            account_id: Some(config.account_id.clone()).filter(|id| !id.is_empty()),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_all_pages<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        per_page: u32,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let request = self
                .client
                .get(self.url(path))
                .query(&[("page", page), ("per_page", per_page)])
                .query(query);

            let response: ApiResponse<Vec<T>> = self.send(request).await?;
            let total_pages = response.result_info.as_ref().map_or(0, |info| info.total_pages);
            items.extend(response.result.unwrap_or_default());

            if page >= total_pages {
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<ApiResponse<T>> {
        let response = request
            .bearer_auth(&self.api_token)
            .send()
            .await?;

        let status = response.status();
        debug!("{} {}", status, response.url());
        let text = response.text().await?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&text)
                .map(|parsed| Self::error_message(&parsed.errors))
                .unwrap_or_else(|_| status.to_string());
            return Err(Error::Auth(message));
        }

        let parsed: ApiResponse<T> = match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(Error::Api {
                    status: status.as_u16(),
                    message: status.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        if !parsed.success || !status.is_success() {
            if parsed
                .errors
                .iter()
                .any(|e| AUTH_ERROR_CODES.contains(&e.code))
            {
                return Err(Error::Auth(Self::error_message(&parsed.errors)));
            }
            return Err(Error::Api {
                status: status.as_u16(),
                message: Self::error_message(&parsed.errors),
            });
        }

        Ok(parsed)
    }

    fn require_result<T>(response: ApiResponse<T>) -> Result<T> {
        response.result.ok_or_else(|| Error::Api {
            status: StatusCode::OK.as_u16(),
            message: "response did not include a result".to_string(),
        })
    }

    fn error_message(errors: &[ApiError]) -> String {
        if errors.is_empty() {
            return "unknown error".to_string();
        }
        errors
            .iter()
            .map(|e| format!("[{}] {}", e.code, e.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
