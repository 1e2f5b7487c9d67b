use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::cloudflare::API_BASE_URL;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    pub cloudflare_token: String,

    /// Restricts zone listing to one account when non-empty.
    pub account_id: String,

    #[validate(url(message = "API base URL must be a valid URL"))]
    pub api_base_url: String,

    #[validate(range(min = 1, message = "Request timeout must be greater than 0"))]
    pub request_timeout_secs: u64,

    #[validate(range(min = 1, message = "Page size must be greater than 0"))]
    pub page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cloudflare_token: String::new(),
            account_id: String::new(),
            api_base_url: API_BASE_URL.to_string(),
            request_timeout_secs: 30,
            page_size: 20,
        }
    }
}

impl Config {
    /// Overrides file values with non-empty environment values.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(super::TOKEN_ENV).filter(|v| !v.is_empty()) {
            self.cloudflare_token = token;
        }
        if let Some(account_id) = lookup(super::ACCOUNT_ENV).filter(|v| !v.is_empty()) {
            self.account_id = account_id;
        }
    }
}
