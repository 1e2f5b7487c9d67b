pub mod client;
pub mod cloudflare;
pub mod manager;
pub mod models;

pub use client::DnsApiClient;
pub use cloudflare::CloudflareClient;
pub use manager::DnsManager;
pub use models::{RecordListing, RecordPayload, SkippedZone};
