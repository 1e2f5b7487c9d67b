use super::mock::{api_record, called, MockClient};
use crate::api::{DnsManager, RecordPayload};
use crate::error::Error;

fn payload(name: &str) -> RecordPayload {
    RecordPayload {
        r#type: "A".to_string(),
        name: name.to_string(),
        content: "192.0.2.10".to_string(),
        ttl: 1,
        proxied: false,
    }
}

#[tokio::test]
async fn test_list_all_records_tags_records_with_zone() {
    let client = MockClient::new()
        .with_zone("z1", "a.com", vec![api_record("r1", "www.a.com", "A")])
        .with_zone("z2", "b.com", vec![api_record("r2", "mail.b.com", "MX")]);
    let manager = DnsManager::new(client);

    let listing = manager.list_all_records().await.unwrap();

    assert!(listing.skipped.is_empty());
    assert_eq!(listing.records.len(), 2);
    assert_eq!(listing.records[0].zone_id, "z1");
    assert_eq!(listing.records[0].zone_name, "a.com");
    assert_eq!(listing.records[1].zone_name, "b.com");
    assert_eq!(listing.records[1].record_type, "MX");
}

#[tokio::test]
async fn test_list_all_records_skips_failing_zone() {
    let client = MockClient::new()
        .with_zone("z1", "a.com", vec![api_record("r1", "www.a.com", "A")])
        .with_failing_zone("z2", "broken.com")
        .with_zone("z3", "c.com", vec![api_record("r3", "c.com", "TXT")]);
    let manager = DnsManager::new(client);

    let listing = manager.list_all_records().await.unwrap();

    assert_eq!(listing.records.len(), 2);
    assert_eq!(listing.skipped.len(), 1);
    assert_eq!(listing.skipped[0].zone_name, "broken.com");
    assert!(listing.skipped[0].reason.contains("internal error"));
}

#[tokio::test]
async fn test_list_all_records_aborts_when_zones_cannot_be_listed() {
    let client = MockClient::new().with_zone_listing_error();
    let calls = client.calls();
    let manager = DnsManager::new(client);

    let result = manager.list_all_records().await;

    assert!(matches!(result, Err(Error::Auth(_))));
    assert!(!called(&calls, "list_records"));
}

#[tokio::test]
async fn test_create_in_unknown_zone_never_calls_create() {
    let client = MockClient::new().with_zone("z1", "example.com", Vec::new());
    let calls = client.calls();
    let manager = DnsManager::new(client);

    let result = manager.create_record("missing.com", &payload("www")).await;

    assert!(matches!(result, Err(Error::ZoneNotFound(ref zone)) if zone == "missing.com"));
    assert!(!called(&calls, "create"));
}

#[tokio::test]
async fn test_create_resolves_zone_by_name() {
    let client = MockClient::new()
        .with_zone("z1", "example.com", Vec::new())
        .with_zone("z2", "example.org", Vec::new());
    let calls = client.calls();
    let manager = DnsManager::new(client);

    let created = manager
        .create_record("example.org", &payload("www"))
        .await
        .unwrap();

    assert_eq!(created.zone_id, "z2");
    assert_eq!(created.zone_name, "example.org");
    assert!(called(&calls, "create z2 www A"));
}

#[tokio::test]
async fn test_zone_resolution_requires_exact_name() {
    let client = MockClient::new().with_zone("z1", "example.com", Vec::new());
    let manager = DnsManager::new(client);

    assert!(matches!(
        manager.resolve_zone_id("example").await,
        Err(Error::ZoneNotFound(_))
    ));
    assert!(matches!(
        manager.resolve_zone_id("EXAMPLE.COM").await,
        Err(Error::ZoneNotFound(_))
    ));
    assert_eq!(manager.resolve_zone_id("example.com").await.unwrap(), "z1");
}

#[tokio::test]
async fn test_update_replaces_all_fields() {
    let client = MockClient::new().with_zone("z1", "a.com", vec![api_record("r1", "www", "A")]);
    let manager = DnsManager::new(client);

    let mut replacement = payload("api");
    replacement.r#type = "CNAME".to_string();
    replacement.content = "target.a.com".to_string();
    replacement.ttl = 300;
    let updated = manager.update_record("r1", "z1", &replacement).await.unwrap();

    assert_eq!(updated.name, "api");
    assert_eq!(updated.r#type, "CNAME");
    assert_eq!(updated.content, "target.a.com");
    assert_eq!(updated.ttl, 300);
}

#[tokio::test]
async fn test_delete_removes_record() {
    let client = MockClient::new().with_zone(
        "z1",
        "a.com",
        vec![api_record("r1", "www", "A"), api_record("r2", "api", "A")],
    );
    let manager = DnsManager::new(client);

    manager.delete_record("r1", "z1").await.unwrap();
    let listing = manager.list_all_records().await.unwrap();

    assert_eq!(listing.records.len(), 1);
    assert_eq!(listing.records[0].id, "r2");
}
