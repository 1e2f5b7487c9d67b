use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// TTL value the provider treats as "automatic".
pub const AUTO_TTL: u32 = 1;

/// A DNS record as fetched from the provider, tagged with the zone it lives in.
#[derive(Debug, Clone, PartialEq)]
pub struct DnsRecord {
    pub id: String,
    pub zone_id: String,
    pub zone_name: String,
    pub name: String,
    pub record_type: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl DnsRecord {
    pub fn ttl_label(&self) -> String {
        if self.ttl == AUTO_TTL {
            "auto".to_string()
        } else {
            self.ttl.to_string()
        }
    }

    /// Case-insensitive substring match on name, zone or content.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        if keyword.is_empty() {
            return true;
        }
        let keyword = keyword.to_lowercase();
        [&self.name, &self.zone_name, &self.content]
            .iter()
            .any(|field| field.to_lowercase().contains(&keyword))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Name,
    Type,
    #[default]
    Zone,
    Content,
    Ttl,
    Created,
    Modified,
}

impl SortKey {
    /// Parses a key name case-insensitively. Unknown names sort by zone.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "name" => SortKey::Name,
            "type" => SortKey::Type,
            "content" => SortKey::Content,
            "ttl" => SortKey::Ttl,
            "created" => SortKey::Created,
            "modified" => SortKey::Modified,
            _ => SortKey::Zone,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Type => "type",
            SortKey::Zone => "zone",
            SortKey::Content => "content",
            SortKey::Ttl => "ttl",
            SortKey::Created => "created",
            SortKey::Modified => "modified",
        }
    }

    fn compare(&self, a: &DnsRecord, b: &DnsRecord) -> Ordering {
        match self {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Type => a.record_type.cmp(&b.record_type),
            SortKey::Zone => a.zone_name.cmp(&b.zone_name),
            SortKey::Content => a.content.cmp(&b.content),
            SortKey::Ttl => a.ttl.cmp(&b.ttl),
            SortKey::Created => a.created_at.cmp(&b.created_at),
            SortKey::Modified => a.modified_at.cmp(&b.modified_at),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable in-place sort. Records with equal keys keep their relative order.
pub fn sort_records(records: &mut [DnsRecord], key: SortKey, ascending: bool) {
    if ascending {
        records.sort_by(|a, b| key.compare(a, b));
    } else {
        records.sort_by(|a, b| key.compare(b, a));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FilterField {
    Name,
    Type,
    Zone,
    Content,
}

impl FilterField {
    fn matches(&self, record: &DnsRecord, value: &str) -> bool {
        let value = value.to_lowercase();
        match self {
            FilterField::Type => record.record_type.to_lowercase() == value,
            FilterField::Name => record.name.to_lowercase().contains(&value),
            FilterField::Zone => record.zone_name.to_lowercase().contains(&value),
            FilterField::Content => record.content.to_lowercase().contains(&value),
        }
    }
}

/// Per-field constraints. Every constraint present must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    fields: BTreeMap<FilterField, String>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: FilterField, value: impl Into<String>) -> Self {
        self.fields.insert(field, value.into());
        self
    }

    /// Adds a constraint only when `value` is present and non-empty.
    pub fn with_optional(self, field: FilterField, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.with(field, v),
            _ => self,
        }
    }

    pub fn matches(&self, record: &DnsRecord) -> bool {
        self.fields
            .iter()
            .all(|(field, value)| field.matches(record, value))
    }
}

pub fn filter_records(records: &[DnsRecord], filter: &RecordFilter) -> Vec<DnsRecord> {
    records
        .iter()
        .filter(|record| filter.matches(record))
        .cloned()
        .collect()
}

#[cfg(test)]
pub(crate) fn record(id: &str, name: &str, zone: &str, record_type: &str) -> DnsRecord {
    DnsRecord {
        id: id.to_string(),
        zone_id: format!("zone-{zone}"),
        zone_name: zone.to_string(),
        name: name.to_string(),
        record_type: record_type.to_string(),
        content: format!("{name}.content"),
        ttl: AUTO_TTL,
        proxied: false,
        created_at: None,
        modified_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const ALL_KEYS: [SortKey; 7] = [
        SortKey::Name,
        SortKey::Type,
        SortKey::Zone,
        SortKey::Content,
        SortKey::Ttl,
        SortKey::Created,
        SortKey::Modified,
    ];

    fn sample() -> Vec<DnsRecord> {
        vec![
            record("1", "www", "a.com", "A"),
            record("2", "api", "b.com", "A"),
            record("3", "mail", "a.com", "MX"),
        ]
    }

    fn distinct_sample() -> Vec<DnsRecord> {
        let values = [
            ("c", "c.org", "TXT", 300),
            ("a", "b.org", "A", 60),
            ("b", "a.org", "MX", 3600),
        ];
        values
            .iter()
            .enumerate()
            .map(|(i, (name, zone, ty, ttl))| {
                let mut r = record(&i.to_string(), name, zone, ty);
                r.ttl = *ttl;
                r.created_at = Some(Utc.with_ymd_and_hms(2024, 1, 1 + i as u32, 0, 0, 0).unwrap());
                r.modified_at = Some(Utc.with_ymd_and_hms(2024, 3, 3 - i as u32, 0, 0, 0).unwrap());
                r
            })
            .collect()
    }

    fn ids(records: &[DnsRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_sort_key_parse_is_case_insensitive_with_zone_fallback() {
        assert_eq!(SortKey::parse("NAME"), SortKey::Name);
        assert_eq!(SortKey::parse("Modified"), SortKey::Modified);
        assert_eq!(SortKey::parse("priority"), SortKey::Zone);
        assert_eq!(SortKey::parse(""), SortKey::Zone);
    }

    #[test]
    fn test_sorting_sorted_sequence_is_noop() {
        for key in ALL_KEYS {
            for ascending in [true, false] {
                let mut records = distinct_sample();
                sort_records(&mut records, key, ascending);
                let once = records.clone();
                sort_records(&mut records, key, ascending);
                assert_eq!(records, once, "key {key} ascending {ascending}");
            }
        }
    }

    #[test]
    fn test_directions_reverse_for_distinct_values() {
        for key in ALL_KEYS {
            let mut asc = distinct_sample();
            sort_records(&mut asc, key, true);
            let mut desc = distinct_sample();
            sort_records(&mut desc, key, false);
            desc.reverse();
            assert_eq!(ids(&asc), ids(&desc), "key {key}");
        }
    }

    #[test]
    fn test_sort_is_stable_on_equal_keys() {
        let mut records = sample();
        sort_records(&mut records, SortKey::Type, true);
        assert_eq!(ids(&records), vec!["1", "2", "3"]);
        sort_records(&mut records, SortKey::Type, false);
        assert_eq!(ids(&records), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_sort_empty_and_single_are_noops() {
        let mut empty: Vec<DnsRecord> = Vec::new();
        sort_records(&mut empty, SortKey::Name, true);
        assert!(empty.is_empty());

        let mut single = vec![record("1", "www", "a.com", "A")];
        sort_records(&mut single, SortKey::Ttl, false);
        assert_eq!(ids(&single), vec!["1"]);
    }

    #[test]
    fn test_filter_by_zone_then_sort_by_name() {
        let filter = RecordFilter::new().with(FilterField::Zone, "a.com");
        let mut filtered = filter_records(&sample(), &filter);
        assert_eq!(ids(&filtered), vec!["1", "3"]);

        sort_records(&mut filtered, SortKey::Name, true);
        let names: Vec<&str> = filtered.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["mail", "www"]);
    }

    #[test]
    fn test_type_filter_is_case_insensitive_exact_match() {
        let filter = RecordFilter::new().with(FilterField::Type, "a");
        let filtered = filter_records(&sample(), &filter);
        assert_eq!(ids(&filtered), vec!["1", "2"]);

        let partial = RecordFilter::new().with(FilterField::Type, "M");
        assert!(filter_records(&sample(), &partial).is_empty());
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let records = sample();
        assert_eq!(filter_records(&records, &RecordFilter::new()), records);
    }

    #[test]
    fn test_filter_is_idempotent_and_requires_all_fields() {
        let filter = RecordFilter::new()
            .with(FilterField::Zone, "A.COM")
            .with(FilterField::Name, "ai");
        let once = filter_records(&sample(), &filter);
        let twice = filter_records(&once, &filter);
        assert_eq!(once, twice);
        assert_eq!(ids(&once), vec!["3"]);
    }

    #[test]
    fn test_filter_content_substring() {
        let filter = RecordFilter::new().with(FilterField::Content, "API.CON");
        assert_eq!(ids(&filter_records(&sample(), &filter)), vec!["2"]);
    }

    #[test]
    fn test_with_optional_skips_empty_values() {
        let filter = RecordFilter::new()
            .with_optional(FilterField::Name, None)
            .with_optional(FilterField::Zone, Some(""));
        assert_eq!(filter, RecordFilter::new());
    }

    #[test]
    fn test_keyword_matches_name_zone_or_content() {
        let r = record("1", "www", "example.com", "A");
        assert!(r.matches_keyword("WW"));
        assert!(r.matches_keyword("example"));
        assert!(r.matches_keyword("content"));
        assert!(r.matches_keyword(""));
        assert!(!r.matches_keyword("zzz"));
    }

    #[test]
    fn test_ttl_label() {
        let mut r = record("1", "www", "a.com", "A");
        assert_eq!(r.ttl_label(), "auto");
        r.ttl = 300;
        assert_eq!(r.ttl_label(), "300");
    }
}
