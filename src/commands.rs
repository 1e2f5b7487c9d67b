use std::fmt::Write;

use log::warn;

use crate::api::{CloudflareClient, DnsApiClient, DnsManager, RecordPayload};
use crate::cli::{AddArgs, Cli, Commands, DeleteArgs, ListArgs, RecordOptions, UpdateArgs};
use crate::config;
use crate::error::Result;
use crate::records::{filter_records, sort_records, DnsRecord, FilterField, RecordFilter, SortKey};
use crate::tui::{self, view::truncate, Navigator};

const CONTENT_WIDTH: usize = 47;

pub async fn run(cli: Cli) -> Result<()> {
    let config = config::load(cli.config.as_deref())?;
    let manager = DnsManager::new(CloudflareClient::new(&config)?);

    let output = match cli.command {
        Commands::List(args) => list(&manager, &args).await?,
        Commands::Add(args) => add(&manager, &args).await?,
        Commands::Update(args) => update(&manager, &args).await?,
        Commands::Delete(args) => delete(&manager, &args).await?,
        Commands::Interactive => {
            return interactive(manager, config.page_size).await;
        }
    };

    print!("{}", output);
    Ok(())
}

pub async fn list<C: DnsApiClient>(manager: &DnsManager<C>, args: &ListArgs) -> Result<String> {
    let listing = manager.list_all_records().await?;
    for skipped in &listing.skipped {
        eprintln!(
            "warning: could not list records for zone {}: {}",
            skipped.zone_name, skipped.reason
        );
    }

    let filter = RecordFilter::new()
        .with_optional(FilterField::Name, args.filter_name.as_deref())
        .with_optional(FilterField::Type, args.filter_type.as_deref())
        .with_optional(FilterField::Zone, args.filter_zone.as_deref())
        .with_optional(FilterField::Content, args.filter_content.as_deref());

    let mut records = filter_records(&listing.records, &filter);
    sort_records(&mut records, SortKey::parse(&args.sort_by), args.ascending);

    Ok(format_table(&records))
}

pub async fn add<C: DnsApiClient>(manager: &DnsManager<C>, args: &AddArgs) -> Result<String> {
    let payload = payload(&args.name, &args.record_type, &args.content, &args.options);
    let created = manager.create_record(&args.zone, &payload).await?;

    Ok(format!(
        "Added DNS record {} ({} {} -> {})\n",
        created.id, created.record_type, created.name, created.content
    ))
}

pub async fn update<C: DnsApiClient>(
    manager: &DnsManager<C>,
    args: &UpdateArgs,
) -> Result<String> {
    let zone_id = manager.resolve_zone_id(&args.zone).await?;
    let payload = payload(&args.name, &args.record_type, &args.content, &args.options);
    manager
        .update_record(&args.record_id, &zone_id, &payload)
        .await?;

    Ok(format!("Updated DNS record {}\n", args.record_id))
}

pub async fn delete<C: DnsApiClient>(
    manager: &DnsManager<C>,
    args: &DeleteArgs,
) -> Result<String> {
    let zone_id = manager.resolve_zone_id(&args.zone).await?;
    manager.delete_record(&args.record_id, &zone_id).await?;

    Ok(format!("Deleted DNS record {}\n", args.record_id))
}

async fn interactive<C: DnsApiClient>(manager: DnsManager<C>, page_size: usize) -> Result<()> {
    let listing = manager.list_all_records().await?;
    if !listing.skipped.is_empty() {
        warn!("{} zones could not be listed", listing.skipped.len());
    }

    let mut navigator = Navigator::new(manager, listing, page_size);
    tui::run(&mut navigator).await?;
    Ok(())
}

fn payload(name: &str, record_type: &str, content: &str, options: &RecordOptions) -> RecordPayload {
    RecordPayload {
        r#type: record_type.to_uppercase(),
        name: name.to_string(),
        content: content.to_string(),
        ttl: options.ttl,
        proxied: options.proxied,
    }
}

pub fn format_table(records: &[DnsRecord]) -> String {
    if records.is_empty() {
        return "No DNS records found\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Found {} DNS records:\n", records.len());
    let _ = writeln!(
        out,
        "{:<32} {:<20} {:<24} {:<8} {:<50} {:<6} {:<7}",
        "ID", "Zone", "Name", "Type", "Content", "TTL", "Proxied"
    );
    let _ = writeln!(out, "{}", "-".repeat(151));

    for record in records {
        let _ = writeln!(
            out,
            "{:<32} {:<20} {:<24} {:<8} {:<50} {:<6} {:<7}",
            record.id,
            record.zone_name,
            record.name,
            record.record_type,
            truncate(&record.content, CONTENT_WIDTH),
            record.ttl_label(),
            if record.proxied { "yes" } else { "no" }
        );
    }
    out
}
