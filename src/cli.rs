use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::records::AUTO_TTL;

/// Manage Cloudflare DNS records across every zone in an account.
///
/// Credentials come from config.yaml (current directory or
/// ~/.cf-dns-manager/) or the CF_API_TOKEN / CF_ACCOUNT_ID environment
/// variables.
#[derive(Parser, Debug)]
#[command(name = "cf-dns-manager")]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// Path to a config file, instead of searching the default locations
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List DNS records of all zones, with sorting and filtering
    List(ListArgs),

    /// Add a DNS record to a zone
    Add(AddArgs),

    /// Replace an existing DNS record
    Update(UpdateArgs),

    /// Delete a DNS record
    Delete(DeleteArgs),

    /// Browse and manage records in an interactive terminal view
    Interactive,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only records whose name contains this text
    #[arg(long)]
    pub filter_name: Option<String>,

    /// Only records of this type (exact, case-insensitive)
    #[arg(long)]
    pub filter_type: Option<String>,

    /// Only records whose zone contains this text
    #[arg(long)]
    pub filter_zone: Option<String>,

    /// Only records whose content contains this text
    #[arg(long)]
    pub filter_content: Option<String>,

    /// Sort field: name, type, zone, content, ttl, created, modified
    #[arg(long, default_value = "zone")]
    pub sort_by: String,

    /// Sort ascending (true) or descending (false)
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub ascending: bool,
}

#[derive(Args, Debug)]
pub struct RecordOptions {
    /// TTL in seconds (1 = automatic)
    #[arg(long, default_value_t = AUTO_TTL)]
    pub ttl: u32,

    /// Proxy traffic through Cloudflare
    #[arg(long, default_value_t = false, action = ArgAction::Set)]
    pub proxied: bool,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Zone (domain) name, e.g. example.com
    pub zone: String,
    /// Record name
    pub name: String,
    /// Record type, e.g. A, CNAME, TXT
    pub record_type: String,
    /// Record content
    pub content: String,

    #[command(flatten)]
    pub options: RecordOptions,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// ID of the record to replace
    pub record_id: String,
    /// Zone (domain) name the record belongs to
    pub zone: String,
    /// Record name
    pub name: String,
    /// Record type
    pub record_type: String,
    /// Record content
    pub content: String,

    #[command(flatten)]
    pub options: RecordOptions,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// ID of the record to delete
    pub record_id: String,
    /// Zone (domain) name the record belongs to
    pub zone: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_list_defaults() {
        let cli = Cli::parse_from(["cf-dns-manager", "list"]);
        let Commands::List(args) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(args.sort_by, "zone");
        assert!(args.ascending);
        assert!(args.filter_name.is_none());
    }

    #[test]
    fn test_list_accepts_explicit_descending() {
        let cli = Cli::parse_from([
            "cf-dns-manager",
            "list",
            "--sort-by",
            "TTL",
            "--ascending",
            "false",
            "--filter-type",
            "a",
        ]);
        let Commands::List(args) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(args.sort_by, "TTL");
        assert!(!args.ascending);
        assert_eq!(args.filter_type.as_deref(), Some("a"));
    }

    #[test]
    fn test_add_parses_positionals_and_options() {
        let cli = Cli::parse_from([
            "cf-dns-manager",
            "add",
            "example.com",
            "www",
            "a",
            "192.0.2.1",
            "--ttl",
            "300",
            "--proxied",
            "true",
        ]);
        let Commands::Add(args) = cli.command else {
            panic!("expected add command");
        };
        assert_eq!(args.zone, "example.com");
        assert_eq!(args.record_type, "a");
        assert_eq!(args.options.ttl, 300);
        assert!(args.options.proxied);
    }

    #[test]
    fn test_update_defaults_ttl_and_proxied() {
        let cli = Cli::parse_from([
            "cf-dns-manager",
            "update",
            "rec1",
            "example.com",
            "www",
            "A",
            "192.0.2.1",
        ]);
        let Commands::Update(args) = cli.command else {
            panic!("expected update command");
        };
        assert_eq!(args.options.ttl, AUTO_TTL);
        assert!(!args.options.proxied);
    }

    #[test]
    fn test_delete_requires_zone() {
        assert!(Cli::try_parse_from(["cf-dns-manager", "delete", "rec1"]).is_err());
    }
}
