//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use shopadmin_client::config::{ENV_API_TOKEN, ENV_API_URL};
use shopadmin_core::{ResourceId, ResourceKind};
use shopadmin_observability::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "shopadmin", version, about = "Manage an e-commerce catalog from the terminal")]
pub struct Cli {
    /// Base URL of the admin API.
    #[arg(long, global = true, env = ENV_API_URL)]
    pub api_url: Option<String>,

    /// Bearer token sent with every request.
    #[arg(long, global = true, env = ENV_API_TOKEN, hide_env_values = true)]
    pub token: Option<String>,

    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List records, optionally filtered.
    List(ListArgs),

    /// Print one record as JSON.
    Show {
        resource: ResourceKind,
        id: ResourceId,
    },

    /// Per-status counts.
    Counts {
        resource: ResourceKind,
        /// Group the fetched list instead of asking the count endpoint.
        #[arg(long)]
        from_list: bool,
    },

    /// Delete one record.
    Delete {
        resource: ResourceKind,
        id: ResourceId,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },

    /// Delete several records at once.
    BulkDelete {
        resource: ResourceKind,
        #[arg(required = true)]
        ids: Vec<ResourceId>,
        #[arg(long, short)]
        yes: bool,
    },

    /// Change a record's status.
    SetStatus {
        resource: ResourceKind,
        id: ResourceId,
        status: String,
    },

    /// Create a record from `--field key=value` pairs.
    Create {
        resource: ResourceKind,
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Update a record; fields not named keep their current value.
    Update {
        resource: ResourceKind,
        id: ResourceId,
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Show a category with its subcategories.
    Subcategories { category_id: ResourceId },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    pub resource: ResourceKind,

    /// Status wire value, or `all`.
    #[arg(long)]
    pub status: Option<String>,

    /// Case-insensitive text search over the resource's searchable fields.
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub subcategory: Option<String>,

    #[arg(long)]
    pub page: Option<u32>,

    /// Rows per page (defaults to SHOPADMIN_PAGE_SIZE).
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Args)]
pub struct FieldArgs {
    /// `key=value`; lists are comma separated.
    #[arg(long = "field", value_parser = parse_pair)]
    pub fields: Vec<(String, String)>,

    /// `key=path` of an image to upload.
    #[arg(long = "file", value_parser = parse_file)]
    pub files: Vec<(String, PathBuf)>,
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim().to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got `{raw}`")),
    }
}

fn parse_file(raw: &str) -> Result<(String, PathBuf), String> {
    let (key, path) = parse_pair(raw)?;
    if path.trim().is_empty() {
        return Err(format!("missing path in `{raw}`"));
    }
    Ok((key, PathBuf::from(path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_with_filters() {
        let cli = Cli::try_parse_from([
            "shopadmin",
            "--api-url",
            "http://example.test/api",
            "list",
            "products",
            "--status",
            "approved",
            "--page",
            "2",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://example.test/api"));
        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.resource, ResourceKind::Product);
        assert_eq!(args.status.as_deref(), Some("approved"));
        assert_eq!(args.page, Some(2));
    }

    #[test]
    fn parses_field_pairs() {
        let cli = Cli::try_parse_from([
            "shopadmin",
            "create",
            "product",
            "--field",
            "productName=Desk Lamp",
            "--field",
            "tags=a,b",
            "--file",
            "imageUrl=./lamp.png",
        ])
        .unwrap();
        let Command::Create { fields, .. } = cli.command else {
            panic!("expected create");
        };
        assert_eq!(fields.fields[0], ("productName".to_string(), "Desk Lamp".to_string()));
        assert_eq!(fields.fields[1].1, "a,b");
        assert_eq!(fields.files[0], ("imageUrl".to_string(), PathBuf::from("./lamp.png")));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Cli::try_parse_from(["shopadmin", "create", "product", "--field", "oops"]).is_err());
        assert!(Cli::try_parse_from(["shopadmin", "list", "widgets"]).is_err());
        assert!(Cli::try_parse_from(["shopadmin", "show", "products", "abc"]).is_err());
        assert!(Cli::try_parse_from(["shopadmin", "bulk-delete", "products"]).is_err());
    }
}
