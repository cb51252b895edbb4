//! `shopadmin` command-line front end.
//!
//! Thin host over `shopadmin-console`: parses arguments, builds the HTTP
//! client from flags and environment, and renders controller state.

pub mod args;
pub mod commands;
pub mod output;

use shopadmin_client::ClientConfig;
use shopadmin_client::config::{ENV_API_TOKEN, ENV_API_URL};

pub use args::{Cli, Command};
pub use commands::{Context, run};

/// Client configuration from the environment, with `--api-url` / `--token`
/// taking precedence.
pub fn client_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let config = ClientConfig::from_lookup(|key| match key {
        ENV_API_URL if cli.api_url.is_some() => cli.api_url.clone(),
        ENV_API_TOKEN if cli.token.is_some() => cli.token.clone(),
        other => std::env::var(other).ok(),
    })?;
    Ok(config)
}
