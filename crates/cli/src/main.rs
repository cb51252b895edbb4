use clap::Parser;

use shopadmin_cli::{Cli, Context, client_config, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    shopadmin_observability::init_with(cli.log_format);

    let config = client_config(&cli)?;
    tracing::debug!(base_url = %config.base_url, "using API");

    let ctx = Context::new(config)?;
    run(&ctx, cli.command).await
}
