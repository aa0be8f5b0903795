use clap::Parser;
use users_api::cli::{Cli, execute_command, load_and_merge_config};
use users_api::logger::init_logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_and_merge_config(&cli)?;
    init_logger(&settings.logger)?;

    if let Err(e) = execute_command(&cli, settings).await {
        tracing::error!(error = %e, "Command failed");
        return Err(e.into());
    }

    Ok(())
}
