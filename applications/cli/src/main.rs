/// Cancionero - command-line client for the music catalog API
use cancionero_cli::{run, App, Cli, CliConfig};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "cancionero=info,cancionero_cli=info,cancionero_client=info,cancionero_stores=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;
    config.validate()?;

    tracing::debug!(base_url = %config.api.base_url, "Loaded configuration");

    let app = App::new(&config)?;
    let output = run(&app, cli.command).await?;

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
