use anyhow::Context;
use clap::{Parser, Subcommand};
use nutri_config::{load as load_config, AppConfig};
use nutri_gateway::{create_router, GatewayState, Repositories};
use nutri_runtime::{shutdown_signal, telemetry, BackendServices};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "nutri-server")]
#[command(about = "Nutri Connect backend (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Start the HTTP and WebSocket server
    Serve,
    /// Print the resolved configuration with secrets masked
    PrintConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server().await,
        Commands::PrintConfig => print_config(),
    }
}

async fn run_server() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("starting Nutri Connect backend");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let state = GatewayState::new(
        services.authenticator.clone(),
        Repositories::supabase(&services.supabase),
        config.cors.clone(),
    );
    let app = create_router(state);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}

fn print_config() -> anyhow::Result<()> {
    let config = load_config().context("failed to load configuration")?;
    let rendered = serde_json::to_string_pretty(&masked(config))
        .context("failed to render configuration")?;
    println!("{rendered}");
    Ok(())
}

fn masked(mut config: AppConfig) -> AppConfig {
    if !config.supabase.api_key.is_empty() {
        config.supabase.api_key = "********".to_string();
    }
    config
}
