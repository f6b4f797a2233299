use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};

use wit_gateway::{
    AppState, Args, AzureDevOpsClient, Config, build_router, logging::init_logging,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(args.log_config());

    // Handle --create-config flag
    if args.create_config {
        let path = Config::create_sample_config()?;
        println!("Sample configuration available at {}", path.display());
        return Ok(());
    }

    // Resolve configuration from CLI args, environment variables, and config file
    let config = Config::resolve(args.to_config())?;
    config.log_summary();

    let client = AzureDevOpsClient::new_with_secret(
        config.organization.value().clone(),
        config.project.value().clone(),
        config.pat,
    )?;

    let app = build_router(AppState::new(client));

    let listener = TcpListener::bind(*config.listen.value())
        .await
        .with_context(|| format!("Failed to bind {}", config.listen))?;
    let actual_addr = listener.local_addr()?;
    info!("wit-gateway {} listening on {}", wit_gateway::VERSION, actual_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => {
            error!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
