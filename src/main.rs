use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crypto_interactions_bot::{api, config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Load configuration
    let config = config::Config::from_env()?;

    // Initialize logging
    let level = match config.app_env {
        config::AppEnv::Production => "info",
        config::AppEnv::Development | config::AppEnv::Test => "debug",
    };
    // RUST_LOG wins when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Build our application with routes
    let app = api::router::create_router(&config)?;

    // Run our application
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!(
        provider = ?config.market.provider,
        quote_currency = %config.market.quote_currency,
        "Listening on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
