//! moodcast-rx - weather-aware music recommendation service
//!
//! Orchestrates current weather, a language-model suggestion call, and
//! Spotify catalog enrichment into a single HTTP response.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use moodcast_common::Config;
use moodcast_rx::services::{OpenRouterClient, OpenWeatherClient, SpotifyClient};
use moodcast_rx::{build_router, AppState};

#[derive(Debug, Parser)]
#[command(name = "moodcast-rx", about = "Weather-aware music recommendation service")]
struct Args {
    /// Address to bind
    #[arg(long, env = "MOODCAST_BIND", default_value = "0.0.0.0")]
    bind: String,

    /// Port to listen on
    #[arg(long, env = "MOODCAST_PORT", default_value_t = 5730)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting Moodcast recommender (moodcast-rx) v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Honor a local .env before reading the environment
    if dotenvy::dotenv().is_ok() {
        info!("Loaded environment from .env");
    }

    let args = Args::parse();
    let config = Config::from_env()?;

    let state = AppState::new(
        Arc::new(OpenWeatherClient::new(config.openweather_api_key)),
        Arc::new(OpenRouterClient::new(
            config.openrouter_api_key,
            config.model,
        )),
        Arc::new(SpotifyClient::new(
            config.spotify_client_id,
            config.spotify_client_secret,
        )),
        config.prompt_template,
    );

    let app = build_router(state);

    let addr = format!("{}:{}", args.bind, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("moodcast-rx listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
