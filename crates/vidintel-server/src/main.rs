mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use vidintel_engine::AnalysisConfig;
use vidintel_youtube::YoutubeClient;

use crate::api::{build_app, default_rate_limit_state, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(vidintel_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let api_key = config
        .youtube_api_key
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("YOUTUBE_API_KEY is required to serve intel requests"))?;
    let client = YoutubeClient::new(api_key, config.youtube_timeout_secs)?
        .with_retry_policy(config.youtube_max_retries, config.youtube_backoff_base_ms);

    let state = AppState {
        client: Arc::new(client),
        config: Arc::clone(&config),
        analysis: Arc::new(AnalysisConfig::default()),
    };
    let app = build_app(state, default_rate_limit_state());

    tracing::info!(addr = %config.bind_addr, env = %config.env, "vidintel-server listening");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
