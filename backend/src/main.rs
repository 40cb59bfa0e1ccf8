use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leavedesk_edge::{
    app::build_router,
    config::{mask_secret, Config},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leavedesk_edge=debug,leavedesk_access=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        backend_api_url = %config.backend_api_url,
        static_dir = %config.static_dir.display(),
        jwt_secret = %config.jwt_secret.as_deref().map(mask_secret).unwrap_or_else(|| "<unset>".into()),
        proxy_timeout_secs = config.proxy_timeout_secs,
        "Loaded configuration from environment/.env"
    );

    let addr = config.bind_addr;
    let app = build_router(AppState::new(config)?);

    tracing::info!("Edge server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
