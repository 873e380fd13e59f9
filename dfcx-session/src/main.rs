use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;
pub mod cookies;
pub mod landing;

use config::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dfcx_session=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting session service...");

    let settings = Settings::from_env();
    settings.validate().context("Invalid session settings")?;
    if settings.prod {
        tracing::info!("Production mode: cookies follow the request host");
    } else {
        tracing::info!("Development mode: cookies scoped to {}", landing::DEBUG_DOMAIN);
    }

    let addr = settings.bind_addr.clone();
    let app = api::create_router(settings);

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
