use busboardd::{build_router, AdminCredential, AppState, ServerConfig, SessionStore};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ServerConfig::from_env();
    let admin = AdminCredential::from_env();
    if !admin.is_configured() {
        warn!("no admin credential configured; logins will fail until one is set");
    }

    let conn = busboardd::db::open_db(&config.data_dir)?;
    let state = AppState::new(
        conn,
        SessionStore::new(config.session_ttl),
        admin,
        config.public_dir.clone(),
    );

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "busboardd listening");
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
