use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use attendance_backend::{
    config::{mask_database_url, Config},
    db,
    repositories::{AttendanceStore, MemoryAttendanceStore, PgAttendanceStore},
    routes,
    services::SessionLedger,
    state::AppState,
    utils::time::SystemClock,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "attendance_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    tracing::info!(
        database_url = %config.database_url.as_deref().map(mask_database_url).unwrap_or_else(|| "<memory>".into()),
        app_addr = %config.app_addr,
        default_user_id = %config.default_user_id,
        history_default_limit = config.history_default_limit,
        history_max_limit = config.history_max_limit,
        "Loaded configuration from environment/.env"
    );

    let store: Arc<dyn AttendanceStore> = match config.database_url.as_deref() {
        Some(url) => {
            let pool = db::create_pool(url, config.database_max_connections).await?;
            db::run_migrations(&pool).await?;
            Arc::new(PgAttendanceStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; attendance records are kept in memory only");
            Arc::new(MemoryAttendanceStore::new())
        }
    };

    let ledger = Arc::new(SessionLedger::new(store, Arc::new(SystemClock)));
    let addr = config.app_addr;
    let app = routes::app(AppState::new(ledger, config));

    tracing::info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
