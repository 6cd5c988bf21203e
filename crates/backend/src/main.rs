use std::sync::Arc;

use axum::http::{header, Method};
use backend::domain::a001_bank_slip::in_memory::InMemoryBankSlipStore;
use backend::domain::a001_bank_slip::repository::{BankSlipStore, SeaOrmBankSlipStore};
use backend::domain::a001_bank_slip::service::BankSlipService;
use backend::shared::{config, data::db};
use backend::{routes, system};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize(&system::tracing::default_log_dir())?;

    let config = config::load_config()?;

    let store: Arc<dyn BankSlipStore> = if config.database.in_memory {
        tracing::warn!("Using in-memory bank slip store, data is lost on shutdown");
        Arc::new(InMemoryBankSlipStore::new())
    } else {
        let db_path = config::get_database_path(&config)?;
        let conn = db::initialize_database(&db_path)
            .await
            .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;
        Arc::new(SeaOrmBankSlipStore::new(conn))
    };
    let service = Arc::new(BankSlipService::new(store));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = routes::configure_routes(service).layer(cors);

    let addr = config.server.socket_addr()?;
    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Port {} is already in use. Please ensure no other process is using it.",
                    addr.port()
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
