use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use vendor_analytics::utils::{logger, validation::Validate};
use vendor_analytics::{
    build_router, AppState, DocumentStore, MemoryStore, MetricsEngine, ServerConfig, SqliteStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::parse();

    logger::init_logger(config.verbose);

    tracing::info!("Starting vendor-analytics server");
    if config.verbose {
        tracing::debug!("Server config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let store: Arc<dyn DocumentStore> = if config.in_memory {
        tracing::info!("Using in-memory document store");
        Arc::new(MemoryStore::new())
    } else {
        tracing::info!("Opening SQLite store at {}", config.db_path);
        Arc::new(SqliteStore::new(&config.db_path)?)
    };

    let engine = MetricsEngine::new(Arc::clone(&store));
    let state = AppState::new(store, engine);
    let app = build_router(state);

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!("Server running at http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
