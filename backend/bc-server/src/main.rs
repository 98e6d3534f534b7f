use bc_server::error::Result as ServerErrorResult;
use bc_server::{AppState, build_router, logger};

use bc_config::Config;
use bc_dispatch::{
    BroadcastEngine, CustomerResolver, DeliveryLedger, DispatchMetrics, EngineSettings,
    GoogleSheetSource, HttpGatewayTransport, PrimarySource, RetryConfig, SecondaryStore,
    SqliteStore, Transport,
};

use std::sync::Arc;

use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ServerErrorResult<()> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let log_dir = Config::config_dir()?.join(&config.logging.dir);
        std::fs::create_dir_all(&log_dir)?;
        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting bc-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let database_path = config.database_path()?;
    info!("Opening database: {}", database_path.display());
    let pool = bc_db::open_pool(&database_path).await?;
    info!("Database ready");

    let metrics = DispatchMetrics::new();
    let store: Arc<dyn SecondaryStore> = Arc::new(SqliteStore::new(pool.clone()));

    let mut status_watcher = None;
    let transport: Option<Arc<dyn Transport>> =
        match HttpGatewayTransport::from_config(&config.transport)? {
            Some(gateway) => {
                let gateway = Arc::new(gateway);
                info!("Transport gateway: {}", gateway.base_url);
                status_watcher = Some(
                    gateway.spawn_status_watcher(config.transport.status_poll_interval()),
                );
                Some(gateway as Arc<dyn Transport>)
            }
            None => None,
        };

    let primary: Option<Arc<dyn PrimarySource>> = GoogleSheetSource::from_config(&config.sheet)?
        .map(|sheet| Arc::new(sheet) as Arc<dyn PrimarySource>);

    let resolver = Arc::new(CustomerResolver::new(
        primary,
        Some(Arc::clone(&store)),
        config.cache.ttl(),
        metrics.clone(),
    ));
    let ledger = DeliveryLedger::new(
        Some(store),
        RetryConfig::from(&config.ledger),
        metrics.clone(),
    );
    let engine = BroadcastEngine::new(
        transport,
        resolver,
        ledger,
        EngineSettings::from_config(&config),
        metrics,
    );

    let app = build_router(AppState::new(engine, pool.clone()));

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
                Err(e) => error!("Failed to listen for SIGINT: {}", e),
            }
        })
        .await?;

    if let Some(watcher) = status_watcher {
        watcher.abort();
    }
    pool.close().await;
    info!("Graceful shutdown complete");

    Ok(())
}
