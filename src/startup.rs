use crate::components::{CalendarProvider, GoogleProvider};
use crate::config::Config;
use crate::error::{other_error, Error};
use crate::server::{router, AppState};
use crate::shutdown::shutdown_signal;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| other_error(&format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Bind the listener and serve until a shutdown signal arrives
pub async fn start_server(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    let addr = config.read().await.socket_addr();

    let provider: Arc<dyn CalendarProvider> = Arc::new(GoogleProvider::new(Arc::clone(&config)));
    let app = router(AppState::new(provider));

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(Error::Io)?;
    info!("Server is running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Error::Io)?;

    info!("Server stopped");
    Ok(())
}
