use hiring_pipeline_backend::{
    config::init_config,
    database::pool::{create_pool, run_migrations},
    routes::app_router,
    AppState,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = init_config()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("hiring_pipeline_backend=info,tower_http=info"));
    if config.log_json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let pool = create_pool(config).await?;
    run_migrations(&pool).await?;
    info!("database migrations applied");

    let app_state = AppState::new(pool, config);
    let app = app_router(app_state, Duration::from_secs(config.request_timeout_secs));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
