use std::sync::Arc;

use anyhow::Context;
use lobbychat::{
    app,
    clock::{Clock, SystemClock},
    config::Config,
    reaper,
    store::SqliteStore,
    telemetry, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let config = Config::from_env()?;
    let store = SqliteStore::connect(&config.database_url)
        .await
        .with_context(|| format!("opening {}", config.database_url))?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    tokio::spawn(reaper::run(store.clone(), clock.clone(), config.reaper));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, app(AppState { store, clock }))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}
