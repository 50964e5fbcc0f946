use std::{net::SocketAddr, sync::Arc};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use wish_wallet::{
    advice::{AdviceRequester, GeminiClient},
    router,
    stats::{overall_progress_percent, total_saved, total_target},
    AppState, Config, GoalStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if config.advice.api_key.is_none() {
        info!("no advice API key configured; advice requests will return the fallback message");
    }

    let store = GoalStore::load(&config.data_path).await;
    let mut changes = store.subscribe();
    tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            let goals = changes.borrow_and_update().clone();
            info!(
                goals = goals.len(),
                total_target = total_target(&goals),
                total_saved = total_saved(&goals),
                progress = %format!("{:.1}%", overall_progress_percent(&goals)),
                "goals changed"
            );
        }
    });

    let advisor = AdviceRequester::new(Arc::new(GeminiClient::new(config.advice.clone())));
    let state = AppState::new(store, advisor);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(data_path = %config.data_path.display(), "listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
