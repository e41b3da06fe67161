//! Countdown Panel - A countdown timer, counter and offer modal served over HTTP
//! 
//! This is the main entry point for the countdown-panel application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use countdown_panel::{
    api::create_router,
    config::Config,
    countdown::TimerEvent,
    notify::FallbackNotifier,
    state::AppState,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_panel={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown-panel server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms, notifications={}",
          config.host, config.port, config.tick_millis, config.notifications);

    // Create application state
    let notifier = Arc::new(FallbackNotifier::desktop(config.notifications));
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.tick_period(),
        config.time_input(),
        notifier,
    ));

    if config.start {
        state.dispatch(TimerEvent::Start).map_err(anyhow::Error::msg)?;
    }

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /timer                 - Current countdown");
    info!("  PUT  /timer/input           - Edit hours/minutes/seconds");
    info!("  POST /timer/start           - Start or resume");
    info!("  POST /timer/pause           - Pause");
    info!("  POST /timer/toggle          - Pause/Resume");
    info!("  POST /timer/reset           - Reset");
    info!("  GET  /counter, POST /counter/{{increment,decrement,reset}}");
    info!("  GET  /offer, POST /offer/{{open,close,accept}}");
    info!("  GET  /status                - All widgets");
    info!("  GET  /health                - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if let Err(e) = state.shutdown() {
        tracing::warn!("Failed to tear down countdown: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
