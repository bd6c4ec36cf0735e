use pulse_dashboard::{
    AppState, Dashboard, Settings, load_theme, models::DashboardData, page::Page, router,
    stats::StatsClient,
};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let settings = Settings::from_env();
    let theme = load_theme(&settings.theme_path).await;
    info!(theme = theme.as_str(), "loaded theme");

    let mut dashboard = Dashboard::new(DashboardData::sample(), Page::full(), theme);
    dashboard.init();
    dashboard.select_country(&settings.country);

    let stats = StatsClient::new(settings.stats_url.clone())?;
    let port = settings.port;
    let state = AppState::new(settings, dashboard, stats);

    let startup = state.clone();
    tokio::spawn(async move { startup.refresh_country_stats().await });

    let app = router(state.clone());
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.stop_counter().await;
    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
