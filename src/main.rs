// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;
#[cfg(test)]
mod testing;

use std::{net::SocketAddr, sync::Arc};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::infrastructure::config::load_settings;
use crate::infrastructure::http_api::HttpMaintenanceApi;
use crate::infrastructure::svg_charts::SvgChartFactory;
use crate::presentation::app_state::AppState;
use crate::presentation::router::router;
use crate::presentation::routes::Routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = load_settings()?;

    // Backend client (infrastructure layer)
    let api = Arc::new(HttpMaintenanceApi::new(settings.backend.base_url.clone()));

    let state = Arc::new(AppState {
        api,
        chart_factory: Arc::new(SvgChartFactory::default()),
        routes: Routes::new(&settings.backend.public_url),
        banner_ttl: settings.ui.banner_ttl(),
    });

    let addr: SocketAddr = settings.server.bind_addr.parse()?;
    info!(%addr, backend = %settings.backend.base_url, "starting asset maintenance page host");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state)).await?;

    Ok(())
}
