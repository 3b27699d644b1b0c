//! Web server for the immunisation report pages.
//!
//! Five server-rendered reports over the statistics database:
//! - landing page with aggregate facts,
//! - vaccination coverage with optional filters,
//! - per-country infection rates against a global baseline,
//! - countries exceeding the global rate,
//! - infection cases by economic phase.

mod assets;
mod handlers;
mod routes;
pub mod templates;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Settings;
use crate::repository::ReportRepository;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<ReportRepository>,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            repo: Arc::new(settings.repository()),
        }
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
