pub mod handlers;
pub mod templates;

use crate::scrapers::ListingSource;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Shared by every request
pub struct AppState {
    pub source: Arc<dyn ListingSource>,
}

impl AppState {
    pub fn new(source: Arc<dyn ListingSource>) -> Self {
        Self { source }
    }
}

/// Register all routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::index)
        .service(handlers::search)
        .service(handlers::api_listings)
        .service(handlers::health)
        .service(handlers::test_browser);
}

/// Serve the web front end until the process is stopped
pub async fn run(source: Arc<dyn ListingSource>, bind_addr: &str, port: u16) -> Result<()> {
    let state = web::Data::new(AppState::new(source));

    info!("🌐 Starting web server at http://{}:{}", bind_addr, port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))
    .with_context(|| format!("Failed to bind {}:{}", bind_addr, port))?
    .run()
    .await
    .context("Web server stopped with an error")
}
