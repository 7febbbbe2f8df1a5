use listing_scout::scrapers::MapsScraper;
use listing_scout::{logging, server, ListingSource, Settings};
use std::sync::Arc;
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    logging::init(false);

    info!("📍 Listing Scout - map listings scraper");

    let settings = Settings::from_env()?;
    let bind_addr = settings.bind_addr.clone();
    let port = settings.port;

    match &settings.browser.chrome_path {
        Some(path) => info!("Using Chrome at {}", path.display()),
        None => info!("Chrome binary will be auto-detected"),
    }

    let source: Arc<dyn ListingSource> = Arc::new(MapsScraper::new(settings));
    server::run(source, &bind_addr, port).await
}
