use anyhow::Context;
use clap::Parser;
use listing_scout::{logging, ListingSource, MapsScraper, SearchQuery, SearchResults, Settings};
use std::path::PathBuf;
use tracing::info;

/// Scrape map listings for one search and print them best-rated first
#[derive(Debug, Parser)]
#[command(name = "scrape", version)]
struct Args {
    /// City or area to search in
    #[arg(long)]
    city: String,

    /// Business category, e.g. "restaurants"
    #[arg(long)]
    category: String,

    /// Maximum number of listings to read
    #[arg(long)]
    limit: Option<usize>,

    /// How many times to scroll the results panel
    #[arg(long)]
    scrolls: Option<u32>,

    /// Also write the results as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let settings = Settings::from_env()?;
    let scraper = MapsScraper::new(settings);

    let mut query = SearchQuery::new(args.city, args.category);
    query.limit = args.limit;
    query.scroll_attempts = args.scrolls;

    info!("Starting scrape for '{}'...", query.search_text());
    let listings = scraper.search(&query).await;
    let results = SearchResults::new(query, listings);

    info!("✅ Scraped {} listings", results.listings.len());

    for (i, listing) in results.listings.iter().enumerate() {
        println!("{}. {}", i + 1, listing.name);
        println!("   {}", listing.address);
        if let Some(phone) = &listing.phone {
            println!("   Phone: {}", phone);
        }
        match listing.rating {
            Some(rating) => println!("   Rating: {:.1}", rating),
            None => println!("   Rating: n/a"),
        }
        println!();
    }

    if let Some(path) = args.output {
        let json = serde_json::to_string_pretty(&results)?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("💾 Saved results to {}", path.display());
    }

    Ok(())
}
