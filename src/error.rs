use thiserror::Error;

/// Ways a scrape attempt can go wrong.
///
/// None of these reach the end user: launch and navigation failures turn
/// into an empty result, extraction failures skip a single card.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Browser session could not be started: {0:#}")]
    Launch(anyhow::Error),

    #[error("Results page never became ready: {0:#}")]
    Navigation(anyhow::Error),

    #[error("Card {position} could not be read: {cause:#}")]
    Extraction { position: usize, cause: anyhow::Error },
}
