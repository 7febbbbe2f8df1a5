use crate::scrapers::types::SearchQuery;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One business entry read from a result card's detail pane
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    /// 1-based ordinal of the result card this listing came from
    pub position: usize,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub rating: Option<f64>,
}

/// Listings for one query, as returned by the JSON API and the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: SearchQuery,
    pub listings: Vec<Listing>,
    pub scraped_at: DateTime<Utc>,
}

impl SearchResults {
    /// Wrap freshly scraped listings, sorting them by rating
    pub fn new(query: SearchQuery, mut listings: Vec<Listing>) -> Self {
        sort_by_rating(&mut listings);
        Self {
            query,
            listings,
            scraped_at: Utc::now(),
        }
    }
}

/// Sort listings best-rated first.
///
/// Listings without a rating go after every rated listing, including those
/// rated 0. The sort is stable, so ties keep their discovery order.
pub fn sort_by_rating(listings: &mut [Listing]) {
    listings.sort_by(|a, b| compare_ratings(b.rating, a.rating));
}

fn compare_ratings(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(position: usize, rating: Option<f64>) -> Listing {
        Listing {
            position,
            name: format!("Place {}", position),
            address: "1 Main St".to_string(),
            phone: None,
            rating,
        }
    }

    fn positions(listings: &[Listing]) -> Vec<usize> {
        listings.iter().map(|l| l.position).collect()
    }

    #[test]
    fn sorts_by_rating_descending() {
        let mut listings = vec![
            listing(1, Some(3.9)),
            listing(2, Some(4.8)),
            listing(3, Some(4.1)),
        ];
        sort_by_rating(&mut listings);
        assert_eq!(positions(&listings), vec![2, 3, 1]);
    }

    #[test]
    fn missing_rating_sorts_last() {
        let mut listings = vec![
            listing(1, None),
            listing(2, Some(0.0)),
            listing(3, Some(4.5)),
            listing(4, None),
        ];
        sort_by_rating(&mut listings);
        assert_eq!(positions(&listings), vec![3, 2, 1, 4]);
    }

    #[test]
    fn equal_ratings_keep_discovery_order() {
        let mut listings = vec![
            listing(1, Some(4.0)),
            listing(2, Some(4.5)),
            listing(3, Some(4.0)),
        ];
        sort_by_rating(&mut listings);
        assert_eq!(positions(&listings), vec![2, 1, 3]);
    }

    #[test]
    fn search_results_are_sorted_on_construction() {
        let query = SearchQuery::new("New York", "restaurants");
        let results = SearchResults::new(query, vec![listing(1, None), listing(2, Some(2.0))]);
        assert_eq!(positions(&results.listings), vec![2, 1]);
    }
}
