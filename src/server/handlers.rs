use crate::models::{sort_by_rating, SearchResults};
use crate::scrapers::SearchQuery;
use crate::server::templates;
use crate::server::AppState;
use actix_web::http::header::ContentType;
use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

/// Fields posted by the search form
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub city: String,
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiParams {
    pub city: String,
    pub category: String,
    pub limit: Option<usize>,
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

#[get("/")]
pub async fn index() -> impl Responder {
    html(templates::index_page())
}

#[post("/")]
pub async fn search(form: web::Form<SearchForm>, state: web::Data<AppState>) -> impl Responder {
    let SearchForm { city, category } = form.into_inner();
    info!("🔎 Search for '{}' in '{}'", category, city);

    let query = SearchQuery::new(city.as_str(), category.as_str());
    let mut listings = state.source.search(&query).await;
    sort_by_rating(&mut listings);

    html(templates::results_page(&city, &category, &listings))
}

#[get("/api/listings")]
pub async fn api_listings(params: web::Query<ApiParams>, state: web::Data<AppState>) -> impl Responder {
    let ApiParams {
        city,
        category,
        limit,
    } = params.into_inner();

    let mut query = SearchQuery::new(city, category);
    query.limit = limit;

    let listings = state.source.search(&query).await;
    HttpResponse::Ok().json(SearchResults::new(query, listings))
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "healthy" }))
}

#[get("/test-browser")]
pub async fn test_browser(state: web::Data<AppState>) -> impl Responder {
    match state.source.probe().await {
        Ok(browser) => HttpResponse::Ok().json(json!({
            "status": "success",
            "source": state.source.source_name(),
            "browser": browser,
        })),
        Err(e) => {
            warn!("Browser probe failed: {:#}", e);
            HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": format!("{:#}", e),
            }))
        }
    }
}
