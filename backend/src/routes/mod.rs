pub mod health;
pub mod wordsearch;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/wordsearch", post(wordsearch::generate_puzzle))
        .route(
            "/wordsearch/{puzzle_id}",
            get(wordsearch::get_puzzle).delete(wordsearch::delete_puzzle),
        )
        .route("/wordsearch/{puzzle_id}/check", post(wordsearch::check_selection))
}
