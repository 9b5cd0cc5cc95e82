use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/api/entries",
            get(handlers::list_entries).post(handlers::create_entry),
        )
        .route(
            "/api/habits",
            get(handlers::list_habits).post(handlers::create_habit),
        )
        .route("/api/habits/:id/toggle", post(handlers::toggle_habit))
        .route("/api/habits/:id", delete(handlers::delete_habit))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/export", get(handlers::export_snapshot))
        .route("/api/import", post(handlers::import_snapshot))
        .route("/api/clear", post(handlers::clear_all))
        .with_state(state)
}
