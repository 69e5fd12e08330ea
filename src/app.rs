use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/goal/:id/add", post(handlers::goal_add))
        .route("/goal/:id/sub", post(handlers::goal_sub))
        .route("/goal/:id/done", post(handlers::goal_done))
        .route("/api/goals", get(handlers::get_goals))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/categories", get(handlers::get_categories))
        .route("/api/adjust", post(handlers::adjust))
        .route("/api/complete", post(handlers::complete))
        .with_state(state)
}
