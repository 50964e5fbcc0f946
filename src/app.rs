use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post, put}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/goals", get(handlers::list_goals).post(handlers::create_goal))
        .route(
            "/api/goals/:id",
            get(handlers::get_goal)
                .put(handlers::update_goal)
                .delete(handlers::delete_goal),
        )
        .route("/api/goals/:id/amount", put(handlers::set_amount))
        .route("/api/goals/:id/contributions", post(handlers::add_savings))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/advice", post(handlers::get_advice))
        .with_state(state)
}
