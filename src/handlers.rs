use crate::errors::AppError;
use crate::models::{AdviceResponse, AmountRequest, Category, Goal, GoalInput, StatsSummary};
use crate::state::AppState;
use crate::stats::build_summary;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

pub async fn list_goals(State(state): State<AppState>) -> Json<Vec<Goal>> {
    let store = state.store.lock().await;
    Json(store.goals().to_vec())
}

pub async fn get_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Goal>, AppError> {
    let store = state.store.lock().await;
    store
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("goal not found: {id}")))
}

pub async fn create_goal(
    State(state): State<AppState>,
    Json(payload): Json<GoalInput>,
) -> Result<(StatusCode, Json<Goal>), AppError> {
    let mut store = state.store.lock().await;
    let goal = store.create(payload.normalized()).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

pub async fn update_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<GoalInput>,
) -> Result<Json<Goal>, AppError> {
    let mut store = state.store.lock().await;
    let goal = store.update(&id, payload.normalized()).await?;
    Ok(Json(goal))
}

pub async fn delete_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut store = state.store.lock().await;
    store.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_amount(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AmountRequest>,
) -> Result<Json<Goal>, AppError> {
    let mut store = state.store.lock().await;
    let goal = store.contribute(&id, payload.amount).await?;
    Ok(Json(goal))
}

pub async fn add_savings(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AmountRequest>,
) -> Result<Json<Goal>, AppError> {
    if !payload.amount.is_finite() || payload.amount <= 0.0 {
        return Err(AppError::bad_request("amount must be a positive number"));
    }

    let mut store = state.store.lock().await;
    let current = store
        .get(&id)
        .map(|goal| goal.current_amount)
        .ok_or_else(|| AppError::not_found(format!("goal not found: {id}")))?;
    let goal = store.contribute(&id, current + payload.amount).await?;
    Ok(Json(goal))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsSummary> {
    let snapshot = state.store.lock().await.snapshot();
    Json(build_summary(&snapshot))
}

pub async fn list_categories() -> Json<Vec<Category>> {
    Json(Category::ALL.to_vec())
}

pub async fn get_advice(State(state): State<AppState>) -> Json<AdviceResponse> {
    // The lock is released before the service call; edits may proceed meanwhile.
    let snapshot = state.store.lock().await.snapshot();
    let advice = state.advisor.request_advice(&snapshot).await;
    Json(AdviceResponse { advice })
}
