use crate::errors::AppError;
use crate::models::{
    AdjustRequest, CompleteRequest, GoalQuery, GoalView, ProgressRecord, StatsSummary,
};
use crate::state::AppState;
use crate::stats::build_stats;
use crate::storage::persist_progress;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Json,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let store = state.store.lock().await;
    let views = store.query(&GoalQuery::default());
    let stats = build_stats(store.catalog(), store.progress());
    let categories = store.categories();
    Html(render_index(&views, &stats, &categories))
}

pub async fn get_goals(
    State(state): State<AppState>,
    Query(params): Query<GoalQuery>,
) -> Result<Json<Vec<GoalView>>, AppError> {
    let store = state.store.lock().await;
    Ok(Json(store.query(&params)))
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsSummary>, AppError> {
    let store = state.store.lock().await;
    Ok(Json(build_stats(store.catalog(), store.progress())))
}

pub async fn get_categories(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let store = state.store.lock().await;
    Ok(Json(store.categories()))
}

pub async fn adjust(
    State(state): State<AppState>,
    Json(payload): Json<AdjustRequest>,
) -> Result<Json<ProgressRecord>, AppError> {
    let mut store = state.store.lock().await;
    // The store treats unknown ids as a silent no-op; the HTTP edge
    // still tells the client it asked about a goal that does not exist.
    let record = store
        .adjust_progress(&payload.id, payload.delta)
        .ok_or_else(|| AppError::not_found("unknown goal id"))?;

    persist_progress(&state.data_path, store.progress()).await?;
    Ok(Json(record))
}

pub async fn complete(
    State(state): State<AppState>,
    Json(payload): Json<CompleteRequest>,
) -> Result<Json<ProgressRecord>, AppError> {
    let mut store = state.store.lock().await;
    let record = store
        .mark_complete(&payload.id)
        .ok_or_else(|| AppError::not_found("unknown goal id"))?;

    persist_progress(&state.data_path, store.progress()).await?;
    Ok(Json(record))
}

// Form-post fallbacks for a no-JS browser. Unknown ids fall through to
// the redirect with nothing changed.

pub async fn goal_add(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    step_goal(&state, &id, 1).await?;
    Ok(Redirect::to("/"))
}

pub async fn goal_sub(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    step_goal(&state, &id, -1).await?;
    Ok(Redirect::to("/"))
}

pub async fn goal_done(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let mut store = state.store.lock().await;
    if store.mark_complete(&id).is_some() {
        persist_progress(&state.data_path, store.progress()).await?;
    }
    Ok(Redirect::to("/"))
}

async fn step_goal(state: &AppState, id: &str, direction: i64) -> Result<(), AppError> {
    let mut store = state.store.lock().await;
    let Some(step) = store
        .catalog()
        .iter()
        .find(|goal| goal.id == id)
        .map(|goal| goal.increment)
    else {
        return Ok(());
    };

    if store.adjust_progress(id, direction * step).is_some() {
        persist_progress(&state.data_path, store.progress()).await?;
    }
    Ok(())
}
