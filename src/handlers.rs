use crate::dashboard::DashboardSnapshot;
use crate::errors::AppError;
use crate::interactions::FilterTarget;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{Json, extract::State, response::Html};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    pub chart: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct CountryRequest {
    pub country: String,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    state.start_counter().await;
    let snapshot = state.snapshot().await;
    Html(render_index(&snapshot))
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    Json(state.snapshot().await)
}

pub async fn toggle_theme(
    State(state): State<AppState>,
) -> Result<Json<DashboardSnapshot>, AppError> {
    state.toggle_theme().await?;
    Ok(Json(state.snapshot().await))
}

pub async fn toggle_sidebar(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    state.dashboard.lock().await.toggle_sidebar();
    Json(state.snapshot().await)
}

pub async fn next_date_range(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    state.dashboard.lock().await.cycle_date_range();
    Json(state.snapshot().await)
}

pub async fn select_filter(
    State(state): State<AppState>,
    Json(payload): Json<FilterRequest>,
) -> Result<Json<DashboardSnapshot>, AppError> {
    let target = FilterTarget::parse(&payload.chart)
        .ok_or_else(|| AppError::bad_request("chart must be 'performance' or 'revenue'"))?;
    state
        .dashboard
        .lock()
        .await
        .select_filter(target, payload.value.trim());
    Ok(Json(state.snapshot().await))
}

pub async fn select_country(
    State(state): State<AppState>,
    Json(payload): Json<CountryRequest>,
) -> Json<DashboardSnapshot> {
    state.select_country(&payload.country).await;
    Json(state.snapshot().await)
}

pub async fn reinit_charts(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    state.dashboard.lock().await.init_charts();
    Json(state.snapshot().await)
}

pub async fn replay_counter(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    state.start_counter().await;
    Json(state.snapshot().await)
}
