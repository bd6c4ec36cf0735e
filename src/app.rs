use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/theme/toggle", post(handlers::toggle_theme))
        .route("/api/sidebar/toggle", post(handlers::toggle_sidebar))
        .route("/api/date-range/next", post(handlers::next_date_range))
        .route("/api/filters", post(handlers::select_filter))
        .route("/api/country", post(handlers::select_country))
        .route("/api/charts/reinit", post(handlers::reinit_charts))
        .route("/api/counter/replay", post(handlers::replay_counter))
        .with_state(state)
}
