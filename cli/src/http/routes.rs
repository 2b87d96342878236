//! Page and API handlers. Every route is a read-only `GET`.

use std::sync::PoisonError;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Json, Router,
};
use chrono::Local;
use trajview_core::api::{
    build_join, compare_page, compare_view, index_page, index_view, viewer_page, viewer_view,
    CompareQuery, IndexQuery, JoinSummary, ViewerQuery,
};

use crate::http::{
    models::{HealthResponse, HttpServerError, JoinResponse},
    state::AppState,
};

/// Builds the router for the three pages, the join API and health.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/viewer", get(viewer_handler))
        .route("/compare", get(compare_handler))
        .route("/api/join", get(join_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// GET / - run selector and task table
async fn index_handler(State(state): State<AppState>, Query(q): Query<IndexQuery>) -> Html<String> {
    state.record_request("/");
    let view = index_view(&state.loader, &q).await;
    Html(index_page(&view))
}

/// GET /viewer - one task; `task` is required
async fn viewer_handler(
    State(state): State<AppState>,
    Query(q): Query<ViewerQuery>,
) -> (StatusCode, Html<String>) {
    state.record_request("/viewer");
    let view = viewer_view(&state.loader, &q).await;
    let status = if view.left.task_id.is_none() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };
    (status, Html(viewer_page(&view)))
}

/// GET /compare - joined table and the two-panel view
async fn compare_handler(
    State(state): State<AppState>,
    Query(q): Query<CompareQuery>,
) -> Html<String> {
    state.record_request("/compare");
    let view = compare_view(&state.loader, &q).await;
    Html(compare_page(&view))
}

/// GET /api/join - raw join of two runs, no domain restriction
async fn join_handler(
    State(state): State<AppState>,
    Query(q): Query<CompareQuery>,
) -> Result<Json<JoinResponse>, HttpServerError> {
    state.record_request("/api/join");

    let (Some(left), Some(right)) = (q.left, q.right) else {
        state.record_error();
        return Err(HttpServerError::InvalidRequest(
            "both left and right are required".into(),
        ));
    };
    let (a, b) = tokio::join!(
        state.loader.index(Some(&left)),
        state.loader.index(Some(&right))
    );
    let (a, b) = match (a, b) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(e), _) | (_, Err(e)) => {
            state.record_error();
            return Err(e.into());
        }
    };

    let rows = build_join(&a.tasks, &b.tasks);
    let summary = JoinSummary::from_rows(&rows);
    let rows = rows
        .into_iter()
        .filter(|r| !q.diff_only || r.is_diff)
        .collect();
    Ok(Json(JoinResponse {
        left,
        right,
        summary,
        rows,
    }))
}

/// GET /health - liveness plus request counters
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let stats = state.stats.read().unwrap_or_else(PoisonError::into_inner);

    Json(HealthResponse {
        status: "healthy".into(),
        session_id: state.session_id.clone(),
        data_source: state.loader.source_name().to_string(),
        uptime_seconds: stats.uptime_seconds(),
        requests_handled: stats.requests_total,
        errors: stats.errors_total,
        requests_by_route: stats.requests_by_route.clone(),
        timestamp: Local::now().to_rfc3339(),
    })
}
