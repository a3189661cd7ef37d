use crate::components::data_table::SortDir;
use crate::errors::AppError;
use crate::models::{Alert, Platform};
use crate::router::{Router, View, resolve_hash};
use crate::store::{StatePatch, Store};
use crate::ui::render_shell;
use crate::views::{self, content_log};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared handler context: the store plus the view router. The router holds
/// the active-view marker, so it sits behind its own lock.
#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<Store>,
    router: Arc<Mutex<Router>>,
}

impl ServerState {
    pub fn new(store: Arc<Store>) -> Self {
        let mut router = Router::new();
        views::register_all(&mut router);
        Self {
            store,
            router: Arc::new(Mutex::new(router)),
        }
    }

    fn router(&self) -> MutexGuard<'_, Router> {
        self.router
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FragmentParams {
    pub hash: Option<String>,
    pub week: Option<String>,
    pub platform: Option<String>,
    pub filter: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}

impl FragmentParams {
    fn has_controls(&self) -> bool {
        self.week.is_some()
            || self.platform.is_some()
            || self.filter.is_some()
            || self.sort.is_some()
    }
}

#[derive(Debug, Serialize)]
pub struct StateSummary {
    pub loading: bool,
    pub error: Option<String>,
    pub days_loaded: usize,
    pub has_today: bool,
    pub has_rolling: bool,
    pub content_items: usize,
    pub alerts: usize,
    pub available_weeks: Vec<String>,
    pub selected_week: Option<String>,
    pub selected_platform: &'static str,
}

pub async fn index(State(server): State<ServerState>) -> Html<String> {
    let state = server.store.state();
    let content = server
        .router()
        .rerender(View::Snapshot, &state)
        .unwrap_or_default();
    Html(render_shell(View::Snapshot, &content, &state))
}

/// Serve one view's markup for a fragment navigation or an in-view control
/// change. A bare hash that resolves to the already-active view is a no-op
/// and answers 204; control parameters always re-render.
pub async fn fragment(
    State(server): State<ServerState>,
    Query(params): Query<FragmentParams>,
) -> Result<Response, AppError> {
    if let Some(week) = &params.week {
        server.store.load_week(week).await;
    }
    if let Some(platform) = &params.platform {
        let platform = Platform::parse(platform)
            .ok_or_else(|| AppError::bad_request(format!("unknown platform '{platform}'")))?;
        server.store.set_state(StatePatch::select_platform(platform));
    }

    let state = server.store.state();
    let hash = params.hash.as_deref().unwrap_or("");
    let view = resolve_hash(hash);

    let html = if view == View::ContentLog && (params.filter.is_some() || params.sort.is_some()) {
        let filter = params.filter.as_deref().unwrap_or("all");
        let sort = params.sort.as_deref().unwrap_or("published_at");
        let dir = params
            .dir
            .as_deref()
            .and_then(SortDir::parse)
            .unwrap_or(SortDir::Desc);
        Some(content_log::render_with(&state, filter, sort, dir, Utc::now()))
    } else if params.has_controls() {
        server.router().rerender(view, &state)
    } else {
        let navigation = server.router().navigate(hash, &state);
        if !navigation.changed {
            return Ok((StatusCode::NO_CONTENT, [("x-view", view.as_str())]).into_response());
        }
        navigation.html
    };

    Ok(([("x-view", view.as_str())], Html(html.unwrap_or_default())).into_response())
}

pub async fn api_state(State(server): State<ServerState>) -> Json<StateSummary> {
    Json(summarize(&server))
}

pub async fn api_alerts(State(server): State<ServerState>) -> Json<Vec<Alert>> {
    Json(server.store.state().alerts)
}

/// Drop caches and re-run the full load against the data directory.
pub async fn refresh(State(server): State<ServerState>) -> Json<StateSummary> {
    server.store.refresh().await;
    Json(summarize(&server))
}

fn summarize(server: &ServerState) -> StateSummary {
    let state = server.store.state();
    StateSummary {
        loading: state.loading,
        error: state.error,
        days_loaded: state.week_days.len(),
        has_today: state.today.is_some(),
        has_rolling: state.rolling.is_some(),
        content_items: state.content_log.len(),
        alerts: state.alerts.len(),
        available_weeks: state.available_weeks,
        selected_week: state.selected_week,
        selected_platform: state.selected_platform.key(),
    }
}
