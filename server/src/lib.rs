use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::{header, HeaderMap, StatusCode}, response::{IntoResponse, Response}, routing::{get, post}, Json, Router};
use feedsearch_core::{load_index, DocEntry, DocId, IndexMetadata, ScoredResult, ScoringConfig, SearchEngine};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

const MAX_K: i64 = 100;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_k")]
    pub k: i64,
}
fn default_k() -> i64 { 10 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<ScoredResult>,
}

#[derive(Clone)]
pub struct AppState {
    pub index_path: PathBuf,
    /// Swapped wholesale on reload; handlers clone the inner Arc and drop the lock.
    pub engine: Arc<RwLock<Arc<SearchEngine>>>,
    pub scoring: ScoringConfig,
    pub admin_token: Option<String>,
}

impl AppState {
    pub fn engine(&self) -> Arc<SearchEngine> {
        self.engine.read().clone()
    }
}

pub fn build_app(index_path: PathBuf, scoring: ScoringConfig) -> Result<Router> {
    let index = load_index(&index_path)?;
    tracing::info!(
        path = %index_path.display(),
        num_docs = index.metadata.document_count,
        num_terms = index.metadata.term_count,
        generated_at = %index.metadata.generated_at,
        "loaded search index"
    );
    let engine = Arc::new(RwLock::new(Arc::new(SearchEngine::with_config(index, scoring))));
    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    let app_state = AppState { index_path, engine, scoring, admin_token };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/search.json", get(index_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .route("/admin/reload", post(reload_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);
    Ok(app)
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let engine = state.engine();
    let k = params.k.clamp(0, MAX_K) as usize;

    let ranked = engine.ranked(&params.q);
    let total_hits = ranked.len();
    let results: Vec<ScoredResult> = ranked
        .into_iter()
        .take(k)
        .filter_map(|(doc_id, score)| engine.to_result(doc_id, score))
        .collect();

    let elapsed = start.elapsed();
    tracing::debug!(query = %params.q, total_hits, took_us = elapsed.as_micros() as u64, "search");
    Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), total_hits, results })
}

/// The loaded index, serialized in its artifact form.
pub async fn index_handler(State(state): State<AppState>) -> Response {
    let engine = state.engine();
    match serde_json::to_vec(engine.index()) {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize index");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!({ "error": "Failed to serialize search index" }))).into_response()
        }
    }
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<DocId>) -> Result<Json<DocEntry>, (StatusCode, Json<serde_json::Value>)> {
    state
        .engine()
        .document(doc_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": "not found" }))))
}

/// Re-read the artifact from disk and swap it in. In-flight queries finish on
/// the engine they started with.
async fn reload_handler(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<IndexMetadata>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let path = state.index_path.clone();
    let index = tokio::task::spawn_blocking(move || load_index(&path))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(|e| {
            tracing::warn!(error = %e, "reload failed, keeping current index");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;
    let metadata = index.metadata.clone();
    *state.engine.write() = Arc::new(SearchEngine::with_config(index, state.scoring));
    tracing::info!(num_docs = metadata.document_count, generated_at = %metadata.generated_at, "reloaded search index");
    Ok(Json(metadata))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
