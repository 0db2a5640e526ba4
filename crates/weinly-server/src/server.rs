use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use weinly_core::openai::OpenAiClient;
use weinly_core::requests::{RequestArchive, RequestId, StoredRequest};
use weinly_core::spec::{FabricSpecification, normalize};
use weinly_core::suppliers::{SupplierRecord, match_suppliers};

use crate::error::AppError;
use crate::extract::{EXTRACTION_TEMPERATURE, extraction_prompt, parse_model_output};
use crate::rate_limit::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub openai: Arc<OpenAiClient>,
    pub catalog: Arc<Vec<SupplierRecord>>,
    pub archive: Arc<RequestArchive>,
    pub limiter: Option<RateLimiter>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze))
        .route("/api/suppliers", get(list_suppliers))
        .route("/api/requests", get(recent_requests))
        .route("/api/requests/{id}", get(get_request))
        .route("/healthz", get(healthz))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Optional so a missing field reaches the handler and gets the same
    /// 400 as an empty one, instead of a 422 from the extractor.
    #[serde(default)]
    pub input: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub request_id: RequestId,
    pub spec: FabricSpecification,
    pub suppliers: Vec<SupplierRecord>,
}

/// The intake pipeline: gate, model call, lenient parse, normalize, match,
/// archive. Archiving is spawned fire-and-forget; only the model call can
/// fail the request.
async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let input = body.input.unwrap_or_default().trim().to_string();
    if input.is_empty() {
        return Err(AppError::InvalidRequest("no input provided".to_string()));
    }
    if let Some(limiter) = &state.limiter {
        limiter.check().await?;
    }

    let reply = state
        .openai
        .complete_text(extraction_prompt(&input), Some(EXTRACTION_TEMPERATURE))
        .await?;

    let raw = parse_model_output(&reply);
    if raw.is_null() {
        warn!("model reply carried no JSON object, proceeding with empty record");
    }
    let spec = normalize(&raw);
    let suppliers: Vec<SupplierRecord> = match_suppliers(&spec.fabric_type, &state.catalog)
        .into_iter()
        .cloned()
        .collect();

    let stored = StoredRequest::new(input, raw, spec.clone());
    let request_id = stored.id.clone();
    let archive = Arc::clone(&state.archive);
    tokio::spawn(async move {
        if !archive.store(&stored).await {
            warn!(request_id = %stored.id, "failed to archive request");
        }
    });

    info!(
        request_id = %request_id,
        fabric_type = %spec.fabric_type,
        matches = suppliers.len(),
        "analyzed fabric request"
    );

    Ok(Json(AnalyzeResponse {
        request_id,
        spec,
        suppliers,
    }))
}

async fn list_suppliers(State(state): State<AppState>) -> Json<Vec<SupplierRecord>> {
    Json(state.catalog.as_ref().clone())
}

#[derive(Debug, Serialize)]
pub struct RecentRequestsResponse {
    pub ids: Vec<RequestId>,
}

async fn recent_requests(State(state): State<AppState>) -> Json<RecentRequestsResponse> {
    let ids = state.archive.recent_ids(50).await;
    Json(RecentRequestsResponse { ids })
}

async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StoredRequest>, AppError> {
    state
        .archive
        .get(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("request {id}")))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub redis_available: bool,
}

async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        redis_available: state.archive.is_available().await,
    })
}
