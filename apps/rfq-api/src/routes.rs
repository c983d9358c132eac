//! HTTP routes.
//!
//! ## Endpoints
//! ```text
//! ┌──────────────────────────────┬──────────────────────────────────────────┐
//! │ GET  /health                 │ store probe, 200 or 503                  │
//! │ POST /rfq                    │ create  → { message, id }                │
//! │ GET  /rfq/list               │ ids, newest first                        │
//! │ GET  /rfq/{id}               │ aggregate JSON                           │
//! │ PUT  /rfq/{id}               │ replace → { message }                    │
//! │ GET  /rfq/{id}/pdf           │ application/pdf, RFQ-{id}.pdf            │
//! └──────────────────────────────┴──────────────────────────────────────────┘
//! ```
//!
//! Every `/rfq` route requires a [`Principal`]. Handlers validate before
//! touching the store, and every store call or render runs under the
//! request deadline.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rfq_core::validation::{check_id_match, prepare_rfq};
use rfq_core::{CoreError, Rfq};
use rfq_pdf::RenderOptions;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::notify::{self, RfqEvent};
use crate::principal::Principal;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/rfq", post(create_rfq))
        .route("/rfq/list", get(list_rfqs))
        .route("/rfq/{id}", get(get_rfq).put(update_rfq))
        .route("/rfq/{id}/pdf", get(render_pdf))
        .with_state(state)
}

// =============================================================================
// Handlers
// =============================================================================

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    if state.db.health_check().await {
        (StatusCode::OK, Json(json!({ "status": "ok" })))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "status": "unavailable" })))
    }
}

async fn get_rfq(
    State(state): State<AppState>,
    principal: Principal,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Rfq>, ApiError> {
    let Path(id) = path?;
    let rfq = fetch(&state, id).await?;

    debug!(rfq_id = id, principal = principal.name(), items = rfq.items.len(), "RFQ fetched");
    Ok(Json(rfq))
}

async fn list_rfqs(
    State(state): State<AppState>,
    _principal: Principal,
) -> Result<Json<Vec<i64>>, ApiError> {
    let ids = state
        .with_deadline("list", async {
            state.db.rfqs().list_ids().await.map_err(ApiError::from)
        })
        .await?;

    Ok(Json(ids))
}

async fn create_rfq(
    State(state): State<AppState>,
    principal: Principal,
    payload: Result<Json<Rfq>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let Json(payload) = payload?;
    let rfq = prepare_rfq(payload)?;

    let id = state
        .with_deadline("create", async {
            state.db.rfqs().create(&rfq).await.map_err(ApiError::from)
        })
        .await?;

    notify::dispatch(
        state.notifier.clone(),
        RfqEvent::Created {
            rfq_id: id,
            principal: principal.0,
        },
    );

    Ok(Json(CreatedResponse {
        message: "RFQ created",
        id,
    }))
}

async fn update_rfq(
    State(state): State<AppState>,
    principal: Principal,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Rfq>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = path?;
    let Json(payload) = payload?;

    check_id_match(id, payload.id)?;
    let rfq = prepare_rfq(payload)?;

    state
        .with_deadline("update", async {
            state.db.rfqs().update(id, &rfq).await.map_err(ApiError::from)
        })
        .await?;

    notify::dispatch(
        state.notifier.clone(),
        RfqEvent::Updated {
            rfq_id: id,
            principal: principal.0,
        },
    );

    Ok(Json(MessageResponse {
        message: "RFQ updated successfully!",
    }))
}

async fn render_pdf(
    State(state): State<AppState>,
    principal: Principal,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = path?;
    let rfq = fetch(&state, id).await?;
    let file_name = rfq.document_file_name();

    let options = RenderOptions::default();
    let cancel = options.cancel.clone();

    let bytes = state
        .with_deadline("render", async move {
            // Dropped at the deadline, which stops the blocking render.
            let _stop_on_drop = cancel.drop_guard();
            match tokio::task::spawn_blocking(move || rfq_pdf::render_with(&rfq, &options)).await {
                Ok(rendered) => rendered.map_err(ApiError::from),
                Err(e) => Err(ApiError::Internal(format!("render task failed: {e}"))),
            }
        })
        .await?;

    info!(rfq_id = id, bytes = bytes.len(), principal = principal.name(), "Quotation served");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Loads the aggregate or fails with 404. Nothing downstream ever sees a
/// missing RFQ.
async fn fetch(state: &AppState, id: i64) -> Result<Rfq, ApiError> {
    state
        .with_deadline("fetch", async {
            match state.db.rfqs().fetch_by_id(id).await {
                Ok(Some(rfq)) => Ok(rfq),
                Ok(None) => Err(ApiError::from(CoreError::RfqNotFound(id))),
                Err(e) => Err(ApiError::from(e)),
            }
        })
        .await
}

// =============================================================================
// Unit Tests
// =============================================================================
