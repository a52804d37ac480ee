//! Handlers for the `/leads` resource: filtered listing, detail, CSV import
//! and the import template download.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::json;
use shepherd_core::error::CoreError;
use shepherd_core::lead_filter::{filter_leads, LeadFilter};
use shepherd_core::lead_import::{
    import_leads_from_bytes, ImportSummary, TEMPLATE_CSV, TEMPLATE_FILENAME,
};
use shepherd_core::types::DbId;
use shepherd_db::lead_sink::PgLeadSink;
use shepherd_db::models::lead::Lead;
use shepherd_db::repositories::LeadRepo;
use shepherd_events::{event_types, CrmEvent};

use crate::error::{AppError, AppResult};
use crate::import_guard::ImportPermit;
use crate::middleware::auth::AuthUser;
use crate::query::LeadListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Payload of `GET /leads`.
#[derive(Debug, Serialize)]
pub struct LeadListView {
    /// Localized heading for the active filter.
    pub title: &'static str,
    /// Leads in the store before filtering.
    pub total: usize,
    /// Leads left after query and filter.
    pub visible: usize,
    pub leads: Vec<Lead>,
}

/// GET /api/v1/leads?q=&filter=
///
/// Newest first. An absent filter means `all`.
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<LeadListParams>,
) -> AppResult<Json<DataResponse<LeadListView>>> {
    let filter = match params.filter.as_deref() {
        None | Some("") => LeadFilter::All,
        Some(tag) => LeadFilter::from_str(tag).ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Unknown filter '{tag}'. Expected one of: {}",
                LeadFilter::ALL.join(", ")
            )))
        })?,
    };

    let snapshot = LeadRepo::list(&state.pool, None).await?;
    let leads: Vec<Lead> = filter_leads(&snapshot, &params.q, filter)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(DataResponse {
        data: LeadListView {
            title: state.config.locale.filter_title(filter),
            total: snapshot.len(),
            visible: leads.len(),
            leads,
        },
    }))
}

/// GET /api/v1/leads/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Lead>>> {
    let lead = LeadRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Lead", id }))?;
    Ok(Json(DataResponse { data: lead }))
}

/// POST /api/v1/leads/import
///
/// The request body is the raw CSV file. Always answers 200 with the batch
/// summary once the import ran; `outcome` tells completed, empty and
/// unreadable files apart. 409 if another import is still running.
///
/// The import runs on its own task holding the busy permit, so a client that
/// disconnects mid-upload does not cut the batch short or release the guard
/// early.
pub async fn import(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Bytes,
) -> AppResult<Json<DataResponse<ImportSummary>>> {
    let permit = state.import_guard.try_acquire().ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "A lead import is already in progress".into(),
        ))
    })?;

    tracing::info!(user_id = auth.user_id, bytes = body.len(), "Lead import started");

    let summary = tokio::spawn(run_import(state, auth.user_id, body, permit))
        .await
        .map_err(|e| AppError::InternalError(format!("Lead import task failed: {e}")))?;

    Ok(Json(DataResponse { data: summary }))
}

async fn run_import(
    state: AppState,
    user_id: DbId,
    body: Bytes,
    _permit: ImportPermit,
) -> ImportSummary {
    let sink = PgLeadSink::new(state.pool.clone());
    let summary = import_leads_from_bytes(&body, &sink, state.config.locale).await;

    state.event_bus.publish(
        CrmEvent::new(event_types::LEADS_IMPORTED)
            .with_actor(user_id)
            .with_payload(json!({
                "success": summary.success,
                "errors": summary.errors,
                "outcome": summary.outcome,
            })),
    );

    summary
}

/// GET /api/v1/leads/import/template
pub async fn template(_auth: AuthUser) -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{TEMPLATE_FILENAME}\""),
            ),
        ],
        TEMPLATE_CSV,
    )
}
