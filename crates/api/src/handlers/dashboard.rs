//! Handler for the dashboard summary.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use shepherd_core::dashboard::LeadStats;
use shepherd_core::types::RECENT_LEADS_LIMIT;
use shepherd_db::models::lead::Lead;
use shepherd_db::repositories::{ClientRepo, LeadRepo, TaskRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_leads: i64,
    #[serde(flatten)]
    pub lead_stats: LeadStats,
    pub total_clients: i64,
    pub total_tasks: i64,
    pub recent_leads: Vec<Lead>,
}

/// GET /api/v1/dashboard
pub async fn summary(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let leads = LeadRepo::list(&state.pool, None).await?;
    let lead_stats = LeadStats::tally(&leads);
    let recent_leads = leads
        .iter()
        .take(RECENT_LEADS_LIMIT as usize)
        .cloned()
        .collect();

    let total_clients = ClientRepo::count(&state.pool).await?;
    let total_tasks = TaskRepo::count(&state.pool).await?;

    Ok(Json(DataResponse {
        data: DashboardSummary {
            total_leads: leads.len() as i64,
            lead_stats,
            total_clients,
            total_tasks,
            recent_leads,
        },
    }))
}
