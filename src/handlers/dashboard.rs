use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::Result;
use crate::models::ReportResponse;
use crate::AppState;

use super::to_responses;

const RECENT_REPORTS_LIMIT: i64 = 5;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_reports: i64,
    pub resolved_reports: i64,
    pub pending_reports: i64,
    pub total_users: i64,
    /// Rounded percentage of resolved reports; 0 when there are none.
    pub resolution_rate: i64,
    pub recent_reports: Vec<ReportResponse>,
}

/// GET /api/dashboard/stats
pub async fn stats(state: web::Data<AppState>) -> Result<HttpResponse> {
    let total_reports = state.reports.total_reports_count().await?;
    let resolved_reports = state.reports.resolved_reports_count().await?;
    let pending_reports = state.reports.pending_reports_count().await?;
    let total_users = state.users.count_all().await?;
    let resolution_rate = state.reports.resolution_rate().await?;
    let recent = state.reports.recent_reports(RECENT_REPORTS_LIMIT).await?;

    Ok(HttpResponse::Ok().json(DashboardStats {
        total_reports,
        resolved_reports,
        pending_reports,
        total_users,
        resolution_rate,
        recent_reports: to_responses(state.users.as_ref(), &recent).await?,
    }))
}
