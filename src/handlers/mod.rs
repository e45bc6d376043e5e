pub mod dashboard;
pub mod health;
pub mod reports;
pub mod rewards;

pub use health::health_check;

use actix_web::HttpRequest;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Report, ReportResponse};
use crate::store::UserStore;

/// Caller identity for audit attribution. Authentication itself happens
/// upstream; this service trusts the forwarded header.
pub(crate) const USER_ID_HEADER: &str = "X-User-Id";

pub(crate) fn user_id_from_headers(req: &HttpRequest) -> Option<Uuid> {
    req.headers()
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok())
}

/// Resolve the weak user references on a report to display names.
pub(crate) async fn to_response(users: &dyn UserStore, report: &Report) -> Result<ReportResponse> {
    let reporter_username = match report.reporter_id {
        Some(id) => users.find_by_id(id).await?.map(|u| u.username),
        None => None,
    };
    let resolved_by_username = match report.resolved_by {
        Some(id) => users.find_by_id(id).await?.map(|u| u.username),
        None => None,
    };

    Ok(ReportResponse::new(
        report,
        reporter_username,
        resolved_by_username,
    ))
}

pub(crate) async fn to_responses(
    users: &dyn UserStore,
    reports: &[Report],
) -> Result<Vec<ReportResponse>> {
    let mut responses = Vec::with_capacity(reports.len());
    for report in reports {
        responses.push(to_response(users, report).await?);
    }
    Ok(responses)
}
