//! Report endpoints. Thin layer over the lifecycle service: multipart
//! decoding, id parsing, response hydration.

use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use futures_util::StreamExt;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{CreateReportRequest, ReportStatus, UpdateReportStatusRequest};
use crate::services::UploadedImage;
use crate::AppState;

use super::{to_response, to_responses, user_id_from_headers};

// 10MB guardrail for report photos
const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

fn default_per_page() -> i64 {
    10
}

/// POST /api/reports (multipart: location, waste_type, urgency,
/// description?, latitude?, longitude?, image?)
pub async fn create_report(
    req: HttpRequest,
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> Result<HttpResponse> {
    let reporter_id = user_id_from_headers(&req);

    let mut location = None;
    let mut waste_type = None;
    let mut urgency = None;
    let mut description = None;
    let mut latitude = None;
    let mut longitude = None;
    let mut image: Option<UploadedImage> = None;

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::BadRequest(format!("invalid multipart payload: {e}")))?;

        let (name, file_name, content_type) = {
            let cd = field.content_disposition();
            (
                cd.get_name().unwrap_or_default().to_string(),
                cd.get_filename().map(str::to_string),
                field.content_type().map(|m| m.to_string()),
            )
        };

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk =
                chunk.map_err(|e| AppError::BadRequest(format!("failed to read field: {e}")))?;
            data.extend_from_slice(&chunk);
            if data.len() > MAX_IMAGE_BYTES {
                return Err(AppError::BadRequest(
                    "image exceeds the 10MB upload limit".to_string(),
                ));
            }
        }

        match name.as_str() {
            "image" => {
                image = Some(UploadedImage {
                    bytes: data,
                    content_type: content_type
                        .unwrap_or_else(|| "application/octet-stream".to_string()),
                    file_name: file_name.unwrap_or_default(),
                });
            }
            "location" => location = Some(text_field(data, "location")?),
            "waste_type" => {
                waste_type = Some(
                    text_field(data, "waste_type")?
                        .parse()
                        .map_err(AppError::BadRequest)?,
                )
            }
            "urgency" => {
                urgency = Some(
                    text_field(data, "urgency")?
                        .parse()
                        .map_err(AppError::BadRequest)?,
                )
            }
            "description" => {
                let value = text_field(data, "description")?;
                if !value.is_empty() {
                    description = Some(value);
                }
            }
            "latitude" => latitude = Some(float_field(data, "latitude")?),
            "longitude" => longitude = Some(float_field(data, "longitude")?),
            _ => {}
        }
    }

    let request = CreateReportRequest {
        location: location
            .ok_or_else(|| AppError::Validation("location is required".to_string()))?,
        waste_type: waste_type
            .ok_or_else(|| AppError::Validation("waste_type is required".to_string()))?,
        urgency: urgency
            .ok_or_else(|| AppError::Validation("urgency is required".to_string()))?,
        description,
        latitude,
        longitude,
    };

    let report = state
        .reports
        .create_report(request, reporter_id, image)
        .await?;

    Ok(HttpResponse::Created().json(to_response(state.users.as_ref(), &report).await?))
}

/// GET /api/reports?page=&per_page=
pub async fn list_reports(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let page = query.page.max(0);
    let per_page = query.per_page.clamp(1, 100);

    let reports = state.reports.all_reports(page, per_page).await?;
    Ok(HttpResponse::Ok().json(to_responses(state.users.as_ref(), &reports).await?))
}

/// GET /api/reports/{id}
pub async fn get_report(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_report_id(&path)?;
    let report = state
        .reports
        .report_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("report not found: {id}")))?;

    Ok(HttpResponse::Ok().json(to_response(state.users.as_ref(), &report).await?))
}

/// GET /api/reports/status/{status}
pub async fn reports_by_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let status: ReportStatus = path.parse().map_err(AppError::BadRequest)?;
    let reports = state.reports.reports_by_status(status).await?;
    Ok(HttpResponse::Ok().json(to_responses(state.users.as_ref(), &reports).await?))
}

/// GET /api/reports/my-reports
pub async fn my_reports(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let reporter_id = user_id_from_headers(&req).ok_or_else(|| {
        AppError::BadRequest(format!("{} header is required", super::USER_ID_HEADER))
    })?;

    let reports = state.reports.reports_by_reporter(reporter_id).await?;
    Ok(HttpResponse::Ok().json(to_responses(state.users.as_ref(), &reports).await?))
}

/// PUT /api/reports/{id}/status
///
/// The acting user is recorded for audit attribution only; restricting this
/// endpoint to privileged callers is the gateway's responsibility.
pub async fn update_report_status(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateReportStatusRequest>,
) -> Result<HttpResponse> {
    let id = parse_report_id(&path)?;
    let acting_user = user_id_from_headers(&req);

    let report = state
        .reports
        .update_report_status(id, body.status, acting_user)
        .await?;

    Ok(HttpResponse::Ok().json(to_response(state.users.as_ref(), &report).await?))
}

/// DELETE /api/reports/{id}
pub async fn delete_report(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_report_id(&path)?;
    state.reports.delete_report(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

fn parse_report_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("invalid report id: {raw}")))
}

fn text_field(data: Vec<u8>, name: &str) -> Result<String> {
    String::from_utf8(data)
        .map(|s| s.trim().to_string())
        .map_err(|_| AppError::BadRequest(format!("field {name} is not valid UTF-8")))
}

fn float_field(data: Vec<u8>, name: &str) -> Result<f64> {
    text_field(data, name)?
        .parse()
        .map_err(|_| AppError::BadRequest(format!("field {name} is not a valid number")))
}
