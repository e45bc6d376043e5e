use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::AppState;

use super::user_id_from_headers;

#[derive(Debug, Deserialize)]
pub struct RedeemRequest {
    pub cost: i32,
    pub item: String,
}

/// GET /api/rewards/balance
pub async fn balance(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let user_id = user_id_from_headers(&req).ok_or_else(|| {
        AppError::BadRequest(format!("{} header is required", super::USER_ID_HEADER))
    })?;

    let balance = state.points.balance_of(user_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "points": balance })))
}

/// POST /api/rewards/redeem
pub async fn redeem(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<RedeemRequest>,
) -> Result<HttpResponse> {
    let user_id = user_id_from_headers(&req).ok_or_else(|| {
        AppError::BadRequest(format!("{} header is required", super::USER_ID_HEADER))
    })?;

    state
        .points
        .redeem_points(user_id, body.cost, &body.item)
        .await?;

    let balance = state.points.balance_of(user_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "points": balance })))
}
