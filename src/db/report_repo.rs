/// Report repository - database operations for waste reports.
///
/// All listing queries order newest-submitted first; the `seq` column breaks
/// submitted_at ties in insertion order.
use crate::models::{Report, ReportStatus, UrgencyLevel, WasteType};
use sqlx::PgPool;
use uuid::Uuid;

const REPORT_COLUMNS: &str = "id, location, waste_type, urgency, description, image_url, \
     latitude, longitude, status, submitted_at, resolved_at, reporter_id, resolved_by, \
     points_awarded";

/// Insert or update a report by id, returning the persisted row.
pub async fn save(pool: &PgPool, report: &Report) -> Result<Report, sqlx::Error> {
    sqlx::query_as::<_, Report>(
        r#"
        INSERT INTO reports (id, location, waste_type, urgency, description, image_url,
                             latitude, longitude, status, submitted_at, resolved_at,
                             reporter_id, resolved_by, points_awarded)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        ON CONFLICT (id) DO UPDATE SET
            location = EXCLUDED.location,
            waste_type = EXCLUDED.waste_type,
            urgency = EXCLUDED.urgency,
            description = EXCLUDED.description,
            image_url = EXCLUDED.image_url,
            latitude = EXCLUDED.latitude,
            longitude = EXCLUDED.longitude,
            status = EXCLUDED.status,
            resolved_at = EXCLUDED.resolved_at,
            resolved_by = EXCLUDED.resolved_by,
            points_awarded = EXCLUDED.points_awarded
        RETURNING id, location, waste_type, urgency, description, image_url,
                  latitude, longitude, status, submitted_at, resolved_at,
                  reporter_id, resolved_by, points_awarded
        "#,
    )
    .bind(report.id)
    .bind(&report.location)
    .bind(report.waste_type)
    .bind(report.urgency)
    .bind(&report.description)
    .bind(&report.image_url)
    .bind(report.latitude)
    .bind(report.longitude)
    .bind(report.status)
    .bind(report.submitted_at)
    .bind(report.resolved_at)
    .bind(report.reporter_id)
    .bind(report.resolved_by)
    .bind(report.points_awarded)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Report>, sqlx::Error> {
    sqlx::query_as::<_, Report>(&format!(
        "SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_all(
    pool: &PgPool,
    page: i64,
    per_page: i64,
) -> Result<Vec<Report>, sqlx::Error> {
    sqlx::query_as::<_, Report>(&format!(
        "SELECT {REPORT_COLUMNS} FROM reports \
         ORDER BY submitted_at DESC, seq ASC LIMIT $1 OFFSET $2"
    ))
    .bind(per_page)
    .bind(page * per_page)
    .fetch_all(pool)
    .await
}

pub async fn list_by_status(
    pool: &PgPool,
    status: ReportStatus,
) -> Result<Vec<Report>, sqlx::Error> {
    sqlx::query_as::<_, Report>(&format!(
        "SELECT {REPORT_COLUMNS} FROM reports WHERE status = $1 \
         ORDER BY submitted_at DESC, seq ASC"
    ))
    .bind(status)
    .fetch_all(pool)
    .await
}

pub async fn list_by_reporter(
    pool: &PgPool,
    reporter_id: Uuid,
) -> Result<Vec<Report>, sqlx::Error> {
    sqlx::query_as::<_, Report>(&format!(
        "SELECT {REPORT_COLUMNS} FROM reports WHERE reporter_id = $1 \
         ORDER BY submitted_at DESC, seq ASC"
    ))
    .bind(reporter_id)
    .fetch_all(pool)
    .await
}

pub async fn list_by_urgency(
    pool: &PgPool,
    urgency: UrgencyLevel,
) -> Result<Vec<Report>, sqlx::Error> {
    sqlx::query_as::<_, Report>(&format!(
        "SELECT {REPORT_COLUMNS} FROM reports WHERE urgency = $1 \
         ORDER BY submitted_at DESC, seq ASC"
    ))
    .bind(urgency)
    .fetch_all(pool)
    .await
}

pub async fn list_by_waste_type(
    pool: &PgPool,
    waste_type: WasteType,
) -> Result<Vec<Report>, sqlx::Error> {
    sqlx::query_as::<_, Report>(&format!(
        "SELECT {REPORT_COLUMNS} FROM reports WHERE waste_type = $1 \
         ORDER BY submitted_at DESC, seq ASC"
    ))
    .bind(waste_type)
    .fetch_all(pool)
    .await
}

pub async fn list_by_status_and_urgency(
    pool: &PgPool,
    status: ReportStatus,
    urgency: UrgencyLevel,
) -> Result<Vec<Report>, sqlx::Error> {
    sqlx::query_as::<_, Report>(&format!(
        "SELECT {REPORT_COLUMNS} FROM reports WHERE status = $1 AND urgency = $2 \
         ORDER BY submitted_at DESC, seq ASC"
    ))
    .bind(status)
    .bind(urgency)
    .fetch_all(pool)
    .await
}

pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Report>, sqlx::Error> {
    sqlx::query_as::<_, Report>(&format!(
        "SELECT {REPORT_COLUMNS} FROM reports \
         ORDER BY submitted_at DESC, seq ASC LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn count_by_status(pool: &PgPool, status: ReportStatus) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM reports WHERE status = $1")
        .bind(status)
        .fetch_one(pool)
        .await
}

pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM reports")
        .fetch_one(pool)
        .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM reports WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
