use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{report_repo, user_repo};
use crate::error::Result;
use crate::models::{Report, ReportStatus, UrgencyLevel, User, WasteType};

use super::{ReportStore, UserStore};

#[derive(Clone)]
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn save(&self, report: Report) -> Result<Report> {
        Ok(report_repo::save(&self.pool, &report).await?)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>> {
        Ok(report_repo::find_by_id(&self.pool, id).await?)
    }

    async fn list_all(&self, page: i64, per_page: i64) -> Result<Vec<Report>> {
        Ok(report_repo::list_all(&self.pool, page, per_page).await?)
    }

    async fn list_by_status(&self, status: ReportStatus) -> Result<Vec<Report>> {
        Ok(report_repo::list_by_status(&self.pool, status).await?)
    }

    async fn list_by_reporter(&self, reporter_id: Uuid) -> Result<Vec<Report>> {
        Ok(report_repo::list_by_reporter(&self.pool, reporter_id).await?)
    }

    async fn list_by_urgency(&self, urgency: UrgencyLevel) -> Result<Vec<Report>> {
        Ok(report_repo::list_by_urgency(&self.pool, urgency).await?)
    }

    async fn list_by_waste_type(&self, waste_type: WasteType) -> Result<Vec<Report>> {
        Ok(report_repo::list_by_waste_type(&self.pool, waste_type).await?)
    }

    async fn list_by_status_and_urgency(
        &self,
        status: ReportStatus,
        urgency: UrgencyLevel,
    ) -> Result<Vec<Report>> {
        Ok(report_repo::list_by_status_and_urgency(&self.pool, status, urgency).await?)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Report>> {
        Ok(report_repo::list_recent(&self.pool, limit).await?)
    }

    async fn count_by_status(&self, status: ReportStatus) -> Result<i64> {
        Ok(report_repo::count_by_status(&self.pool, status).await?)
    }

    async fn count_all(&self) -> Result<i64> {
        Ok(report_repo::count_all(&self.pool).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        Ok(report_repo::delete(&self.pool, id).await?)
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(user_repo::find_by_id(&self.pool, id).await?)
    }

    async fn add_points(&self, user_id: Uuid, points: i32) -> Result<Option<User>> {
        Ok(user_repo::add_points(&self.pool, user_id, points).await?)
    }

    async fn try_deduct_points(&self, user_id: Uuid, cost: i32) -> Result<bool> {
        Ok(user_repo::try_deduct_points(&self.pool, user_id, cost).await?)
    }

    async fn count_all(&self) -> Result<i64> {
        Ok(user_repo::count_all(&self.pool).await?)
    }
}
