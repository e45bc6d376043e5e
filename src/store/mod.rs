//! Persistence seams for the lifecycle engine and points ledger.
//!
//! The services are constructed against these traits so tests can substitute
//! the in-memory implementations for Postgres.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Report, ReportStatus, UrgencyLevel, User, WasteType};

pub use memory::{InMemoryReportStore, InMemoryUserStore};
pub use postgres::{PgReportStore, PgUserStore};

/// Durable collection of reports. Single-record atomicity only; multi-step
/// consistency is the lifecycle engine's job. Every listing returns
/// newest-submitted first, ties in insertion order.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Insert or update by id, returning the persisted form.
    async fn save(&self, report: Report) -> Result<Report>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>>;
    async fn list_all(&self, page: i64, per_page: i64) -> Result<Vec<Report>>;
    async fn list_by_status(&self, status: ReportStatus) -> Result<Vec<Report>>;
    async fn list_by_reporter(&self, reporter_id: Uuid) -> Result<Vec<Report>>;
    async fn list_by_urgency(&self, urgency: UrgencyLevel) -> Result<Vec<Report>>;
    async fn list_by_waste_type(&self, waste_type: WasteType) -> Result<Vec<Report>>;
    async fn list_by_status_and_urgency(
        &self,
        status: ReportStatus,
        urgency: UrgencyLevel,
    ) -> Result<Vec<Report>>;
    async fn list_recent(&self, limit: i64) -> Result<Vec<Report>>;
    async fn count_by_status(&self, status: ReportStatus) -> Result<i64>;
    async fn count_all(&self) -> Result<i64>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// User lookups plus the two balance mutations the points ledger needs.
/// Both mutations are atomic per user in every implementation.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    /// Add points to a balance; None when the user does not exist.
    async fn add_points(&self, user_id: Uuid, points: i32) -> Result<Option<User>>;
    /// Deduct `cost` only if the balance covers it; true when deducted.
    async fn try_deduct_points(&self, user_id: Uuid, cost: i32) -> Result<bool>;
    async fn count_all(&self) -> Result<i64>;
}
