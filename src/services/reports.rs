//! Report lifecycle engine.
//!
//! Owns every status transition, the resolution point award, and the media
//! cleanup on deletion. Collaborators are injected so tests can substitute
//! in-memory stores and a mock gateway.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::{CreateReportRequest, Report, ReportStatus, UrgencyLevel, WasteType};
use crate::services::points::PointsService;
use crate::services::storage::MediaStorage;
use crate::store::ReportStore;

/// Storage folder for report photos.
const REPORT_IMAGE_FOLDER: &str = "report-images";

/// Points awarded to the reporter when a report is resolved: a flat base
/// plus an urgency bonus.
pub fn resolution_points(urgency: UrgencyLevel) -> i32 {
    const BASE_POINTS: i32 = 10;

    BASE_POINTS
        + match urgency {
            UrgencyLevel::Low => 0,
            UrgencyLevel::Medium => 5,
            UrgencyLevel::High => 15,
            UrgencyLevel::Critical => 25,
        }
}

/// An image received with a creation request.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub file_name: String,
}

pub struct ReportService {
    reports: Arc<dyn ReportStore>,
    points: PointsService,
    media: Arc<dyn MediaStorage>,
    // serializes concurrent transitions on the same report id; different ids
    // never contend
    transition_locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl ReportService {
    pub fn new(
        reports: Arc<dyn ReportStore>,
        points: PointsService,
        media: Arc<dyn MediaStorage>,
    ) -> Self {
        Self {
            reports,
            points,
            media,
            transition_locks: DashMap::new(),
        }
    }

    fn transition_lock(&self, report_id: Uuid) -> Arc<Mutex<()>> {
        self.transition_locks
            .entry(report_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop the lock entry once no transition holds or awaits it, so the map
    /// stays bounded by the number of in-flight transitions. `remove_if` runs
    /// under the shard lock, so a concurrent `transition_lock` either clones
    /// the entry first (count > 1, kept) or re-inserts a fresh one after.
    fn reap_transition_lock(&self, report_id: Uuid) {
        self.transition_locks
            .remove_if(&report_id, |_, entry| Arc::strong_count(entry) == 1);
    }

    /// Create a new report in Pending. The image, if any, is uploaded before
    /// anything is persisted: an upload failure aborts the whole creation and
    /// leaves no report row behind.
    pub async fn create_report(
        &self,
        request: CreateReportRequest,
        reporter_id: Option<Uuid>,
        image: Option<UploadedImage>,
    ) -> Result<Report> {
        request.validate()?;

        let mut report = Report {
            id: Uuid::new_v4(),
            location: request.location,
            waste_type: request.waste_type,
            urgency: request.urgency,
            description: request.description,
            image_url: None,
            latitude: request.latitude,
            longitude: request.longitude,
            status: ReportStatus::Pending,
            submitted_at: Utc::now(),
            resolved_at: None,
            reporter_id,
            resolved_by: None,
            points_awarded: 0,
        };

        if let Some(image) = image.filter(|i| !i.bytes.is_empty()) {
            let locator = self
                .media
                .upload(
                    &image.bytes,
                    &image.content_type,
                    &image.file_name,
                    REPORT_IMAGE_FOLDER,
                )
                .await?;
            info!("uploaded report image: {locator}");
            report.image_url = Some(locator);
        }

        let saved = self.reports.save(report).await?;
        info!("created new report {}", saved.id);
        Ok(saved)
    }

    /// Move a report to `new_status`. Any status may move to any other; a
    /// stricter workflow table would slot in here without touching callers.
    ///
    /// The first transition into Resolved stamps resolved_at/resolved_by and
    /// awards the reporter urgency-based points. Re-resolving an already
    /// resolved report re-sets the status only; stamps and points are never
    /// recomputed. The report row is saved before the ledger award so a
    /// failed save cannot leak points.
    pub async fn update_report_status(
        &self,
        report_id: Uuid,
        new_status: ReportStatus,
        acting_user: Option<Uuid>,
    ) -> Result<Report> {
        let lock = self.transition_lock(report_id);
        let result = {
            let _guard = lock.lock().await;
            self.apply_transition(report_id, new_status, acting_user).await
        };
        drop(lock);
        self.reap_transition_lock(report_id);
        result
    }

    async fn apply_transition(
        &self,
        report_id: Uuid,
        new_status: ReportStatus,
        acting_user: Option<Uuid>,
    ) -> Result<Report> {
        let mut report = self
            .reports
            .find_by_id(report_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("report not found: {report_id}")))?;

        let old_status = report.status;
        report.status = new_status;

        let mut award: Option<(Uuid, i32)> = None;
        if new_status == ReportStatus::Resolved && old_status != ReportStatus::Resolved {
            report.resolved_at = Some(Utc::now());
            report.resolved_by = acting_user;

            let points = resolution_points(report.urgency);
            if points > 0 {
                report.points_awarded = points;
                if let Some(reporter_id) = report.reporter_id {
                    award = Some((reporter_id, points));
                }
            }
        }

        let updated = self.reports.save(report).await?;

        if let Some((reporter_id, points)) = award {
            let reason = format!("Report resolved: {}", updated.location);
            self.points
                .award_points(Some(reporter_id), points, &reason)
                .await?;
        }

        info!("updated report {report_id} status from {old_status} to {new_status}");
        Ok(updated)
    }

    /// Delete a report, cleaning up its photo best-effort: a failed media
    /// delete is logged and the record is removed regardless.
    pub async fn delete_report(&self, report_id: Uuid) -> Result<()> {
        let report = self
            .reports
            .find_by_id(report_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("report not found: {report_id}")))?;

        if let Some(image_url) = &report.image_url {
            if self.media.delete(image_url).await {
                info!("deleted image for report {report_id}");
            } else {
                warn!("failed to delete image for report {report_id}: {image_url}");
            }
        }

        self.reports.delete(report_id).await?;
        self.reap_transition_lock(report_id);
        info!("deleted report {report_id}");
        Ok(())
    }

    pub async fn report_by_id(&self, report_id: Uuid) -> Result<Option<Report>> {
        self.reports.find_by_id(report_id).await
    }

    pub async fn all_reports(&self, page: i64, per_page: i64) -> Result<Vec<Report>> {
        self.reports.list_all(page, per_page).await
    }

    pub async fn reports_by_status(&self, status: ReportStatus) -> Result<Vec<Report>> {
        self.reports.list_by_status(status).await
    }

    pub async fn reports_by_reporter(&self, reporter_id: Uuid) -> Result<Vec<Report>> {
        self.reports.list_by_reporter(reporter_id).await
    }

    pub async fn reports_by_urgency(&self, urgency: UrgencyLevel) -> Result<Vec<Report>> {
        self.reports.list_by_urgency(urgency).await
    }

    pub async fn reports_by_waste_type(&self, waste_type: WasteType) -> Result<Vec<Report>> {
        self.reports.list_by_waste_type(waste_type).await
    }

    pub async fn reports_by_status_and_urgency(
        &self,
        status: ReportStatus,
        urgency: UrgencyLevel,
    ) -> Result<Vec<Report>> {
        self.reports.list_by_status_and_urgency(status, urgency).await
    }

    pub async fn recent_reports(&self, limit: i64) -> Result<Vec<Report>> {
        self.reports.list_recent(limit).await
    }

    pub async fn total_reports_count(&self) -> Result<i64> {
        self.reports.count_all().await
    }

    pub async fn resolved_reports_count(&self) -> Result<i64> {
        self.reports.count_by_status(ReportStatus::Resolved).await
    }

    pub async fn pending_reports_count(&self) -> Result<i64> {
        self.reports.count_by_status(ReportStatus::Pending).await
    }

    /// Share of resolved reports, as a rounded percentage; 0 when there are
    /// no reports at all.
    pub async fn resolution_rate(&self) -> Result<i64> {
        let total = self.total_reports_count().await?;
        if total == 0 {
            return Ok(0);
        }

        let resolved = self.resolved_reports_count().await?;
        Ok(((resolved as f64 / total as f64) * 100.0).round() as i64)
    }
}
