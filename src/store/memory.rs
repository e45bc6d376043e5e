//! In-memory store implementations backing the unit and integration tests.
//!
//! Reports are held in insertion order; listings stable-sort by submitted_at
//! descending, so ties keep insertion order exactly like the `seq` column in
//! Postgres.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Report, ReportStatus, UrgencyLevel, User, WasteType};

use super::{ReportStore, UserStore};

#[derive(Default)]
pub struct InMemoryReportStore {
    reports: Mutex<Vec<Report>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn newest_first(mut reports: Vec<Report>) -> Vec<Report> {
        reports.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        reports
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn save(&self, report: Report) -> Result<Report> {
        let mut reports = self.reports.lock().unwrap();
        match reports.iter_mut().find(|r| r.id == report.id) {
            Some(existing) => *existing = report.clone(),
            None => reports.push(report.clone()),
        }
        Ok(report)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>> {
        let reports = self.reports.lock().unwrap();
        Ok(reports.iter().find(|r| r.id == id).cloned())
    }

    async fn list_all(&self, page: i64, per_page: i64) -> Result<Vec<Report>> {
        let reports = self.reports.lock().unwrap().clone();
        Ok(Self::newest_first(reports)
            .into_iter()
            .skip((page * per_page).max(0) as usize)
            .take(per_page.max(0) as usize)
            .collect())
    }

    async fn list_by_status(&self, status: ReportStatus) -> Result<Vec<Report>> {
        let reports = self.reports.lock().unwrap();
        let matching = reports.iter().filter(|r| r.status == status).cloned().collect();
        Ok(Self::newest_first(matching))
    }

    async fn list_by_reporter(&self, reporter_id: Uuid) -> Result<Vec<Report>> {
        let reports = self.reports.lock().unwrap();
        let matching = reports
            .iter()
            .filter(|r| r.reporter_id == Some(reporter_id))
            .cloned()
            .collect();
        Ok(Self::newest_first(matching))
    }

    async fn list_by_urgency(&self, urgency: UrgencyLevel) -> Result<Vec<Report>> {
        let reports = self.reports.lock().unwrap();
        let matching = reports.iter().filter(|r| r.urgency == urgency).cloned().collect();
        Ok(Self::newest_first(matching))
    }

    async fn list_by_waste_type(&self, waste_type: WasteType) -> Result<Vec<Report>> {
        let reports = self.reports.lock().unwrap();
        let matching = reports
            .iter()
            .filter(|r| r.waste_type == waste_type)
            .cloned()
            .collect();
        Ok(Self::newest_first(matching))
    }

    async fn list_by_status_and_urgency(
        &self,
        status: ReportStatus,
        urgency: UrgencyLevel,
    ) -> Result<Vec<Report>> {
        let reports = self.reports.lock().unwrap();
        let matching = reports
            .iter()
            .filter(|r| r.status == status && r.urgency == urgency)
            .cloned()
            .collect();
        Ok(Self::newest_first(matching))
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Report>> {
        let reports = self.reports.lock().unwrap().clone();
        Ok(Self::newest_first(reports)
            .into_iter()
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count_by_status(&self, status: ReportStatus) -> Result<i64> {
        let reports = self.reports.lock().unwrap();
        Ok(reports.iter().filter(|r| r.status == status).count() as i64)
    }

    async fn count_all(&self) -> Result<i64> {
        Ok(self.reports.lock().unwrap().len() as i64)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut reports = self.reports.lock().unwrap();
        reports.retain(|r| r.id != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: User) {
        self.users.lock().unwrap().insert(user.id, user);
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn add_points(&self, user_id: Uuid, points: i32) -> Result<Option<User>> {
        let mut users = self.users.lock().unwrap();
        Ok(users.get_mut(&user_id).map(|user| {
            user.points += points;
            user.clone()
        }))
    }

    async fn try_deduct_points(&self, user_id: Uuid, cost: i32) -> Result<bool> {
        let mut users = self.users.lock().unwrap();
        match users.get_mut(&user_id) {
            Some(user) if user.points >= cost => {
                user.points -= cost;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn count_all(&self) -> Result<i64> {
        Ok(self.users.lock().unwrap().len() as i64)
    }
}
