//! Shared test harness: in-memory stores plus a mock media gateway that
//! records calls and can be told to fail.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use waste_report_service::error::{AppError, Result};
use waste_report_service::models::{CreateReportRequest, UrgencyLevel, User, WasteType};
use waste_report_service::services::{MediaStorage, PointsService, ReportService, UploadedImage};
use waste_report_service::store::{InMemoryReportStore, InMemoryUserStore};

pub struct MockMediaStorage {
    fail_uploads: AtomicBool,
    fail_deletes: AtomicBool,
    uploads: Mutex<Vec<String>>,
    deletes: Mutex<Vec<String>>,
}

impl MockMediaStorage {
    pub fn new() -> Self {
        Self {
            fail_uploads: AtomicBool::new(false),
            fail_deletes: AtomicBool::new(false),
            uploads: Mutex::new(Vec::new()),
            deletes: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_uploads(&self) {
        self.fail_uploads.store(true, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }

    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn delete_calls(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaStorage for MockMediaStorage {
    async fn upload(
        &self,
        _bytes: &[u8],
        _content_type: &str,
        original_name: &str,
        folder: &str,
    ) -> Result<String> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(AppError::UploadFailed("storage unavailable".to_string()));
        }

        let locator = format!("https://media.test/{folder}/{}-{original_name}", Uuid::new_v4());
        self.uploads.lock().unwrap().push(locator.clone());
        Ok(locator)
    }

    async fn delete(&self, locator: &str) -> bool {
        self.deletes.lock().unwrap().push(locator.to_string());
        !self.fail_deletes.load(Ordering::SeqCst)
    }

    async fn exists(&self, locator: &str) -> bool {
        self.uploads.lock().unwrap().iter().any(|u| u == locator)
            && !self.deletes.lock().unwrap().iter().any(|d| d == locator)
    }
}

pub struct TestHarness {
    pub service: Arc<ReportService>,
    pub points: PointsService,
    pub reports: Arc<InMemoryReportStore>,
    pub users: Arc<InMemoryUserStore>,
    pub media: Arc<MockMediaStorage>,
}

pub fn harness() -> TestHarness {
    let reports = Arc::new(InMemoryReportStore::new());
    let users = Arc::new(InMemoryUserStore::new());
    let media = Arc::new(MockMediaStorage::new());
    let points = PointsService::new(users.clone());
    let service = Arc::new(ReportService::new(
        reports.clone(),
        points.clone(),
        media.clone(),
    ));

    TestHarness {
        service,
        points,
        reports,
        users,
        media,
    }
}

pub fn seed_user(harness: &TestHarness, username: &str) -> Uuid {
    let user = User::new(username, &format!("{username}@example.org"));
    let id = user.id;
    harness.users.insert(user);
    id
}

pub fn sample_request(urgency: UrgencyLevel) -> CreateReportRequest {
    CreateReportRequest {
        location: "Main St & 5th Ave".to_string(),
        waste_type: WasteType::General,
        urgency,
        description: Some("overflowing bin".to_string()),
        latitude: Some(44.9778),
        longitude: Some(-93.2650),
    }
}

pub fn sample_image() -> UploadedImage {
    UploadedImage {
        bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
        content_type: "image/jpeg".to_string(),
        file_name: "bin.jpg".to_string(),
    }
}
