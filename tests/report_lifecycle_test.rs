mod common;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use waste_report_service::error::AppError;
use waste_report_service::models::{
    CreateReportRequest, Report, ReportStatus, UrgencyLevel, WasteType,
};
use waste_report_service::store::{InMemoryReportStore, ReportStore};

use common::{harness, sample_image, sample_request, seed_user};

#[tokio::test]
async fn test_create_report_starts_pending_without_awards() {
    let h = harness();
    let reporter = seed_user(&h, "alice");

    let report = h
        .service
        .create_report(sample_request(UrgencyLevel::Medium), Some(reporter), None)
        .await
        .unwrap();

    assert_eq!(report.status, ReportStatus::Pending);
    assert_eq!(report.points_awarded, 0);
    assert!(report.resolved_at.is_none());
    assert!(report.resolved_by.is_none());
    assert!(report.image_url.is_none());
    assert_eq!(report.reporter_id, Some(reporter));
    assert_eq!(h.reports.count_all().await.unwrap(), 1);
}

#[tokio::test]
async fn test_create_report_attaches_uploaded_image() {
    let h = harness();

    let report = h
        .service
        .create_report(sample_request(UrgencyLevel::Low), None, Some(sample_image()))
        .await
        .unwrap();

    let locator = report.image_url.expect("image url should be set");
    assert_eq!(h.media.uploads(), vec![locator.clone()]);
    assert!(locator.contains("report-images/"));
}

#[tokio::test]
async fn test_create_report_rejects_invalid_request_before_persisting() {
    let h = harness();

    let request = CreateReportRequest {
        location: String::new(),
        waste_type: WasteType::General,
        urgency: UrgencyLevel::Low,
        description: None,
        latitude: None,
        longitude: None,
    };

    let err = h.service.create_report(request, None, None).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(h.reports.count_all().await.unwrap(), 0);
    assert!(h.media.uploads().is_empty());
}

#[tokio::test]
async fn test_failed_upload_aborts_creation_entirely() {
    let h = harness();
    h.media.fail_uploads();

    let err = h
        .service
        .create_report(
            sample_request(UrgencyLevel::High),
            None,
            Some(sample_image()),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::UploadFailed(_)));
    assert_eq!(h.reports.count_all().await.unwrap(), 0);
}

#[tokio::test]
async fn test_resolving_high_urgency_awards_25_points() {
    let h = harness();
    let reporter = seed_user(&h, "alice");
    let admin = seed_user(&h, "admin");

    let report = h
        .service
        .create_report(sample_request(UrgencyLevel::High), Some(reporter), None)
        .await
        .unwrap();

    let resolved = h
        .service
        .update_report_status(report.id, ReportStatus::Resolved, Some(admin))
        .await
        .unwrap();

    assert_eq!(resolved.status, ReportStatus::Resolved);
    assert_eq!(resolved.points_awarded, 25);
    assert!(resolved.resolved_at.is_some());
    assert_eq!(resolved.resolved_by, Some(admin));
    assert_eq!(h.points.balance_of(reporter).await.unwrap(), 25);
}

#[tokio::test]
async fn test_re_resolving_never_awards_twice() {
    let h = harness();
    let reporter = seed_user(&h, "alice");
    let admin = seed_user(&h, "admin");
    let other_admin = seed_user(&h, "bob");

    let report = h
        .service
        .create_report(sample_request(UrgencyLevel::Critical), Some(reporter), None)
        .await
        .unwrap();

    let first = h
        .service
        .update_report_status(report.id, ReportStatus::Resolved, Some(admin))
        .await
        .unwrap();
    let second = h
        .service
        .update_report_status(report.id, ReportStatus::Resolved, Some(other_admin))
        .await
        .unwrap();

    // stamps and points stay from the first resolution
    assert_eq!(second.points_awarded, 35);
    assert_eq!(second.resolved_at, first.resolved_at);
    assert_eq!(second.resolved_by, Some(admin));
    assert_eq!(h.points.balance_of(reporter).await.unwrap(), 35);
}

#[tokio::test]
async fn test_anonymous_report_resolution_awards_nobody() {
    let h = harness();
    let admin = seed_user(&h, "admin");

    let report = h
        .service
        .create_report(sample_request(UrgencyLevel::Medium), None, None)
        .await
        .unwrap();

    let resolved = h
        .service
        .update_report_status(report.id, ReportStatus::Resolved, Some(admin))
        .await
        .unwrap();

    // points recorded on the report even though there is nobody to pay
    assert_eq!(resolved.points_awarded, 15);
    assert_eq!(h.points.balance_of(admin).await.unwrap(), 0);
}

#[tokio::test]
async fn test_any_status_may_move_to_any_other() {
    let h = harness();
    let reporter = seed_user(&h, "alice");

    let report = h
        .service
        .create_report(sample_request(UrgencyLevel::Low), Some(reporter), None)
        .await
        .unwrap();

    h.service
        .update_report_status(report.id, ReportStatus::Resolved, None)
        .await
        .unwrap();
    let reopened = h
        .service
        .update_report_status(report.id, ReportStatus::Pending, None)
        .await
        .unwrap();

    assert_eq!(reopened.status, ReportStatus::Pending);
    // resolution stamps survive the reopen; they are written exactly once
    assert!(reopened.resolved_at.is_some());
    assert_eq!(reopened.points_awarded, 10);
}

#[tokio::test]
async fn test_transition_on_unknown_report_is_not_found() {
    let h = harness();

    let err = h
        .service
        .update_report_status(Uuid::new_v4(), ReportStatus::Resolved, None)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolutions_award_exactly_once() {
    let h = harness();
    let reporter = seed_user(&h, "alice");
    let admin = seed_user(&h, "admin");

    let report = h
        .service
        .create_report(sample_request(UrgencyLevel::High), Some(reporter), None)
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = Arc::clone(&h.service);
        let report_id = report.id;
        handles.push(tokio::spawn(async move {
            service
                .update_report_status(report_id, ReportStatus::Resolved, Some(admin))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(h.points.balance_of(reporter).await.unwrap(), 25);
    let stored = h
        .service
        .report_by_id(report.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.points_awarded, 25);
}

#[tokio::test]
async fn test_delete_removes_report_and_media() {
    let h = harness();

    let report = h
        .service
        .create_report(sample_request(UrgencyLevel::Low), None, Some(sample_image()))
        .await
        .unwrap();
    let locator = report.image_url.clone().unwrap();

    h.service.delete_report(report.id).await.unwrap();

    assert_eq!(h.reports.count_all().await.unwrap(), 0);
    assert_eq!(h.media.delete_calls(), vec![locator]);
}

#[tokio::test]
async fn test_delete_survives_media_delete_failure() {
    let h = harness();
    h.media.fail_deletes();

    let report = h
        .service
        .create_report(sample_request(UrgencyLevel::Low), None, Some(sample_image()))
        .await
        .unwrap();

    h.service.delete_report(report.id).await.unwrap();

    assert_eq!(h.reports.count_all().await.unwrap(), 0);
    assert_eq!(h.media.delete_calls().len(), 1);
}

#[tokio::test]
async fn test_delete_unknown_report_is_not_found() {
    let h = harness();

    let err = h.service.delete_report(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_listings_are_newest_first() {
    let h = harness();
    let reporter = seed_user(&h, "alice");

    let mut ids = Vec::new();
    for i in 0..3 {
        let mut request = sample_request(UrgencyLevel::Low);
        request.location = format!("site {i}");
        let report = h
            .service
            .create_report(request, Some(reporter), None)
            .await
            .unwrap();
        ids.push(report.id);
        // distinct submitted_at values
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let recent = h.service.recent_reports(2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].id, ids[2]);
    assert_eq!(recent[1].id, ids[1]);

    let mine = h.service.reports_by_reporter(reporter).await.unwrap();
    assert_eq!(mine.len(), 3);
    assert_eq!(mine[0].id, ids[2]);
}

fn report_submitted_at(at: DateTime<Utc>) -> Report {
    Report {
        id: Uuid::new_v4(),
        location: "Main St & 5th Ave".to_string(),
        waste_type: WasteType::General,
        urgency: UrgencyLevel::Low,
        description: None,
        image_url: None,
        latitude: None,
        longitude: None,
        status: ReportStatus::Pending,
        submitted_at: at,
        resolved_at: None,
        reporter_id: None,
        resolved_by: None,
        points_awarded: 0,
    }
}

#[tokio::test]
async fn test_submitted_at_ties_keep_insertion_order() {
    let store = InMemoryReportStore::new();

    let now = Utc::now();
    let first = store.save(report_submitted_at(now)).await.unwrap();
    let second = store.save(report_submitted_at(now)).await.unwrap();

    let recent = store.list_recent(10).await.unwrap();
    assert_eq!(recent[0].id, first.id);
    assert_eq!(recent[1].id, second.id);

    let paged = store.list_all(0, 10).await.unwrap();
    assert_eq!(paged[0].id, first.id);
    assert_eq!(paged[1].id, second.id);
}

#[tokio::test]
async fn test_filtered_listings_match_field_values() {
    let h = harness();

    let general = h
        .service
        .create_report(sample_request(UrgencyLevel::Low), None, None)
        .await
        .unwrap();

    let mut hazardous_request = sample_request(UrgencyLevel::High);
    hazardous_request.waste_type = WasteType::Hazardous;
    let open = h
        .service
        .create_report(hazardous_request.clone(), None, None)
        .await
        .unwrap();
    let resolved = h
        .service
        .create_report(hazardous_request, None, None)
        .await
        .unwrap();
    h.service
        .update_report_status(resolved.id, ReportStatus::Resolved, None)
        .await
        .unwrap();

    let high = h.service.reports_by_urgency(UrgencyLevel::High).await.unwrap();
    assert_eq!(high.len(), 2);
    assert!(high.iter().all(|r| r.urgency == UrgencyLevel::High));

    let hazardous = h
        .service
        .reports_by_waste_type(WasteType::Hazardous)
        .await
        .unwrap();
    assert_eq!(hazardous.len(), 2);
    assert!(hazardous.iter().all(|r| r.id != general.id));

    let pending_high = h
        .service
        .reports_by_status_and_urgency(ReportStatus::Pending, UrgencyLevel::High)
        .await
        .unwrap();
    assert_eq!(pending_high.len(), 1);
    assert_eq!(pending_high[0].id, open.id);

    let resolved_high = h
        .service
        .reports_by_status_and_urgency(ReportStatus::Resolved, UrgencyLevel::High)
        .await
        .unwrap();
    assert_eq!(resolved_high.len(), 1);
    assert_eq!(resolved_high[0].id, resolved.id);
}
