use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "waste_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WasteType {
    General,
    Recyclable,
    Organic,
    Hazardous,
    Electronic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "urgency_level", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "report_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Pending,
    InProgress,
    Resolved,
    Rejected,
}

impl WasteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WasteType::General => "GENERAL",
            WasteType::Recyclable => "RECYCLABLE",
            WasteType::Organic => "ORGANIC",
            WasteType::Hazardous => "HAZARDOUS",
            WasteType::Electronic => "ELECTRONIC",
        }
    }
}

impl UrgencyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::Low => "LOW",
            UrgencyLevel::Medium => "MEDIUM",
            UrgencyLevel::High => "HIGH",
            UrgencyLevel::Critical => "CRITICAL",
        }
    }
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "PENDING",
            ReportStatus::InProgress => "IN_PROGRESS",
            ReportStatus::Resolved => "RESOLVED",
            ReportStatus::Rejected => "REJECTED",
        }
    }
}

impl FromStr for WasteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GENERAL" => Ok(WasteType::General),
            "RECYCLABLE" => Ok(WasteType::Recyclable),
            "ORGANIC" => Ok(WasteType::Organic),
            "HAZARDOUS" => Ok(WasteType::Hazardous),
            "ELECTRONIC" => Ok(WasteType::Electronic),
            other => Err(format!("unknown waste type: {other}")),
        }
    }
}

impl FromStr for UrgencyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LOW" => Ok(UrgencyLevel::Low),
            "MEDIUM" => Ok(UrgencyLevel::Medium),
            "HIGH" => Ok(UrgencyLevel::High),
            "CRITICAL" => Ok(UrgencyLevel::Critical),
            other => Err(format!("unknown urgency level: {other}")),
        }
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(ReportStatus::Pending),
            "IN_PROGRESS" => Ok(ReportStatus::InProgress),
            "RESOLVED" => Ok(ReportStatus::Resolved),
            "REJECTED" => Ok(ReportStatus::Rejected),
            other => Err(format!("unknown report status: {other}")),
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One citizen-submitted waste complaint. Status, resolution stamps and
/// points_awarded are written exclusively by the report lifecycle service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Report {
    pub id: Uuid,
    pub location: String,
    pub waste_type: WasteType,
    pub urgency: UrgencyLevel,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: ReportStatus,
    pub submitted_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub reporter_id: Option<Uuid>,
    pub resolved_by: Option<Uuid>,
    pub points_awarded: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReportRequest {
    #[validate(length(min = 1, max = 100, message = "location must be 1-100 characters"))]
    pub location: String,
    pub waste_type: WasteType,
    pub urgency: UrgencyLevel,
    #[validate(length(max = 1000, message = "description must not exceed 1000 characters"))]
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateReportStatusRequest {
    pub status: ReportStatus,
    pub resolution_notes: Option<String>,
}

/// Report as returned by the API, with reporter references resolved to
/// display names.
#[derive(Debug, Clone, Serialize)]
pub struct ReportResponse {
    pub id: Uuid,
    pub location: String,
    pub waste_type: WasteType,
    pub urgency: UrgencyLevel,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: ReportStatus,
    pub submitted_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub reporter_username: Option<String>,
    pub resolved_by_username: Option<String>,
    pub points_awarded: i32,
}

impl ReportResponse {
    pub fn new(
        report: &Report,
        reporter_username: Option<String>,
        resolved_by_username: Option<String>,
    ) -> Self {
        Self {
            id: report.id,
            location: report.location.clone(),
            waste_type: report.waste_type,
            urgency: report.urgency,
            description: report.description.clone(),
            image_url: report.image_url.clone(),
            latitude: report.latitude,
            longitude: report.longitude,
            status: report.status,
            submitted_at: report.submitted_at,
            resolved_at: report.resolved_at,
            reporter_username,
            resolved_by_username,
            points_awarded: report.points_awarded,
        }
    }
}
