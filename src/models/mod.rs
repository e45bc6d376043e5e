pub mod report;
pub mod user;

pub use report::{
    CreateReportRequest, Report, ReportResponse, ReportStatus, UpdateReportStatusRequest,
    UrgencyLevel, WasteType,
};
pub use user::User;
