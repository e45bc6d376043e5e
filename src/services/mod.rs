pub mod points;
pub mod reports;
pub mod storage;

pub use points::PointsService;
pub use reports::{resolution_points, ReportService, UploadedImage};
pub use storage::{MediaStorage, S3MediaStorage};
