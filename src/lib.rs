pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::{AppError, Result};

use std::sync::Arc;

use services::{PointsService, ReportService};
use store::UserStore;

#[derive(Clone)]
pub struct AppState {
    pub reports: Arc<ReportService>,
    pub points: PointsService,
    pub users: Arc<dyn UserStore>,
}
