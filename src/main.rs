use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use waste_report_service::db::{create_pool, run_migrations};
use waste_report_service::services::{
    MediaStorage, PointsService, ReportService, S3MediaStorage,
};
use waste_report_service::store::{PgReportStore, PgUserStore, ReportStore, UserStore};
use waste_report_service::{routes, AppState, Config};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!("Starting waste-report-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let pool = create_pool(&config.database.url, config.database.max_connections)
        .await
        .expect("Failed to connect to database");
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let media: Arc<dyn MediaStorage> = Arc::new(S3MediaStorage::new(&config.storage).await);
    let report_store: Arc<dyn ReportStore> = Arc::new(PgReportStore::new(pool.clone()));
    let user_store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool.clone()));

    let points = PointsService::new(user_store.clone());
    let reports = Arc::new(ReportService::new(report_store, points.clone(), media));

    let state = AppState {
        reports,
        points,
        users: user_store,
    };

    let host = config.app.host.clone();
    let port = config.app.port;
    tracing::info!("Listening on {host}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure_routes)
    })
    .bind((host, port))?
    .run()
    .await
}
