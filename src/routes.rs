//! Route configuration, centralized out of main.rs.

use actix_web::web;

use crate::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health_check))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/reports")
                        .route("", web::post().to(handlers::reports::create_report))
                        .route("", web::get().to(handlers::reports::list_reports))
                        .route("/my-reports", web::get().to(handlers::reports::my_reports))
                        .route(
                            "/status/{status}",
                            web::get().to(handlers::reports::reports_by_status),
                        )
                        .route(
                            "/{id}/status",
                            web::put().to(handlers::reports::update_report_status),
                        )
                        .route("/{id}", web::get().to(handlers::reports::get_report))
                        .route("/{id}", web::delete().to(handlers::reports::delete_report)),
                )
                .service(
                    web::scope("/dashboard")
                        .route("/stats", web::get().to(handlers::dashboard::stats)),
                )
                .service(
                    web::scope("/rewards")
                        .route("/balance", web::get().to(handlers::rewards::balance))
                        .route("/redeem", web::post().to(handlers::rewards::redeem)),
                ),
        );
}
