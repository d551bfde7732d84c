use crate::{
    api::{attendance, dashboard, employee},
    config::Config,
    error::AppError,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::Condition, web};
use anyhow::anyhow;

pub type ApiLimiter = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-IP limiter shared by every worker.
pub fn api_limiter(requests_per_min: u32) -> anyhow::Result<ApiLimiter> {
    let burst = requests_per_min.max(1);
    let per_ms = (60_000 / burst as u64).max(1);

    GovernorConfigBuilder::default()
        .milliseconds_per_request(per_ms)
        .burst_size(burst)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow!("invalid rate limit: {requests_per_min} requests per minute"))
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limiter: &ApiLimiter) {
    // Extractor failures share the validation error shape
    let json_config =
        web::JsonConfig::default().error_handler(|err, _req| AppError::from(err).into());
    let query_config =
        web::QueryConfig::default().error_handler(|err, _req| AppError::from(err).into());
    let path_config =
        web::PathConfig::default().error_handler(|err, _req| AppError::from(err).into());

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(Condition::new(
                config.rate_api_per_min > 0,
                Governor::new(limiter),
            ))
            .app_data(json_config)
            .app_data(query_config)
            .app_data(path_config)
            .route("/health", web::get().to(dashboard::health))
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    )
                    // /employees/{id}/stats
                    .service(
                        web::resource("/{id}/stats").route(web::get().to(employee::employee_stats)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance?employee_id= | /attendance?date=
                    .service(
                        web::resource("")
                            .route(web::post().to(attendance::mark_attendance))
                            .route(web::get().to(attendance::list_attendance)),
                    )
                    // /attendance/{employee_id}
                    .service(
                        web::resource("/{employee_id}")
                            .route(web::get().to(attendance::employee_attendance)),
                    ),
            )
            .service(
                web::scope("/dashboard").service(
                    web::resource("/stats").route(web::get().to(dashboard::dashboard_stats)),
                ),
            ),
    );
}
