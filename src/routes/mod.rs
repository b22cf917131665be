//! 路由配置模块

use crate::errors::AppError;
use crate::handlers;
use actix_web::web;

/// 请求体 JSON 解析失败统一转为 400
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}

/// 配置所有路由
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        // 健康检查路由
        .service(
            web::scope("/health")
                .route("", web::get().to(handlers::health))
                .route("/detailed", web::get().to(handlers::health_detailed))
                .route("/live", web::get().to(handlers::live)),
        )
        // 设备上报路由（与设备固件中的地址保持一致）
        .service(
            web::scope("/api/iot")
                .route("/water-level", web::post().to(handlers::report_water_level))
                .route("/water-level", web::get().to(handlers::ingest_banner)),
        )
        .route("/water-level", web::post().to(handlers::report_water_level))
        // API v1 路由
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/config")
                        .route("", web::get().to(handlers::get_config))
                        .route("", web::put().to(handlers::update_config)),
                )
                .service(
                    web::scope("/devices")
                        .route("", web::get().to(handlers::list_devices))
                        .route("/latest", web::get().to(handlers::list_latest))
                        .route("/{device_id}/latest", web::get().to(handlers::get_latest))
                        .route("/{device_id}/history", web::get().to(handlers::get_history)),
                )
                .route(
                    "/calibration/convert",
                    web::post().to(handlers::convert_distance),
                ),
        );
}
