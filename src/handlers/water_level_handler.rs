//! 设备水位上报处理器

use crate::errors::AppError;
use crate::models::{ApiResponse, ConvertDistanceRequest, IngestAck, WaterLevelReport};
use crate::services::WaterLevelService;
use actix_web::{web, HttpResponse};
use std::sync::Arc;

/// 接收设备上报
///
/// 响应保持设备固件期望的 `{ "message": ... }` 格式。
pub async fn report_water_level(
    water_level_service: web::Data<Arc<WaterLevelService>>,
    body: web::Json<WaterLevelReport>,
) -> Result<HttpResponse, AppError> {
    let snapshot = water_level_service.ingest(body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(IngestAck {
        message: format!(
            "Saved {} at {:.1}% ({})",
            snapshot.device_id, snapshot.percent, snapshot.status
        ),
    }))
}

/// 浏览器直接访问时的提示
pub async fn ingest_banner() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("IoT Server is Running! Send POST request to update.")
}

/// 超声波距离换算
pub async fn convert_distance(
    water_level_service: web::Data<Arc<WaterLevelService>>,
    body: web::Json<ConvertDistanceRequest>,
) -> Result<HttpResponse, AppError> {
    let response = water_level_service.convert_distance(body.distance_cm);
    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}
