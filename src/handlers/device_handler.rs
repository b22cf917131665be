//! 设备查询 API 处理器

use crate::errors::AppError;
use crate::models::{find_device, ApiResponse, HistoryQuery, DEVICE_REGISTRY};
use crate::services::WaterLevelService;
use actix_web::{web, HttpResponse};
use std::sync::Arc;

/// 设备清单
pub async fn list_devices() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(DEVICE_REGISTRY))
}

/// 所有设备最新快照
pub async fn list_latest(
    water_level_service: web::Data<Arc<WaterLevelService>>,
) -> Result<HttpResponse, AppError> {
    let snapshots = water_level_service.list_latest().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(snapshots)))
}

/// 单个设备最新快照
///
/// 未登记的设备 ID 也可以查询（设备端上报不校验登记）。
pub async fn get_latest(
    water_level_service: web::Data<Arc<WaterLevelService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let device_id = path.into_inner();
    let snapshot = water_level_service.get_latest(&device_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(snapshot)))
}

/// 设备历史读数
pub async fn get_history(
    water_level_service: web::Data<Arc<WaterLevelService>>,
    path: web::Path<String>,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse, AppError> {
    let device_id = path.into_inner();
    let history = water_level_service
        .get_history(&device_id, query.into_inner())
        .await;

    if history.is_empty() && find_device(&device_id).is_none() {
        return Err(AppError::NotFound(format!("未知设备: {}", device_id)));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(history)))
}
