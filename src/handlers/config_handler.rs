//! 阈值配置 API 处理器

use crate::errors::AppError;
use crate::models::{ApiResponse, UpdateThresholdRequest};
use crate::services::ThresholdService;
use actix_web::{web, HttpResponse};
use std::sync::Arc;

/// 获取当前阈值
pub async fn get_config(
    threshold_service: web::Data<Arc<ThresholdService>>,
) -> Result<HttpResponse, AppError> {
    let config = threshold_service.current().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(config)))
}

/// 更新阈值
pub async fn update_config(
    threshold_service: web::Data<Arc<ThresholdService>>,
    body: web::Json<UpdateThresholdRequest>,
) -> Result<HttpResponse, AppError> {
    let config = threshold_service.update(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(config)))
}
