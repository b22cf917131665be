//! 健康检查 API 处理器

use crate::models::{HealthCheckResponse, ServiceStatus};
use crate::services::WaterLevelService;
use actix_web::{web, HttpResponse};
use std::sync::Arc;
use std::time::Instant;

/// 应用启动时间
static START_TIME: once_cell::sync::Lazy<Instant> = once_cell::sync::Lazy::new(Instant::now);

/// 模拟数据源是否开启（启动时注入）
#[derive(Debug, Clone, Copy)]
pub struct SimulatorFlag(pub bool);

/// 简单健康检查（用于负载均衡器）
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok"
    }))
}

/// 详细健康检查
pub async fn health_detailed(
    water_level_service: web::Data<Arc<WaterLevelService>>,
    simulator: Option<web::Data<SimulatorFlag>>,
) -> HttpResponse {
    let store_start = Instant::now();
    let store_status = match water_level_service.health_check().await {
        Ok(_) => ServiceStatus::healthy(store_start.elapsed().as_millis() as u64),
        Err(_) => ServiceStatus::unhealthy(),
    };

    let response = HealthCheckResponse {
        status: if store_status.status == "healthy" {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: store_status,
        simulator_enabled: simulator.map(|s| s.0).unwrap_or(false),
        uptime_seconds: START_TIME.elapsed().as_secs(),
    };

    HttpResponse::Ok().json(response)
}

/// 存活检查（用于 Kubernetes）
pub async fn live() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "alive": true
    }))
}
