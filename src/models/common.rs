//! 通用数据结构

use chrono::{DateTime, Utc};
use serde::Serialize;

/// 统一 API 响应结构
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: DateTime<Utc>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            code: 200,
            message: "success".to_string(),
            data: Some(data),
            timestamp: Utc::now(),
        }
    }
}

/// 设备端上报确认（保持设备固件期望的 `{ "message": ... }` 格式）
#[derive(Debug, Serialize)]
pub struct IngestAck {
    pub message: String,
}

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    pub store: ServiceStatus,
    pub simulator_enabled: bool,
    pub uptime_seconds: u64,
}

/// 服务状态
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub status: String,
    pub latency_ms: Option<u64>,
}

impl ServiceStatus {
    pub fn healthy(latency_ms: u64) -> Self {
        Self {
            status: "healthy".to_string(),
            latency_ms: Some(latency_ms),
        }
    }

    pub fn unhealthy() -> Self {
        Self {
            status: "unhealthy".to_string(),
            latency_ms: None,
        }
    }
}
