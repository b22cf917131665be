//! 传感器上报与快照模型

use super::SeverityTier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 未携带设备 ID 时使用的占位 ID
pub const UNKNOWN_DEVICE_ID: &str = "unknown_device";

/// 设备水位上报请求
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WaterLevelReport {
    /// 缺失或为空白时按 `unknown_device` 存储
    #[validate(length(max = 64, message = "设备 ID 不能超过 64 个字符"))]
    pub device_id: Option<String>,

    pub water_level_percent: f64,

    #[validate(range(min = 0.0, message = "水位高度不能为负"))]
    pub water_level_cm: Option<f64>,

    #[validate(range(min = -90.0, max = 90.0, message = "纬度应在 -90 到 90 之间"))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "经度应在 -180 到 180 之间"))]
    pub longitude: Option<f64>,
}

impl WaterLevelReport {
    /// 实际存储使用的设备 ID
    pub fn resolved_device_id(&self) -> &str {
        match self.device_id.as_deref() {
            Some(id) if !id.trim().is_empty() => id,
            _ => UNKNOWN_DEVICE_ID,
        }
    }
}

/// 设备最新快照（每设备一条，覆盖写入）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SensorSnapshot {
    pub device_id: String,
    pub percent: f64,
    pub cm: f64,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub status: SeverityTier,
    pub last_update: DateTime<Utc>,
}

impl SensorSnapshot {
    /// 合并新上报：坐标缺失时保留旧值
    pub fn merge(previous: Option<&SensorSnapshot>, next: SensorSnapshot) -> SensorSnapshot {
        match previous {
            Some(prev) => SensorSnapshot {
                lat: next.lat.or(prev.lat),
                lng: next.lng.or(prev.lng),
                ..next
            },
            None => next,
        }
    }

    /// 地图链接（有坐标时）
    pub fn map_link(&self) -> Option<String> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(format!(
                "https://www.google.com/maps?q={:.6},{:.6}",
                lat, lng
            )),
            _ => None,
        }
    }
}

/// 距离换算请求
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertDistanceRequest {
    pub distance_cm: f64,
}

/// 距离换算响应
#[derive(Debug, Clone, Serialize)]
pub struct ConvertDistanceResponse {
    pub distance_cm: f64,
    pub percent: u8,
    /// 读数是否有效（无效时 percent 为哨兵值 0）
    pub available: bool,
}
