//! 超声波测距换算
//!
//! 传感器安装在水面上方，水位越高测得的距离越短。

use crate::config::CalibrationSettings;
use serde::Serialize;

/// 有效测距上限（cm），超过视为无效读数
pub const MAX_VALID_DISTANCE_CM: f64 = 400.0;

/// 声速（cm/µs）
const SOUND_SPEED_CM_PER_US: f64 = 0.034;

/// 测距结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DistanceMeasurement {
    Level { percent: u8 },
    /// 读数为 0、超出量程或标定无效
    Unavailable,
}

impl DistanceMeasurement {
    /// 无效读数按 0% 处理
    pub fn percent_or_sentinel(&self) -> u8 {
        match self {
            DistanceMeasurement::Level { percent } => *percent,
            DistanceMeasurement::Unavailable => 0,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, DistanceMeasurement::Level { .. })
    }
}

/// 回波时长（µs）换算为距离（cm）
pub fn echo_to_distance_cm(duration_us: f64) -> f64 {
    duration_us * SOUND_SPEED_CM_PER_US / 2.0
}

/// 带显式无效状态的换算
pub fn measure(
    distance: f64,
    empty_distance: f64,
    full_distance: f64,
    max_valid_distance: f64,
) -> DistanceMeasurement {
    if !distance.is_finite() || distance <= 0.0 || distance > max_valid_distance {
        return DistanceMeasurement::Unavailable;
    }
    let span = empty_distance - full_distance;
    if !span.is_finite() || span == 0.0 {
        return DistanceMeasurement::Unavailable;
    }

    // 与固件的整数 map() 一致：先乘后除，向零截断
    let raw = (empty_distance - distance) * 100.0 / span;
    let percent = raw.trunc().clamp(0.0, 100.0) as u8;
    DistanceMeasurement::Level { percent }
}

/// 按配置的标定参数换算
pub fn measure_with(distance: f64, calibration: &CalibrationSettings) -> DistanceMeasurement {
    measure(
        distance,
        calibration.empty_distance_cm,
        calibration.full_distance_cm,
        calibration.max_valid_distance_cm,
    )
}

/// 距离换算为 0-100 的水位百分比，无效读数返回 0
pub fn distance_to_percent(distance: f64, empty_distance: f64, full_distance: f64) -> u8 {
    measure(distance, empty_distance, full_distance, MAX_VALID_DISTANCE_CM).percent_or_sentinel()
}
