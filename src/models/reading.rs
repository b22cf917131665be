//! 水位读数模型

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 严重等级
///
/// 按危险程度升序排列，可直接比较大小。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeverityTier {
    Low,
    Normal,
    High,
    Critical,
}

impl SeverityTier {
    /// 三段式显示标签（设备端指示灯使用的叫法）
    pub fn alert_label(&self) -> &'static str {
        match self {
            SeverityTier::Low => "SAFE",
            SeverityTier::Normal => "WARNING",
            SeverityTier::High | SeverityTier::Critical => "DANGER",
        }
    }

    /// 是否需要告警
    pub fn is_alarming(&self) -> bool {
        matches!(self, SeverityTier::High | SeverityTier::Critical)
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeverityTier::Low => write!(f, "LOW"),
            SeverityTier::Normal => write!(f, "NORMAL"),
            SeverityTier::High => write!(f, "HIGH"),
            SeverityTier::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// 单次水位观测
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub id: Uuid,
    /// 毫秒级 Unix 时间戳
    pub timestamp: i64,
    /// 水位百分比，语义上位于 [0, 100]
    pub level: f64,
    pub device_id: String,
    pub status: SeverityTier,
}

/// 历史查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    /// 按当前阈值重新计算状态
    #[serde(default)]
    pub recompute: bool,
    pub limit: Option<usize>,
}
