//! 预警阈值配置模型

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 运行时阈值配置
///
/// `min_threshold <= max_threshold` 在更新时校验，分级函数本身不做假设。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThresholdConfig {
    pub min_threshold: f64,
    pub max_threshold: f64,
    /// 超过该值即为 CRITICAL，`None` 时退化为三级
    pub critical_level: Option<f64>,
    pub enable_alerts: bool,
    pub telegram_chat_id: String,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            min_threshold: 10.0,
            max_threshold: 80.0,
            critical_level: Some(90.0),
            enable_alerts: true,
            telegram_chat_id: String::new(),
        }
    }
}

/// 更新阈值请求
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateThresholdRequest {
    #[validate(range(min = 0.0, max = 100.0, message = "最低阈值应在 0-100 之间"))]
    pub min_threshold: Option<f64>,

    #[validate(range(min = 0.0, max = 100.0, message = "最高阈值应在 0-100 之间"))]
    pub max_threshold: Option<f64>,

    #[validate(range(min = 0.0, max = 100.0, message = "临界水位应在 0-100 之间"))]
    pub critical_level: Option<f64>,

    /// 显式关闭 CRITICAL 等级
    #[serde(default)]
    pub disable_critical: bool,

    pub enable_alerts: Option<bool>,

    #[validate(length(max = 64, message = "Telegram Chat ID 过长"))]
    pub telegram_chat_id: Option<String>,
}

impl ThresholdConfig {
    /// 合并更新请求，返回新配置
    ///
    /// 合并后 `min_threshold > max_threshold` 视为无效。
    pub fn merged(&self, request: &UpdateThresholdRequest) -> Result<Self, String> {
        let mut next = self.clone();

        if let Some(min) = request.min_threshold {
            next.min_threshold = min;
        }
        if let Some(max) = request.max_threshold {
            next.max_threshold = max;
        }
        if request.disable_critical {
            next.critical_level = None;
        } else if let Some(critical) = request.critical_level {
            next.critical_level = Some(critical);
        }
        if let Some(enabled) = request.enable_alerts {
            next.enable_alerts = enabled;
        }
        if let Some(ref chat_id) = request.telegram_chat_id {
            next.telegram_chat_id = chat_id.trim().to_string();
        }

        if next.min_threshold > next.max_threshold {
            return Err(format!(
                "最低阈值 ({}) 不能高于最高阈值 ({})",
                next.min_threshold, next.max_threshold
            ));
        }

        Ok(next)
    }
}
