//! 阈值配置服务

use crate::domain::TierScheme;
use crate::errors::AppError;
use crate::models::{ThresholdConfig, UpdateThresholdRequest};
use tokio::sync::RwLock;
use validator::Validate;

/// 持有当前生效的阈值配置
///
/// 无版本控制，后写者覆盖。
pub struct ThresholdService {
    config: RwLock<ThresholdConfig>,
}

impl ThresholdService {
    pub fn new(initial: ThresholdConfig) -> Self {
        Self {
            config: RwLock::new(initial),
        }
    }

    /// 当前配置快照
    pub async fn current(&self) -> ThresholdConfig {
        self.config.read().await.clone()
    }

    /// 当前配置对应的分级方案
    pub async fn scheme(&self) -> TierScheme {
        TierScheme::from_config(&*self.config.read().await)
    }

    /// 更新配置
    pub async fn update(&self, request: UpdateThresholdRequest) -> Result<ThresholdConfig, AppError> {
        request.validate()?;

        let mut config = self.config.write().await;
        let next = config.merged(&request).map_err(AppError::ValidationError)?;

        tracing::info!(
            min_threshold = next.min_threshold,
            max_threshold = next.max_threshold,
            critical_level = ?next.critical_level,
            enable_alerts = next.enable_alerts,
            "阈值配置已更新"
        );

        *config = next.clone();
        Ok(next)
    }
}
