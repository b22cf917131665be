//! 测试辅助工具

#![allow(dead_code)]

use floodguard::config::CalibrationSettings;
use floodguard::models::{ThresholdConfig, WaterLevelReport};
use floodguard::repositories::{InMemorySensorStore, ReadingRepository, SensorStore};
use floodguard::services::{NotificationSender, ThresholdService, WaterLevelService};
use std::sync::Arc;

/// 测试用 Telegram Chat ID
pub const TEST_CHAT_ID: &str = "8481271735";

/// 启用告警的默认阈值
pub fn alerting_config() -> ThresholdConfig {
    ThresholdConfig {
        telegram_chat_id: TEST_CHAT_ID.to_string(),
        ..ThresholdConfig::default()
    }
}

/// 组装服务
pub fn build_services(
    store: Arc<dyn SensorStore>,
    notifier: Arc<dyn NotificationSender>,
    config: ThresholdConfig,
) -> (Arc<ThresholdService>, Arc<WaterLevelService>) {
    let thresholds = Arc::new(ThresholdService::new(config));
    let water_level = Arc::new(WaterLevelService::new(
        store,
        ReadingRepository::new(5),
        thresholds.clone(),
        notifier,
        CalibrationSettings::default(),
    ));
    (thresholds, water_level)
}

/// 使用内存存储组装服务
pub fn build_in_memory(
    notifier: Arc<dyn NotificationSender>,
) -> (Arc<ThresholdService>, Arc<WaterLevelService>) {
    build_services(Arc::new(InMemorySensorStore::new()), notifier, alerting_config())
}

/// 生成上报请求
pub fn report(device_id: &str, percent: f64) -> WaterLevelReport {
    WaterLevelReport {
        device_id: Some(device_id.to_string()),
        water_level_percent: percent,
        water_level_cm: None,
        latitude: None,
        longitude: None,
    }
}

/// 断言结果是成功的
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(val) => val,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// 断言结果是错误的
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(val) => panic!("Expected Err, got Ok: {:?}", val),
            Err(e) => e,
        }
    };
}
