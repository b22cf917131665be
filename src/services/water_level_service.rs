//! 水位业务服务

use crate::config::CalibrationSettings;
use crate::domain::measure_with;
use crate::errors::AppError;
use crate::models::{
    ConvertDistanceResponse, HistoryQuery, Reading, SensorSnapshot, SeverityTier,
    WaterLevelReport,
};
use crate::repositories::{ReadingRepository, SensorStore};
use crate::services::notification_service::{LevelAlert, NotificationSender};
use crate::services::ThresholdService;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;
use validator::Validate;

/// 水位业务服务
pub struct WaterLevelService {
    sensor_store: Arc<dyn SensorStore>,
    readings: ReadingRepository,
    thresholds: Arc<ThresholdService>,
    notifier: Arc<dyn NotificationSender>,
    calibration: CalibrationSettings,
    /// 每个设备最近一次成功通知的等级
    notified: Mutex<HashMap<String, SeverityTier>>,
}

impl WaterLevelService {
    pub fn new(
        sensor_store: Arc<dyn SensorStore>,
        readings: ReadingRepository,
        thresholds: Arc<ThresholdService>,
        notifier: Arc<dyn NotificationSender>,
        calibration: CalibrationSettings,
    ) -> Self {
        Self {
            sensor_store,
            readings,
            thresholds,
            notifier,
            calibration,
            notified: Mutex::new(HashMap::new()),
        }
    }

    /// 处理设备上报
    ///
    /// 状态总是按当前阈值重新计算，不信任设备端给出的等级。
    pub async fn ingest(&self, report: WaterLevelReport) -> Result<SensorSnapshot, AppError> {
        report.validate()?;

        let device_id = report.resolved_device_id().to_string();
        let status = self.thresholds.scheme().await.classify(report.water_level_percent);
        let now = Utc::now();

        tracing::info!(
            device_id = %device_id,
            percent = report.water_level_percent,
            status = %status,
            "收到水位上报"
        );

        let snapshot = self
            .sensor_store
            .upsert(SensorSnapshot {
                device_id: device_id.clone(),
                percent: report.water_level_percent,
                cm: report.water_level_cm.unwrap_or(0.0),
                lat: report.latitude,
                lng: report.longitude,
                status,
                last_update: now,
            })
            .await?;

        self.readings
            .push(Reading {
                id: Uuid::new_v4(),
                timestamp: now.timestamp_millis(),
                level: report.water_level_percent,
                device_id,
                status,
            })
            .await;

        self.notify_on_change(&snapshot).await;

        Ok(snapshot)
    }

    /// 记录模拟数据源产生的读数（不触发通知）
    pub async fn record_simulated(&self, reading: Reading) -> Result<(), AppError> {
        let existing = self.sensor_store.get(&reading.device_id).await?;
        let last_update = DateTime::from_timestamp_millis(reading.timestamp).unwrap_or_else(Utc::now);

        self.sensor_store
            .upsert(SensorSnapshot {
                device_id: reading.device_id.clone(),
                percent: reading.level,
                cm: existing.as_ref().map(|s| s.cm).unwrap_or(0.0),
                lat: None,
                lng: None,
                status: reading.status,
                last_update,
            })
            .await?;

        self.readings.push(reading).await;
        Ok(())
    }

    /// 最近一条读数的水位（模拟数据源的起点）
    pub async fn last_level(&self, device_id: &str) -> Option<f64> {
        self.readings.latest(device_id).await.map(|r| r.level)
    }

    /// 获取设备最新快照
    pub async fn get_latest(&self, device_id: &str) -> Result<SensorSnapshot, AppError> {
        self.sensor_store
            .get(device_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("设备暂无数据: {}", device_id)))
    }

    /// 所有设备快照
    pub async fn list_latest(&self) -> Result<Vec<SensorSnapshot>, AppError> {
        self.sensor_store.list().await
    }

    /// 查询历史窗口（最新在前）
    pub async fn get_history(&self, device_id: &str, query: HistoryQuery) -> Vec<Reading> {
        let mut history = self.readings.history(device_id).await;

        if let Some(limit) = query.limit {
            history.truncate(limit);
        }

        if query.recompute {
            let scheme = self.thresholds.scheme().await;
            for reading in history.iter_mut() {
                reading.status = scheme.classify(reading.level);
            }
        }

        history
    }

    /// 按配置的标定参数换算距离
    pub fn convert_distance(&self, distance_cm: f64) -> ConvertDistanceResponse {
        let measurement = measure_with(distance_cm, &self.calibration);
        ConvertDistanceResponse {
            distance_cm,
            percent: measurement.percent_or_sentinel(),
            available: measurement.is_available(),
        }
    }

    /// 检查存储是否可用
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.sensor_store.health_check().await
    }

    /// 等级变化时发送通知，失败不影响上报结果
    async fn notify_on_change(&self, snapshot: &SensorSnapshot) {
        let config = self.thresholds.current().await;
        if !config.enable_alerts || config.telegram_chat_id.is_empty() {
            return;
        }

        // 发送期间不持有锁
        let previous = {
            let notified = self.notified.lock().await;
            let previous = notified.get(&snapshot.device_id).copied();
            if previous == Some(snapshot.status) {
                return;
            }
            previous
        };

        let alert = LevelAlert {
            chat_id: config.telegram_chat_id.clone(),
            snapshot: snapshot.clone(),
            previous,
        };

        match self.notifier.send_level_alert(&alert).await {
            Ok(()) => {
                self.notified
                    .lock()
                    .await
                    .insert(snapshot.device_id.clone(), snapshot.status);
            }
            Err(e) => {
                // 下次上报时重试
                tracing::error!(
                    error = %e,
                    device_id = %snapshot.device_id,
                    "通知发送失败"
                );
            }
        }
    }
}
