//! 模拟数据源服务
//!
//! 定时为每个登记的设备生成一条随机游走读数，用于演示和无硬件调试。

use crate::config::SimulatorSettings;
use crate::domain::ReadingSimulator;
use crate::errors::AppError;
use crate::models::{Reading, DEVICE_REGISTRY};
use crate::services::WaterLevelService;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

pub struct SimulatorService {
    simulator: Mutex<ReadingSimulator>,
    water_level_service: Arc<WaterLevelService>,
    settings: SimulatorSettings,
}

impl SimulatorService {
    pub fn new(settings: SimulatorSettings, water_level_service: Arc<WaterLevelService>) -> Self {
        let simulator = match settings.seed {
            Some(seed) => ReadingSimulator::seeded(seed),
            None => ReadingSimulator::from_entropy(),
        };

        Self {
            simulator: Mutex::new(simulator),
            water_level_service,
            settings,
        }
    }

    /// 为所有设备各生成一条读数
    ///
    /// 同一设备的调用在锁内串行执行。
    pub async fn tick(&self) -> Result<Vec<Reading>, AppError> {
        let mut simulator = self.simulator.lock().await;
        let mut produced = Vec::with_capacity(DEVICE_REGISTRY.len());

        for device in DEVICE_REGISTRY {
            let previous = self
                .water_level_service
                .last_level(device.id)
                .await
                .unwrap_or(self.settings.initial_level);

            let reading = simulator.next_reading(device.id, previous);
            tracing::debug!(
                device_id = %reading.device_id,
                level = reading.level,
                status = %reading.status,
                "模拟读数"
            );

            self.water_level_service.record_simulated(reading.clone()).await?;
            produced.push(reading);
        }

        Ok(produced)
    }

    /// 后台循环，直到进程退出
    pub async fn run(self: Arc<Self>) {
        let mut interval = tokio::time::interval(Duration::from_millis(self.settings.interval_ms));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        tracing::info!(interval_ms = self.settings.interval_ms, "模拟数据源已启动");

        loop {
            interval.tick().await;
            if let Err(e) = self.tick().await {
                tracing::warn!(error = %e, "模拟读数写入失败");
            }
        }
    }
}
