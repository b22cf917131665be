//! 设备快照存储

use crate::errors::AppError;
use crate::models::SensorSnapshot;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// 快照存储接口
///
/// 每个设备一条文档，写入时与旧文档合并，后写者覆盖。
#[async_trait]
pub trait SensorStore: Send + Sync {
    async fn upsert(&self, snapshot: SensorSnapshot) -> Result<SensorSnapshot, AppError>;

    async fn get(&self, device_id: &str) -> Result<Option<SensorSnapshot>, AppError>;

    async fn list(&self) -> Result<Vec<SensorSnapshot>, AppError>;

    /// 存活检查
    async fn health_check(&self) -> Result<(), AppError>;
}

/// 内存实现
#[derive(Debug, Clone, Default)]
pub struct InMemorySensorStore {
    data: Arc<RwLock<HashMap<String, SensorSnapshot>>>,
}

impl InMemorySensorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SensorStore for InMemorySensorStore {
    async fn upsert(&self, snapshot: SensorSnapshot) -> Result<SensorSnapshot, AppError> {
        let mut data = self.data.write().await;
        let merged = SensorSnapshot::merge(data.get(&snapshot.device_id), snapshot);
        data.insert(merged.device_id.clone(), merged.clone());
        Ok(merged)
    }

    async fn get(&self, device_id: &str) -> Result<Option<SensorSnapshot>, AppError> {
        Ok(self.data.read().await.get(device_id).cloned())
    }

    async fn list(&self) -> Result<Vec<SensorSnapshot>, AppError> {
        let mut items: Vec<_> = self.data.read().await.values().cloned().collect();
        items.sort_by(|a, b| a.device_id.cmp(&b.device_id));
        Ok(items)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
