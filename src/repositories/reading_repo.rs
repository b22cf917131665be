//! 最近读数窗口

use crate::models::Reading;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

/// 固定容量的读数窗口，满时淘汰最旧的一条
#[derive(Debug, Clone)]
pub struct ReadingWindow {
    capacity: usize,
    items: VecDeque<Reading>,
}

impl ReadingWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            items: VecDeque::with_capacity(capacity),
        }
    }

    /// 追加读数，返回被淘汰的读数
    pub fn push(&mut self, reading: Reading) -> Option<Reading> {
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(reading);
        evicted
    }

    pub fn latest(&self) -> Option<&Reading> {
        self.items.back()
    }

    /// 最新的在前
    pub fn newest_first(&self) -> Vec<Reading> {
        self.items.iter().rev().cloned().collect()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    fn capacity(&self) -> usize {
        self.capacity
    }
}

/// 按设备分组的读数窗口
#[derive(Debug, Clone)]
pub struct ReadingRepository {
    capacity: usize,
    windows: Arc<RwLock<HashMap<String, ReadingWindow>>>,
}

impl ReadingRepository {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            windows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn push(&self, reading: Reading) {
        let mut windows = self.windows.write().await;
        windows
            .entry(reading.device_id.clone())
            .or_insert_with(|| ReadingWindow::new(self.capacity))
            .push(reading);
    }

    pub async fn latest(&self, device_id: &str) -> Option<Reading> {
        let windows = self.windows.read().await;
        windows.get(device_id).and_then(|w| w.latest().cloned())
    }

    pub async fn history(&self, device_id: &str) -> Vec<Reading> {
        let windows = self.windows.read().await;
        windows
            .get(device_id)
            .map(|w| w.newest_first())
            .unwrap_or_default()
    }
}
