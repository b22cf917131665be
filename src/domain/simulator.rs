//! 模拟水位数据源
//!
//! 在没有真实传感器时，以有界随机游走生成读数。

use super::classifier::TierScheme;
use crate::models::Reading;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

/// 单步最大波动（百分点）
pub const MAX_STEP: f64 = 5.0;

/// 随机游走读数生成器
pub struct ReadingSimulator<R: Rng = StdRng> {
    rng: R,
    scheme: TierScheme,
}

impl ReadingSimulator<StdRng> {
    /// 使用系统熵源
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// 固定种子，序列可复现
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ReadingSimulator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            scheme: TierScheme::simulation(),
        }
    }

    /// 在上一个水位基础上生成下一条读数
    pub fn next_reading(&mut self, device_id: &str, previous_level: f64) -> Reading {
        let level = self.next_level(previous_level);

        Reading {
            id: Uuid::new_v4(),
            timestamp: Utc::now().timestamp_millis(),
            level,
            device_id: device_id.to_string(),
            status: self.scheme.classify(level),
        }
    }

    fn next_level(&mut self, previous_level: f64) -> f64 {
        let previous = if previous_level.is_nan() { 0.0 } else { previous_level };
        let change = self.rng.gen_range(-MAX_STEP..MAX_STEP);
        let level = (previous + change).clamp(0.0, 100.0);
        (level * 100.0).round() / 100.0
    }
}
