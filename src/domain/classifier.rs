//! 水位分级
//!
//! 所有分级规则都表示为同一种结构：一个基础等级加一组按水位升序排列的边界。
//! 水位达到的最高边界决定最终等级。

use crate::models::{SeverityTier, ThresholdConfig};

/// 分级边界
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierBoundary {
    pub at: f64,
    /// `true` 时 `level >= at` 即达到，否则需要 `level > at`
    pub inclusive: bool,
    pub tier: SeverityTier,
}

impl TierBoundary {
    pub const fn inclusive(at: f64, tier: SeverityTier) -> Self {
        Self { at, inclusive: true, tier }
    }

    pub const fn exclusive(at: f64, tier: SeverityTier) -> Self {
        Self { at, inclusive: false, tier }
    }

    fn reached_by(&self, level: f64) -> bool {
        if self.inclusive {
            level >= self.at
        } else {
            level > self.at
        }
    }
}

/// 分级方案
#[derive(Debug, Clone, PartialEq)]
pub struct TierScheme {
    base: SeverityTier,
    boundaries: Vec<TierBoundary>,
}

impl TierScheme {
    pub fn new(base: SeverityTier, boundaries: Vec<TierBoundary>) -> Self {
        Self { base, boundaries }
    }

    /// 由运维配置的阈值构造：
    /// `< min` LOW，`[min, max)` NORMAL，`>= max` HIGH，`> critical` CRITICAL
    pub fn from_thresholds(min_threshold: f64, max_threshold: f64, critical_level: Option<f64>) -> Self {
        let mut boundaries = vec![
            TierBoundary::inclusive(min_threshold, SeverityTier::Normal),
            TierBoundary::inclusive(max_threshold, SeverityTier::High),
        ];
        if let Some(critical) = critical_level {
            boundaries.push(TierBoundary::exclusive(critical, SeverityTier::Critical));
        }
        Self::new(SeverityTier::Low, boundaries)
    }

    pub fn from_config(config: &ThresholdConfig) -> Self {
        Self::from_thresholds(config.min_threshold, config.max_threshold, config.critical_level)
    }

    /// 模拟数据源使用的固定四级方案：`<10` LOW，`>80` HIGH，`>90` CRITICAL
    pub fn simulation() -> Self {
        Self::new(
            SeverityTier::Low,
            vec![
                TierBoundary::inclusive(10.0, SeverityTier::Normal),
                TierBoundary::exclusive(80.0, SeverityTier::High),
                TierBoundary::exclusive(90.0, SeverityTier::Critical),
            ],
        )
    }

    pub fn boundaries(&self) -> &[TierBoundary] {
        &self.boundaries
    }

    /// 对任意实数分级，NaN 落在基础等级
    pub fn classify(&self, level: f64) -> SeverityTier {
        self.boundaries
            .iter()
            .rev()
            .find(|b| b.reached_by(level))
            .map(|b| b.tier)
            .unwrap_or(self.base)
    }
}

/// 按阈值对水位分级（默认临界水位 90）
pub fn classify(level: f64, min_threshold: f64, max_threshold: f64) -> SeverityTier {
    TierScheme::from_thresholds(min_threshold, max_threshold, Some(DEFAULT_CRITICAL_LEVEL)).classify(level)
}

pub const DEFAULT_CRITICAL_LEVEL: f64 = 90.0;
