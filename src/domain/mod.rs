//! 水位核心计算：分级、测距换算、模拟数据源
//!
//! 本模块全部为纯函数或仅持有自身随机源的值类型，不依赖任何共享状态。

pub mod classifier;
pub mod converter;
pub mod simulator;

pub use classifier::{classify, TierBoundary, TierScheme, DEFAULT_CRITICAL_LEVEL};
pub use converter::{
    distance_to_percent, echo_to_distance_cm, measure, measure_with, DistanceMeasurement,
    MAX_VALID_DISTANCE_CM,
};
pub use simulator::ReadingSimulator;
