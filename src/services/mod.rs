//! 业务服务模块

pub mod notification_service;
mod simulator_service;
mod threshold_service;
mod water_level_service;

pub use notification_service::{
    build_notifier, LevelAlert, NoopNotifier, NotificationSender, TelegramNotifier,
};
pub use simulator_service::SimulatorService;
pub use threshold_service::ThresholdService;
pub use water_level_service::WaterLevelService;
