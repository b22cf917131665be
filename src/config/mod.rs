//! 配置管理模块

mod settings;

pub use settings::{
	Settings,
	ServerSettings,
	LoggingSettings,
	ThresholdSettings,
	CalibrationSettings,
	SimulatorSettings,
	HistorySettings,
	NotificationSettings,
};
