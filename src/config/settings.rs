//! 应用配置加载和管理

use crate::models::ThresholdConfig;
use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use std::env;

/// 应用配置结构
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub thresholds: ThresholdSettings,
    #[serde(default)]
    pub calibration: CalibrationSettings,
    #[serde(default)]
    pub simulator: SimulatorSettings,
    #[serde(default)]
    pub history: HistorySettings,
    #[serde(default)]
    pub notification: NotificationSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// 0 表示按 CPU 核数
    #[serde(default)]
    pub workers: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 3000 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `pretty` 或 `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info,floodguard=debug".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

/// 启动时的初始阈值，运行期可通过 API 修改
#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdSettings {
    #[serde(default = "default_min_threshold")]
    pub min_threshold: f64,
    #[serde(default = "default_max_threshold")]
    pub max_threshold: f64,
    #[serde(default = "default_critical_level")]
    pub critical_level: Option<f64>,
    #[serde(default = "default_true")]
    pub enable_alerts: bool,
    #[serde(default)]
    pub telegram_chat_id: String,
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            min_threshold: default_min_threshold(),
            max_threshold: default_max_threshold(),
            critical_level: default_critical_level(),
            enable_alerts: true,
            telegram_chat_id: String::new(),
        }
    }
}

impl From<&ThresholdSettings> for ThresholdConfig {
    fn from(s: &ThresholdSettings) -> Self {
        ThresholdConfig {
            min_threshold: s.min_threshold,
            max_threshold: s.max_threshold,
            critical_level: s.critical_level,
            enable_alerts: s.enable_alerts,
            telegram_chat_id: s.telegram_chat_id.clone(),
        }
    }
}

fn default_min_threshold() -> f64 { 10.0 }
fn default_max_threshold() -> f64 { 80.0 }
fn default_critical_level() -> Option<f64> { Some(90.0) }
fn default_true() -> bool { true }

/// 超声波传感器标定
#[derive(Debug, Clone, Deserialize)]
pub struct CalibrationSettings {
    /// 0% 水位对应的距离
    #[serde(default = "default_empty_distance")]
    pub empty_distance_cm: f64,
    /// 100% 水位对应的距离
    #[serde(default = "default_full_distance")]
    pub full_distance_cm: f64,
    #[serde(default = "default_max_valid_distance")]
    pub max_valid_distance_cm: f64,
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            empty_distance_cm: default_empty_distance(),
            full_distance_cm: default_full_distance(),
            max_valid_distance_cm: default_max_valid_distance(),
        }
    }
}

fn default_empty_distance() -> f64 { 200.0 }
fn default_full_distance() -> f64 { 20.0 }
fn default_max_valid_distance() -> f64 { 400.0 }

/// 模拟数据源配置
#[derive(Debug, Clone, Deserialize)]
pub struct SimulatorSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// 固定种子（用于演示复现）
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_initial_level")]
    pub initial_level: f64,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_ms: default_interval_ms(),
            seed: None,
            initial_level: default_initial_level(),
        }
    }
}

fn default_interval_ms() -> u64 { 3000 }
fn default_initial_level() -> f64 { 40.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct HistorySettings {
    /// 每个设备保留的最近读数条数
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            capacity: default_history_capacity(),
        }
    }
}

fn default_history_capacity() -> usize { 50 }

/// Telegram 通知配置
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_telegram_api")]
    pub api_base: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            api_base: default_telegram_api(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_telegram_api() -> String { "https://api.telegram.org".to_string() }
fn default_timeout_seconds() -> u64 { 10 }

impl Settings {
    /// 从配置文件和环境变量加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // 环境变量覆盖，前缀 FLOODGUARD，分隔符 __
            .add_source(
                Environment::with_prefix("FLOODGUARD")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// 启动前的一致性检查
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thresholds.min_threshold > self.thresholds.max_threshold {
            return Err(ConfigError::Message(
                "thresholds.min_threshold 不能高于 thresholds.max_threshold".to_string(),
            ));
        }
        if self.calibration.full_distance_cm >= self.calibration.empty_distance_cm {
            return Err(ConfigError::Message(
                "calibration.full_distance_cm 必须小于 calibration.empty_distance_cm".to_string(),
            ));
        }
        if self.history.capacity == 0 {
            return Err(ConfigError::Message("history.capacity 必须大于 0".to_string()));
        }
        if self.simulator.interval_ms == 0 {
            return Err(ConfigError::Message("simulator.interval_ms 必须大于 0".to_string()));
        }
        Ok(())
    }

    /// 获取 Telegram Bot Token（从环境变量）
    pub fn telegram_bot_token() -> Option<SecretString> {
        env::var("TELEGRAM_BOT_TOKEN")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(SecretString::new)
    }

    /// 获取服务器地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
