//! 通知服务模块
//!
//! 水位等级变化时通过 Telegram Bot 推送告警

use crate::config::{NotificationSettings, Settings};
use crate::errors::AppError;
use crate::models::{SensorSnapshot, SeverityTier};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// 等级变化告警
#[derive(Debug, Clone)]
pub struct LevelAlert {
    pub chat_id: String,
    pub snapshot: SensorSnapshot,
    pub previous: Option<SeverityTier>,
}

impl LevelAlert {
    /// 渲染 HTML 消息
    pub fn render(&self) -> String {
        let mut message = String::new();
        if self.snapshot.status.is_alarming() {
            message.push_str("⚠️ <b>CẢNH BÁO LŨ LỤT!</b>\n");
        } else {
            message.push_str("ℹ️ <b>Cập nhật mực nước</b>\n");
        }
        message.push_str("---------------------\n");
        message.push_str(&format!("📟 Thiết bị: {}\n", self.snapshot.device_id));
        message.push_str(&format!("🌊 Mức nước: {:.1}%\n", self.snapshot.percent));
        message.push_str(&format!(
            "📊 Trạng thái: {} ({})\n",
            self.snapshot.status,
            self.snapshot.status.alert_label()
        ));
        match self.snapshot.map_link() {
            Some(link) => message.push_str(&format!("📍 Vị trí: {}\n", link)),
            None => message.push_str("📍 Vị trí: không xác định\n"),
        }
        message
    }
}

/// 通知发送器trait（用于依赖注入）
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send_level_alert(&self, alert: &LevelAlert) -> Result<(), AppError>;
}

/// 未启用通知时使用
pub struct NoopNotifier;

#[async_trait]
impl NotificationSender for NoopNotifier {
    async fn send_level_alert(&self, alert: &LevelAlert) -> Result<(), AppError> {
        tracing::debug!(
            device_id = %alert.snapshot.device_id,
            status = %alert.snapshot.status,
            "通知未启用，跳过发送"
        );
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: String,
    parse_mode: &'static str,
}

#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram Bot 通知
pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    bot_token: SecretString,
}

impl TelegramNotifier {
    pub fn new(settings: &NotificationSettings, bot_token: SecretString) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e| AppError::ConfigError(format!("HTTP 客户端初始化失败: {}", e)))?;

        Ok(Self {
            client,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            bot_token,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.bot_token.expose_secret())
    }
}

#[async_trait]
impl NotificationSender for TelegramNotifier {
    async fn send_level_alert(&self, alert: &LevelAlert) -> Result<(), AppError> {
        let body = SendMessageRequest {
            chat_id: &alert.chat_id,
            text: alert.render(),
            parse_mode: "HTML",
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                // reqwest 错误里带有 URL，不能直接打印（含 token）
                tracing::error!(timeout = e.is_timeout(), "Telegram 请求失败");
                AppError::NotificationError("Telegram 请求失败".to_string())
            })?;

        let status = response.status();
        let parsed: TelegramResponse = response.json().await.map_err(|_| {
            AppError::NotificationError(format!("Telegram 响应解析失败 (HTTP {})", status))
        })?;

        if !parsed.ok {
            return Err(AppError::NotificationError(
                parsed.description.unwrap_or_else(|| format!("HTTP {}", status)),
            ));
        }

        tracing::info!(
            device_id = %alert.snapshot.device_id,
            status = %alert.snapshot.status,
            previous = ?alert.previous,
            "告警通知已发送"
        );
        Ok(())
    }
}

/// 按配置选择通知实现
pub fn build_notifier(settings: &Settings) -> Result<Arc<dyn NotificationSender>, AppError> {
    if !settings.notification.enabled {
        return Ok(Arc::new(NoopNotifier));
    }

    match Settings::telegram_bot_token() {
        Some(token) => Ok(Arc::new(TelegramNotifier::new(&settings.notification, token)?)),
        None => {
            tracing::warn!("通知已启用但 TELEGRAM_BOT_TOKEN 未设置");
            Ok(Arc::new(NoopNotifier))
        }
    }
}
