//! 统一错误类型定义

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;

/// 应用错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // 资源不存在 (404)
    #[error("资源不存在: {0}")]
    NotFound(String),

    // 请求验证错误 (400)
    #[error("请求参数无效: {0}")]
    ValidationError(String),

    // 存储错误 (500)
    #[error("存储错误: {0}")]
    StorageError(String),

    // 通知发送错误 (502)
    #[error("通知发送失败: {0}")]
    NotificationError(String),

    // 内部错误 (500)
    #[error("内部服务错误: {0}")]
    InternalError(String),

    // 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),
}

/// API 错误响应结构
#[derive(Serialize)]
struct ErrorResponse {
    code: u16,
    error: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotificationError(_) => StatusCode::BAD_GATEWAY,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // 客户端错误原样返回，服务端错误隐藏细节
        let error = match self {
            AppError::NotFound(msg) => msg.clone(),
            AppError::ValidationError(msg) => msg.clone(),
            AppError::StorageError(_) => "数据保存失败".to_string(),
            AppError::NotificationError(_) => "通知服务暂时不可用".to_string(),
            AppError::InternalError(_) => "服务内部错误".to_string(),
            AppError::ConfigError(_) => "服务配置错误".to_string(),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, status = %status, "请求处理错误");
        } else {
            tracing::debug!(error = %self, status = %status, "请求被拒绝");
        }

        HttpResponse::build(status).json(ErrorResponse {
            code: status.as_u16(),
            error,
        })
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
