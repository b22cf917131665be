//! FloodGuard - 洪水水位监测后端服务
//!
//! 支持：
//! - 设备水位上报与按阈值分级
//! - 超声波测距换算
//! - 模拟数据源（随机游走）
//! - 阈值配置与 Telegram 告警

pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use errors::AppError;
