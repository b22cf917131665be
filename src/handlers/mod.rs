//! HTTP 处理器模块

mod config_handler;
mod device_handler;
mod health_handler;
mod water_level_handler;

pub use config_handler::*;
pub use device_handler::*;
pub use health_handler::*;
pub use water_level_handler::*;
