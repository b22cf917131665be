//! 数据模型模块

mod common;
mod device;
mod reading;
mod sensor;
mod threshold;

pub use common::*;
pub use device::*;
pub use reading::*;
pub use sensor::*;
pub use threshold::*;
