//! 数据仓库模块

mod reading_repo;
mod sensor_repo;

pub use reading_repo::*;
pub use sensor_repo::*;
