//! 监测站点模型

use serde::Serialize;

/// 监测站点
///
/// 站点在配置期固定，运行期不会增删。
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Device {
    pub id: &'static str,
    pub name: &'static str,
    pub location: &'static str,
}

/// 默认站点清单
pub static DEVICE_REGISTRY: &[Device] = &[
    Device {
        id: "tank-001",
        name: "Device tank-001 (Bể chứa A)",
        location: "Zone A",
    },
    Device {
        id: "river-002",
        name: "Device river-002 (Sông Hương)",
        location: "Zone B",
    },
    Device {
        id: "sewer-003",
        name: "Device sewer-003 (Cống thoát 3)",
        location: "Zone C",
    },
];

/// 按 ID 查找站点
pub fn find_device(device_id: &str) -> Option<&'static Device> {
    DEVICE_REGISTRY.iter().find(|d| d.id == device_id)
}
