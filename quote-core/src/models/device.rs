use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    Phone,
    Tablet,
}

impl DeviceType {
    pub const ALL: [DeviceType; 2] = [DeviceType::Phone, DeviceType::Tablet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Phone => "Phone",
            Self::Tablet => "Tablet",
        }
    }
}

/// A monthly device charge attached to a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub device_type: DeviceType,
    pub cost: Decimal,
}

impl Device {
    pub fn new(device_type: DeviceType) -> Self {
        Self {
            device_type,
            cost: Decimal::ZERO,
        }
    }
}
