use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::clamp_amount;
use super::device::{Device, DeviceType};

/// Opaque identifier for a service line, unique within its [`Quote`](super::Quote).
///
/// Only used to correlate view rows with model records; pricing never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ServiceId(pub(crate) u64);

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "svc-{}", self.0)
    }
}

/// One service line item, existing or new.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,

    /// Base monthly charge, subject to the tier discount.
    pub price: Decimal,

    /// Attached devices, at most one per [`DeviceType`], in the order they were enabled.
    pub devices: Vec<Device>,

    /// Flat amount subtracted from the final total.
    pub discount: Decimal,

    pub has_apps: bool,

    /// Total app charges. Always zero while `has_apps` is false.
    pub apps_cost: Decimal,
}

/// A single field-level change to a [`Service`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceEdit {
    SetPrice(Decimal),
    SetDiscount(Decimal),
    SetDevice { device_type: DeviceType, enabled: bool },
    SetDeviceCost { device_type: DeviceType, cost: Decimal },
    SetApps(bool),
    SetAppsCost(Decimal),
}

impl Service {
    /// Creates a zeroed service with no devices and apps disabled.
    pub fn new(id: ServiceId) -> Self {
        Self {
            id,
            price: Decimal::ZERO,
            devices: Vec::new(),
            discount: Decimal::ZERO,
            has_apps: false,
            apps_cost: Decimal::ZERO,
        }
    }

    pub fn device(
        &self,
        device_type: DeviceType,
    ) -> Option<&Device> {
        self.devices.iter().find(|d| d.device_type == device_type)
    }

    pub fn has_device(
        &self,
        device_type: DeviceType,
    ) -> bool {
        self.device(device_type).is_some()
    }

    /// Sum of all attached device charges.
    pub fn devices_cost(&self) -> Decimal {
        self.devices.iter().map(|d| d.cost).sum()
    }

    /// Produces the replacement value for this service after `edit`.
    ///
    /// Returns `None` when the edit has nothing to act on: a cost for a device
    /// that is not attached, or an apps cost while apps are disabled.
    /// Monetary values below zero are clamped to zero.
    pub fn edited(
        &self,
        edit: ServiceEdit,
    ) -> Option<Service> {
        let mut next = self.clone();
        match edit {
            ServiceEdit::SetPrice(price) => next.price = clamp_amount(price),
            ServiceEdit::SetDiscount(discount) => next.discount = clamp_amount(discount),
            ServiceEdit::SetDevice {
                device_type,
                enabled: true,
            } => {
                if !next.has_device(device_type) {
                    next.devices.push(Device::new(device_type));
                }
            }
            ServiceEdit::SetDevice {
                device_type,
                enabled: false,
            } => next.devices.retain(|d| d.device_type != device_type),
            ServiceEdit::SetDeviceCost { device_type, cost } => {
                let device = next
                    .devices
                    .iter_mut()
                    .find(|d| d.device_type == device_type)?;
                device.cost = clamp_amount(cost);
            }
            ServiceEdit::SetApps(enabled) => {
                next.has_apps = enabled;
                if !enabled {
                    next.apps_cost = Decimal::ZERO;
                }
            }
            ServiceEdit::SetAppsCost(cost) => {
                if !next.has_apps {
                    return None;
                }
                next.apps_cost = clamp_amount(cost);
            }
        }
        Some(next)
    }
}
