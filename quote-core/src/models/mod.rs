use rust_decimal::Decimal;

mod device;
mod home_internet;
mod quote;
mod service;

pub use device::{Device, DeviceType};
pub use home_internet::{HomeInternet, HomeInternetEdit};
pub use quote::{Quote, ServiceGroup};
pub use service::{Service, ServiceEdit, ServiceId};

/// Largest value any single monetary field holds. Entries above it are capped.
// 1_000_000_000_000_000 (scale 0); `Decimal::new` is not `const`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x3_8D7E, 0, false, 0);

/// Confines an entered amount to `0..=MAX_AMOUNT`.
pub(crate) fn clamp_amount(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, MAX_AMOUNT)
}
