//! Bill calculation for a service quote.
//!
//! # Calculation Structure
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | All services: existing services followed by new services |
//! | 2    | Services cost: sum of base prices |
//! | 3    | Devices cost: sum of every attached device charge |
//! | 4    | Apps cost: sum of app charges |
//! | 5    | Tier discount rate, chosen by the number of services |
//! | 6    | Tier discount amount: Step 2 × Step 5 |
//! | 7    | Subtotal: Step 2 − Step 6 + Step 3 + Step 4 |
//! | 8    | Flat discounts: sum of per-service discounts |
//! | 9    | Home internet charges (only with home internet service) |
//! | 10   | Home internet discount (only with service and discount) |
//! | 11   | Total: Step 7 − Step 8 + Step 9 − Step 10 |
//!
//! The tier discount only reduces base service prices. Flat discounts come
//! off the subtotal afterwards, so the two stack.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use quote_core::{DeviceType, Quote, ServiceEdit, ServiceGroup, compute_bill};
//!
//! let mut quote = Quote::new();
//! quote.initialize_existing(1);
//! let existing = quote.service_id_at(ServiceGroup::Existing, 0).unwrap();
//! let added = quote.add_new_service();
//!
//! quote.update_service(existing, ServiceEdit::SetPrice(dec!(50)));
//! quote.update_service(added, ServiceEdit::SetPrice(dec!(30)));
//! quote.update_service(existing, ServiceEdit::SetDevice { device_type: DeviceType::Phone, enabled: true });
//! quote.update_service(existing, ServiceEdit::SetDeviceCost { device_type: DeviceType::Phone, cost: dec!(10) });
//!
//! let bill = compute_bill(&quote);
//!
//! assert_eq!(bill.tier_discount_amount, dec!(4));
//! assert_eq!(bill.total, dec!(86));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::discount::DiscountSchedule;
use crate::Quote;

/// Every intermediate of a bill calculation.
///
/// Values are unrounded; use
/// [`format_money`](crate::calculations::common::format_money) to present them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillBreakdown {
    /// Number of service lines the tier was chosen for.
    pub service_count: usize,

    /// Sum of base service prices (Step 2).
    pub services_cost: Decimal,

    /// Sum of device charges (Step 3).
    pub devices_cost: Decimal,

    /// Sum of app charges (Step 4).
    pub apps_cost: Decimal,

    /// Tier discount as a fraction, e.g. `0.05` (Step 5).
    pub tier_discount_rate: Decimal,

    /// Tier discount as a percentage, e.g. `5`.
    pub tier_discount_percentage: Decimal,

    /// Amount taken off the services cost by the tier discount (Step 6).
    pub tier_discount_amount: Decimal,

    /// Step 7.
    pub subtotal: Decimal,

    /// Sum of per-service flat discounts (Step 8).
    pub flat_discount_total: Decimal,

    /// Step 9.
    pub home_charges: Decimal,

    /// Step 10.
    pub home_discount: Decimal,

    /// Final monthly total (Step 11).
    pub total: Decimal,
}

/// Calculator that prices a [`Quote`] against a discount schedule.
///
/// The engine holds no state besides its schedule, so calculating the same
/// quote twice always yields the same breakdown.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    schedule: DiscountSchedule,
}

impl PricingEngine {
    pub fn new(schedule: DiscountSchedule) -> Self {
        Self { schedule }
    }

    /// Prices `quote` and returns the full breakdown.
    pub fn calculate(
        &self,
        quote: &Quote,
    ) -> BillBreakdown {
        let service_count = quote.service_count();
        let services_cost = self.services_cost(quote);
        let devices_cost = self.devices_cost(quote);
        let apps_cost = self.apps_cost(quote);

        let tier_discount_rate = self.schedule.rate_for(service_count);
        let tier_discount_amount = services_cost * tier_discount_rate;

        let subtotal = self.subtotal(services_cost, tier_discount_amount, devices_cost, apps_cost);
        let flat_discount_total = quote.flat_discount_total();

        let home = quote.home_internet();
        let home_charges = home.effective_charges();
        let home_discount = home.effective_discount();

        let total = subtotal - flat_discount_total + home_charges - home_discount;

        trace!(
            service_count,
            %services_cost,
            %tier_discount_rate,
            %subtotal,
            %total,
            "bill calculated"
        );

        BillBreakdown {
            service_count,
            services_cost,
            devices_cost,
            apps_cost,
            tier_discount_rate,
            tier_discount_percentage: tier_discount_rate * Decimal::ONE_HUNDRED,
            tier_discount_amount,
            subtotal,
            flat_discount_total,
            home_charges,
            home_discount,
            total,
        }
    }

    fn services_cost(
        &self,
        quote: &Quote,
    ) -> Decimal {
        quote.all_services().map(|s| s.price).sum()
    }

    fn devices_cost(
        &self,
        quote: &Quote,
    ) -> Decimal {
        quote.all_services().map(|s| s.devices_cost()).sum()
    }

    fn apps_cost(
        &self,
        quote: &Quote,
    ) -> Decimal {
        quote.all_services().map(|s| s.apps_cost).sum()
    }

    fn subtotal(
        &self,
        services_cost: Decimal,
        tier_discount_amount: Decimal,
        devices_cost: Decimal,
        apps_cost: Decimal,
    ) -> Decimal {
        services_cost - tier_discount_amount + devices_cost + apps_cost
    }
}

/// Prices `quote` with the standard discount schedule.
pub fn compute_bill(quote: &Quote) -> BillBreakdown {
    PricingEngine::default().calculate(quote)
}
