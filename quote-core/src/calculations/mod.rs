//! Pricing for service quotes.
//!
//! The pricing engine turns a [`Quote`](crate::Quote) snapshot into an
//! itemized [`BillBreakdown`]. Intermediate values keep full precision;
//! rounding happens only when a caller presents them.

pub mod bill;
pub mod common;
pub mod discount;

pub use bill::{BillBreakdown, PricingEngine, compute_bill};
pub use discount::{DiscountSchedule, DiscountScheduleError, DiscountTier, discount_tier};
