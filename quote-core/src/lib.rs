pub mod calculations;
pub mod input;
pub mod models;
pub mod wizard;

pub use calculations::{BillBreakdown, DiscountSchedule, PricingEngine, compute_bill, discount_tier};
pub use models::*;
pub use wizard::{Stage, Wizard, WizardEvent};
