//! Tiered multi-service discount.
//!
//! The tier discount is a percentage of the summed base service prices,
//! chosen solely by how many service lines the quote holds. It does not
//! matter whether the lines are existing or new, or what they cost.
//!
//! | Services | Rate |
//! |----------|------|
//! | 0-1      | 0%   |
//! | 2        | 5%   |
//! | 3        | 10%  |
//! | 4        | 15%  |
//! | 5+       | 20%  |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors found while validating a [`DiscountSchedule`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountScheduleError {
    /// A tier rate must be a fraction between 0 and 1.
    #[error("discount rate must be between 0 and 1, got {0}")]
    InvalidRate(Decimal),

    /// Tier thresholds must be strictly increasing.
    #[error("tier thresholds must increase, got {next} after {previous}")]
    UnorderedTiers { previous: usize, next: usize },
}

/// One step of the schedule: `rate` applies from `min_services` lines upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountTier {
    pub min_services: usize,
    pub rate: Decimal,
}

/// Step function from service count to discount rate.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::DiscountSchedule;
///
/// let schedule = DiscountSchedule::default();
///
/// assert_eq!(schedule.rate_for(1), dec!(0));
/// assert_eq!(schedule.rate_for(3), dec!(0.10));
/// assert_eq!(schedule.rate_for(12), dec!(0.20));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountSchedule {
    pub tiers: Vec<DiscountTier>,
}

impl Default for DiscountSchedule {
    fn default() -> Self {
        // rates are in hundredths
        let tier = |min_services, hundredths| DiscountTier {
            min_services,
            rate: Decimal::new(hundredths, 2),
        };
        Self {
            tiers: vec![tier(2, 5), tier(3, 10), tier(4, 15), tier(5, 20)],
        }
    }
}

impl DiscountSchedule {
    /// A schedule that never discounts.
    pub fn none() -> Self {
        Self { tiers: Vec::new() }
    }

    /// Checks that every rate is in [0, 1] and thresholds strictly increase.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use quote_core::calculations::{DiscountSchedule, DiscountScheduleError, DiscountTier};
    ///
    /// let schedule = DiscountSchedule {
    ///     tiers: vec![DiscountTier { min_services: 2, rate: dec!(1.5) }],
    /// };
    ///
    /// assert_eq!(schedule.validate(), Err(DiscountScheduleError::InvalidRate(dec!(1.5))));
    /// ```
    pub fn validate(&self) -> Result<(), DiscountScheduleError> {
        for tier in &self.tiers {
            if tier.rate < Decimal::ZERO || tier.rate > Decimal::ONE {
                return Err(DiscountScheduleError::InvalidRate(tier.rate));
            }
        }
        for pair in self.tiers.windows(2) {
            if pair[1].min_services <= pair[0].min_services {
                return Err(DiscountScheduleError::UnorderedTiers {
                    previous: pair[0].min_services,
                    next: pair[1].min_services,
                });
            }
        }
        Ok(())
    }

    /// Returns the rate of the highest tier whose threshold `service_count` reaches,
    /// or zero when no tier applies.
    pub fn rate_for(
        &self,
        service_count: usize,
    ) -> Decimal {
        self.tiers
            .iter()
            .filter(|tier| tier.min_services <= service_count)
            .max_by_key(|tier| tier.min_services)
            .map(|tier| tier.rate)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Tier discount rate for `service_count` lines under the standard schedule.
pub fn discount_tier(service_count: usize) -> Decimal {
    DiscountSchedule::default().rate_for(service_count)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // default schedule
    // =========================================================================

    #[test]
    fn no_discount_for_zero_or_one_service() {
        assert_eq!(discount_tier(0), dec!(0));
        assert_eq!(discount_tier(1), dec!(0));
    }

    #[test]
    fn each_tier_step() {
        assert_eq!(discount_tier(2), dec!(0.05));
        assert_eq!(discount_tier(3), dec!(0.10));
        assert_eq!(discount_tier(4), dec!(0.15));
        assert_eq!(discount_tier(5), dec!(0.20));
    }

    #[test]
    fn caps_at_twenty_percent() {
        for count in [6, 10, 50, 1_000] {
            assert_eq!(discount_tier(count), dec!(0.20), "count {count}");
        }
    }

    #[test]
    fn default_schedule_is_valid() {
        assert_eq!(DiscountSchedule::default().validate(), Ok(()));
    }

    // =========================================================================
    // custom schedules
    // =========================================================================

    #[test]
    fn empty_schedule_never_discounts() {
        let schedule = DiscountSchedule::none();

        assert_eq!(schedule.rate_for(7), dec!(0));
        assert_eq!(schedule.validate(), Ok(()));
    }

    #[test]
    fn custom_schedule_steps() {
        let schedule = DiscountSchedule {
            tiers: vec![
                DiscountTier {
                    min_services: 3,
                    rate: dec!(0.08),
                },
                DiscountTier {
                    min_services: 6,
                    rate: dec!(0.25),
                },
            ],
        };

        assert_eq!(schedule.rate_for(2), dec!(0));
        assert_eq!(schedule.rate_for(5), dec!(0.08));
        assert_eq!(schedule.rate_for(6), dec!(0.25));
    }

    #[test]
    fn validate_rejects_negative_rate() {
        let schedule = DiscountSchedule {
            tiers: vec![DiscountTier {
                min_services: 2,
                rate: dec!(-0.05),
            }],
        };

        assert_eq!(
            schedule.validate(),
            Err(DiscountScheduleError::InvalidRate(dec!(-0.05)))
        );
    }

    #[test]
    fn validate_rejects_unordered_thresholds() {
        let schedule = DiscountSchedule {
            tiers: vec![
                DiscountTier {
                    min_services: 4,
                    rate: dec!(0.15),
                },
                DiscountTier {
                    min_services: 4,
                    rate: dec!(0.20),
                },
            ],
        };

        assert_eq!(
            schedule.validate(),
            Err(DiscountScheduleError::UnorderedTiers {
                previous: 4,
                next: 4
            })
        );
    }
}
