use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::clamp_amount;

/// The optional home-internet line on a quote.
///
/// `charges` only counts when `has_service` is set, and `discount_amount`
/// only counts when both `has_service` and `additional_discount` are set.
/// The stored values survive toggling so a user can switch the line back on
/// without re-entering them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeInternet {
    pub has_service: bool,
    pub charges: Decimal,
    pub additional_discount: bool,
    pub discount_amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeInternetEdit {
    SetService(bool),
    SetCharges(Decimal),
    SetAdditionalDiscount(bool),
    SetDiscountAmount(Decimal),
}

impl HomeInternet {
    /// Monthly charges that apply to the bill.
    pub fn effective_charges(&self) -> Decimal {
        if self.has_service {
            self.charges
        } else {
            Decimal::ZERO
        }
    }

    /// Discount that applies to the bill.
    pub fn effective_discount(&self) -> Decimal {
        if self.has_service && self.additional_discount {
            self.discount_amount
        } else {
            Decimal::ZERO
        }
    }

    pub fn edited(
        &self,
        edit: HomeInternetEdit,
    ) -> HomeInternet {
        let mut next = self.clone();
        match edit {
            HomeInternetEdit::SetService(enabled) => next.has_service = enabled,
            HomeInternetEdit::SetCharges(charges) => next.charges = clamp_amount(charges),
            HomeInternetEdit::SetAdditionalDiscount(enabled) => next.additional_discount = enabled,
            HomeInternetEdit::SetDiscountAmount(amount) => {
                next.discount_amount = clamp_amount(amount)
            }
        }
        next
    }
}
