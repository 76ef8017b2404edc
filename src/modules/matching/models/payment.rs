use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::Currency;
use crate::modules::matching::MatchingError;

/// Supplier payment being reconciled against bookings
///
/// The amount is the upper bound for every selection made against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub supplier_id: String,
    /// Matches persisted by the backend in an earlier session
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matched_bookings: Vec<SelectionEntry>,
}

impl Payment {
    pub fn new(
        id: impl Into<String>,
        amount: Decimal,
        currency: Currency,
        supplier_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            currency,
            supplier_id: supplier_id.into(),
            matched_bookings: Vec::new(),
        }
    }

    /// A payment can only be reconciled when its amount is positive and fits its currency
    pub fn validate(&self) -> Result<(), MatchingError> {
        if self.amount <= Decimal::ZERO {
            return Err(MatchingError::InvalidPayment(format!(
                "payment {} amount must be positive, got {}",
                self.id, self.amount
            )));
        }

        self.currency
            .validate_amount(self.amount)
            .map_err(MatchingError::InvalidPayment)
    }
}

/// One booking's share of a payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionEntry {
    pub booking_id: String,
    pub contributed_amount: Decimal,
}

impl SelectionEntry {
    pub fn new(booking_id: impl Into<String>, contributed_amount: Decimal) -> Self {
        Self {
            booking_id: booking_id.into(),
            contributed_amount,
        }
    }
}
