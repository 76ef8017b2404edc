use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::Currency;

/// Booking that may be settled by a supplier payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCandidate {
    pub id: String,
    /// Wholesaler's cost owed to the supplier
    pub net_amount: Decimal,
    pub currency: Currency,
    pub supplier_id: String,
    #[serde(default)]
    pub already_matched_to_other_payment: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in: Option<NaiveDate>,
}

impl BookingCandidate {
    pub fn new(
        id: impl Into<String>,
        net_amount: Decimal,
        currency: Currency,
        supplier_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            net_amount,
            currency,
            supplier_id: supplier_id.into(),
            already_matched_to_other_payment: false,
            reference: None,
            guest_name: None,
            check_in: None,
        }
    }

    /// Mark as already settled by a different payment
    pub fn matched_elsewhere(mut self) -> Self {
        self.already_matched_to_other_payment = true;
        self
    }

    pub fn is_available(&self) -> bool {
        !self.already_matched_to_other_payment
    }
}
