use rust_decimal::Decimal;

use crate::core::Currency;

/// Reasons a matching operation is refused
///
/// A refused operation never changes the session it was applied to.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MatchingError {
    #[error("Over-payment rejected: selected total {attempted} would exceed payment amount {limit}")]
    OverPaymentRejected { attempted: Decimal, limit: Decimal },

    #[error("Booking {0} is not a candidate for this payment")]
    BookingNotFound(String),

    #[error("Booking {0} is already matched to another payment")]
    BookingUnavailable(String),

    #[error("Booking {0} is not selected")]
    BookingNotSelected(String),

    #[error("Booking {booking_id} is in {booking}, payment is in {payment}")]
    CurrencyMismatch {
        booking_id: String,
        booking: Currency,
        payment: Currency,
    },

    #[error("Invalid contribution {amount} for booking {booking_id}")]
    InvalidContribution { booking_id: String, amount: Decimal },

    #[error("Invalid payment: {0}")]
    InvalidPayment(String),
}
