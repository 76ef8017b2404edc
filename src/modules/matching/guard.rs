use rust_decimal::Decimal;

use super::MatchingError;

/// Tolerance, in currency units, for over-payment and perfect-match comparisons
pub const MATCH_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Over-payment guard: a candidate total is acceptable while it stays within
/// the payment amount plus tolerance.
pub fn accepts(candidate_total: Decimal, payment_amount: Decimal) -> bool {
    match payment_amount.checked_add(MATCH_TOLERANCE) {
        Some(limit) => candidate_total <= limit,
        None => candidate_total <= payment_amount,
    }
}

/// Guard a running total grown by `addition`; a sum outside the range of
/// `Decimal` is rejected like any other over-payment.
pub fn ensure_sum_within(
    current_total: Decimal,
    addition: Decimal,
    payment_amount: Decimal,
) -> Result<Decimal, MatchingError> {
    let candidate_total = current_total
        .checked_add(addition)
        .ok_or(MatchingError::OverPaymentRejected {
            attempted: Decimal::MAX,
            limit: payment_amount,
        })?;
    ensure_within(candidate_total, payment_amount)?;
    Ok(candidate_total)
}

/// Same predicate as [`accepts`], as a `Result` for `?` chaining.
pub fn ensure_within(candidate_total: Decimal, payment_amount: Decimal) -> Result<(), MatchingError> {
    if accepts(candidate_total, payment_amount) {
        Ok(())
    } else {
        Err(MatchingError::OverPaymentRejected {
            attempted: candidate_total,
            limit: payment_amount,
        })
    }
}
