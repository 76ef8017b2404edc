use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::matching::guard::MATCH_TOLERANCE;

/// Resting state of a matching session
///
/// Over-payment is never a resting state: it only exists as a rejected transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    /// Nothing selected
    Empty,
    /// Selected total is below the payment amount
    Under,
    /// Selected total settles the payment within tolerance
    Perfect,
}

impl MatchState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Under => "under",
            Self::Perfect => "perfect",
        }
    }
}

impl std::fmt::Display for MatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Figures derived from a selection; never stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingResult {
    pub selected_total: Decimal,
    /// Payment amount minus selected total
    pub difference: Decimal,
    /// Selected total as a percentage of the payment amount, 2 decimal places
    pub accuracy_pct: Decimal,
    pub is_over_payment: bool,
    pub is_perfect_match: bool,
    pub selected_count: usize,
    pub state: MatchState,
}

impl MatchingResult {
    pub fn compute(payment_amount: Decimal, selected_total: Decimal, selected_count: usize) -> Self {
        let difference = payment_amount - selected_total;

        let accuracy_pct = if payment_amount.is_zero() {
            Decimal::ZERO
        } else {
            (selected_total / payment_amount * Decimal::ONE_HUNDRED).round_dp(2)
        };

        let is_perfect_match = difference.abs() < MATCH_TOLERANCE;

        let state = if selected_count == 0 {
            MatchState::Empty
        } else if selected_total < payment_amount && !is_perfect_match {
            MatchState::Under
        } else {
            MatchState::Perfect
        };

        Self {
            selected_total,
            difference,
            accuracy_pct,
            is_over_payment: selected_total > payment_amount,
            is_perfect_match,
            selected_count,
            state,
        }
    }
}
