use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::subset_search;
use crate::modules::matching::guard;
use crate::modules::matching::models::MatchingSession;
use crate::modules::matching::MatchingError;

/// How "select within limit" picks additional bookings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Add bookings in list order while they fit
    #[default]
    Greedy,
    /// Bounded subset-sum search for the fullest fit
    Exact,
}

/// Result of an auto-match attempt
#[derive(Debug, Clone)]
pub enum AutoMatchOutcome {
    /// Last selection was adjusted; the session now matches exactly
    Adjusted(MatchingSession),
    /// Preconditions not met or target out of range; nothing changed
    NoOp,
}

/// Payment-to-booking matching operations
///
/// Every operation takes a session by reference and returns a new one.
/// Rejected operations return an error and leave no partial change behind.
pub struct MatchingCalculator;

impl MatchingCalculator {
    /// Select a booking with its full net amount, or deselect it if already selected
    ///
    /// Selecting is rejected when the booking is unknown, matched to another
    /// payment, in another currency, or would push the total over the payment.
    /// Deselecting always succeeds.
    pub fn toggle(session: &MatchingSession, booking_id: &str) -> Result<MatchingSession, MatchingError> {
        let mut next = session.clone();

        if next.remove_selection(booking_id).is_some() {
            debug!(
                payment_id = %session.payment().id,
                booking_id,
                "Booking deselected"
            );
            return Ok(next);
        }

        let net_amount = session.selectable(booking_id)?.net_amount;
        let would_be_total =
            match guard::ensure_sum_within(session.selected_total(), net_amount, session.payment().amount) {
                Ok(total) => total,
                Err(e) => {
                    info!(
                        payment_id = %session.payment().id,
                        booking_id,
                        net_amount = %net_amount,
                        "Selection rejected: over-payment"
                    );
                    return Err(e);
                }
            };

        next.push_selection(booking_id.to_string(), net_amount);
        debug!(
            payment_id = %session.payment().id,
            booking_id,
            selected_total = %would_be_total,
            "Booking selected"
        );

        Ok(next)
    }

    /// Change how much of a selected booking this payment covers
    ///
    /// The amount is rounded to the currency scale and clamped into
    /// `[0, net amount]`. A contribution that ends up at zero deselects the booking.
    pub fn set_contribution(
        session: &MatchingSession,
        booking_id: &str,
        amount: Decimal,
    ) -> Result<MatchingSession, MatchingError> {
        if !session.is_selected(booking_id) {
            return Err(MatchingError::BookingNotSelected(booking_id.to_string()));
        }

        let net_amount = session
            .candidate(booking_id)
            .map(|c| c.net_amount)
            .ok_or_else(|| MatchingError::BookingNotFound(booking_id.to_string()))?;

        let clamped = session
            .payment()
            .currency
            .round(amount)
            .max(Decimal::ZERO)
            .min(net_amount);

        let mut next = session.clone();

        if clamped.is_zero() {
            next.remove_selection(booking_id);
            debug!(
                payment_id = %session.payment().id,
                booking_id,
                "Zero contribution, booking deselected"
            );
            return Ok(next);
        }

        let others_total = session.selected_total() - session.contribution(booking_id);
        let candidate_total = guard::ensure_sum_within(others_total, clamped, session.payment().amount)?;

        next.replace_contribution(booking_id, clamped);
        debug!(
            payment_id = %session.payment().id,
            booking_id,
            contribution = %clamped,
            selected_total = %candidate_total,
            "Contribution updated"
        );

        Ok(next)
    }

    /// Adjust the most recently selected booking so the total equals the payment
    ///
    /// Only the last selection is considered; other bookings and combinations
    /// are never searched.
    pub fn auto_match_exact(session: &MatchingSession) -> AutoMatchOutcome {
        let Some((last_id, current)) = session.last_selected() else {
            return AutoMatchOutcome::NoOp;
        };

        let payment_amount = session.payment().amount;
        let selected_total = session.selected_total();
        if selected_total >= payment_amount {
            return AutoMatchOutcome::NoOp;
        }

        let Some(net_amount) = session.candidate(last_id).map(|c| c.net_amount) else {
            return AutoMatchOutcome::NoOp;
        };

        let target = payment_amount - selected_total + current;
        if target <= Decimal::ZERO || target > net_amount {
            debug!(
                payment_id = %session.payment().id,
                booking_id = last_id,
                target = %target,
                net_amount = %net_amount,
                "Auto-match not feasible"
            );
            return AutoMatchOutcome::NoOp;
        }

        let mut next = session.clone();
        next.replace_contribution(last_id, target);
        info!(
            payment_id = %session.payment().id,
            booking_id = last_id,
            contribution = %target,
            "Auto-matched payment"
        );

        AutoMatchOutcome::Adjusted(next)
    }

    /// Add unselected bookings while they fit under the payment amount
    ///
    /// Bookings matched elsewhere or in another currency are never added.
    /// Added bookings are appended in list order with their full net amount.
    pub fn select_within_limit(
        session: &MatchingSession,
        strategy: SelectionStrategy,
        search_state_limit: usize,
    ) -> MatchingSession {
        let eligible: Vec<(String, Decimal)> = session
            .candidates()
            .filter(|c| !session.is_selected(&c.id) && session.selectable(&c.id).is_ok())
            .map(|c| (c.id.clone(), c.net_amount))
            .collect();

        let chosen = match strategy {
            SelectionStrategy::Greedy => Self::greedy_pick(session, &eligible),
            SelectionStrategy::Exact => Self::exact_pick(session, &eligible, search_state_limit),
        };

        let mut next = session.clone();
        for (booking_id, net_amount) in &chosen {
            next.push_selection(booking_id.clone(), *net_amount);
        }

        info!(
            payment_id = %session.payment().id,
            strategy = ?strategy,
            added = chosen.len(),
            selected_total = %next.selected_total(),
            "Selected bookings within limit"
        );

        next
    }

    fn greedy_pick(session: &MatchingSession, eligible: &[(String, Decimal)]) -> Vec<(String, Decimal)> {
        let payment_amount = session.payment().amount;
        let mut running_total = session.selected_total();
        let mut chosen = Vec::new();

        for (booking_id, net_amount) in eligible {
            if let Ok(total) = guard::ensure_sum_within(running_total, *net_amount, payment_amount) {
                running_total = total;
                chosen.push((booking_id.clone(), *net_amount));
            }
        }

        chosen
    }

    fn exact_pick(
        session: &MatchingSession,
        eligible: &[(String, Decimal)],
        search_state_limit: usize,
    ) -> Vec<(String, Decimal)> {
        let currency = session.payment().currency;
        let remaining = session.payment().amount - session.selected_total();

        if remaining <= Decimal::ZERO {
            return Vec::new();
        }

        // Amounts beyond i64 minor units cannot be searched exactly
        let Some(capacity) = currency.to_minor_units(remaining).filter(|c| *c > 0) else {
            info!(
                payment_id = %session.payment().id,
                remaining = %remaining,
                "Remaining amount out of range for exact search, filling in list order"
            );
            return Self::greedy_pick(session, eligible);
        };

        let weights: Vec<i64> = eligible
            .iter()
            .map(|(_, net_amount)| currency.to_minor_units(*net_amount).unwrap_or(i64::MAX))
            .collect();

        let fill = subset_search::best_fill(&weights, capacity, search_state_limit);
        if fill.truncated {
            info!(
                payment_id = %session.payment().id,
                state_limit = search_state_limit,
                "Exact selection search hit its state limit, using best fill found"
            );
        }

        fill.indices
            .into_iter()
            .map(|idx| eligible[idx].clone())
            .collect()
    }
}

/// Interpret free-form numeric input from the portal
///
/// Unparseable, non-finite and negative input is treated as zero. Positive
/// numbers too large for `Decimal` saturate to `Decimal::MAX`, so the
/// contribution clamp takes them to the booking's net amount.
pub fn parse_amount_input(input: &str) -> Decimal {
    let trimmed = input.trim();

    match trimmed
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(trimmed))
    {
        Ok(amount) => amount.max(Decimal::ZERO),
        Err(_) => match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() && value > 1.0 => Decimal::MAX,
            _ => Decimal::ZERO,
        },
    }
}
