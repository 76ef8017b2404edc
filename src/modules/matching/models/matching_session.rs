use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{BookingCandidate, MatchingResult, Payment, SelectionEntry};
use crate::modules::matching::{guard, MatchingError};

/// One payment's reconciliation in progress
///
/// Sessions are values: every operation in `MatchingCalculator` returns a new
/// session and leaves the input untouched. Selections keep insertion order;
/// the tail is the most recently selected booking.
#[derive(Debug, Clone)]
pub struct MatchingSession {
    payment: Payment,
    candidates: IndexMap<String, BookingCandidate>,
    selections: IndexMap<String, Decimal>,
}

/// Client-held copy of a session, exchanged with the portal on every request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub payment: Payment,
    pub candidates: Vec<BookingCandidate>,
    #[serde(default)]
    pub selections: Vec<SelectionEntry>,
}

impl MatchingSession {
    /// Open a session for a payment, pre-selecting its persisted matches
    ///
    /// Persisted matches that no longer fit (unknown booking, matched elsewhere,
    /// over the payment amount) are skipped with a warning.
    pub fn open(payment: Payment, candidates: Vec<BookingCandidate>) -> Result<Self, MatchingError> {
        payment.validate()?;

        let persisted = payment.matched_bookings.clone();
        let mut session = Self::with_candidates(payment, candidates);

        for entry in persisted {
            let booking_id = entry.booking_id.clone();
            if let Err(e) = session.admit(entry, true) {
                warn!(
                    payment_id = %session.payment.id,
                    booking_id = %booking_id,
                    error = %e,
                    "Skipping persisted match"
                );
            }
        }

        Ok(session)
    }

    /// Rebuild a session from a snapshot, re-checking every selection in order
    pub fn restore(snapshot: SessionSnapshot) -> Result<Self, MatchingError> {
        snapshot.payment.validate()?;

        let mut session = Self::with_candidates(snapshot.payment, snapshot.candidates);
        for entry in snapshot.selections {
            session.admit(entry, false)?;
        }

        Ok(session)
    }

    fn with_candidates(payment: Payment, candidates: Vec<BookingCandidate>) -> Self {
        let mut by_id = IndexMap::with_capacity(candidates.len());

        for candidate in candidates {
            if candidate.supplier_id != payment.supplier_id {
                warn!(
                    payment_id = %payment.id,
                    booking_id = %candidate.id,
                    supplier_id = %candidate.supplier_id,
                    "Dropping candidate from another supplier"
                );
                continue;
            }

            if candidate.net_amount <= Decimal::ZERO {
                warn!(
                    payment_id = %payment.id,
                    booking_id = %candidate.id,
                    net_amount = %candidate.net_amount,
                    "Dropping candidate with non-positive net amount"
                );
                continue;
            }

            if by_id.contains_key(&candidate.id) {
                warn!(
                    payment_id = %payment.id,
                    booking_id = %candidate.id,
                    "Dropping duplicate candidate"
                );
                continue;
            }

            by_id.insert(candidate.id.clone(), candidate);
        }

        Self {
            payment,
            candidates: by_id,
            selections: IndexMap::new(),
        }
    }

    /// Add an entry from persisted or client data. `clamp` trims the amount to
    /// the booking's net amount instead of rejecting it.
    fn admit(&mut self, entry: SelectionEntry, clamp: bool) -> Result<(), MatchingError> {
        let candidate = self.selectable(&entry.booking_id)?;
        let net_amount = candidate.net_amount;

        if self.selections.contains_key(&entry.booking_id) {
            return Err(MatchingError::InvalidContribution {
                booking_id: entry.booking_id,
                amount: entry.contributed_amount,
            });
        }

        let mut amount = self.payment.currency.round(entry.contributed_amount);
        if clamp {
            amount = amount.min(net_amount);
        }

        if amount <= Decimal::ZERO || amount > net_amount {
            return Err(MatchingError::InvalidContribution {
                booking_id: entry.booking_id,
                amount: entry.contributed_amount,
            });
        }

        guard::ensure_within(self.selected_total() + amount, self.payment.amount)?;
        self.selections.insert(entry.booking_id, amount);
        Ok(())
    }

    /// Look up a booking that may be newly selected for this payment
    pub(crate) fn selectable(&self, booking_id: &str) -> Result<&BookingCandidate, MatchingError> {
        let candidate = self
            .candidates
            .get(booking_id)
            .ok_or_else(|| MatchingError::BookingNotFound(booking_id.to_string()))?;

        if !candidate.is_available() {
            return Err(MatchingError::BookingUnavailable(booking_id.to_string()));
        }

        if candidate.currency != self.payment.currency {
            return Err(MatchingError::CurrencyMismatch {
                booking_id: booking_id.to_string(),
                booking: candidate.currency,
                payment: self.payment.currency,
            });
        }

        Ok(candidate)
    }

    pub(crate) fn push_selection(&mut self, booking_id: String, amount: Decimal) {
        self.selections.insert(booking_id, amount);
    }

    pub(crate) fn remove_selection(&mut self, booking_id: &str) -> Option<Decimal> {
        self.selections.shift_remove(booking_id)
    }

    pub(crate) fn replace_contribution(&mut self, booking_id: &str, amount: Decimal) {
        if let Some(existing) = self.selections.get_mut(booking_id) {
            *existing = amount;
        }
    }

    pub fn payment(&self) -> &Payment {
        &self.payment
    }

    pub fn candidate(&self, booking_id: &str) -> Option<&BookingCandidate> {
        self.candidates.get(booking_id)
    }

    /// Candidates in the order they were supplied
    pub fn candidates(&self) -> impl Iterator<Item = &BookingCandidate> {
        self.candidates.values()
    }

    pub fn is_selected(&self, booking_id: &str) -> bool {
        self.selections.contains_key(booking_id)
    }

    /// Current contribution of a booking, zero when not selected
    pub fn contribution(&self, booking_id: &str) -> Decimal {
        self.selections
            .get(booking_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Most recently selected booking and its contribution
    pub fn last_selected(&self) -> Option<(&str, Decimal)> {
        self.selections
            .last()
            .map(|(id, amount)| (id.as_str(), *amount))
    }

    pub fn selected_count(&self) -> usize {
        self.selections.len()
    }

    pub fn selected_total(&self) -> Decimal {
        self.selections.values().copied().sum()
    }

    /// Selections in insertion order, as submitted to the backend
    pub fn entries(&self) -> Vec<SelectionEntry> {
        self.selections
            .iter()
            .map(|(id, amount)| SelectionEntry::new(id.clone(), *amount))
            .collect()
    }

    pub fn result(&self) -> MatchingResult {
        MatchingResult::compute(
            self.payment.amount,
            self.selected_total(),
            self.selections.len(),
        )
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            payment: self.payment.clone(),
            candidates: self.candidates.values().cloned().collect(),
            selections: self.entries(),
        }
    }
}
