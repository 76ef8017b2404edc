use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::modules::matching::models::{BookingCandidate, Payment, SelectionEntry};

/// Wholesaler backend that owns payments, bookings and persisted matches
///
/// The matching calculator never talks to the backend; only session open,
/// commit and readiness checks go through this trait.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Fetch a payment with its previously persisted matches
    async fn fetch_payment(&self, payment_id: &str) -> Result<Payment>;

    /// Fetch every booking of a supplier that could be matched to a payment
    async fn fetch_bookings_for_supplier(&self, supplier_id: &str) -> Result<Vec<BookingCandidate>>;

    /// Persist the matched set for a payment, replacing any earlier one
    async fn submit_matching(&self, payment_id: &str, entries: &[SelectionEntry]) -> Result<()>;

    /// Check that the backend is reachable
    async fn health(&self) -> Result<()>;

    /// Backend name for logs
    fn name(&self) -> &str;
}

/// Body of the matched-bookings submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitMatchingRequest {
    pub matched_bookings: Vec<SelectionEntry>,
}
