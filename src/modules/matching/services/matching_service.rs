// Session boundaries of payment matching: loading a session from the backend
// and committing the matched set back to it. Everything in between is pure
// computation in MatchingCalculator.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::MatchingConfig;
use crate::core::{AppError, Result};
use crate::modules::backend::BackendApi;
use crate::modules::matching::models::{MatchingSession, SessionSnapshot};

/// Service for opening and committing matching sessions
pub struct MatchingService {
    backend: Arc<dyn BackendApi>,
    config: MatchingConfig,
}

impl MatchingService {
    pub fn new(backend: Arc<dyn BackendApi>, config: MatchingConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Open a matching session for a payment
    ///
    /// Fetches the payment and its supplier's bookings, then pre-selects the
    /// payment's persisted matches.
    pub async fn open_session(&self, payment_id: &str) -> Result<MatchingSession> {
        let payment = self.backend.fetch_payment(payment_id).await?;
        let candidates = self
            .backend
            .fetch_bookings_for_supplier(&payment.supplier_id)
            .await?;

        info!(
            payment_id,
            supplier_id = %payment.supplier_id,
            amount = %payment.amount,
            candidates = candidates.len(),
            persisted_matches = payment.matched_bookings.len(),
            "Opening matching session"
        );

        let session = MatchingSession::open(payment, candidates)?;
        Ok(session)
    }

    /// Submit a session's selections to the backend
    ///
    /// The payment and bookings are fetched again and the client's selections
    /// re-admitted against them, so only the backend's amounts bound the commit.
    ///
    /// # Returns
    /// The session as verified against backend data, whose entries were submitted
    pub async fn commit(&self, payment_id: &str, session: &MatchingSession) -> Result<MatchingSession> {
        if session.payment().id != payment_id {
            warn!(
                payment_id,
                session_payment_id = %session.payment().id,
                "Commit rejected: session belongs to another payment"
            );
            return Err(AppError::validation(format!(
                "Session is for payment {}, not {}",
                session.payment().id,
                payment_id
            )));
        }

        let payment = self.backend.fetch_payment(payment_id).await?;
        let candidates = self
            .backend
            .fetch_bookings_for_supplier(&payment.supplier_id)
            .await?;

        let verified = MatchingSession::restore(SessionSnapshot {
            payment,
            candidates,
            selections: session.entries(),
        })
        .map_err(|e| {
            warn!(payment_id, error = %e, "Commit rejected: selections do not fit backend data");
            e
        })?;

        let entries = verified.entries();
        let result = verified.result();

        self.backend.submit_matching(payment_id, &entries).await?;

        info!(
            payment_id,
            entries = entries.len(),
            selected_total = %result.selected_total,
            state = %result.state,
            backend = self.backend.name(),
            "Matching session committed"
        );

        Ok(verified)
    }

    /// Readiness of the backend this service depends on
    pub async fn backend_health(&self) -> Result<()> {
        self.backend.health().await
    }
}
