// In-memory wholesaler backend
//
// Holds payments and bookings in memory and records every submission so
// tests can assert what would have been persisted.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use wholesale_recon::backend::BackendApi;
use wholesale_recon::core::{AppError, Result};
use wholesale_recon::matching::{BookingCandidate, Payment, SelectionEntry};

#[derive(Default)]
pub struct InMemoryBackend {
    payments: Mutex<Vec<Payment>>,
    bookings: Mutex<Vec<BookingCandidate>>,
    submissions: Mutex<Vec<(String, Vec<SelectionEntry>)>>,
    healthy: Mutex<bool>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self {
            healthy: Mutex::new(true),
            ..Default::default()
        }
    }

    pub fn with_payment(self, payment: Payment) -> Self {
        self.payments.lock().unwrap().push(payment);
        self
    }

    pub fn with_bookings(self, bookings: Vec<BookingCandidate>) -> Self {
        self.bookings.lock().unwrap().extend(bookings);
        self
    }

    pub fn set_healthy(&self, healthy: bool) {
        *self.healthy.lock().unwrap() = healthy;
    }

    pub fn submissions(&self) -> Vec<(String, Vec<SelectionEntry>)> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl BackendApi for InMemoryBackend {
    async fn fetch_payment(&self, payment_id: &str) -> Result<Payment> {
        let payments = self.payments.lock().unwrap();
        let payment = payments
            .iter()
            .find(|p| p.id == payment_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Payment {}", payment_id)))?;

        // Persisted matches are whatever was last submitted
        let mut payment = payment;
        if let Some((_, entries)) = self
            .submissions
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(id, _)| id == payment_id)
        {
            payment.matched_bookings = entries.clone();
        }

        Ok(payment)
    }

    async fn fetch_bookings_for_supplier(&self, supplier_id: &str) -> Result<Vec<BookingCandidate>> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.supplier_id == supplier_id)
            .cloned()
            .collect())
    }

    async fn submit_matching(&self, payment_id: &str, entries: &[SelectionEntry]) -> Result<()> {
        self.submissions
            .lock()
            .unwrap()
            .push((payment_id.to_string(), entries.to_vec()));
        Ok(())
    }

    async fn health(&self) -> Result<()> {
        if *self.healthy.lock().unwrap() {
            Ok(())
        } else {
            Err(AppError::backend("backend is down"))
        }
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}
