// Test data for a supplier with a handful of hotel bookings

use rust_decimal_macros::dec;
use wholesale_recon::core::Currency;
use wholesale_recon::matching::{BookingCandidate, Payment};

pub const SUPPLIER_ID: &str = "SUP-BALI-01";
pub const PAYMENT_ID: &str = "PAY-2024-0001";

/// Payment of 450.00 USD from the test supplier
pub fn payment() -> Payment {
    Payment::new(PAYMENT_ID, dec!(450.00), Currency::USD, SUPPLIER_ID)
}

/// Bookings of the test supplier, plus one from another supplier and one settled elsewhere
pub fn bookings() -> Vec<BookingCandidate> {
    vec![
        BookingCandidate::new("BK-100", dec!(300.00), Currency::USD, SUPPLIER_ID),
        BookingCandidate::new("BK-101", dec!(200.00), Currency::USD, SUPPLIER_ID),
        BookingCandidate::new("BK-102", dec!(150.00), Currency::USD, SUPPLIER_ID),
        BookingCandidate::new("BK-103", dec!(80.00), Currency::USD, SUPPLIER_ID).matched_elsewhere(),
        BookingCandidate::new("BK-900", dec!(50.00), Currency::USD, "SUP-OTHER"),
    ]
}
