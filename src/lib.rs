//! Wholesale Reconciliation Service Library
//!
//! Payment-to-booking matching for a B2B travel wholesaler: an incoming
//! supplier payment is reconciled against that supplier's bookings without
//! the matched total ever exceeding the payment.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::backend;
pub use modules::health;
pub use modules::matching;
