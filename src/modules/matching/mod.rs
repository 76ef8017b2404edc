pub mod controllers;
pub mod error;
pub mod guard;
pub mod models;
pub mod services;

pub use controllers::configure;
pub use error::MatchingError;
pub use models::{
    BookingCandidate, MatchState, MatchingResult, MatchingSession, Payment, SelectionEntry,
    SessionSnapshot,
};
pub use services::{AutoMatchOutcome, MatchingCalculator, MatchingService, SelectionStrategy};
