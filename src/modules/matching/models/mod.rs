pub mod booking_candidate;
pub mod matching_result;
pub mod matching_session;
pub mod payment;

pub use booking_candidate::BookingCandidate;
pub use matching_result::{MatchState, MatchingResult};
pub use matching_session::{MatchingSession, SessionSnapshot};
pub use payment::{Payment, SelectionEntry};
