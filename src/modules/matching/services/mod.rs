pub mod matching_calculator;
pub mod matching_service;
pub mod subset_search;

pub use matching_calculator::{parse_amount_input, AutoMatchOutcome, MatchingCalculator, SelectionStrategy};
pub use matching_service::MatchingService;
pub use subset_search::{best_fill, SubsetFill};
