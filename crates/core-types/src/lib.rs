pub mod error;
pub mod round;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use round::FundingRound;
