//! Errors raised during listing plan generation.

/// Failure modes of [`crate::generate_listing_plan`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// The requested house count was zero.
    #[error("house count must be at least 1")]
    NoHouses,
    /// The requested house count exceeds the supported maximum.
    #[error("house count {requested} exceeds the maximum of {max}")]
    TooManyHouses {
        /// Count the caller asked for.
        requested: u32,
        /// Largest supported count.
        max: u32,
    },
}
