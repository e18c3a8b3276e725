//! Error types for fuzzy search configuration.

/// Result type alias for fuzzy search operations.
pub type FuzzySearchResult<T> = std::result::Result<T, FuzzySearchError>;

/// Errors raised when a search engine is configured.
///
/// Matching itself never fails; a candidate either matches or it does not.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FuzzySearchError {
    /// `max_results` was zero.
    #[error("max_results must be greater than zero")]
    InvalidMaxResults,
}
