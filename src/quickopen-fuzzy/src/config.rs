//! Configuration types for fuzzy search.

use serde::{Deserialize, Serialize};

use crate::error::{FuzzySearchError, FuzzySearchResult};

/// Configuration for a [`FuzzySearch`](crate::FuzzySearch) engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzySearchConfig {
    /// Whether tokens may match as gapped subsequences.
    /// When unset only contiguous substrings match.
    pub allow_subsequences: bool,

    /// Token characters a candidate may leave unmatched, shared by all tokens.
    pub max_misses: usize,

    /// Maximum number of results returned by `search_all`.
    pub max_results: usize,

    /// Character offset where every token search starts.
    pub start_offset: usize,
}

impl Default for FuzzySearchConfig {
    fn default() -> Self {
        Self {
            allow_subsequences: true,
            max_misses: 2,
            max_results: 100,
            start_offset: 0,
        }
    }
}

impl FuzzySearchConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration for contiguous matching with no misses.
    pub fn exact() -> Self {
        Self {
            allow_subsequences: false,
            max_misses: 0,
            ..Default::default()
        }
    }

    /// Creates a builder for constructing a configuration.
    pub fn builder() -> FuzzySearchConfigBuilder {
        FuzzySearchConfigBuilder::new()
    }

    /// Checks that the configuration can drive a search.
    pub fn validate(&self) -> FuzzySearchResult<()> {
        if self.max_results == 0 {
            return Err(FuzzySearchError::InvalidMaxResults);
        }
        Ok(())
    }
}

/// Builder for creating `FuzzySearchConfig` instances.
#[derive(Debug, Default)]
pub struct FuzzySearchConfigBuilder {
    config: FuzzySearchConfig,
}

impl FuzzySearchConfigBuilder {
    /// Creates a new builder starting from the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether subsequence matching is allowed.
    pub fn allow_subsequences(mut self, allow: bool) -> Self {
        self.config.allow_subsequences = allow;
        self
    }

    /// Sets the per-candidate miss budget.
    pub fn max_misses(mut self, misses: usize) -> Self {
        self.config.max_misses = misses;
        self
    }

    /// Sets the result cap.
    pub fn max_results(mut self, max: usize) -> Self {
        self.config.max_results = max;
        self
    }

    /// Sets the offset where token searches start.
    pub fn start_offset(mut self, offset: usize) -> Self {
        self.config.start_offset = offset;
        self
    }

    /// Toggles fuzzy matching as a whole.
    ///
    /// Disabling it turns off subsequences and zeroes the miss budget, since
    /// exact matching can never produce misses.
    pub fn fuzzy_matching(mut self, enabled: bool) -> Self {
        self.config.allow_subsequences = enabled;
        if !enabled {
            self.config.max_misses = 0;
        }
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> FuzzySearchResult<FuzzySearchConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
