#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::uninlined_format_args
)]
//! Quick-open fuzzy search - token-based fuzzy matching and ranking of paths.
//!
//! A query is split into whitespace-separated tokens. Each token is placed in a
//! candidate as a substring or, when subsequences are allowed, as an ordered,
//! possibly gapped run of characters, with a small budget for characters that
//! cannot be found at all. Placements of different tokens never overlap.
//!
//! # Features
//!
//! - Scoring that favors compact runs, file names over directories, word
//!   boundaries and matching case
//! - Smart case: lowercase queries match case-insensitively
//! - Statistical culling of weak matches followed by bounded top-K ranking
//! - Highlight ranges for every result
//! - Optional `parallel` feature scoring candidates on the rayon pool
//!
//! # Example
//!
//! ```
//! use quickopen_fuzzy::{FuzzySearch, FuzzySearchConfig};
//!
//! let config = FuzzySearchConfig::builder().max_results(10).build()?;
//! let mut search = FuzzySearch::with_config(config);
//! search.set_query("entity gd");
//!
//! let paths = [
//!     "./entity/entity_man.gd",
//!     "./entity/entity_man.tscn",
//!     "./entity/readme.txt",
//! ];
//! for result in search.search_all(&paths) {
//!     println!("{}: {}", result.score(), result.target());
//! }
//! # Ok::<(), quickopen_fuzzy::FuzzySearchError>(())
//! ```

mod config;
mod error;
mod interval;
mod matcher;
mod query;
mod reduce;
mod result;
mod scoring;
mod search;
mod token_match;

pub use config::{FuzzySearchConfig, FuzzySearchConfigBuilder};
pub use error::{FuzzySearchError, FuzzySearchResult};
pub use interval::Interval;
pub use matcher::TokenMatcher;
pub use query::{Query, QueryToken};
pub use reduce::{CULL_CUTOFF, CULL_FACTOR, Reduction, cull_threshold, sort_and_filter};
pub use result::{SearchResult, SearchStats};
pub use scoring::{BOUNDARY_CHARS, CandidateContext, is_word_boundary, score_token_match};
pub use search::{FuzzySearch, search_all};
pub use token_match::{SubstringRun, TokenMatch};
