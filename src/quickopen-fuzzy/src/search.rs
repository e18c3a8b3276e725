//! Query orchestration: per-candidate search and batch ranking.

use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::FuzzySearchConfig;
use crate::error::FuzzySearchResult;
use crate::matcher::TokenMatcher;
use crate::query::{Query, QueryToken, fold_case};
use crate::reduce::sort_and_filter;
use crate::result::{SearchResult, SearchStats};
use crate::scoring::{CandidateContext, score_token_match};
use crate::token_match::TokenMatch;

/// Fuzzy search engine for ranking candidate strings against a query.
///
/// Tokens are placed greedily: the longest token is placed first and keeps
/// its best non-overlapping placement, then the next token is placed around
/// it. For each start offset only the eager subsequence is considered, so the
/// engine does not guarantee the best possible combination of placements.
///
/// # Example
///
/// ```
/// use quickopen_fuzzy::FuzzySearch;
///
/// let mut search = FuzzySearch::new();
/// search.set_query("hud gd");
///
/// let results = search.search_all(&["./menu/hud/hud.gd", "./docs/readme.md"]);
/// assert_eq!(results[0].target(), "./menu/hud/hud.gd");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FuzzySearch {
    /// Configuration for the search.
    config: FuzzySearchConfig,

    /// Parsed query.
    query: Query,

    /// Token placement strategy derived from the configuration.
    matcher: TokenMatcher,
}

impl FuzzySearch {
    /// Creates a search engine with the default configuration and an empty query.
    pub fn new() -> Self {
        Self::with_config(FuzzySearchConfig::default())
    }

    /// Creates a search engine with the specified configuration.
    ///
    /// The configuration is expected to be valid; see [`try_new`](Self::try_new).
    pub fn with_config(config: FuzzySearchConfig) -> Self {
        Self {
            matcher: TokenMatcher::new(config.allow_subsequences),
            config,
            query: Query::default(),
        }
    }

    /// Creates a search engine after validating `config`.
    pub fn try_new(config: FuzzySearchConfig) -> FuzzySearchResult<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &FuzzySearchConfig {
        &self.config
    }

    /// Replaces the configuration, keeping the current query.
    pub fn set_config(&mut self, config: FuzzySearchConfig) -> FuzzySearchResult<()> {
        config.validate()?;
        self.matcher = TokenMatcher::new(config.allow_subsequences);
        self.config = config;
        Ok(())
    }

    /// Returns the parsed query.
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Parses and installs a new query, replacing the previous one.
    pub fn set_query(&mut self, query: &str) {
        self.query = Query::parse(query);
        tracing::debug!(
            "Fuzzy query set: {} token(s), case sensitive: {}",
            self.query.tokens().len(),
            self.query.is_case_sensitive()
        );
    }

    /// Matches a single candidate.
    ///
    /// Returns `None` unless every token finds an acceptable placement. An
    /// empty query matches every non-empty candidate with a score of zero.
    pub fn search(&self, candidate: &str) -> Option<SearchResult> {
        if candidate.is_empty() {
            return None;
        }

        let mut result = SearchResult::new(candidate, self.config.max_misses);
        if self.query.is_empty() {
            return Some(result);
        }

        let original: Vec<char> = candidate.chars().collect();
        let folded: Option<Vec<char>> = if self.query.is_case_sensitive() {
            None
        } else {
            Some(original.iter().copied().map(fold_case).collect())
        };
        let haystack = folded.as_deref().unwrap_or(&original);
        let ctx = CandidateContext::new(&original, result.dir_index());

        for token in self.query.tokens() {
            let best = self.best_placement(token, haystack, &ctx, &result)?;
            result.add_token_match(best);
        }

        Some(result)
    }

    /// Best acceptable placement of `token` given what `result` already holds.
    ///
    /// Each accepted attempt is followed by another one starting just after
    /// the previous placement's first character, until no placement remains.
    fn best_placement(
        &self,
        token: &QueryToken,
        haystack: &[char],
        ctx: &CandidateContext<'_>,
        result: &SearchResult,
    ) -> Option<TokenMatch> {
        let mut offset = self.config.start_offset;
        let mut best: Option<TokenMatch> = None;

        while let Some(mut candidate) =
            self.matcher
                .try_match(token.chars(), haystack, offset, result.miss_budget())
        {
            let interval = candidate.interval();

            if result.can_add_token_match(&candidate) {
                let case_mismatch = has_case_mismatch(&candidate, ctx.text, haystack);
                candidate.score = score_token_match(&candidate, ctx, case_mismatch);
                if best.as_ref().is_none_or(|b| candidate.score > b.score) {
                    best = Some(candidate);
                }
            }

            if !interval.is_valid() {
                break;
            }
            offset = interval.start as usize + 1;
        }

        best
    }

    /// Matches every candidate, then culls and ranks the matches.
    ///
    /// Returns at most `max_results` results in rank order.
    pub fn search_all<S>(&self, candidates: &[S]) -> Vec<SearchResult>
    where
        S: AsRef<str> + Sync,
    {
        self.search_all_with_stats(candidates).0
    }

    /// Like [`search_all`](Self::search_all), also reporting statistics.
    pub fn search_all_with_stats<S>(&self, candidates: &[S]) -> (Vec<SearchResult>, SearchStats)
    where
        S: AsRef<str> + Sync,
    {
        let start = Instant::now();

        let matches = self.collect_matches(candidates);
        let matched = matches.len();
        let reduction = sort_and_filter(matches, self.config.max_results);

        let stats = SearchStats {
            candidates: candidates.len(),
            matched,
            culled: reduction.culled,
            returned: reduction.results.len(),
            cull_threshold: reduction.cull_threshold,
            elapsed: start.elapsed(),
        };

        tracing::debug!(
            "Fuzzy search over {} candidates: {} matched, {} culled (threshold {:?}), {} returned",
            stats.candidates,
            stats.matched,
            stats.culled,
            stats.cull_threshold,
            stats.returned
        );

        (reduction.results, stats)
    }

    #[cfg(not(feature = "parallel"))]
    fn collect_matches<S>(&self, candidates: &[S]) -> Vec<SearchResult>
    where
        S: AsRef<str> + Sync,
    {
        candidates
            .iter()
            .filter_map(|c| self.search(c.as_ref()))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn collect_matches<S>(&self, candidates: &[S]) -> Vec<SearchResult>
    where
        S: AsRef<str> + Sync,
    {
        candidates
            .par_iter()
            .filter_map(|c| self.search(c.as_ref()))
            .collect()
    }
}

/// Ranks `candidates` against `query` with the default configuration.
pub fn search_all<S>(query: &str, candidates: &[S]) -> Vec<SearchResult>
where
    S: AsRef<str> + Sync,
{
    let mut search = FuzzySearch::new();
    search.set_query(query);
    search.search_all(candidates)
}

/// True when a matched character differs from the original candidate, which
/// only happens when matching against case-folded text.
fn has_case_mismatch(token_match: &TokenMatch, original: &[char], haystack: &[char]) -> bool {
    token_match.runs().iter().any(|run| {
        original[run.start..run.end()] != haystack[run.start..run.end()]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Interval;
    use crate::scoring::{CASE_MISMATCH_PENALTY, EXACT_RUN_BONUS};

    fn engine(query: &str) -> FuzzySearch {
        let mut search = FuzzySearch::new();
        search.set_query(query);
        search
    }

    #[test]
    fn test_single_token_exact_placement() {
        let result = engine("hud").search("menu/hud.gd").unwrap();
        assert_eq!(result.token_matches().len(), 1);
        // 9 * 2 + 4 + 100
        assert_eq!(result.score(), 122);
        assert_eq!(result.highlight_ranges(), vec![5..8]);
    }

    #[test]
    fn test_prefers_later_compact_placement() {
        // The eager placement from offset 0 is scattered; a later start finds "gd" intact.
        let result = engine("gd").search("g/xd/a.gd").unwrap();
        let m = &result.token_matches()[0];
        assert_eq!(m.runs().len(), 1);
        assert_eq!(m.interval(), Interval::new(7, 8));
    }

    #[test]
    fn test_all_tokens_must_match() {
        let search = engine("hud zzz");
        assert!(search.search("menu/hud.gd").is_none());
    }

    #[test]
    fn test_tokens_do_not_overlap() {
        let result = engine("hud hud").search("hud/hud.gd").unwrap();
        let [a, b] = result.token_matches() else {
            panic!("expected two token matches");
        };
        assert!(!a.intersects(&b.interval()));
        assert!(!b.intersects(&a.interval()));
    }

    #[test]
    fn test_second_token_cannot_reuse_only_placement() {
        let mut search = FuzzySearch::with_config(FuzzySearchConfig::exact());
        search.set_query("ab ab");
        assert!(search.search("xxabxx").is_none());
        assert!(search.search("xxabxab").is_some());
    }

    #[test]
    fn test_miss_budget_is_shared() {
        let mut search = FuzzySearch::with_config(
            FuzzySearchConfig::builder().max_misses(1).build().unwrap(),
        );
        search.set_query("hxd gxd");
        // Each token needs one miss but only one is available.
        assert!(search.search("hud.gd").is_none());

        search.set_query("hxd gd");
        let result = search.search("hud.gd").unwrap();
        assert_eq!(result.miss_budget(), 0);
    }

    #[test]
    fn test_exact_mode_requires_substring() {
        let mut search = FuzzySearch::with_config(FuzzySearchConfig::exact());
        search.set_query("hd");
        assert!(search.search("hud.gd").is_none());

        search.set_query("ud");
        let result = search.search("hud.gd").unwrap();
        assert_eq!(result.token_matches()[0].misses(), 0);
    }

    #[test]
    fn test_case_insensitive_match_penalized() {
        let search = engine("main");
        let lower = search.search("src/main.rs").unwrap();
        let upper = search.search("src/Main.rs").unwrap();
        assert_eq!(lower.score() - upper.score(), CASE_MISMATCH_PENALTY);
    }

    #[test]
    fn test_case_sensitive_query() {
        let search = engine("Main");
        assert!(search.query().is_case_sensitive());
        let result = search.search("src/Main.rs").unwrap();
        assert!(result.score() > EXACT_RUN_BONUS);

        // "M" can't be found in the lowercase candidate, which costs a miss.
        let lower = search.search("src/main.rs").unwrap();
        assert_eq!(lower.miss_budget(), 1);
        assert!(lower.score() < result.score());
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let search = engine("   ");
        let result = search.search("anything/at/all.txt").unwrap();
        assert_eq!(result.score(), 0);
        assert!(result.token_matches().is_empty());
        assert!(search.search("").is_none());
    }

    #[test]
    fn test_empty_candidate_never_matches() {
        assert!(engine("a").search("").is_none());
    }

    #[test]
    fn test_start_offset() {
        let mut search = FuzzySearch::with_config(
            FuzzySearchConfig::builder()
                .allow_subsequences(false)
                .max_misses(0)
                .start_offset(4)
                .build()
                .unwrap(),
        );
        search.set_query("hud");
        assert!(search.search("hud/x.gd").is_none());
        assert!(search.search("res/hud.gd").is_some());
    }

    #[test]
    fn test_search_all_caps_results() {
        let mut search = FuzzySearch::with_config(
            FuzzySearchConfig::builder().max_results(2).build().unwrap(),
        );
        search.set_query("gd");
        let candidates = ["a.gd", "b.gd", "c.gd", "d.gd"];

        let (results, stats) = search.search_all_with_stats(&candidates);
        assert_eq!(results.len(), 2);
        assert_eq!(stats.candidates, 4);
        assert_eq!(stats.matched, 4);
        assert_eq!(stats.returned, 2);
        assert_eq!(results[0].target(), "a.gd");
        assert_eq!(results[1].target(), "b.gd");
    }

    #[test]
    fn test_search_all_empty_inputs() {
        let search = engine("gd");
        let candidates: [&str; 0] = [];
        assert!(search.search_all(&candidates).is_empty());

        let results = engine("").search_all(&["b.txt", "a.txt", ""]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].target(), "a.txt");
    }

    #[test]
    fn test_set_config_validates() {
        let mut search = FuzzySearch::new();
        let config = FuzzySearchConfig {
            max_results: 0,
            ..Default::default()
        };
        assert!(search.set_config(config.clone()).is_err());
        assert!(FuzzySearch::try_new(config).is_err());
        assert_eq!(search.config().max_results, 100);
    }

    #[test]
    fn test_free_search_all() {
        let results = search_all("lib", &["src/lib.rs".to_string(), "README.md".to_string()]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].target(), "src/lib.rs");
    }

    #[test]
    fn test_file_name_follows_last_separator() {
        // Multi-byte characters before the separator keep character indices aligned.
        let result = engine("hud").search("é/x/hud.gd").unwrap();
        assert_eq!(result.dir_index(), Some(3));
        // 9 * 2 + 4 + 100
        assert_eq!(result.score(), 122);
    }

    #[test]
    fn test_very_long_token_saturates() {
        let text = "a".repeat(40_000);
        let result = engine(&text).search(&text).unwrap();
        assert_eq!(result.score(), i32::MAX);
        assert_eq!(result.token_matches()[0].misses(), 0);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let candidates: Vec<String> = (0..500)
            .map(|i| format!("./dir_{}/sub_{}/file_{}.gd", i % 7, i % 13, i))
            .collect();
        let search = engine("dir file gd");

        let sequential: Vec<SearchResult> =
            candidates.iter().filter_map(|c| search.search(c)).collect();
        let parallel = search.collect_matches(&candidates);
        let key = |r: &SearchResult| (r.target().to_string(), r.score(), r.highlight_ranges());
        assert_eq!(
            parallel.iter().map(key).collect::<Vec<_>>(),
            sequential.iter().map(key).collect::<Vec<_>>()
        );

        let expected = sort_and_filter(sequential, search.config().max_results).results;
        let ranked = search.search_all(&candidates);
        assert_eq!(
            ranked.iter().map(key).collect::<Vec<_>>(),
            expected.iter().map(key).collect::<Vec<_>>()
        );
    }
}
