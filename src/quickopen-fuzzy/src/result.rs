//! Per-candidate search results.

use std::cmp::Ordering;
use std::ops::Range;
use std::time::Duration;

use crate::interval::Interval;
use crate::token_match::TokenMatch;

/// Aggregated match state for one candidate.
///
/// Token matches are accepted one at a time through
/// [`add_token_match`](Self::add_token_match). Each acceptance adds to the
/// score, widens the match interval and permanently spends part of the miss
/// budget.
///
/// Equality and ordering compare rank keys only: score, character length and
/// text. Two results for the same text with the same score are equal even if
/// their token matches differ.
#[derive(Debug, Clone)]
pub struct SearchResult {
    target: String,
    char_len: usize,
    dir_index: Option<usize>,
    miss_budget: usize,
    score: i32,
    match_interval: Interval,
    token_matches: Vec<TokenMatch>,
}

impl SearchResult {
    /// Creates an empty result for `target` with `miss_budget` misses to spend.
    pub fn new(target: impl Into<String>, miss_budget: usize) -> Self {
        let target = target.into();
        let mut char_len = 0;
        let mut dir_index = None;
        for (i, c) in target.chars().enumerate() {
            if c == '/' {
                dir_index = Some(i);
            }
            char_len += 1;
        }

        Self {
            target,
            char_len,
            dir_index,
            miss_budget,
            score: 0,
            match_interval: Interval::EMPTY,
            token_matches: Vec::new(),
        }
    }

    /// The candidate text.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Length of the candidate in characters.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// Character index of the last `/` in the candidate.
    pub fn dir_index(&self) -> Option<usize> {
        self.dir_index
    }

    /// Misses still available to later tokens.
    pub fn miss_budget(&self) -> usize {
        self.miss_budget
    }

    /// Sum of the scores of every accepted token match.
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Bounding interval of every accepted token match.
    pub fn match_interval(&self) -> Interval {
        self.match_interval
    }

    /// Accepted token matches in the order tokens were processed.
    pub fn token_matches(&self) -> &[TokenMatch] {
        &self.token_matches
    }

    /// Checks whether `token_match` may join this result.
    ///
    /// A match must fit in the remaining miss budget and must not overlap the
    /// span claimed by another token. When exactly one match has been accepted
    /// any overlap with the aggregate interval rejects. With two or more, the
    /// aggregate interval may have gaps between matches, so only overlap with
    /// an individual accepted match rejects.
    pub fn can_add_token_match(&self, token_match: &TokenMatch) -> bool {
        if token_match.misses() > self.miss_budget {
            return false;
        }

        if token_match.intersects(&self.match_interval) {
            if self.token_matches.len() == 1 {
                return false;
            }
            if self
                .token_matches
                .iter()
                .any(|existing| existing.intersects(&token_match.interval()))
            {
                return false;
            }
        }

        true
    }

    /// Accepts `token_match`. Callers check
    /// [`can_add_token_match`](Self::can_add_token_match) first.
    pub fn add_token_match(&mut self, token_match: TokenMatch) {
        self.score = self.score.saturating_add(token_match.score());
        self.match_interval = self.match_interval.union(token_match.interval());
        self.miss_budget = self.miss_budget.saturating_sub(token_match.misses());
        self.token_matches.push(token_match);
    }

    /// Sorted, merged character ranges of every matched run, for highlighting.
    pub fn highlight_ranges(&self) -> Vec<Range<usize>> {
        let mut runs: Vec<Range<usize>> = self
            .token_matches
            .iter()
            .flat_map(|m| m.runs().iter().map(|run| run.start..run.end()))
            .collect();
        runs.sort_by_key(|r| r.start);

        let mut merged: Vec<Range<usize>> = Vec::with_capacity(runs.len());
        for run in runs {
            match merged.last_mut() {
                Some(last) if run.start <= last.end => last.end = last.end.max(run.end),
                _ => merged.push(run),
            }
        }
        merged
    }

    /// [`highlight_ranges`](Self::highlight_ranges) as byte ranges into
    /// [`target`](Self::target).
    pub fn byte_ranges(&self) -> Vec<Range<usize>> {
        let offsets: Vec<usize> = self
            .target
            .char_indices()
            .map(|(byte, _)| byte)
            .chain(std::iter::once(self.target.len()))
            .collect();

        self.highlight_ranges()
            .into_iter()
            .filter_map(|r| Some(*offsets.get(r.start)?..*offsets.get(r.end)?))
            .collect()
    }

    /// Ranking order: higher score first, then shorter text, then
    /// lexicographically smaller text.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.char_len.cmp(&other.char_len))
            .then_with(|| self.target.cmp(&other.target))
    }
}

impl PartialEq for SearchResult {
    /// Same rank, see [`rank_cmp`](Self::rank_cmp).
    fn eq(&self, other: &Self) -> bool {
        self.rank_cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchResult {}

impl PartialOrd for SearchResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchResult {
    /// Better-ranked results compare as smaller, so an ascending sort yields
    /// the final display order.
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank_cmp(other)
    }
}

/// Statistics about a `search_all` run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    /// Number of candidates searched.
    pub candidates: usize,

    /// Candidates where every token found a placement.
    pub matched: usize,

    /// Matches dropped by score culling.
    pub culled: usize,

    /// Results returned after the top-K cut.
    pub returned: usize,

    /// Score threshold used for culling, `None` when nothing matched.
    pub cull_threshold: Option<f64>,

    /// Wall time of the whole run.
    pub elapsed: Duration,
}
