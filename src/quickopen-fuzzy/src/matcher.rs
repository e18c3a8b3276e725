//! Placement of query tokens inside candidate text.
//!
//! Both modes work on character slices so every index handed out is a
//! character index into the candidate, independent of its UTF-8 encoding.

use crate::token_match::TokenMatch;

/// Locates a single token in a candidate, either as a contiguous substring or
/// as an eager, possibly gapped subsequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenMatcher {
    allow_subsequences: bool,
}

impl Default for TokenMatcher {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TokenMatcher {
    /// Creates a matcher. With `allow_subsequences` unset only contiguous
    /// occurrences of a token are accepted.
    pub fn new(allow_subsequences: bool) -> Self {
        Self { allow_subsequences }
    }

    /// Attempts to place `token` in `target` at or after `offset`.
    ///
    /// In subsequence mode every token character is looked up eagerly from the
    /// current cursor. Characters that do not occur in the rest of the target
    /// are skipped and charged against `miss_budget`; the attempt fails once
    /// more characters are skipped than the budget allows. Exact mode never
    /// produces misses.
    pub fn try_match(
        &self,
        token: &[char],
        target: &[char],
        offset: usize,
        miss_budget: usize,
    ) -> Option<TokenMatch> {
        if self.allow_subsequences {
            match_subsequence(token, target, offset, miss_budget)
        } else {
            match_exact(token, target, offset)
        }
    }
}

fn match_exact(token: &[char], target: &[char], offset: usize) -> Option<TokenMatch> {
    let start = find_slice(target, token, offset)?;
    let mut token_match = TokenMatch::new(token.len());
    if !token.is_empty() {
        token_match.add_run(start, token.len());
    }
    Some(token_match)
}

fn match_subsequence(
    token: &[char],
    target: &[char],
    offset: usize,
    mut miss_budget: usize,
) -> Option<TokenMatch> {
    let mut token_match = TokenMatch::new(token.len());
    let mut cursor = offset;
    // (start, len) of the run being extended
    let mut run: Option<(usize, usize)> = None;

    for &c in token {
        let Some(pos) = find_char(target, c, cursor) else {
            if miss_budget == 0 {
                return None;
            }
            miss_budget -= 1;
            continue;
        };

        run = match run {
            Some((start, len)) if start + len == pos => Some((start, len + 1)),
            previous => {
                if let Some((start, len)) = previous {
                    token_match.add_run(start, len);
                }
                Some((pos, 1))
            }
        };
        cursor = pos + 1;
    }

    if let Some((start, len)) = run {
        token_match.add_run(start, len);
    }

    Some(token_match)
}

/// Index of the first `c` at or after `from`.
fn find_char(haystack: &[char], c: char, from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .iter()
        .position(|&h| h == c)
        .map(|pos| pos + from)
}

/// Index of the first occurrence of `needle` starting at or after `from`.
fn find_slice(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    let rest = haystack.get(from..)?;
    if needle.is_empty() {
        return Some(from);
    }
    rest.windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| pos + from)
}
