//! Scoring of token matches.
//!
//! Exact, unbroken token matches should almost always beat fragmented
//! subsequence matches. Position in the path, word boundaries and case act
//! as tie breakers between otherwise similar placements.

use crate::token_match::TokenMatch;

/// Characters that delimit words inside a candidate path.
pub const BOUNDARY_CHARS: [char; 5] = ['/', '\\', '-', '_', '.'];

/// Penalty for every token character that could not be placed.
pub const MISS_PENALTY: i32 = 20;

/// Penalty for a match that only exists under case folding.
pub const CASE_MISMATCH_PENALTY: i32 = 3;

/// Bonus for a run that starts or ends on a word boundary.
pub const BOUNDARY_BONUS: i32 = 4;

/// Bonus for a run covering the whole token.
pub const EXACT_RUN_BONUS: i32 = 100;

/// The parts of a candidate the scorer looks at.
#[derive(Debug, Clone, Copy)]
pub struct CandidateContext<'a> {
    /// Original candidate characters, before any case folding.
    pub text: &'a [char],

    /// Index of the last `/`, if any.
    pub dir_index: Option<usize>,
}

impl<'a> CandidateContext<'a> {
    /// Builds the context for a candidate whose last `/` sits at `dir_index`,
    /// as reported by [`SearchResult::dir_index`](crate::SearchResult::dir_index).
    pub fn new(text: &'a [char], dir_index: Option<usize>) -> Self {
        Self { text, dir_index }
    }

    fn is_past_dir(&self, index: usize) -> bool {
        self.dir_index.is_none_or(|dir| index > dir)
    }
}

/// Returns true for positions adjacent to a word break.
///
/// `index` may be one before the first character or one past the last; both
/// are virtual boundaries.
pub fn is_word_boundary(text: &[char], index: isize) -> bool {
    if index < 0 || index as usize >= text.len() {
        return true;
    }
    BOUNDARY_CHARS.contains(&text[index as usize])
}

/// Computes the score of `token_match` within `ctx`.
///
/// `case_mismatch` is set when the match only exists because the candidate
/// was case folded. Scores of very long runs saturate at the `i32` bounds.
pub fn score_token_match(
    token_match: &TokenMatch,
    ctx: &CandidateContext<'_>,
    case_mismatch: bool,
) -> i32 {
    let mut score = i64::from(-MISS_PENALTY).saturating_mul(widen(token_match.misses()));
    if case_mismatch {
        score = score.saturating_sub(i64::from(CASE_MISMATCH_PENALTY));
    }

    for run in token_match.runs() {
        let len = widen(run.len);
        let mut run_score = len.saturating_mul(len);
        if ctx.is_past_dir(run.start) {
            run_score = run_score.saturating_mul(2);
        }
        if is_word_boundary(ctx.text, run.start as isize - 1)
            || is_word_boundary(ctx.text, run.end() as isize)
        {
            run_score = run_score.saturating_add(i64::from(BOUNDARY_BONUS));
        }
        if run.len == token_match.token_length() {
            run_score = run_score.saturating_add(i64::from(EXACT_RUN_BONUS));
        }
        score = score.saturating_add(run_score);
    }

    score.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn widen(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
