//! Placement of a single query token inside a candidate.

use crate::interval::Interval;

/// A contiguous span of a token matched without skipping candidate characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubstringRun {
    /// Character index of the first matched character.
    pub start: usize,

    /// Number of consecutive matched characters.
    pub len: usize,
}

impl SubstringRun {
    /// Creates a new run.
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Index one past the last matched character.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// The closed interval covered by this run.
    pub fn interval(&self) -> Interval {
        Interval::from_span(self.start, self.len)
    }
}

/// The result of one attempt to place a token in a candidate.
///
/// Runs are kept in discovery order, which is also left to right. The
/// matched length, bounding interval and miss count are derived from the runs
/// as they are added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMatch {
    token_length: usize,
    matched_length: usize,
    interval: Interval,
    runs: Vec<SubstringRun>,
    pub(crate) score: i32,
}

impl TokenMatch {
    /// Creates an empty match for a token of `token_length` characters.
    pub fn new(token_length: usize) -> Self {
        Self {
            token_length,
            matched_length: 0,
            interval: Interval::EMPTY,
            runs: Vec::new(),
            score: 0,
        }
    }

    /// Records a matched run and extends the bounding interval.
    pub fn add_run(&mut self, start: usize, len: usize) {
        let run = SubstringRun::new(start, len);
        self.matched_length += len;
        self.interval = self.interval.union(run.interval());
        self.runs.push(run);
    }

    /// Length of the token in characters.
    pub fn token_length(&self) -> usize {
        self.token_length
    }

    /// Sum of all run lengths.
    pub fn matched_length(&self) -> usize {
        self.matched_length
    }

    /// Token characters that could not be placed.
    pub fn misses(&self) -> usize {
        self.token_length.saturating_sub(self.matched_length)
    }

    /// Bounding interval of every run, empty if nothing matched.
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Matched runs in discovery order.
    pub fn runs(&self) -> &[SubstringRun] {
        &self.runs
    }

    /// Score assigned by the scorer; zero until scored.
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Returns true when this match overlaps `other`.
    pub fn intersects(&self, other: &Interval) -> bool {
        self.interval.intersects(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_match() {
        let m = TokenMatch::new(4);
        assert_eq!(m.misses(), 4);
        assert_eq!(m.matched_length(), 0);
        assert!(!m.interval().is_valid());
        assert!(m.runs().is_empty());
        assert!(!m.intersects(&Interval::new(0, 10)));
    }

    #[test]
    fn test_add_runs_tracks_derived_state() {
        let mut m = TokenMatch::new(6);
        m.add_run(2, 2);
        m.add_run(7, 3);

        assert_eq!(m.matched_length(), 5);
        assert_eq!(m.misses(), 1);
        assert_eq!(m.interval(), Interval::new(2, 9));
        assert_eq!(
            m.runs(),
            &[SubstringRun::new(2, 2), SubstringRun::new(7, 3)]
        );
    }

    #[test]
    fn test_run_bounds() {
        let run = SubstringRun::new(3, 4);
        assert_eq!(run.end(), 7);
        assert_eq!(run.interval(), Interval::new(3, 6));
    }

    #[test]
    fn test_intersects_uses_bounding_interval() {
        let mut m = TokenMatch::new(2);
        m.add_run(0, 1);
        m.add_run(8, 1);

        // The gap between runs still belongs to the bounding interval.
        assert!(m.intersects(&Interval::new(4, 5)));
        assert!(!m.intersects(&Interval::new(9, 12)));
    }
}
