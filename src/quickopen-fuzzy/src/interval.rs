//! Closed integer intervals over candidate character positions.

/// A closed interval `[start, end]` of character indices.
///
/// The sentinel [`Interval::EMPTY`] (`(-1, -1)`) marks "no match yet". Any
/// interval that is not valid behaves as empty for [`union`](Self::union) and
/// [`intersects`](Self::intersects).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    /// First covered index (inclusive).
    pub start: isize,

    /// Last covered index (inclusive).
    pub end: isize,
}

impl Default for Interval {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Interval {
    /// The empty interval.
    pub const EMPTY: Self = Self { start: -1, end: -1 };

    /// Creates an interval from inclusive bounds.
    pub const fn new(start: isize, end: isize) -> Self {
        Self { start, end }
    }

    /// Creates the interval covered by `len` characters starting at `start`.
    ///
    /// A zero length yields an invalid interval.
    pub fn from_span(start: usize, len: usize) -> Self {
        let start = start as isize;
        Self::new(start, start + len as isize - 1)
    }

    /// Returns true when the interval covers at least one position.
    pub fn is_valid(&self) -> bool {
        self.start >= 0 && self.end >= self.start
    }

    /// Returns the smallest interval covering both operands.
    ///
    /// An invalid operand is ignored, so `EMPTY` is the identity.
    pub fn union(self, other: Self) -> Self {
        if !self.is_valid() {
            return other;
        }
        if !other.is_valid() {
            return self;
        }
        Self::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Closed overlap test. Touching end points count as overlap.
    pub fn intersects(&self, other: &Self) -> bool {
        if !self.is_valid() || !other.is_valid() {
            return false;
        }
        self.end >= other.start && self.start <= other.end
    }

    /// Number of covered positions, zero when invalid.
    pub fn len(&self) -> usize {
        if self.is_valid() {
            (self.end - self.start + 1) as usize
        } else {
            0
        }
    }

    /// Returns true when the interval covers nothing.
    pub fn is_empty(&self) -> bool {
        !self.is_valid()
    }
}
