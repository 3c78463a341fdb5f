//! A low-level scanner over the template source.

/// A cursor over the unconsumed remainder of the template source.
///
/// The source itself is kept immutable; the cursor is the byte offset where
/// the remainder starts, which keeps the "already consumed" and "remaining"
/// halves explicit. The scanner knows nothing about tokens, it is a pure
/// string splitting primitive. Consumption is strictly left to right with no
/// backtracking.
///
/// All markers searched for are ASCII, so every offset the scanner produces
/// lands on a UTF-8 character boundary.
pub(crate) struct Scanner<'source> {
    /// The original template source.
    source: &'source str,

    /// Byte offset where the unconsumed remainder starts.
    cursor: usize,
}

impl<'source> Scanner<'source> {
    pub fn new(source: &'source str) -> Self {
        Self { source, cursor: 0 }
    }

    /// Returns the byte offset of the next unconsumed character.
    pub fn offset(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.rest().is_empty()
    }

    fn rest(&self) -> &'source str {
        &self.source[self.cursor..]
    }

    /// Finds the earliest occurrence of any candidate in the remainder.
    ///
    /// Candidates matching at the same position tie-break in favor of the one
    /// listed first in `candidates`. On a match the cursor advances to the
    /// start of the match and the skipped text is returned together with the
    /// index of the matched candidate; the match itself is not consumed. When
    /// no candidate occurs the remainder is left untouched.
    pub fn find_any(&mut self, candidates: &[&str]) -> Option<(usize, &'source str)> {
        let rest = self.rest();

        let mut found: Option<(usize, usize)> = None;
        for (p, candidate) in candidates.iter().enumerate() {
            if let Some(at) = rest.find(candidate) {
                if found.map_or(true, |(best, _)| at < best) {
                    found = Some((at, p));
                }
            }
        }

        let (at, p) = found?;
        self.cursor += at;
        Some((p, &rest[..at]))
    }

    /// Consumes the remainder up to the first occurrence of `marker` and
    /// returns the consumed prefix.
    ///
    /// With `include_marker` the marker itself is part of the consumed
    /// prefix, otherwise the remainder still starts at the marker afterward.
    /// An empty marker or an absent marker consumes nothing and returns the
    /// empty string; the caller decides whether a miss is an error.
    pub fn consume_until(&mut self, marker: &str, include_marker: bool) -> &'source str {
        if marker.is_empty() {
            return "";
        }

        let rest = self.rest();
        match rest.find(marker) {
            Some(at) => {
                let to = if include_marker { at + marker.len() } else { at };
                self.cursor += to;
                &rest[..to]
            }
            None => "",
        }
    }

    /// Consumes and returns everything that is left.
    pub fn take_rest(&mut self) -> &'source str {
        let rest = self.rest();
        self.cursor = self.source.len();
        rest
    }
}
