//! Candidate (cell, digit) pairs and candidate-level sets.

use std::fmt::{self, Display};

use crate::{CellMap, Digit, DigitSet, Position, containers::BitSet729, index::CandidateSemantics};

/// A (cell, digit) pair: the possibility of placing `digit` at `position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Candidate {
    position: Position,
    digit: Digit,
}

impl Candidate {
    /// Creates a new candidate.
    #[must_use]
    #[inline]
    pub const fn new(position: Position, digit: Digit) -> Self {
        Self { position, digit }
    }

    /// Returns the cell position.
    #[must_use]
    #[inline]
    pub const fn position(self) -> Position {
        self.position
    }

    /// Returns the digit.
    #[must_use]
    #[inline]
    pub const fn digit(self) -> Digit {
        self.digit
    }

    /// Returns the set of candidates that directly constrain this one: the
    /// other digits of the same cell, and the same digit in every peer cell.
    #[must_use]
    pub fn peers(self) -> CandidateMap {
        let mut peers = CandidateMap::new();
        for digit in DigitSet::FULL.difference(DigitSet::from_elem(self.digit)) {
            peers.insert(Candidate::new(self.position, digit));
        }
        for pos in self.position.peers() {
            peers.insert(Candidate::new(pos, self.digit));
        }
        peers
    }
}

impl Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.position, self.digit)
    }
}

/// A set of (cell, digit) candidates, stored as a 729-bit set.
///
/// Used for eliminations and presentation highlights. Iteration is in
/// ascending (cell, digit) order.
pub type CandidateMap = BitSet729<CandidateSemantics>;

impl CandidateMap {
    /// Returns the candidates that are peers of every member of this set
    /// (see [`Candidate::peers`]). The peer intersection of the empty set is
    /// empty.
    #[must_use]
    pub fn peer_intersection(self) -> Self {
        let mut iter = self.iter();
        let Some(first) = iter.next() else {
            return Self::EMPTY;
        };
        let mut result = first.peers();
        for candidate in iter {
            result = result.intersection(candidate.peers());
        }
        result
    }

    /// Returns the set of cells that appear in at least one member.
    #[must_use]
    pub fn cells(self) -> CellMap {
        let mut cells = CellMap::new();
        for candidate in self {
            cells.insert(candidate.position());
        }
        cells
    }

    /// Returns the set of digits that appear in at least one member.
    #[must_use]
    pub fn digits(self) -> DigitSet {
        let mut digits = DigitSet::new();
        for candidate in self {
            digits.insert(candidate.digit());
        }
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_peers() {
        let candidate = Candidate::new(Position::new(0, 0), Digit::D1);
        let peers = candidate.peers();
        // 8 other digits in the cell + the digit in 20 peer cells.
        assert_eq!(peers.len(), 28);
        assert!(peers.contains(Candidate::new(Position::new(0, 0), Digit::D2)));
        assert!(peers.contains(Candidate::new(Position::new(8, 0), Digit::D1)));
        assert!(!peers.contains(candidate));
        assert!(!peers.contains(Candidate::new(Position::new(8, 8), Digit::D1)));
    }

    #[test]
    fn test_peer_intersection_same_digit() {
        // Two candidates of one digit in the same row: the shared peers of
        // that digit are the remaining row cells plus both boxes' cells.
        let map = CandidateMap::from_iter([
            Candidate::new(Position::new(0, 0), Digit::D4),
            Candidate::new(Position::new(5, 0), Digit::D4),
        ]);
        let common = map.peer_intersection();
        assert!(common.contains(Candidate::new(Position::new(7, 0), Digit::D4)));
        assert!(!common.contains(Candidate::new(Position::new(7, 1), Digit::D4)));
        // Different digits survive only in cells shared by both candidates:
        // there are none for two distinct cells.
        assert!(!common.contains(Candidate::new(Position::new(0, 0), Digit::D5)));
    }

    #[test]
    fn test_cells_and_digits_projections() {
        let map = CandidateMap::from_iter([
            Candidate::new(Position::new(1, 1), Digit::D2),
            Candidate::new(Position::new(1, 1), Digit::D3),
            Candidate::new(Position::new(2, 2), Digit::D2),
        ]);
        assert_eq!(
            map.cells(),
            CellMap::from_iter([Position::new(1, 1), Position::new(2, 2)])
        );
        assert_eq!(map.digits(), DigitSet::from_iter([Digit::D2, Digit::D3]));
    }
}
