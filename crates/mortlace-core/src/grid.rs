//! Board-wide candidate tracking.

use std::str::FromStr;

use crate::{
    Candidate, CandidateMap, CellMap, ConsistencyError, Digit, DigitSet, GridParseError, House,
    Position,
};

/// A candidate snapshot of the 9×9 board.
///
/// Internally stores nine [`CellMap`] bitboards, one per digit, each
/// tracking the positions where that digit remains possible. A cell is
/// *solved* when exactly one digit remains and *empty* otherwise; detection
/// code treats grids as immutable and works on local clones for hypothetical
/// reasoning.
///
/// # Examples
///
/// ```
/// use mortlace_core::{Digit, Grid, Position};
///
/// let mut grid = Grid::new();
/// grid.set_digit(Position::new(4, 4), Digit::D5);
///
/// // The placement removed 5 from the cell's peers.
/// assert!(!grid.candidates_at(Position::new(4, 5)).contains(Digit::D5));
/// assert_eq!(grid.solved_digit(Position::new(4, 4)), Some(Digit::D5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// `digits[i]` holds the possible positions for digit `i + 1`.
    digits: [CellMap; 9],
}

impl Default for Grid {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Creates a grid with every digit possible in every cell.
    #[must_use]
    pub fn new() -> Self {
        Self {
            digits: [CellMap::FULL; 9],
        }
    }

    #[inline]
    fn digit_map(&self, digit: Digit) -> CellMap {
        self.digits[usize::from(digit.value() - 1)]
    }

    #[inline]
    fn digit_map_mut(&mut self, digit: Digit) -> &mut CellMap {
        &mut self.digits[usize::from(digit.value() - 1)]
    }

    /// Returns the set of positions where the digit remains possible.
    #[must_use]
    #[inline]
    pub fn digit_positions(&self, digit: Digit) -> CellMap {
        self.digit_map(digit)
    }

    /// Returns the candidate digits of a cell.
    #[must_use]
    pub fn candidates_at(&self, pos: Position) -> DigitSet {
        let mut candidates = DigitSet::new();
        for digit in Digit::ALL {
            if self.digit_map(digit).contains(pos) {
                candidates.insert(digit);
            }
        }
        candidates
    }

    /// Returns the union of the candidate digits over a set of cells.
    #[must_use]
    pub fn candidates_union(&self, cells: CellMap) -> DigitSet {
        let mut union = DigitSet::new();
        for digit in Digit::ALL {
            if !self.digit_map(digit).is_disjoint(cells) {
                union.insert(digit);
            }
        }
        union
    }

    /// Returns `true` if `digit` is a candidate at `pos`.
    #[must_use]
    #[inline]
    pub fn contains_candidate(&self, pos: Position, digit: Digit) -> bool {
        self.digit_map(digit).contains(pos)
    }

    /// Classifies cells by candidate count: `(≥1, ≥2, ≥3)`.
    fn count_classes(&self) -> (CellMap, CellMap, CellMap) {
        let mut ge1 = CellMap::EMPTY;
        let mut ge2 = CellMap::EMPTY;
        let mut ge3 = CellMap::EMPTY;
        for map in self.digits {
            ge3 |= ge2 & map;
            ge2 |= ge1 & map;
            ge1 |= map;
        }
        (ge1, ge2, ge3)
    }

    /// Returns the cells holding two or more candidates.
    #[must_use]
    pub fn empty_cells(&self) -> CellMap {
        let (_, ge2, _) = self.count_classes();
        ge2
    }

    /// Returns the cells holding exactly one candidate.
    #[must_use]
    pub fn solved_cells(&self) -> CellMap {
        let (ge1, ge2, _) = self.count_classes();
        ge1.difference(ge2)
    }

    /// Returns the cells holding exactly two candidates.
    #[must_use]
    pub fn bivalue_cells(&self) -> CellMap {
        let (_, ge2, ge3) = self.count_classes();
        ge2.difference(ge3)
    }

    /// Returns the cells holding three or more candidates.
    #[must_use]
    pub fn multivalue_cells(&self) -> CellMap {
        let (_, _, ge3) = self.count_classes();
        ge3
    }

    /// Returns the solved digit of a cell, or `None` if the cell is empty.
    #[must_use]
    pub fn solved_digit(&self, pos: Position) -> Option<Digit> {
        self.candidates_at(pos).as_single()
    }

    /// Returns the total number of candidates on the board.
    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.digits.iter().map(|map| map.len()).sum()
    }

    /// Returns every candidate of the board as a [`CandidateMap`].
    #[must_use]
    pub fn candidates(&self) -> CandidateMap {
        let mut all = CandidateMap::new();
        for digit in Digit::ALL {
            for pos in self.digit_map(digit) {
                all.insert(Candidate::new(pos, digit));
            }
        }
        all
    }

    /// Assigns a digit to a cell: removes the cell's other candidates and
    /// the digit from all peers of the cell.
    ///
    /// Detection code calls this on local clones only, to reason about
    /// hypothetical placements.
    pub fn set_digit(&mut self, pos: Position, digit: Digit) {
        for map in &mut self.digits {
            map.remove(pos);
        }
        let peers = pos.peers();
        let map = self.digit_map_mut(digit);
        *map = map.difference(peers);
        map.insert(pos);
    }

    /// Removes a single candidate from a cell.
    pub fn remove_candidate(&mut self, pos: Position, digit: Digit) {
        self.digit_map_mut(digit).remove(pos);
    }

    /// Checks the grid for contradictions.
    ///
    /// # Errors
    ///
    /// Returns [`ConsistencyError::NoCandidates`] if any cell has an empty
    /// candidate mask, or [`ConsistencyError::DuplicateDigit`] if two solved
    /// cells in one house hold the same digit.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        let (ge1, _, _) = self.count_classes();
        if let Some(position) = (!ge1).iter().next() {
            return Err(ConsistencyError::NoCandidates { position });
        }

        let solved = self.solved_cells();
        for digit in Digit::ALL {
            let placed = self.digit_map(digit) & solved;
            for house in House::ALL {
                if (placed & house.positions()).len() > 1 {
                    return Err(ConsistencyError::DuplicateDigit { digit });
                }
            }
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = GridParseError;

    /// Parses a grid string.
    ///
    /// Digits 1-9 are givens (assigned with peer propagation in reading
    /// order); `.`, `_`, and `0` are empty cells; whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut grid = Self::new();
        let mut index = 0_usize;
        for character in s.chars() {
            if character.is_whitespace() {
                continue;
            }
            let digit = match character {
                '.' | '_' | '0' => None,
                '1'..='9' => Some(Digit::from_value(character as u8 - b'0')),
                _ => return Err(GridParseError::BadCharacter { character }),
            };
            if index >= 81 {
                return Err(GridParseError::BadLength { found: index + 1 });
            }
            if let Some(digit) = digit {
                #[expect(clippy::cast_possible_truncation)]
                grid.set_digit(Position::from_index(index as u8), digit);
            }
            index += 1;
        }
        if index != 81 {
            return Err(GridParseError::BadLength { found: index });
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_full_candidates() {
        let grid = Grid::new();
        assert_eq!(grid.candidate_count(), 729);
        assert_eq!(grid.candidates_at(Position::new(0, 0)).len(), 9);
        assert!(grid.empty_cells().len() == 81);
    }

    #[test]
    fn test_set_digit_propagates_to_peers() {
        let mut grid = Grid::new();
        let pos = Position::new(4, 4);
        grid.set_digit(pos, Digit::D5);

        assert_eq!(grid.solved_digit(pos), Some(Digit::D5));
        for peer in pos.peers() {
            assert!(!grid.contains_candidate(peer, Digit::D5));
        }
        // Non-peers are untouched.
        assert!(grid.contains_candidate(Position::new(0, 8), Digit::D5));
    }

    #[test]
    fn test_cell_classification() {
        let mut grid = Grid::new();
        let solved = Position::new(0, 0);
        let bivalue = Position::new(4, 4);
        grid.set_digit(solved, Digit::D1);
        for digit in Digit::ALL {
            if digit != Digit::D2 && digit != Digit::D3 {
                grid.remove_candidate(bivalue, digit);
            }
        }

        assert!(grid.solved_cells().contains(solved));
        assert!(grid.bivalue_cells().contains(bivalue));
        assert!(grid.empty_cells().contains(bivalue));
        assert!(!grid.empty_cells().contains(solved));
        assert!(grid.multivalue_cells().contains(Position::new(8, 8)));
    }

    #[test]
    fn test_candidates_union() {
        let mut grid = Grid::new();
        let a = Position::new(0, 0);
        let b = Position::new(1, 0);
        for digit in Digit::ALL {
            if digit != Digit::D1 && digit != Digit::D2 {
                grid.remove_candidate(a, digit);
            }
            if digit != Digit::D2 && digit != Digit::D3 {
                grid.remove_candidate(b, digit);
            }
        }
        assert_eq!(
            grid.candidates_union(CellMap::from_iter([a, b])),
            DigitSet::from_iter([Digit::D1, Digit::D2, Digit::D3])
        );
    }

    #[test]
    fn test_from_str_givens() {
        let grid: Grid = "
            53_ _7_ ___
            6__ 195 ___
            _98 ___ _6_
            8__ _6_ __3
            4__ 8_3 __1
            7__ _2_ __6
            _6_ ___ 28_
            ___ 419 __5
            ___ _8_ _79
        "
        .parse()
        .unwrap();

        assert_eq!(grid.solved_digit(Position::new(0, 0)), Some(Digit::D5));
        assert_eq!(grid.solved_digit(Position::new(4, 1)), Some(Digit::D9));
        assert!(grid.solved_digit(Position::new(2, 0)).is_none());
        // Givens removed their digit from peers.
        assert!(!grid.contains_candidate(Position::new(2, 0), Digit::D5));
        assert!(grid.check_consistency().is_ok());
    }

    #[test]
    fn test_from_str_rejects_bad_input() {
        assert_eq!(
            Grid::from_str("123"),
            Err(GridParseError::BadLength { found: 3 })
        );
        assert!(matches!(
            Grid::from_str(&"x".repeat(81)),
            Err(GridParseError::BadCharacter { character: 'x' })
        ));
    }

    #[test]
    fn test_check_consistency_detects_no_candidates() {
        let mut grid = Grid::new();
        let pos = Position::new(3, 3);
        for digit in Digit::ALL {
            grid.remove_candidate(pos, digit);
        }
        assert_eq!(
            grid.check_consistency(),
            Err(ConsistencyError::NoCandidates { position: pos })
        );
    }

    #[test]
    fn test_check_consistency_detects_duplicates() {
        let mut grid = Grid::new();
        // Force two solved cells in one row to the same digit without
        // propagation, by stripping the other candidates directly.
        for pos in [Position::new(0, 0), Position::new(5, 0)] {
            for digit in Digit::ALL {
                if digit != Digit::D4 {
                    grid.remove_candidate(pos, digit);
                }
            }
        }
        assert_eq!(
            grid.check_consistency(),
            Err(ConsistencyError::DuplicateDigit { digit: Digit::D4 })
        );
    }
}
