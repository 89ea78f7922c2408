//! Error types for grid state validation and parsing.

use derive_more::{Display, Error};

use crate::{Digit, Position};

/// A contradiction detected in a candidate grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ConsistencyError {
    /// A cell has no remaining candidate.
    #[display("cell {position} has no remaining candidate")]
    NoCandidates {
        /// The cell with an empty candidate mask.
        position: Position,
    },
    /// Two solved cells in one house hold the same digit.
    #[display("digit {digit} is placed more than once in a house")]
    DuplicateDigit {
        /// The duplicated digit.
        digit: Digit,
    },
}

/// An error produced when parsing a grid string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GridParseError {
    /// The string does not contain exactly 81 cell entries.
    #[display("expected 81 cells, found {found}")]
    BadLength {
        /// Number of cell entries found.
        found: usize,
    },
    /// The string contains a character that is not a digit or placeholder.
    #[display("unexpected character {character:?} in grid string")]
    BadCharacter {
        /// The offending character.
        character: char,
    },
}
