//! Core data structures for deadly-pattern detection.
//!
//! This crate provides the fundamental, efficient data structures shared by
//! the detection engine: type-safe digits and positions, fixed-capacity
//! bitsets over the 9/81/729-element universes, static board geometry
//! (houses and peers), and the candidate grid snapshot.
//!
//! # Overview
//!
//! 1. **Core types**
//!    - [`digit`]: Type-safe representation of sudoku digits 1-9
//!    - [`position`]: Board position (x, y) coordinate types
//!    - [`candidate`]: (cell, digit) candidate pairs
//! 2. **Index semantics** - [`index`]: bounded index types and the
//!    semantics mapping domain values onto container indices
//! 3. **Generic containers** - [`containers`]: [`BitSet9`], [`BitSet81`],
//!    and [`BitSet729`], parameterized by index semantics
//! 4. **Specialized types** - [`DigitSet`], [`CellMap`], [`CandidateMap`],
//!    [`House`], and the [`Grid`] candidate snapshot
//!
//! [`BitSet9`]: containers::BitSet9
//! [`BitSet81`]: containers::BitSet81
//! [`BitSet729`]: containers::BitSet729
//!
//! # Examples
//!
//! ```
//! use mortlace_core::{Digit, Grid, Position};
//!
//! let mut grid = Grid::new();
//! grid.set_digit(Position::new(4, 4), Digit::D5);
//!
//! let candidates = grid.candidates_at(Position::new(4, 5));
//! assert!(!candidates.contains(Digit::D5)); // 5 removed from same column
//! ```

pub mod candidate;
pub mod cell_map;
pub mod containers;
pub mod digit;
pub mod digit_set;
pub mod error;
pub mod grid;
pub mod house;
pub mod index;
pub mod position;

pub use self::{
    candidate::{Candidate, CandidateMap},
    cell_map::CellMap,
    digit::Digit,
    digit_set::DigitSet,
    error::{ConsistencyError, GridParseError},
    grid::Grid,
    house::House,
    position::Position,
};
