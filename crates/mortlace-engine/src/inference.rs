//! Deadly-pattern inference.
//!
//! A candidate configuration is *deadly* when its digits can be swapped
//! pairwise without breaking any constraint, so a puzzle containing it in
//! full would admit more than one solution. The test is the same in both
//! entry points: every (cell, digit) pair must see exactly two positions of
//! that digit inside each of the cell's three house slices.

use mortlace_core::{CellMap, DigitSet, Grid, House, Position};

fn houses_of(pos: Position) -> [House; 3] {
    [
        House::Row { y: pos.y() },
        House::Column { x: pos.x() },
        House::Box {
            index: pos.box_index(),
        },
    ]
}

/// Returns `true` if the grid forms a deadly pattern over the given
/// unsolved cells: every one of them is bi-value and every remaining
/// candidate appears exactly twice in each of its houses.
///
/// `unsolved` is passed by the caller because a hypothetical assignment can
/// strip a peer down to a single candidate; such a cell is still undecided
/// and must fail the all-bi-value requirement rather than count as solved.
/// This is the test applied by the BUG false-candidate scan.
#[must_use]
pub fn forms_deadly_pattern(grid: &Grid, unsolved: CellMap) -> bool {
    for cell in unsolved {
        if grid.candidates_at(cell).len() != 2 {
            return false;
        }
    }

    for cell in unsolved {
        for digit in grid.candidates_at(cell) {
            let positions = grid.digit_positions(digit) & unsolved;
            for house in houses_of(cell) {
                if (positions & house.positions()).len() != 2 {
                    return false;
                }
            }
        }
    }
    true
}

/// Returns `true` if the hypothetical configuration over `cells` is deadly.
///
/// `candidates_of` supplies the candidate mask of each member cell; the
/// exactly-twice test runs on house slices of `cells` only, so the rest of
/// the grid does not participate. Used standalone by the Rotating Deadly
/// Pattern searcher.
#[must_use]
pub fn is_deadly_configuration<F>(cells: CellMap, candidates_of: F) -> bool
where
    F: Fn(Position) -> DigitSet,
{
    for cell in cells {
        for digit in candidates_of(cell) {
            for house in houses_of(cell) {
                let slice = cells & house.positions();
                let count = slice
                    .iter()
                    .filter(|&other| candidates_of(other).contains(digit))
                    .count();
                if count != 2 {
                    return false;
                }
            }
        }
    }
    true
}
