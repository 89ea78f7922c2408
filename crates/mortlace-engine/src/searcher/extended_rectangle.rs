//! Extended Rectangle searcher.

use std::ops::ControlFlow;

use mortlace_core::{CellMap, Digit, DigitSet, Grid};

use crate::{
    BoxedSearcher, Conclusion, Highlights, SearchContext, Searcher, Step, Technique,
    pattern::{ExtendedRectanglePattern, extended_rectangle_patterns},
};

const NAME: &str = "Extended Rectangle";

/// Searcher for Extended Rectangle types 1-4 over the fit and fat template
/// catalog.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtendedRectangle {}

impl ExtendedRectangle {
    /// Creates a new `ExtendedRectangle` searcher.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl Searcher for ExtendedRectangle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedSearcher {
        Box::new(*self)
    }

    fn collect(&self, grid: &Grid, ctx: &mut SearchContext<'_>) -> ControlFlow<()> {
        let empty = grid.empty_cells();

        for pattern in extended_rectangle_patterns() {
            if !empty.is_superset(pattern.cells()) {
                continue;
            }

            // Every pair must agree on at least two shared digits.
            if !pairs_share_digits(grid, pattern) {
                continue;
            }

            // Split the digits of the pattern into normal digits (shared by
            // two or more pairs) and extra digits.
            let (normal_digits, extra_digits) = split_digits(grid, pattern);
            if normal_digits.len() != pattern.size() || extra_digits.is_empty() {
                continue;
            }

            if let Some(extra_digit) = extra_digits.as_single() {
                let extra_cells = pattern.cells() & candidate_positions(grid, empty, extra_digit);
                if extra_cells.is_empty() {
                    continue;
                }

                if extra_cells.len() == 1 {
                    check_type1(grid, pattern, extra_cells, extra_digit, ctx)?;
                }
                check_type2(grid, empty, pattern, extra_cells, extra_digit, ctx)?;
            } else {
                let mut extra_cells = CellMap::new();
                for cell in pattern.cells() {
                    if !(grid.candidates_at(cell) & extra_digits).is_empty() {
                        extra_cells.insert(cell);
                    }
                }
                if !extra_cells.in_one_house() {
                    continue;
                }

                check_type3_naked(grid, empty, pattern, extra_digits, extra_cells, ctx)?;
                check_type14(grid, empty, pattern, normal_digits, extra_cells, ctx)?;
            }
        }
        ControlFlow::Continue(())
    }
}

fn candidate_positions(grid: &Grid, empty: CellMap, digit: Digit) -> CellMap {
    grid.digit_positions(digit) & empty
}

fn pairs_share_digits(grid: &Grid, pattern: &ExtendedRectanglePattern) -> bool {
    pattern.pairs().iter().all(|&(left, right)| {
        (grid.candidates_at(left) & grid.candidates_at(right)).len() >= 2
    })
}

fn split_digits(grid: &Grid, pattern: &ExtendedRectanglePattern) -> (DigitSet, DigitSet) {
    let mut result_mask = DigitSet::new();
    for &(left, right) in pattern.pairs() {
        result_mask |= grid.candidates_at(left) | grid.candidates_at(right);
    }

    let mut normal_digits = DigitSet::new();
    let mut extra_digits = DigitSet::new();
    for digit in result_mask {
        let shared_pairs = pattern
            .pairs()
            .iter()
            .filter(|&&(left, right)| {
                (grid.candidates_at(left) & grid.candidates_at(right)).contains(digit)
            })
            .count();
        if shared_pairs >= 2 {
            normal_digits.insert(digit);
        } else {
            extra_digits.insert(digit);
        }
    }
    (normal_digits, extra_digits)
}

fn pattern_highlights(grid: &Grid, cells: CellMap) -> Highlights {
    let mut highlights = Highlights::new();
    for cell in cells {
        for digit in grid.candidates_at(cell) {
            highlights.push_candidate(cell, digit);
        }
    }
    highlights
}

/// The lone extra-digit cell must resolve to the extra digit: everything
/// else it holds dies.
fn check_type1(
    grid: &Grid,
    pattern: &ExtendedRectanglePattern,
    extra_cells: CellMap,
    extra_digit: Digit,
    ctx: &mut SearchContext<'_>,
) -> ControlFlow<()> {
    let Some(extra_cell) = extra_cells.as_single() else {
        return ControlFlow::Continue(());
    };
    let mut conclusions = Vec::new();
    for digit in grid.candidates_at(extra_cell) {
        if digit != extra_digit {
            conclusions.push(Conclusion::eliminate(extra_cell, digit));
        }
    }
    if conclusions.is_empty() {
        return ControlFlow::Continue(());
    }

    let highlights = pattern_highlights(grid, pattern.cells().difference(extra_cells));
    ctx.push(Step::new(
        Technique::ExtendedRectangleType1,
        conclusions,
        highlights,
    ))
}

fn check_type2(
    grid: &Grid,
    empty: CellMap,
    pattern: &ExtendedRectanglePattern,
    extra_cells: CellMap,
    extra_digit: Digit,
    ctx: &mut SearchContext<'_>,
) -> ControlFlow<()> {
    let elim_map = extra_cells.peer_intersection() & candidate_positions(grid, empty, extra_digit);
    if elim_map.is_empty() {
        return ControlFlow::Continue(());
    }

    let conclusions = elim_map
        .iter()
        .map(|cell| Conclusion::eliminate(cell, extra_digit))
        .collect();
    ctx.push(Step::new(
        Technique::ExtendedRectangleType2,
        conclusions,
        pattern_highlights(grid, pattern.cells()),
    ))
}

fn check_type3_naked(
    grid: &Grid,
    empty: CellMap,
    pattern: &ExtendedRectanglePattern,
    extra_digits: DigitSet,
    extra_cells: CellMap,
    ctx: &mut SearchContext<'_>,
) -> ControlFlow<()> {
    for house in extra_cells.covered_houses() {
        let other_cells = (house.positions() & empty).difference(pattern.cells());

        for size in 1..other_cells.len() {
            for cells in other_cells.subsets(size) {
                let mask = grid.candidates_union(cells);
                if mask.len() != size + 1 || !mask.is_superset(extra_digits) {
                    continue;
                }

                let elim_map = other_cells.difference(cells);
                let mut conclusions = Vec::new();
                for digit in mask {
                    for cell in elim_map & candidate_positions(grid, empty, digit) {
                        conclusions.push(Conclusion::eliminate(cell, digit));
                    }
                }
                if conclusions.is_empty() {
                    continue;
                }

                let mut highlights = pattern_highlights(grid, pattern.cells());
                for cell in cells {
                    for digit in grid.candidates_at(cell) {
                        highlights.push_candidate(cell, digit);
                    }
                }
                highlights.houses.push(house);
                ctx.push(Step::new(
                    Technique::ExtendedRectangleType3,
                    conclusions,
                    highlights,
                ))?;
            }
        }
    }
    ControlFlow::Continue(())
}

/// The multi-extra-digit fallbacks: a single extra cell is still a type 1,
/// two extra cells over a conjugate pair are a type 4.
fn check_type14(
    grid: &Grid,
    empty: CellMap,
    pattern: &ExtendedRectanglePattern,
    normal_digits: DigitSet,
    extra_cells: CellMap,
    ctx: &mut SearchContext<'_>,
) -> ControlFlow<()> {
    if let Some(extra_cell) = extra_cells.as_single() {
        let mut conclusions = Vec::new();
        for digit in normal_digits {
            if grid.contains_candidate(extra_cell, digit) {
                conclusions.push(Conclusion::eliminate(extra_cell, digit));
            }
        }
        if conclusions.is_empty() {
            return ControlFlow::Continue(());
        }
        let highlights = pattern_highlights(grid, pattern.cells().difference(extra_cells));
        return ctx.push(Step::new(
            Technique::ExtendedRectangleType1,
            conclusions,
            highlights,
        ));
    }

    let Some((c1, c2)) = extra_cells.as_double() else {
        return ControlFlow::Continue(());
    };
    let conjugate_mask =
        grid.candidates_at(c1) & grid.candidates_at(c2) & normal_digits;
    if conjugate_mask.is_empty() {
        return ControlFlow::Continue(());
    }

    for house in extra_cells.covered_houses() {
        for conjugate_digit in conjugate_mask {
            if candidate_positions(grid, empty, conjugate_digit) & house.positions() != extra_cells
            {
                continue;
            }

            let elim_digits = normal_digits.difference(DigitSet::from_elem(conjugate_digit));
            let mut conclusions = Vec::new();
            for digit in elim_digits {
                for cell in extra_cells & candidate_positions(grid, empty, digit) {
                    conclusions.push(Conclusion::eliminate(cell, digit));
                }
            }
            if conclusions.is_empty() {
                continue;
            }

            let mut highlights =
                pattern_highlights(grid, pattern.cells().difference(extra_cells));
            for cell in extra_cells {
                highlights.push_candidate(cell, conjugate_digit);
            }
            highlights.houses.push(house);
            ctx.push(Step::new(
                Technique::ExtendedRectangleType4,
                conclusions,
                highlights,
            ))?;
        }
    }
    ControlFlow::Continue(())
}
