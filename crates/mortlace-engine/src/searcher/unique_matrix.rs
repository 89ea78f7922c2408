//! Unique Matrix searcher.

use std::ops::ControlFlow;

use mortlace_core::{CellMap, Digit, DigitSet, Grid};

use crate::{
    BoxedSearcher, Conclusion, Highlights, SearchContext, Searcher, Step, Technique,
    pattern::matrix_patterns,
};

const NAME: &str = "Unique Matrix";

/// Searcher for Unique Matrix types 1-4 over the 162 nine-cell templates.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniqueMatrix {}

impl UniqueMatrix {
    /// Creates a new `UniqueMatrix` searcher.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl Searcher for UniqueMatrix {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedSearcher {
        Box::new(*self)
    }

    fn collect(&self, grid: &Grid, ctx: &mut SearchContext<'_>) -> ControlFlow<()> {
        let empty = grid.empty_cells();

        for &pattern in matrix_patterns() {
            if !empty.is_superset(pattern) {
                continue;
            }

            let mask = grid.candidates_union(pattern);
            check_type1(grid, empty, pattern, mask, ctx)?;
            check_type2(grid, empty, pattern, mask, ctx)?;
            check_type3(grid, empty, pattern, mask, ctx)?;
            check_type4(grid, empty, pattern, mask, ctx)?;
        }
        ControlFlow::Continue(())
    }
}

fn candidate_positions(grid: &Grid, empty: CellMap, digit: Digit) -> CellMap {
    grid.digit_positions(digit) & empty
}

fn pattern_highlights(grid: &Grid, cells: CellMap, core: DigitSet) -> Highlights {
    let mut highlights = Highlights::new();
    for cell in cells {
        for digit in grid.candidates_at(cell) & core {
            highlights.push_candidate(cell, digit);
        }
    }
    highlights
}

/// Cells of the pattern carrying at least one digit outside the core.
fn extra_cells_of(grid: &Grid, pattern: CellMap, extra_digits: DigitSet) -> CellMap {
    let mut cells = CellMap::new();
    for cell in pattern {
        if !(grid.candidates_at(cell) & extra_digits).is_empty() {
            cells.insert(cell);
        }
    }
    cells
}

fn check_type1(
    grid: &Grid,
    empty: CellMap,
    pattern: CellMap,
    mask: DigitSet,
    ctx: &mut SearchContext<'_>,
) -> ControlFlow<()> {
    if mask.len() != 5 {
        return ControlFlow::Continue(());
    }

    for core in mask.subsets(4) {
        let Some(extra_digit) = mask.difference(core).as_single() else {
            continue;
        };
        let holders = candidate_positions(grid, empty, extra_digit) & pattern;
        let Some(elim_cell) = holders.as_single() else {
            continue;
        };

        let elim_mask = grid
            .candidates_at(elim_cell)
            .difference(DigitSet::from_elem(extra_digit));
        if elim_mask.is_empty() {
            continue;
        }

        let conclusions = elim_mask
            .iter()
            .map(|digit| Conclusion::eliminate(elim_cell, digit))
            .collect();
        let highlights = pattern_highlights(grid, pattern.difference(holders), core);
        ctx.push(Step::new(Technique::UniqueMatrixType1, conclusions, highlights))?;
    }
    ControlFlow::Continue(())
}

fn check_type2(
    grid: &Grid,
    empty: CellMap,
    pattern: CellMap,
    mask: DigitSet,
    ctx: &mut SearchContext<'_>,
) -> ControlFlow<()> {
    if mask.len() != 5 {
        return ControlFlow::Continue(());
    }

    for core in mask.subsets(4) {
        let Some(extra_digit) = mask.difference(core).as_single() else {
            continue;
        };
        let holders = candidate_positions(grid, empty, extra_digit) & pattern;
        let elim_map = holders.peer_intersection() & candidate_positions(grid, empty, extra_digit);
        if elim_map.is_empty() {
            continue;
        }

        let conclusions = elim_map
            .iter()
            .map(|cell| Conclusion::eliminate(cell, extra_digit))
            .collect();
        let mut highlights = pattern_highlights(grid, pattern, core);
        for cell in holders {
            highlights.push_candidate(cell, extra_digit);
        }
        ctx.push(Step::new(Technique::UniqueMatrixType2, conclusions, highlights))?;
    }
    ControlFlow::Continue(())
}

fn check_type3(
    grid: &Grid,
    empty: CellMap,
    pattern: CellMap,
    mask: DigitSet,
    ctx: &mut SearchContext<'_>,
) -> ControlFlow<()> {
    for core in mask.subsets(4) {
        let extra_digits = mask.difference(core);
        if extra_digits.is_empty() {
            continue;
        }
        let extra_cells = extra_cells_of(grid, pattern, extra_digits);
        if !extra_cells.in_one_house() {
            continue;
        }

        for house in extra_cells.covered_houses() {
            let all_cells = (house.positions() & empty).difference(pattern);
            let min_size = extra_digits.len().saturating_sub(1);
            for size in min_size..all_cells.len() {
                for cells in all_cells.subsets(size) {
                    let temp_mask = grid.candidates_union(cells);
                    if temp_mask.len() != size + 1 || !temp_mask.is_superset(extra_digits) {
                        continue;
                    }

                    let mut conclusions = Vec::new();
                    for digit in temp_mask {
                        let elim_cells =
                            all_cells.difference(cells) & candidate_positions(grid, empty, digit);
                        for cell in elim_cells {
                            conclusions.push(Conclusion::eliminate(cell, digit));
                        }
                    }
                    if conclusions.is_empty() {
                        continue;
                    }

                    let mut highlights = pattern_highlights(grid, pattern, mask);
                    for cell in cells {
                        for digit in grid.candidates_at(cell) {
                            highlights.push_candidate(cell, digit);
                        }
                    }
                    highlights.houses.push(house);
                    ctx.push(Step::new(
                        Technique::UniqueMatrixType3,
                        conclusions,
                        highlights,
                    ))?;
                }
            }
        }
    }
    ControlFlow::Continue(())
}

fn check_type4(
    grid: &Grid,
    empty: CellMap,
    pattern: CellMap,
    mask: DigitSet,
    ctx: &mut SearchContext<'_>,
) -> ControlFlow<()> {
    for core in mask.subsets(4) {
        let extra_digits = mask.difference(core);
        if extra_digits.is_empty() {
            continue;
        }
        let extra_cells = extra_cells_of(grid, pattern, extra_digits);
        if extra_cells.len() != 2 || !extra_cells.in_one_house() {
            continue;
        }

        for house in extra_cells.covered_houses() {
            for conjugate_digit in core {
                if candidate_positions(grid, empty, conjugate_digit) & house.positions()
                    != extra_cells
                {
                    continue;
                }

                let elim_digits = core.difference(DigitSet::from_elem(conjugate_digit));
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
                    pattern_highlights(grid, pattern.difference(extra_cells), core);
                for cell in extra_cells {
                    highlights.push_candidate(cell, conjugate_digit);
                }
                highlights.houses.push(house);
                ctx.push(Step::new(
                    Technique::UniqueMatrixType4,
                    conclusions,
                    highlights,
                ))?;
            }
        }
    }
    ControlFlow::Continue(())
}
