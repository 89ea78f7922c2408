//! Unique Loop elimination types.
//!
//! The cyclic chain itself is discovered by an external collaborator; this
//! module only classifies a given loop into elimination types 1-4. A unique
//! loop is an even cycle of cells alternating two digits through shared
//! houses; if every loop cell held exactly those two digits the solution
//! could rotate around the cycle.

use std::ops::ControlFlow;

use mortlace_core::{CellMap, Digit, DigitSet, Grid};

use crate::{
    Conclusion, Highlights, SearchContext, Step, Technique,
};

/// Classifier for a pre-discovered unique loop.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniqueLoop {}

impl UniqueLoop {
    /// Creates a new `UniqueLoop` classifier.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Classifies the loop over digits `d1`/`d2`, pushing every applicable
    /// elimination type into the context.
    ///
    /// `loop_cells` must be the cell set of a valid unique loop for the two
    /// digits; validity is the loop finder's responsibility.
    pub fn classify(
        self,
        grid: &Grid,
        loop_cells: CellMap,
        d1: Digit,
        d2: Digit,
        ctx: &mut SearchContext<'_>,
    ) -> ControlFlow<()> {
        let empty = grid.empty_cells();
        let comparer = DigitSet::from_iter([d1, d2]);

        // Loop cells carrying anything beyond the two loop digits.
        let mut extra_cells = CellMap::new();
        for cell in loop_cells {
            if !grid.candidates_at(cell).difference(comparer).is_empty() {
                extra_cells.insert(cell);
            }
        }

        check_type1(grid, empty, loop_cells, extra_cells, comparer, ctx)?;
        check_type2(grid, empty, loop_cells, extra_cells, comparer, ctx)?;
        check_type3(grid, empty, loop_cells, extra_cells, comparer, ctx)?;
        check_type4(grid, empty, loop_cells, extra_cells, (d1, d2), ctx)?;
        ControlFlow::Continue(())
    }
}

fn candidate_positions(grid: &Grid, empty: CellMap, digit: Digit) -> CellMap {
    grid.digit_positions(digit) & empty
}

fn loop_highlights(loop_cells: CellMap, comparer: DigitSet, grid: &Grid) -> Highlights {
    let mut highlights = Highlights::new();
    for cell in loop_cells {
        for digit in grid.candidates_at(cell) & comparer {
            highlights.push_candidate(cell, digit);
        }
    }
    highlights
}

fn check_type1(
    grid: &Grid,
    _empty: CellMap,
    loop_cells: CellMap,
    extra_cells: CellMap,
    comparer: DigitSet,
    ctx: &mut SearchContext<'_>,
) -> ControlFlow<()> {
    let Some(extra_cell) = extra_cells.as_single() else {
        return ControlFlow::Continue(());
    };

    let mut conclusions = Vec::new();
    for digit in grid.candidates_at(extra_cell) & comparer {
        conclusions.push(Conclusion::eliminate(extra_cell, digit));
    }
    if conclusions.is_empty() {
        return ControlFlow::Continue(());
    }

    let highlights = loop_highlights(
        loop_cells.difference(extra_cells),
        comparer,
        grid,
    );
    ctx.push(Step::new(Technique::UniqueLoopType1, conclusions, highlights))
}

fn check_type2(
    grid: &Grid,
    empty: CellMap,
    loop_cells: CellMap,
    extra_cells: CellMap,
    comparer: DigitSet,
    ctx: &mut SearchContext<'_>,
) -> ControlFlow<()> {
    let extra_mask = grid.candidates_union(extra_cells).difference(comparer);
    let Some(extra_digit) = extra_mask.as_single() else {
        return ControlFlow::Continue(());
    };

    let holders = extra_cells & candidate_positions(grid, empty, extra_digit);
    let elim_map = holders.peer_intersection() & candidate_positions(grid, empty, extra_digit);
    if elim_map.is_empty() {
        return ControlFlow::Continue(());
    }

    let conclusions = elim_map
        .iter()
        .map(|cell| Conclusion::eliminate(cell, extra_digit))
        .collect();
    let mut highlights = loop_highlights(loop_cells, comparer, grid);
    for cell in holders {
        highlights.push_candidate(cell, extra_digit);
    }
    ctx.push(Step::new(Technique::UniqueLoopType2, conclusions, highlights))
}

fn check_type3(
    grid: &Grid,
    empty: CellMap,
    loop_cells: CellMap,
    extra_cells: CellMap,
    comparer: DigitSet,
    ctx: &mut SearchContext<'_>,
) -> ControlFlow<()> {
    // Every extra cell must still carry a loop digit alongside its extras.
    for cell in extra_cells {
        let mask = grid.candidates_at(cell);
        if (mask & comparer).is_empty() || mask == comparer {
            return ControlFlow::Continue(());
        }
    }

    let m = grid.candidates_union(extra_cells);
    if !m.is_superset(comparer) {
        return ControlFlow::Continue(());
    }
    let other_digits = m.difference(comparer);

    if extra_cells.in_one_house() {
        if extra_cells.len() != 2 {
            return ControlFlow::Continue(());
        }

        for house in extra_cells.covered_houses() {
            let other_cells = (house.positions() & empty).difference(loop_cells);
            let min_size = other_digits.len().saturating_sub(1);
            for size in min_size..other_cells.len() {
                for cells in other_cells.subsets(size) {
                    let mask = grid.candidates_union(cells);
                    if mask.len() != size + 1 || !mask.is_superset(other_digits) {
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

                    let mut highlights = loop_highlights(loop_cells, comparer, grid);
                    for cell in cells {
                        for digit in grid.candidates_at(cell) {
                            highlights.push_candidate(cell, digit);
                        }
                    }
                    highlights.houses.push(house);
                    ctx.push(Step::new(
                        Technique::UniqueLoopType3,
                        conclusions,
                        highlights,
                    ))?;
                }
            }
        }
        return ControlFlow::Continue(());
    }

    // Spread subtype: the subset forms among the common peers of the extra
    // cells.
    let other_cells = (extra_cells.peer_intersection() & empty).difference(loop_cells);
    if other_cells.is_empty() {
        return ControlFlow::Continue(());
    }

    let min_size = other_digits.len().saturating_sub(1);
    for size in min_size..other_cells.len() {
        for cells in other_cells.subsets(size) {
            let mask = grid.candidates_union(cells);
            if mask.len() != size + 1 || !mask.is_superset(other_digits) {
                continue;
            }

            let elim_map = (extra_cells | cells).peer_intersection().difference(loop_cells);
            let mut conclusions = Vec::new();
            for cell in elim_map & empty {
                for digit in grid.candidates_at(cell) & other_digits {
                    conclusions.push(Conclusion::eliminate(cell, digit));
                }
            }
            if conclusions.is_empty() {
                continue;
            }

            let mut highlights = loop_highlights(loop_cells, comparer, grid);
            for cell in cells {
                for digit in grid.candidates_at(cell) {
                    highlights.push_candidate(cell, digit);
                }
            }
            ctx.push(Step::new(
                Technique::UniqueLoopType3,
                conclusions,
                highlights,
            ))?;
        }
    }
    ControlFlow::Continue(())
}

fn check_type4(
    grid: &Grid,
    empty: CellMap,
    loop_cells: CellMap,
    extra_cells: CellMap,
    (d1, d2): (Digit, Digit),
    ctx: &mut SearchContext<'_>,
) -> ControlFlow<()> {
    let Some((first, second)) = extra_cells.as_double() else {
        return ControlFlow::Continue(());
    };
    if !extra_cells.in_one_house() {
        return ControlFlow::Continue(());
    }

    for house in extra_cells.covered_houses() {
        for (digit, other_digit) in [(d1, d2), (d2, d1)] {
            // The loop digit is confined to the loop inside this house:
            // the two extra cells form its conjugate pair.
            let map = candidate_positions(grid, empty, digit) & house.positions();
            if map != house.positions() & loop_cells {
                continue;
            }

            let mut conclusions = Vec::new();
            for cell in [first, second] {
                if grid.contains_candidate(cell, other_digit) {
                    conclusions.push(Conclusion::eliminate(cell, other_digit));
                }
            }
            if conclusions.is_empty() {
                continue;
            }

            let mut highlights = loop_highlights(
                loop_cells.difference(extra_cells),
                DigitSet::from_iter([d1, d2]),
                grid,
            );
            for cell in extra_cells {
                highlights.push_candidate(cell, digit);
            }
            highlights.houses.push(house);
            ctx.push(Step::new(
                Technique::UniqueLoopType4,
                conclusions,
                highlights,
            ))?;
        }
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use mortlace_core::Position;

    use super::*;

    fn grid_with_masks(masks: &[(Position, DigitSet)]) -> Grid {
        let mut grid = Grid::new();
        for index in 0..81 {
            let pos = Position::from_index(index);
            let keep = masks
                .iter()
                .find(|&&(cell, _)| cell == pos)
                .map_or_else(|| DigitSet::from_elem(Digit::D9), |&(_, mask)| mask);
            for digit in DigitSet::FULL.difference(keep) {
                grid.remove_candidate(pos, digit);
            }
        }
        grid
    }

    /// A four-cell loop (a unique rectangle) over rows 1-2, columns 1/4.
    fn rectangle_loop() -> CellMap {
        CellMap::from_iter([
            Position::new(0, 0),
            Position::new(3, 0),
            Position::new(0, 1),
            Position::new(3, 1),
        ])
    }

    fn classify(grid: &Grid, loop_cells: CellMap) -> Vec<Step> {
        let mut steps = Vec::new();
        let mut ctx = SearchContext::new(&mut steps, false);
        let _ = UniqueLoop::new().classify(grid, loop_cells, Digit::D1, Digit::D2, &mut ctx);
        steps
    }

    #[test]
    fn test_type1_clears_loop_digits_from_extra_cell() {
        let pair = DigitSet::from_iter([Digit::D1, Digit::D2]);
        let masks = [
            (Position::new(0, 0), pair),
            (Position::new(3, 0), pair),
            (Position::new(0, 1), pair),
            (
                Position::new(3, 1),
                DigitSet::from_iter([Digit::D1, Digit::D2, Digit::D7]),
            ),
        ];
        let grid = grid_with_masks(&masks);
        let steps = classify(&grid, rectangle_loop());
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].technique(), Technique::UniqueLoopType1);
        let conclusions = steps[0].conclusions();
        assert!(conclusions.contains(&Conclusion::eliminate(Position::new(3, 1), Digit::D1)));
        assert!(conclusions.contains(&Conclusion::eliminate(Position::new(3, 1), Digit::D2)));
    }

    #[test]
    fn test_type2_eliminates_shared_extra_digit() {
        let pair = DigitSet::from_iter([Digit::D1, Digit::D2]);
        let with_extra = DigitSet::from_iter([Digit::D1, Digit::D2, Digit::D7]);
        let masks = [
            (Position::new(0, 0), pair),
            (Position::new(3, 0), pair),
            (Position::new(0, 1), with_extra),
            (Position::new(3, 1), with_extra),
            // A bystander in the same row seeing both extra cells.
            (Position::new(6, 1), DigitSet::from_iter([Digit::D7, Digit::D8])),
        ];
        let grid = grid_with_masks(&masks);
        let steps = classify(&grid, rectangle_loop());
        assert!(
            steps
                .iter()
                .any(|step| step.technique() == Technique::UniqueLoopType2)
        );
        let type2 = steps
            .iter()
            .find(|step| step.technique() == Technique::UniqueLoopType2)
            .unwrap();
        assert!(
            type2
                .conclusions()
                .contains(&Conclusion::eliminate(Position::new(6, 1), Digit::D7))
        );
    }

    #[test]
    fn test_clean_loop_yields_nothing() {
        let pair = DigitSet::from_iter([Digit::D1, Digit::D2]);
        let masks = [
            (Position::new(0, 0), pair),
            (Position::new(3, 0), pair),
            (Position::new(0, 1), pair),
            (Position::new(3, 1), pair),
        ];
        let grid = grid_with_masks(&masks);
        assert!(classify(&grid, rectangle_loop()).is_empty());
    }
}
