//! Borescoper's Deadly Pattern searcher.

use std::ops::ControlFlow;

use mortlace_core::{CellMap, Digit, DigitSet, Grid};

use crate::{
    BoxedSearcher, Conclusion, Highlights, SearchContext, Searcher, Step, Technique,
    pattern::{BorescoperPattern, borescoper_patterns},
};

const NAME: &str = "Borescoper's Deadly Pattern";

/// Searcher for Borescoper's Deadly Pattern types 1-4 over the heptagon and
/// octagon template catalog.
#[derive(Debug, Default, Clone, Copy)]
pub struct Borescoper {}

impl Borescoper {
    /// Creates a new `Borescoper` searcher.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl Searcher for Borescoper {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedSearcher {
        Box::new(*self)
    }

    fn collect(&self, grid: &Grid, ctx: &mut SearchContext<'_>) -> ControlFlow<()> {
        let empty = grid.empty_cells();
        if empty.len() < 7 {
            return ControlFlow::Continue(());
        }

        for pattern in borescoper_patterns() {
            if !empty.is_superset(pattern.map()) {
                continue;
            }

            let or_mask = grid.candidates_union(pattern.map());
            check_type1(grid, empty, pattern, or_mask, ctx)?;
            check_type2(grid, empty, pattern, or_mask, ctx)?;
            check_type3(grid, empty, pattern, or_mask, ctx)?;
            check_type4(grid, empty, pattern, or_mask, ctx)?;
        }
        ControlFlow::Continue(())
    }
}

/// Number of digits a fully occupied template carries: four for heptagons,
/// five for octagons.
fn full_digit_count(pattern: &BorescoperPattern) -> usize {
    if pattern.is_heptagon() { 4 } else { 5 }
}

/// Size of the deadly digit subsets iterated per template.
fn core_size(pattern: &BorescoperPattern) -> usize {
    if pattern.is_heptagon() { 3 } else { 4 }
}

fn candidate_positions(grid: &Grid, empty: CellMap, digit: Digit) -> CellMap {
    grid.digit_positions(digit) & empty
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

fn check_type1(
    grid: &Grid,
    empty: CellMap,
    pattern: &BorescoperPattern,
    or_mask: DigitSet,
    ctx: &mut SearchContext<'_>,
) -> ControlFlow<()> {
    if or_mask.len() != full_digit_count(pattern) {
        return ControlFlow::Continue(());
    }
    let map = pattern.map();

    for core in or_mask.subsets(core_size(pattern)) {
        let Some(extra_digit) = or_mask.difference(core).as_single() else {
            continue;
        };
        let holders = map & candidate_positions(grid, empty, extra_digit);
        let Some(elim_cell) = holders.as_single() else {
            continue;
        };

        let elim_mask = grid.candidates_at(elim_cell) & core;
        if elim_mask.is_empty() {
            continue;
        }

        let conclusions = elim_mask
            .iter()
            .map(|digit| Conclusion::eliminate(elim_cell, digit))
            .collect();
        let highlights = pattern_highlights(grid, map.difference(holders));
        ctx.push(Step::new(Technique::BorescoperType1, conclusions, highlights))?;
    }
    ControlFlow::Continue(())
}

fn check_type2(
    grid: &Grid,
    empty: CellMap,
    pattern: &BorescoperPattern,
    or_mask: DigitSet,
    ctx: &mut SearchContext<'_>,
) -> ControlFlow<()> {
    if or_mask.len() != full_digit_count(pattern) {
        return ControlFlow::Continue(());
    }
    let map = pattern.map();

    for core in or_mask.subsets(core_size(pattern)) {
        let Some(extra_digit) = or_mask.difference(core).as_single() else {
            continue;
        };
        let holders = map & candidate_positions(grid, empty, extra_digit);
        let elim_map = holders.peer_intersection().difference(map)
            & candidate_positions(grid, empty, extra_digit);
        if elim_map.is_empty() {
            continue;
        }

        let conclusions = elim_map
            .iter()
            .map(|cell| Conclusion::eliminate(cell, extra_digit))
            .collect();
        let highlights = pattern_highlights(grid, map);
        ctx.push(Step::new(Technique::BorescoperType2, conclusions, highlights))?;
    }
    ControlFlow::Continue(())
}

fn check_type3(
    grid: &Grid,
    empty: CellMap,
    pattern: &BorescoperPattern,
    or_mask: DigitSet,
    ctx: &mut SearchContext<'_>,
) -> ControlFlow<()> {
    let map = pattern.map();
    for house in map.houses() {
        let current_map = house.positions() & map;
        let other_cells = map.difference(current_map);
        let other_mask = grid.candidates_union(other_cells);
        if other_mask.len() != core_size(pattern) {
            continue;
        }

        for core in or_mask.subsets(core_size(pattern)) {
            if other_mask != core {
                continue;
            }

            // Digits that appear only inside this house's part of the
            // pattern; together with a naked subset of outside cells they
            // lock size + 1 digits into size + 1 cells.
            let extra_digits = or_mask.difference(core);
            let iteration_cells = (house.positions() & empty).difference(map);
            let min_size = extra_digits.len().saturating_sub(1);
            for size in min_size..iteration_cells.len() {
                for cells in iteration_cells.subsets(size) {
                    let mask = grid.candidates_union(cells);
                    if mask.len() != size + 1 || !mask.is_superset(extra_digits) {
                        continue;
                    }

                    let elim_map = iteration_cells.difference(cells);
                    let mut conclusions = Vec::new();
                    for digit in mask {
                        for cell in elim_map & candidate_positions(grid, empty, digit) {
                            conclusions.push(Conclusion::eliminate(cell, digit));
                        }
                    }
                    if conclusions.is_empty() {
                        continue;
                    }

                    let mut highlights = pattern_highlights(grid, map);
                    for cell in cells {
                        for digit in grid.candidates_at(cell) {
                            highlights.push_candidate(cell, digit);
                        }
                    }
                    highlights.houses.push(house);
                    ctx.push(Step::new(Technique::BorescoperType3, conclusions, highlights))?;
                }
            }
        }
    }
    ControlFlow::Continue(())
}

fn check_type4(
    grid: &Grid,
    empty: CellMap,
    pattern: &BorescoperPattern,
    or_mask: DigitSet,
    ctx: &mut SearchContext<'_>,
) -> ControlFlow<()> {
    let map = pattern.map();
    let solved = grid.solved_cells();

    for house in map.houses() {
        let current_map = house.positions() & map;
        let other_cells = map.difference(current_map);
        let other_mask = grid.candidates_union(other_cells);
        if other_mask.len() != core_size(pattern) {
            continue;
        }

        for core in or_mask.subsets(core_size(pattern)) {
            if other_mask != core {
                continue;
            }

            // All but one in-house digit must form a conjugate house: they
            // may appear nowhere in the house outside the pattern cells.
            for locked in core.subsets(current_map.len().saturating_sub(1)) {
                let mut locked_map = CellMap::new();
                let mut house_has_value = false;
                for digit in locked {
                    if !(grid.digit_positions(digit) & solved & house.positions()).is_empty() {
                        house_has_value = true;
                        break;
                    }
                    locked_map |= candidate_positions(grid, empty, digit) & house.positions();
                }
                if house_has_value || locked_map != current_map {
                    continue;
                }

                let final_digits = core.difference(locked);
                let mut possible = CellMap::new();
                for digit in final_digits {
                    possible |= candidate_positions(grid, empty, digit);
                }
                let elim_map = current_map & possible;
                if elim_map.is_empty() {
                    continue;
                }

                let mut conclusions = Vec::new();
                for cell in elim_map {
                    for digit in final_digits {
                        if grid.contains_candidate(cell, digit) {
                            conclusions.push(Conclusion::eliminate(cell, digit));
                        }
                    }
                }

                let mut highlights = pattern_highlights(grid, other_cells);
                for cell in current_map {
                    for digit in grid.candidates_at(cell) & locked {
                        highlights.push_candidate(cell, digit);
                    }
                }
                highlights.houses.push(house);
                ctx.push(Step::new(Technique::BorescoperType4, conclusions, highlights))?;
            }
        }
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use mortlace_core::{House, Position};

    use super::*;
    use crate::testing::DetectionTester;

    /// Builds a grid where exactly the given cells are open with the given
    /// masks and every other cell is a solved filler digit.
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

    #[test]
    fn test_heptagon_type1_eliminates_core_digits_from_extra_cell() {
        let pattern = &borescoper_patterns()[0];
        assert!(pattern.is_heptagon());

        let core = DigitSet::from_iter([Digit::D1, Digit::D2, Digit::D3]);
        let extra_cell = pattern.pair2()[1];
        let mut masks: Vec<_> = pattern
            .map()
            .iter()
            .map(|cell| (cell, core))
            .collect();
        for entry in &mut masks {
            if entry.0 == extra_cell {
                entry.1 = DigitSet::from_iter([Digit::D1, Digit::D2, Digit::D4]);
            }
        }

        DetectionTester::new(grid_with_masks(&masks))
            .collect_with(&Borescoper::new())
            .assert_any_step()
            .assert_technique(0, Technique::BorescoperType1)
            .assert_eliminated(extra_cell, Digit::D1)
            .assert_eliminated(extra_cell, Digit::D2)
            .assert_not_eliminated(extra_cell, Digit::D4);
    }

    #[test]
    fn test_type2_eliminates_extra_digit_from_common_peers() {
        let pattern = &borescoper_patterns()[0];
        let core = DigitSet::from_iter([Digit::D1, Digit::D2, Digit::D3]);
        let with_extra = DigitSet::from_iter([Digit::D1, Digit::D2, Digit::D3, Digit::D4]);

        // The two vertical-domino cells carry the extra digit; an outside
        // bystander cell in the same column keeps it too.
        let [v1, v2] = pattern.pair1();
        let bystander = House::Column { x: v1.x() }
            .positions()
            .difference(pattern.map())
            .iter()
            .next()
            .unwrap();

        let mut masks: Vec<_> = pattern
            .map()
            .iter()
            .map(|cell| (cell, core))
            .collect();
        for entry in &mut masks {
            if entry.0 == v1 || entry.0 == v2 {
                entry.1 = with_extra;
            }
        }
        masks.push((bystander, DigitSet::from_iter([Digit::D4, Digit::D5])));

        DetectionTester::new(grid_with_masks(&masks))
            .collect_with(&Borescoper::new())
            .assert_any_step()
            .assert_eliminated(bystander, Digit::D4);
    }

    #[test]
    fn test_too_few_empty_cells_short_circuits() {
        let masks = [
            (Position::new(0, 0), DigitSet::from_iter([Digit::D1, Digit::D2])),
            (Position::new(1, 0), DigitSet::from_iter([Digit::D1, Digit::D2])),
        ];
        DetectionTester::new(grid_with_masks(&masks))
            .collect_with(&Borescoper::new())
            .assert_no_steps();
    }
}
