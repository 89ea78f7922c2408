//! Bi-value Universal Grave searcher.
//!
//! A grid in which every empty cell is bi-value and every candidate appears
//! exactly twice per house admits two solutions, which is impossible for a
//! well-posed puzzle. The *true candidates* are the minimal candidates that
//! must survive to avoid that grave; classification of the true-candidate
//! set yields the BUG types, and a separate scan proves individual
//! candidates false by showing that assigning them would complete the
//! grave.

use std::ops::ControlFlow;

use log::trace;
use mortlace_core::{Candidate, CandidateMap, CellMap, Digit, DigitSet, Grid, House};

use crate::{
    BoxedSearcher, Conclusion, Highlights, SearchContext, Searcher, Step, Technique,
    inference::forms_deadly_pattern,
};

const NAME: &str = "Bi-value Universal Grave";

/// BUG + n is skipped beyond this many true candidates; larger sets never
/// produce a worthwhile step and the candidate-peer intersection cost grows
/// with the set.
const MULTIPLE_TRUE_CANDIDATE_CAP: usize = 18;

/// Searcher for the Bi-value Universal Grave family: types 1-4, the
/// extended types (+ n and XZ), and the false-candidate type.
#[derive(Debug, Default, Clone, Copy)]
pub struct Bug {
    search_extended_types: bool,
}

impl Bug {
    /// Creates a searcher covering the basic types and the false-candidate
    /// scan.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            search_extended_types: false,
        }
    }

    /// Creates a searcher that additionally checks BUG + n and BUG-XZ.
    #[must_use]
    pub const fn with_extended_types() -> Self {
        Self {
            search_extended_types: true,
        }
    }
}

impl Searcher for Bug {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedSearcher {
        Box::new(*self)
    }

    fn collect(&self, grid: &Grid, ctx: &mut SearchContext<'_>) -> ControlFlow<()> {
        let empty = grid.empty_cells();
        self.check_true_candidate_types(grid, empty, ctx)?;
        Self::check_false_candidates(grid, empty, ctx)?;
        ControlFlow::Continue(())
    }
}

impl Bug {
    fn check_true_candidate_types(
        &self,
        grid: &Grid,
        empty: CellMap,
        ctx: &mut SearchContext<'_>,
    ) -> ControlFlow<()> {
        let Some(true_candidates) = true_candidates(grid, empty) else {
            return ControlFlow::Continue(());
        };
        if true_candidates.is_empty() {
            return ControlFlow::Continue(());
        }

        if let Some(candidate) = true_candidates.as_single() {
            let mut highlights = Highlights::new();
            highlights.push_candidate(candidate.position(), candidate.digit());
            ctx.push(Step::new(
                Technique::BugType1,
                vec![Conclusion::assign(candidate.position(), candidate.digit())],
                highlights,
            ))
        } else if let Some(digit) = single_digit_of(true_candidates) {
            check_type2(grid, empty, true_candidates, digit, ctx)
        } else {
            if self.search_extended_types {
                check_multiple(grid, empty, true_candidates, ctx)?;
                check_xz(grid, empty, true_candidates, ctx)?;
            }
            check_type3_naked(grid, empty, true_candidates, ctx)?;
            check_type4(grid, empty, true_candidates, ctx)
        }
    }

    /// Scans for candidates that would complete the grave if assigned.
    ///
    /// The scan is the most expensive routine of the family, so it is gated
    /// by a necessary candidate-count bound: one assignment removes the
    /// assigned cell's own candidates plus at most one candidate from each
    /// of its 20 peers, and what remains must be exactly two per empty
    /// cell.
    fn check_false_candidates(
        grid: &Grid,
        empty: CellMap,
        ctx: &mut SearchContext<'_>,
    ) -> ControlFlow<()> {
        let multivalue = grid.multivalue_cells();
        let possible = multivalue.peer_intersection() & empty;
        if possible.is_empty() {
            // False candidates must be seen by every multi-value cell.
            return ControlFlow::Continue(());
        }

        let empty_candidates = grid.candidate_count() - grid.solved_cells().len();
        if empty_candidates > 2 * empty.len() + 27 {
            trace!("false-candidate scan pruned: {empty_candidates} candidates over {} empty cells", empty.len());
            return ControlFlow::Continue(());
        }

        for cell in possible {
            for digit in grid.candidates_at(cell) {
                let mut copied = grid.clone();
                copied.set_digit(cell, digit);
                if !forms_deadly_pattern(&copied, empty.difference(CellMap::from_elem(cell))) {
                    continue;
                }

                let mut highlights = Highlights::new();
                highlights.cells = multivalue;
                ctx.push(Step::new(
                    Technique::BugFalseCandidate,
                    vec![Conclusion::eliminate(cell, digit)],
                    highlights,
                ))?;
            }
        }
        ControlFlow::Continue(())
    }
}

/// Positions where `digit` is still an open candidate (solved cells
/// excluded).
fn candidate_positions(grid: &Grid, empty: CellMap, digit: Digit) -> CellMap {
    grid.digit_positions(digit) & empty
}

/// Computes the true candidates of the grid, or `None` when the grid is not
/// one BUG-removal away from an all-bi-value shape.
///
/// House by house, a digit whose open positions number neither zero nor two
/// marks an anomaly; if exactly one of those positions has three or more
/// candidates, that cell carries the digit as a *BUG value* that must hold
/// to avoid the grave. Stripping all BUG values must leave every empty cell
/// bi-value and every digit with zero or two positions per house.
fn true_candidates(grid: &Grid, empty: CellMap) -> Option<CandidateMap> {
    let mut temp = grid.clone();
    let mut bug_cells = CellMap::new();
    let mut bug_values = CandidateMap::new();
    let mut all_bug_digits = DigitSet::new();
    let mut common_cells = CellMap::new();
    let mut seeded = false;

    for house in House::ALL {
        for digit in Digit::ALL {
            let positions = temp.digit_positions(digit) & house.positions() & empty;
            let cardinality = positions.len();
            if cardinality == 0 || cardinality == 2 {
                continue;
            }

            // Cells that could absorb the excess as a BUG value.
            let mut wide_cells = CellMap::new();
            for cell in positions {
                if temp.candidates_at(cell).len() >= 3 {
                    wide_cells.insert(cell);
                }
            }

            if wide_cells.is_empty() {
                // The digit appears too often, but no cell has room for an
                // extra value: not a BUG shape.
                return None;
            }
            let Some(cell) = wide_cells.as_single() else {
                // Ambiguous: another house will pin down the right cell.
                continue;
            };

            bug_cells.insert(cell);
            bug_values.insert(Candidate::new(cell, digit));
            all_bug_digits.insert(digit);
            temp.remove_candidate(cell, digit);

            if seeded {
                common_cells &= cell.peers();
            } else {
                common_cells = cell.peers();
                seeded = true;
            }
            common_cells = common_cells.difference(bug_cells);
            if bug_cells.len() > 1 && all_bug_digits.len() > 1 && common_cells.is_empty() {
                // Neither a shared house nor a shared peer remains: no
                // classifiable type can follow.
                return None;
            }
        }
    }

    // With BUG values removed, every empty cell must be exactly bi-value.
    for cell in empty {
        if temp.candidates_at(cell).len() != 2 {
            return None;
        }
    }

    // And every remaining digit must have zero or two positions per house.
    for house in House::ALL {
        for digit in Digit::ALL {
            let count = (temp.digit_positions(digit) & house.positions() & empty).len();
            if count != 0 && count != 2 {
                return None;
            }
        }
    }

    Some(bug_values)
}

/// Returns the shared digit when all true candidates carry the same one.
fn single_digit_of(true_candidates: CandidateMap) -> Option<Digit> {
    true_candidates.digits().as_single()
}

fn highlight_true_candidates(true_candidates: CandidateMap) -> Highlights {
    let mut highlights = Highlights::new();
    highlights.candidates = true_candidates;
    highlights
}

fn check_type2(
    grid: &Grid,
    empty: CellMap,
    true_candidates: CandidateMap,
    digit: Digit,
    ctx: &mut SearchContext<'_>,
) -> ControlFlow<()> {
    let cells = true_candidates.cells();
    let map = cells.peer_intersection();
    if map.is_empty() {
        return ControlFlow::Continue(());
    }

    let elim_map = map & candidate_positions(grid, empty, digit);
    if elim_map.is_empty() {
        return ControlFlow::Continue(());
    }

    let conclusions = elim_map
        .iter()
        .map(|cell| Conclusion::eliminate(cell, digit))
        .collect();
    ctx.push(Step::new(
        Technique::BugType2,
        conclusions,
        highlight_true_candidates(true_candidates),
    ))
}

fn check_type3_naked(
    grid: &Grid,
    empty: CellMap,
    true_candidates: CandidateMap,
    ctx: &mut SearchContext<'_>,
) -> ControlFlow<()> {
    let map = true_candidates.cells();
    if !map.in_one_house() {
        return ControlFlow::Continue(());
    }
    let digits_mask = true_candidates.digits();

    for house in map.covered_houses() {
        let house_map = house.positions();
        let other_cells = (house_map & empty).difference(map);
        if other_cells.is_empty() {
            continue;
        }

        for size in 1..other_cells.len() {
            for cells in other_cells.subsets(size) {
                let mask = digits_mask | grid.candidates_union(cells);
                if mask.len() != size + 1 {
                    continue;
                }

                let elim_map = (house_map.difference(cells).difference(map)) & empty;
                if elim_map.is_empty() {
                    continue;
                }

                let mut conclusions = Vec::new();
                for cell in elim_map {
                    for digit in grid.candidates_at(cell) & mask {
                        conclusions.push(Conclusion::eliminate(cell, digit));
                    }
                }
                if conclusions.is_empty() {
                    continue;
                }

                let mut highlights = highlight_true_candidates(true_candidates);
                for cell in cells {
                    for digit in grid.candidates_at(cell) {
                        highlights.push_candidate(cell, digit);
                    }
                }
                highlights.houses.push(house);
                ctx.push(Step::new(Technique::BugType3, conclusions, highlights))?;
            }
        }
    }
    ControlFlow::Continue(())
}

fn check_type4(
    grid: &Grid,
    empty: CellMap,
    true_candidates: CandidateMap,
    ctx: &mut SearchContext<'_>,
) -> ControlFlow<()> {
    // The conjugate pair must lie in exactly two cells.
    let cells = true_candidates.cells();
    let Some((c1, c2)) = cells.as_double() else {
        return ControlFlow::Continue(());
    };

    let digits = true_candidates.digits();
    for house in cells.covered_houses() {
        for conjugate_digit in Digit::ALL {
            let positions = candidate_positions(grid, empty, conjugate_digit) & house.positions();
            if positions.len() != 2 || positions != cells {
                continue;
            }
            if digits.contains(conjugate_digit) {
                continue;
            }

            // The two cells keep only their true candidates and the
            // conjugate digit.
            let mut conclusions = Vec::new();
            for cell in [c1, c2] {
                let mut keep = DigitSet::from_elem(conjugate_digit);
                for candidate in true_candidates {
                    if candidate.position() == cell {
                        keep.insert(candidate.digit());
                    }
                }
                for digit in grid.candidates_at(cell).difference(keep) {
                    conclusions.push(Conclusion::eliminate(cell, digit));
                }
            }
            if conclusions.is_empty() {
                continue;
            }

            let mut highlights = highlight_true_candidates(true_candidates);
            highlights.push_candidate(c1, conjugate_digit);
            highlights.push_candidate(c2, conjugate_digit);
            highlights.houses.push(house);
            ctx.push(Step::new(Technique::BugType4, conclusions, highlights))?;
        }
    }
    ControlFlow::Continue(())
}

fn check_multiple(
    grid: &Grid,
    empty: CellMap,
    true_candidates: CandidateMap,
    ctx: &mut SearchContext<'_>,
) -> ControlFlow<()> {
    if true_candidates.len() > MULTIPLE_TRUE_CANDIDATE_CAP {
        return ControlFlow::Continue(());
    }

    let map = true_candidates.peer_intersection();
    if map.is_empty() {
        return ControlFlow::Continue(());
    }

    let mut conclusions = Vec::new();
    for candidate in map {
        if empty.contains(candidate.position())
            && grid.contains_candidate(candidate.position(), candidate.digit())
        {
            conclusions.push(Conclusion::eliminate(candidate.position(), candidate.digit()));
        }
    }
    if conclusions.is_empty() {
        return ControlFlow::Continue(());
    }

    ctx.push(Step::new(
        Technique::BugMultiple,
        conclusions,
        highlight_true_candidates(true_candidates),
    ))
}

fn check_xz(
    grid: &Grid,
    empty: CellMap,
    true_candidates: CandidateMap,
    ctx: &mut SearchContext<'_>,
) -> ControlFlow<()> {
    let Some((cand1, cand2)) = true_candidates.as_double() else {
        return ControlFlow::Continue(());
    };
    let (c1, d1) = (cand1.position(), cand1.digit());
    let (c2, d2) = (cand2.position(), cand2.digit());
    let mask = DigitSet::from_iter([d1, d2]);

    // Bridge cells see exactly one endpoint and hold exactly both digits.
    let (p1, p2) = (c1.peers(), c2.peers());
    let symmetric = (p1 | p2).difference(p1 & p2);
    for cell in symmetric & grid.bivalue_cells() {
        if grid.candidates_at(cell) != mask {
            continue;
        }

        let bridges_first = CellMap::from_iter([c1, cell]).in_one_house();
        let (another_cell, another_digit) = if bridges_first { (c2, d2) } else { (c1, d1) };

        let mut conclusions = Vec::new();
        for peer in CellMap::from_iter([cell, another_cell]).peer_intersection() {
            if empty.contains(peer) && grid.contains_candidate(peer, another_digit) {
                conclusions.push(Conclusion::eliminate(peer, another_digit));
            }
        }
        if conclusions.is_empty() {
            continue;
        }

        let mut highlights = highlight_true_candidates(true_candidates);
        highlights.cells.insert(cell);
        ctx.push(Step::new(Technique::BugXz, conclusions, highlights))?;
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use mortlace_core::Position;

    use super::*;
    use crate::testing::DetectionTester;

    /// Builds a grid whose empty cells are all bi-value except one cell
    /// with an extra digit: the canonical BUG + 1 shape.
    ///
    /// A full valid solution with a {1,4} rectangle reopened over rows 1-2
    /// and columns 1/4; the bottom-right corner keeps its solution digit 7
    /// as the lone extra candidate.
    fn bug_type1_grid() -> Grid {
        // Solved grid (bands shifted by 3, rows inside a band by 1).
        let mut grid: Grid = "
            123 456 789
            456 789 123
            789 123 456
            231 564 897
            564 897 231
            897 231 564
            312 645 978
            645 978 312
            978 312 645
        "
        .parse()
        .unwrap();

        let reopen = [
            (Position::new(0, 0), DigitSet::from_iter([Digit::D1, Digit::D4])),
            (Position::new(3, 0), DigitSet::from_iter([Digit::D1, Digit::D4])),
            (Position::new(0, 1), DigitSet::from_iter([Digit::D1, Digit::D4])),
            (
                Position::new(3, 1),
                DigitSet::from_iter([Digit::D1, Digit::D4, Digit::D7]),
            ),
        ];
        for &(pos, mask) in &reopen {
            grid = reopened(&grid, pos, mask);
        }
        grid
    }

    /// Returns a copy of `grid` where `pos` holds exactly `mask`, rebuilt
    /// candidate-by-candidate so no peer propagation kicks in.
    fn reopened(grid: &Grid, pos: Position, mask: DigitSet) -> Grid {
        let mut rebuilt = Grid::new();
        for index in 0..81 {
            let cell = Position::from_index(index);
            let keep = if cell == pos { mask } else { grid.candidates_at(cell) };
            for digit in DigitSet::FULL.difference(keep) {
                rebuilt.remove_candidate(cell, digit);
            }
        }
        rebuilt
    }

    #[test]
    fn test_true_candidates_empty_on_blank_grid() {
        let grid = Grid::new();
        assert!(true_candidates(&grid, grid.empty_cells()).is_none());
    }

    #[test]
    fn test_bug_plus_one_assigns_single_true_candidate() {
        let grid = bug_type1_grid();
        DetectionTester::new(grid)
            .collect_with(&Bug::new())
            .assert_step_count(1)
            .assert_technique(0, Technique::BugType1)
            .assert_assigned(Position::new(3, 1), Digit::D7);
    }

    #[test]
    fn test_find_one_short_circuits() {
        let grid = bug_type1_grid();
        let mut steps = Vec::new();
        let mut ctx = SearchContext::new(&mut steps, true);
        assert!(Bug::new().collect(&grid, &mut ctx).is_break());
        assert_eq!(steps.len(), 1);
    }

    #[test]
    fn test_type2_eliminates_digit_from_common_peers() {
        // Two true candidates of digit 7 in one column; a bystander cell
        // in that column still holds 7 and must lose it.
        let (c1, c2) = (Position::new(3, 0), Position::new(3, 1));
        let bystander = Position::new(3, 2);
        let mut grid = Grid::new();
        for index in 0..81 {
            let pos = Position::from_index(index);
            let keep = if pos == c1 || pos == c2 {
                DigitSet::from_iter([Digit::D1, Digit::D4, Digit::D7])
            } else if pos == bystander {
                DigitSet::from_iter([Digit::D1, Digit::D7])
            } else {
                DigitSet::from_elem(Digit::D9)
            };
            for digit in DigitSet::FULL.difference(keep) {
                grid.remove_candidate(pos, digit);
            }
        }
        let true_candidates = CandidateMap::from_iter([
            Candidate::new(c1, Digit::D7),
            Candidate::new(c2, Digit::D7),
        ]);

        let mut steps = Vec::new();
        let mut ctx = SearchContext::new(&mut steps, false);
        let empty = grid.empty_cells();
        let _ = check_type2(&grid, empty, true_candidates, Digit::D7, &mut ctx);

        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].technique(), Technique::BugType2);
        assert_eq!(
            steps[0].conclusions(),
            &[Conclusion::eliminate(bystander, Digit::D7)]
        );
    }

    #[test]
    fn test_no_steps_on_ordinary_grid() {
        DetectionTester::from_str(
            "
            53_ _7_ ___
            6__ 195 ___
            _98 ___ _6_
            8__ _6_ __3
            4__ 8_3 __1
            7__ _2_ __6
            _6_ ___ 28_
            ___ 419 __5
            ___ _8_ _79
        ",
        )
        .collect_with(&Bug::new())
        .assert_no_steps();
    }
}
