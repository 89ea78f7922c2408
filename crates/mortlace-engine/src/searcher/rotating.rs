//! Rotating Deadly Pattern searcher.

use std::ops::ControlFlow;

use mortlace_core::{CellMap, Grid};

use crate::{
    BoxedSearcher, Conclusion, Highlights, SearchContext, Searcher, Step, Technique,
    inference::is_deadly_configuration,
    pattern::matrix_patterns,
};

const NAME: &str = "Rotating Deadly Pattern";

/// Searcher for the Rotating Deadly Pattern.
///
/// Shares the nine-cell matrix templates: one cell is removed, the other
/// eight must be empty on exactly four digits, and the full configuration
/// (with the removed cell hypothetically carrying all four) is checked for
/// deadliness. When it holds, the eight cells are already confined to the
/// four digits, so the removed cell must escape the set: all four digits
/// die there.
#[derive(Debug, Default, Clone, Copy)]
pub struct Rotating {}

impl Rotating {
    /// Creates a new `Rotating` searcher.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl Searcher for Rotating {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedSearcher {
        Box::new(*self)
    }

    fn collect(&self, grid: &Grid, ctx: &mut SearchContext<'_>) -> ControlFlow<()> {
        let empty = grid.empty_cells();

        for &pattern in matrix_patterns() {
            for removed in pattern {
                let rest = pattern.difference(CellMap::from_elem(removed));
                if !empty.is_superset(rest) {
                    continue;
                }

                let digits = grid.candidates_union(rest);
                if digits.len() != 4 {
                    continue;
                }

                // The removed cell must keep an escape hatch; a cell whose
                // candidates all lie inside the set would make the grid
                // invalid, which is the validator's business, not ours.
                let removed_candidates = grid.candidates_at(removed);
                let elim_mask = removed_candidates & digits;
                if elim_mask.is_empty() || removed_candidates.difference(digits).is_empty() {
                    continue;
                }

                let deadly = is_deadly_configuration(pattern, |pos| {
                    if pos == removed {
                        digits
                    } else {
                        grid.candidates_at(pos)
                    }
                });
                if !deadly {
                    continue;
                }

                let conclusions = elim_mask
                    .iter()
                    .map(|digit| Conclusion::eliminate(removed, digit))
                    .collect();
                let mut highlights = Highlights::new();
                for cell in rest {
                    for digit in grid.candidates_at(cell) {
                        highlights.push_candidate(cell, digit);
                    }
                }
                highlights.cells.insert(removed);
                ctx.push(Step::new(
                    Technique::RotatingDeadlyPattern,
                    conclusions,
                    highlights,
                ))?;
            }
        }
        ControlFlow::Continue(())
    }
}
