//! Deadly-pattern searchers.
//!
//! Each searcher scans one technique family over an immutable grid snapshot
//! and pushes its findings into the caller's [`SearchContext`]. Searchers
//! are pure: they never mutate the grid or any shared state, so concurrent
//! detection calls need no locking once the template catalogs are built.

use std::{fmt::Debug, ops::ControlFlow};

use mortlace_core::Grid;

pub use self::{
    borescoper::Borescoper,
    bug::Bug,
    extended_rectangle::ExtendedRectangle,
    hidden_bug::HiddenBug,
    rotating::Rotating,
    unique_loop::UniqueLoop,
    unique_matrix::UniqueMatrix,
};
use crate::{EngineError, SearchContext, Step};

mod borescoper;
mod bug;
mod extended_rectangle;
mod hidden_bug;
mod rotating;
mod unique_loop;
mod unique_matrix;

/// A deadly-pattern searcher over one technique family.
pub trait Searcher: Debug + Send + Sync {
    /// Returns the name of the technique family.
    fn name(&self) -> &'static str;

    /// Returns a boxed clone of the searcher.
    fn clone_box(&self) -> BoxedSearcher;

    /// Scans the grid and pushes every finding into the context.
    ///
    /// Returns [`ControlFlow::Break`] as soon as the context signals that
    /// the caller has enough results. Failure to find anything is not an
    /// error; the context is simply left untouched.
    fn collect(&self, grid: &Grid, ctx: &mut SearchContext<'_>) -> ControlFlow<()>;
}

/// A boxed searcher.
pub type BoxedSearcher = Box<dyn Searcher>;

impl Clone for BoxedSearcher {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Returns all grid-driven searchers in registration order.
///
/// [`UniqueLoop`] is absent: its cyclic chain is supplied by an external
/// collaborator, so it cannot run from a grid alone.
#[must_use]
pub fn all_searchers() -> Vec<BoxedSearcher> {
    vec![
        Box::new(Bug::new()),
        Box::new(HiddenBug::new()),
        Box::new(ExtendedRectangle::new()),
        Box::new(Borescoper::new()),
        Box::new(UniqueMatrix::new()),
        Box::new(Rotating::new()),
    ]
}

/// The detection front end: runs a fixed searcher registration over a grid.
///
/// # Examples
///
/// ```
/// use mortlace_core::Grid;
/// use mortlace_engine::Engine;
///
/// let engine = Engine::with_all_searchers();
/// let grid = Grid::new();
/// let step = engine.find_first(&grid)?;
/// assert!(step.is_none()); // a blank grid holds no deadly pattern
/// # Ok::<(), mortlace_engine::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    searchers: Vec<BoxedSearcher>,
}

impl Engine {
    /// Creates an engine running the given searchers in order.
    #[must_use]
    pub fn new(searchers: Vec<BoxedSearcher>) -> Self {
        Self { searchers }
    }

    /// Creates an engine running every registered searcher.
    #[must_use]
    pub fn with_all_searchers() -> Self {
        Self {
            searchers: all_searchers(),
        }
    }

    /// Returns the configured searchers in registration order.
    #[must_use]
    pub fn searchers(&self) -> &[BoxedSearcher] {
        &self.searchers
    }

    /// Collects every discoverable step into `steps`, in deterministic
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Inconsistent`] if the grid fails the up-front
    /// consistency check. An empty result is not an error.
    pub fn find_all(&self, grid: &Grid, steps: &mut Vec<Step>) -> Result<(), EngineError> {
        grid.check_consistency()?;
        let mut ctx = SearchContext::new(steps, false);
        for searcher in &self.searchers {
            if searcher.collect(grid, &mut ctx).is_break() {
                break;
            }
        }
        Ok(())
    }

    /// Returns the first discoverable step, short-circuiting the search.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Inconsistent`] if the grid fails the up-front
    /// consistency check.
    pub fn find_first(&self, grid: &Grid) -> Result<Option<Step>, EngineError> {
        grid.check_consistency()?;
        let mut steps = Vec::with_capacity(1);
        let mut ctx = SearchContext::new(&mut steps, true);
        for searcher in &self.searchers {
            if searcher.collect(grid, &mut ctx).is_break() {
                break;
            }
        }
        Ok(steps.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use mortlace_core::{Digit, Position};

    use super::*;

    #[test]
    fn test_blank_grid_yields_nothing() {
        let engine = Engine::with_all_searchers();
        let grid = Grid::new();
        let mut steps = Vec::new();
        engine.find_all(&grid, &mut steps).unwrap();
        assert!(steps.is_empty());
        assert!(engine.find_first(&grid).unwrap().is_none());
    }

    #[test]
    fn test_inconsistent_grid_is_rejected() {
        let engine = Engine::with_all_searchers();
        let mut grid = Grid::new();
        let pos = Position::new(0, 0);
        for digit in Digit::ALL {
            grid.remove_candidate(pos, digit);
        }
        assert!(matches!(
            engine.find_first(&grid),
            Err(EngineError::Inconsistent(_))
        ));
    }

    #[test]
    fn test_registration_order_is_stable() {
        let names: Vec<_> = all_searchers().iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                "Bi-value Universal Grave",
                "Hidden Bi-value Universal Grave",
                "Extended Rectangle",
                "Borescoper's Deadly Pattern",
                "Unique Matrix",
                "Rotating Deadly Pattern",
            ]
        );
    }
}
