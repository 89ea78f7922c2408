//! Deadly-pattern detection engine for human-style Sudoku solving.
//!
//! Given a partially filled grid with per-cell candidate sets, the engine
//! finds *deadly patterns*: structural cell/digit configurations that, if
//! left ambiguous, would force more than one valid solution. Each finding
//! is turned into safe candidate eliminations or forced assignments.
//!
//! # Overview
//!
//! - [`step`]: the immutable [`Step`]/[`Conclusion`] result model
//! - [`context`]: the [`SearchContext`] sink shared by all searchers
//! - [`pattern`]: one-time template catalogs per technique family
//! - [`inference`]: the generic deadly-configuration test
//! - [`searcher`]: the per-family classification engines and the [`Engine`]
//!   front end
//! - [`testing`]: a fluent harness for searcher tests
//!
//! Detection calls are pure functions over an immutable grid and the
//! read-only catalogs; failure to find a pattern is an empty result, never
//! an error.
//!
//! # Examples
//!
//! ```
//! use mortlace_core::Grid;
//! use mortlace_engine::Engine;
//!
//! let grid: Grid = "
//!     53_ _7_ ___
//!     6__ 195 ___
//!     _98 ___ _6_
//!     8__ _6_ __3
//!     4__ 8_3 __1
//!     7__ _2_ __6
//!     _6_ ___ 28_
//!     ___ 419 __5
//!     ___ _8_ _79
//! "
//! .parse()?;
//!
//! let engine = Engine::with_all_searchers();
//! let mut steps = Vec::new();
//! engine.find_all(&grid, &mut steps)?;
//! for step in &steps {
//!     println!("{}: {} conclusions", step.technique(), step.conclusions().len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod context;
pub mod error;
pub mod inference;
pub mod pattern;
pub mod searcher;
pub mod step;
pub mod testing;

pub use self::{
    context::SearchContext,
    error::EngineError,
    searcher::{BoxedSearcher, Engine, Searcher, all_searchers},
    step::{Conclusion, ConclusionKind, Highlights, Step, Technique},
};
