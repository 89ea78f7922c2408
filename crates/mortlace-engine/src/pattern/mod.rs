//! Precomputed deadly-pattern template catalogs.
//!
//! Each technique family enumerates every structurally distinct pattern
//! shape exactly once, at first use, so that per-grid matching reduces to a
//! bitset containment test. Catalogs are built behind a `LazyLock`
//! initialization barrier and are permanently read-only afterwards, which is
//! what makes concurrent detection calls safe without locking.

pub use self::{
    borescoper::{BorescoperPattern, borescoper_patterns},
    extended_rect::{ExtendedRectanglePattern, extended_rectangle_patterns},
    matrix::matrix_patterns,
};

mod borescoper;
mod extended_rect;
mod matrix;
