//! Concrete maps and planning problems.
//!
//! The planners only need a `CostMap`, these are the ones shipped with the
//! crate along with ways to load and generate them.

pub mod grid_2d;
