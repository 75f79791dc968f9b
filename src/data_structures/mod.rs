//! Containers used by the planners.

pub mod min_heap;
