use std::fmt::Debug;

use derive_more::Display;

use crate::cost::Cost;

/// A cell in the grid.
///
/// `x` is the column and `y` is the row, matching how cost maps are indexed.
#[derive(Copy, Clone, Debug, Display, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("({x},{y})")]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    #[inline(always)]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another cell, in cells.
    ///
    /// ```
    /// use gridplan::space::Position;
    /// assert_eq!(Position::new(0, 0).distance_to(&Position::new(3, 4)), 5.0);
    /// ```
    #[inline(always)]
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x.abs_diff(other.x) as f64;
        let dy = self.y.abs_diff(other.y) as f64;
        dx.hypot(dy)
    }

    /// Whether `other` is one of the 8 cells around this one.
    #[inline(always)]
    pub fn is_adjacent(&self, other: &Position) -> bool {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx <= 1 && dy <= 1 && (dx + dy) != 0
    }

    /// Whether moving to `other` changes both coordinates.
    #[inline(always)]
    pub fn is_diagonal_to(&self, other: &Position) -> bool {
        self.x != other.x && self.y != other.y
    }
}

impl From<(usize, usize)> for Position {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

/// Which neighbouring cells can be reached in one move.
#[derive(Copy, Clone, Debug, Display, Default, PartialEq, Eq)]
pub enum Connectivity {
    /// Left, right, up and down.
    #[display("4-connected")]
    Four,
    /// Also the diagonals.
    #[default]
    #[display("8-connected")]
    Eight,
}

impl Connectivity {
    /// Offsets to the neighbours, orthogonal moves first.
    #[rustfmt::skip]
    pub(crate) fn offsets(&self) -> &'static [(isize, isize)] {
        const OFFSETS: [(isize, isize); 8] = [
            (-1,  0), ( 1,  0), ( 0, -1), ( 0,  1), // W E N S
            (-1, -1), ( 1, -1), (-1,  1), ( 1,  1), // NW NE SW SE
        ];
        match self {
            Connectivity::Four => &OFFSETS[..4],
            Connectivity::Eight => &OFFSETS[..],
        }
    }
}

/// The map planners search over.
///
/// It's read-only while planning. Edge costs must be non-negative, and may be
/// infinite to block a move.
pub trait CostMap: Debug {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Cost of moving between two adjacent cells.
    fn edge_cost(&self, from: &Position, to: &Position) -> Cost;

    /// Whether a cell may be entered at all.
    fn is_traversable(&self, _p: &Position) -> bool {
        true
    }

    /// A lower bound on the cost of travelling one unit of distance.
    ///
    /// A* scales its straight-line heuristic by this, so it must never exceed
    /// `edge_cost(a, b) / a.distance_to(b)` for any move.
    fn min_step_cost(&self) -> f64 {
        1.0
    }

    fn contains(&self, p: &Position) -> bool {
        p.x < self.width() && p.y < self.height()
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency() {
        let p = Position::new(2, 2);
        assert!(p.is_adjacent(&Position::new(1, 1)));
        assert!(p.is_adjacent(&Position::new(2, 3)));
        assert!(!p.is_adjacent(&p));
        assert!(!p.is_adjacent(&Position::new(4, 2)));

        assert!(p.is_diagonal_to(&Position::new(3, 1)));
        assert!(!p.is_diagonal_to(&Position::new(3, 2)));
    }

    #[test]
    fn offsets() {
        assert_eq!(Connectivity::Four.offsets().len(), 4);
        assert_eq!(Connectivity::Eight.offsets().len(), 8);
        for (dx, dy) in Connectivity::Four.offsets() {
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }

    #[test]
    fn display() {
        assert_eq!(Position::new(3, 7).to_string(), "(3,7)");
        assert_eq!(Connectivity::default(), Connectivity::Eight);
    }
}
