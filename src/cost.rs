use derive_more::Display;
use num_traits::Zero;
use num_traits::bounds::UpperBounded;
use ordered_float::OrderedFloat;

/// A totally ordered path cost.
///
/// `OrderedFloat` gives us `Ord` so costs can rank heap entries. Infinity is
/// used both as "not reached yet" and as the cost of entering an obstacle.
#[derive(Copy, Clone, Default, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
#[display("{_0}")]
pub struct Cost(pub OrderedFloat<f64>);

impl Cost {
    #[inline(always)]
    pub fn new(c: f64) -> Self {
        Self(OrderedFloat(c))
    }

    #[inline(always)]
    pub fn get(&self) -> f64 {
        self.0.0
    }

    #[inline(always)]
    pub fn infinity() -> Self {
        Self(OrderedFloat(f64::INFINITY))
    }

    #[inline(always)]
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Whether this can be used as an edge cost.
    ///
    /// Infinite costs are valid (they block the edge), negative or NaN costs
    /// are not.
    #[inline(always)]
    pub fn is_valid_edge(&self) -> bool {
        !self.0.is_nan() && self.0.0 >= 0.0
    }
}

impl From<f64> for Cost {
    fn from(c: f64) -> Self {
        Self::new(c)
    }
}

impl std::ops::Add for Cost {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}
impl std::ops::AddAssign for Cost {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Zero for Cost {
    #[inline(always)]
    fn is_zero(&self) -> bool {
        self.0 == OrderedFloat(0.0)
    }
    #[inline(always)]
    fn zero() -> Self {
        Self(OrderedFloat(0.0))
    }
}
impl UpperBounded for Cost {
    fn max_value() -> Self {
        Self::infinity()
    }
}
