//! Errors reported by the planners.

use thiserror::Error;

use crate::cost::Cost;
use crate::space::Position;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("Position {position} is outside the {width}x{height} grid")]
    OutOfBounds {
        position: Position,
        width: usize,
        height: usize,
    },
    #[error("No path from {start} to {goal}")]
    NoPathFound { start: Position, goal: Position },
    #[error("Invalid edge cost {cost} from {from} to {to}")]
    InvalidCost {
        from: Position,
        to: Position,
        cost: Cost,
    },
}

pub type Result<T> = std::result::Result<T, PlanError>;
