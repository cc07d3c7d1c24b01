use core::fmt;
use grid_util::point::Point;
use thiserror::Error;

/// Which of the two labeled regions an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

/// Terminal failures of a single planning run. None of them are retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("no grid cell lies inside the {0} region")]
    MissingEndpoint(Endpoint),

    #[error("every grid cell of the {0} region is blocked by a wall")]
    BlockedEndpoint(Endpoint),

    #[error("no path from {start} to {goal}")]
    Unreachable { start: Point, goal: Point },

    #[error("grid size must be positive, got {0}")]
    InvalidGrid(usize),

    #[error("scene extent must be positive and finite, got {width}x{height}")]
    InvalidScene { width: f64, height: f64 },

    #[error("heuristic factor must be finite and not negative, got {0}")]
    InvalidHeuristicFactor(f64),
}

pub type Result<T> = std::result::Result<T, PlanError>;
