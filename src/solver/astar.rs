use grid_util::point::Point;
use smallvec::SmallVec;

use crate::{occupancy_grid::OccupancyGrid, solver::GridSolver, N_SMALLVEC_SIZE};

#[derive(Clone, Debug)]
pub struct AstarSolver {
    /// Scales the heuristic. Values above 1 give Weighted A*, which expands fewer nodes but no
    /// longer guarantees the cheapest path.
    pub heuristic_factor: f64,
}

impl Default for AstarSolver {
    fn default() -> Self {
        AstarSolver::new()
    }
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
        }
    }
    pub fn with_heuristic_factor(heuristic_factor: f64) -> AstarSolver {
        AstarSolver { heuristic_factor }
    }
}

impl GridSolver for AstarSolver {
    type Successors = SmallVec<[(Point, f64); N_SMALLVEC_SIZE]>;

    fn successors(&self, grid: &OccupancyGrid, node: &Point) -> Self::Successors {
        grid.neighborhood_points_and_cost(node)
    }

    /// Euclidean distance times the heuristic factor. Never more than the true remaining cost
    /// for a factor of 1, since a diagonal step covers sqrt(2) of distance at cost sqrt(2).
    fn heuristic(&self, p1: &Point, p2: &Point) -> f64 {
        let dx = (p1.x - p2.x) as f64;
        let dy = (p1.y - p2.y) as f64;
        (dx * dx + dy * dy).sqrt() * self.heuristic_factor
    }
}
