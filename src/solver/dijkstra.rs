use grid_util::point::Point;
use smallvec::SmallVec;

use crate::{occupancy_grid::OccupancyGrid, solver::GridSolver, N_SMALLVEC_SIZE};

/// Uniform-cost search. Explores in order of accumulated cost alone, which makes it a slow but
/// straightforward reference for the costs found by [AstarSolver](super::astar::AstarSolver).
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    type Successors = SmallVec<[(Point, f64); N_SMALLVEC_SIZE]>;

    fn successors(&self, grid: &OccupancyGrid, node: &Point) -> Self::Successors {
        grid.neighborhood_points_and_cost(node)
    }

    fn heuristic(&self, _: &Point, _: &Point) -> f64 {
        0.0
    }
}
