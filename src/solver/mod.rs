use crate::occupancy_grid::{move_cost, OccupancyGrid};
use crate::search::{SearchContext, SearchResult};
use crate::{CARDINAL_COST, DIAGONAL_COST};
use grid_util::point::Point;
use itertools::Itertools;
use log::{info, warn};

pub mod astar;
pub mod dijkstra;

pub trait GridSolver {
    type Successors: IntoIterator<Item = (Point, f64)>;

    fn heuristic(&self, p1: &Point, p2: &Point) -> f64;

    /// Cost of the cheapest 8-connected route between two points on an empty grid: as many
    /// diagonal steps as possible, then straight ones.
    fn cost(&self, p1: &Point, p2: &Point) -> f64 {
        let delta_x = (p1.x - p2.x).abs();
        let delta_y = (p1.y - p2.y).abs();
        let diagonal = delta_x.min(delta_y);
        let straight = delta_x.max(delta_y) - diagonal;
        diagonal as f64 * DIAGONAL_COST + straight as f64 * CARDINAL_COST
    }

    fn successors(&self, grid: &OccupancyGrid, node: &Point) -> Self::Successors;

    /// Sums the move costs along a step-by-step path.
    fn get_path_cost(&self, path: &[Point]) -> f64 {
        path.iter()
            .tuple_windows()
            .map(|(a, b)| move_cost(a, b))
            .sum()
    }

    /// Sums [cost](Self::cost) between consecutive waypoints.
    fn get_waypoints_cost(&self, waypoints: &[Point]) -> f64 {
        waypoints
            .iter()
            .tuple_windows()
            .map(|(a, b)| self.cost(a, b))
            .sum()
    }

    /// Runs the search and returns the path together with its cost and the number of expanded
    /// nodes. Blocked or out-of-bounds endpoints never yield a path. If the grid's components are
    /// up to date, goals on another component are rejected without searching.
    fn search(
        &self,
        grid: &OccupancyGrid,
        start: Point,
        goal: Point,
    ) -> Option<SearchResult<Point, f64>> {
        if !grid.can_move_to(start) || !grid.can_move_to(goal) {
            info!("{} or {} is blocked or outside the grid", start, goal);
            return None;
        }
        if !grid.components_dirty && grid.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return None;
        }
        let mut ct: SearchContext<Point, f64> = SearchContext::new();
        let result = ct.astar(
            &start,
            |node| self.successors(grid, node),
            |point| self.heuristic(point, &goal),
            |point| *point == goal,
        );
        if result.is_none() && !grid.components_dirty {
            warn!("Reachable goal could not be pathed to, is reachable graph correct?");
        }
        result
    }

    /// Computes the cheapest path from `start` to `goal`, both included. An empty path means
    /// that no path exists.
    fn find_path(&self, grid: &OccupancyGrid, start: Point, goal: Point) -> Vec<Point> {
        self.search(grid, start, goal)
            .map(|result| result.path)
            .unwrap_or_default()
    }
}
