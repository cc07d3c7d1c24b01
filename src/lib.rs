//! # scene_pathfinding
//!
//! Finds obstacle-avoiding routes through 2D vector scenes. Walls are line segments with a
//! collision half-width and two labeled regions mark the start and the goal. The scene is
//! [rasterized](raster::rasterize) onto a square [OccupancyGrid], after which an
//! [A* search](solver::astar::AstarSolver) with a Euclidean heuristic finds the cheapest
//! 8-connected path, with cardinal moves costing 1 and diagonal moves costing sqrt(2). The
//! [Planner] strings these steps together and maps the resulting cells back into scene
//! coordinates for overlay on the original shapes.
//!
//! ```
//! use scene_pathfinding::{Planner, Region, RegionLabel, Segment, ShapeDescriptor};
//!
//! let shapes = vec![
//!     ShapeDescriptor::Segment(Segment::new(50.0, 0.0, 50.0, 70.0, 2.0)),
//!     ShapeDescriptor::Region(Region::circle(10.0, 50.0, 3.0, RegionLabel::Start)),
//!     ShapeDescriptor::Region(Region::circle(90.0, 50.0, 3.0, RegionLabel::Goal)),
//! ];
//! let route = Planner::default().plan(&shapes, 100.0, 100.0).unwrap();
//! assert!(route.cells.len() > 1);
//! ```
pub mod error;
pub mod occupancy_grid;
pub mod planner;
pub mod raster;
pub mod search;
pub mod shape;
pub mod solver;

pub use error::{Endpoint, PlanError, Result};
pub use occupancy_grid::{CellState, OccupancyGrid};
pub use planner::{EndpointPolicy, Overlay, Planner, PlannerConfig, Route};
pub use raster::{rasterize, Rasterizer};
pub use shape::{Region, RegionLabel, ScenePoint, Segment, ShapeDescriptor};

use grid_util::point::Point;

/// Side length of the occupancy grid used when none is configured.
pub const DEFAULT_GRID_SIZE: usize = 200;
/// Collision half-width given to walls by the document reader.
pub const DEFAULT_WALL_THICKNESS: f64 = 20.0;
/// Cost of a horizontal or vertical move.
pub const CARDINAL_COST: f64 = 1.0;
/// Cost of a diagonal move.
pub const DIAGONAL_COST: f64 = std::f64::consts::SQRT_2;

const N_SMALLVEC_SIZE: usize = 8;

fn step(from: &Point, to: &Point) -> (i32, i32) {
    ((to.x - from.x).signum(), (to.y - from.y).signum())
}

/// Turns waypoints into a path on the grid which can be followed step by step. Consecutive
/// waypoints must lie on a common row, column or diagonal.
pub fn waypoints_to_path(waypoints: Vec<Point>) -> Vec<Point> {
    let mut waypoints = waypoints.into_iter();
    let Some(mut current) = waypoints.next() else {
        return Vec::new();
    };
    let mut path = vec![current];
    for next in waypoints {
        while current != next {
            let (dx, dy) = step(&current, &next);
            current = Point::new(current.x + dx, current.y + dy);
            path.push(current);
        }
    }
    path
}

/// Reduces a step-by-step path to the cells where its direction changes, keeping both ends.
/// Inverse of [waypoints_to_path].
pub fn path_to_waypoints(path: &[Point]) -> Vec<Point> {
    if path.len() <= 2 {
        return path.to_vec();
    }
    let mut waypoints = vec![path[0]];
    for w in path.windows(3) {
        if step(&w[0], &w[1]) != step(&w[1], &w[2]) {
            waypoints.push(w[1]);
        }
    }
    waypoints.extend(path.last().copied());
    waypoints
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waypoints_round_trip() {
        let path = vec![
            Point::new(0, 0),
            Point::new(1, 1),
            Point::new(2, 2),
            Point::new(3, 2),
            Point::new(4, 2),
            Point::new(4, 3),
        ];
        let waypoints = path_to_waypoints(&path);
        assert_eq!(
            waypoints,
            vec![
                Point::new(0, 0),
                Point::new(2, 2),
                Point::new(4, 2),
                Point::new(4, 3)
            ]
        );
        assert_eq!(waypoints_to_path(waypoints), path);
    }

    #[test]
    fn short_paths_are_their_own_waypoints() {
        let single = vec![Point::new(3, 3)];
        assert_eq!(path_to_waypoints(&single), single);
        assert!(waypoints_to_path(vec![]).is_empty());
    }
}
