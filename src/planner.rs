//! The full pipeline: shapes are rasterized, one start and one goal cell are picked from the
//! labeled regions, the grid is searched and the resulting cells are mapped back into the scene.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Endpoint, PlanError, Result};
use crate::occupancy_grid::{CellState, OccupancyGrid};
use crate::raster::Rasterizer;
use crate::shape::{ScenePoint, ShapeDescriptor};
use crate::solver::{astar::AstarSolver, GridSolver};
use crate::{path_to_waypoints, DEFAULT_GRID_SIZE};
use grid_util::point::Point;
use log::info;
use std::cmp::Ordering;

/// How a single cell is picked out of the many cells a region covers. Only unblocked cells are
/// considered. Scan order runs over `i` (x) in the outer loop and `j` (y) in the inner loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EndpointPolicy {
    /// The last candidate in scan order.
    #[default]
    LastScanned,
    /// The first candidate in scan order.
    FirstScanned,
    /// The candidate closest to the mean position of all candidates, earliest in scan order on
    /// ties.
    ClosestToCentroid,
}

impl EndpointPolicy {
    pub fn select<I>(&self, candidates: I) -> Option<Point>
    where
        I: IntoIterator<Item = Point>,
    {
        match self {
            EndpointPolicy::LastScanned => candidates.into_iter().last(),
            EndpointPolicy::FirstScanned => candidates.into_iter().next(),
            EndpointPolicy::ClosestToCentroid => {
                let candidates = candidates.into_iter().collect::<Vec<Point>>();
                if candidates.is_empty() {
                    return None;
                }
                let n = candidates.len() as f64;
                let (sx, sy) = candidates
                    .iter()
                    .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x as f64, sy + p.y as f64));
                let centroid = ScenePoint::new(sx / n, sy / n);
                let dist = |p: &Point| {
                    ScenePoint::new(p.x as f64, p.y as f64).distance_squared(&centroid)
                };
                candidates
                    .into_iter()
                    .min_by(|a, b| dist(a).partial_cmp(&dist(b)).unwrap_or(Ordering::Equal))
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlannerConfig {
    /// Side length of the occupancy grid.
    pub grid_size: usize,
    pub endpoint_policy: EndpointPolicy,
    /// Passed on to [AstarSolver]; anything other than 1 trades optimality for speed.
    pub heuristic_factor: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            grid_size: DEFAULT_GRID_SIZE,
            endpoint_policy: EndpointPolicy::default(),
            heuristic_factor: 1.0,
        }
    }
}

/// A route found by the [Planner].
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub start: Point,
    pub goal: Point,
    /// Grid cells from start to goal, both included.
    pub cells: Vec<Point>,
    /// `cells` mapped back into scene coordinates.
    pub points: Vec<ScenePoint>,
    pub cost: f64,
    /// Number of nodes the search expanded.
    pub expanded: usize,
}

impl Route {
    /// Only the cells where the route changes direction, plus both ends.
    pub fn waypoints(&self) -> Vec<Point> {
        path_to_waypoints(&self.cells)
    }
    /// The route's length in scene units.
    pub fn scene_length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance_squared(&w[1]).sqrt())
            .sum()
    }
}

/// What the document writer needs to draw the result: the original shapes and the route as a
/// polyline in scene coordinates.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Overlay {
    pub shapes: Vec<ShapeDescriptor>,
    pub polyline: Vec<ScenePoint>,
}

impl Overlay {
    pub fn new(shapes: &[ShapeDescriptor], route: &Route) -> Overlay {
        Overlay {
            shapes: shapes.to_vec(),
            polyline: route.points.clone(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Planner {
    pub config: PlannerConfig,
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Planner {
        Planner { config }
    }

    pub fn rasterizer(&self, scene_width: f64, scene_height: f64) -> Result<Rasterizer> {
        Rasterizer::new(scene_width, scene_height, self.config.grid_size)
    }

    fn endpoint<F>(&self, grid: &OccupancyGrid, which: Endpoint, flag: F) -> Result<Point>
    where
        F: Fn(&CellState) -> bool,
    {
        let mut flagged = grid.scan().filter(|(_, c)| flag(c)).peekable();
        if flagged.peek().is_none() {
            return Err(PlanError::MissingEndpoint(which));
        }
        let candidates = flagged.filter(|(_, c)| !c.blocked).map(|(p, _)| p);
        self.config
            .endpoint_policy
            .select(candidates)
            .ok_or(PlanError::BlockedEndpoint(which))
    }

    /// Picks the start and goal cells of a rasterized grid according to the configured
    /// [EndpointPolicy]. The start region is checked first.
    pub fn endpoints(&self, grid: &OccupancyGrid) -> Result<(Point, Point)> {
        let start = self.endpoint(grid, Endpoint::Start, |c| c.is_start)?;
        let goal = self.endpoint(grid, Endpoint::Goal, |c| c.is_end)?;
        Ok((start, goal))
    }

    /// The solver used by [route](Self::route). Fails on a negative or non-finite
    /// heuristic factor.
    pub fn solver(&self) -> Result<AstarSolver> {
        let factor = self.config.heuristic_factor;
        if !factor.is_finite() || factor < 0.0 {
            return Err(PlanError::InvalidHeuristicFactor(factor));
        }
        Ok(AstarSolver::with_heuristic_factor(factor))
    }

    /// Searches `grid` between two cells and maps the result back into the scene.
    pub fn route(
        &self,
        grid: &OccupancyGrid,
        rasterizer: &Rasterizer,
        start: Point,
        goal: Point,
    ) -> Result<Route> {
        let solver = self.solver()?;
        let result = solver
            .search(grid, start, goal)
            .ok_or(PlanError::Unreachable { start, goal })?;
        let points = result
            .path
            .iter()
            .map(|p| rasterizer.cell_to_scene(p))
            .collect();
        info!(
            "Found route of {} cells with cost {:.3} from {} to {}",
            result.path.len(),
            result.cost,
            start,
            goal
        );
        Ok(Route {
            start,
            goal,
            cells: result.path,
            points,
            cost: result.cost,
            expanded: result.expanded,
        })
    }

    /// Runs the whole pipeline on the shapes of a `scene_width` x `scene_height` scene.
    pub fn plan(
        &self,
        shapes: &[ShapeDescriptor],
        scene_width: f64,
        scene_height: f64,
    ) -> Result<Route> {
        self.solver()?;
        let rasterizer = self.rasterizer(scene_width, scene_height)?;
        let grid = rasterizer.rasterize(shapes);
        let (start, goal) = self.endpoints(&grid)?;
        info!(
            "Planning on {0}x{0} grid from {1} to {2}",
            grid.size(),
            start,
            goal
        );
        self.route(&grid, &rasterizer, start, goal)
    }

    /// Like [plan](Self::plan) but bundles the route with the original shapes for the writer.
    pub fn overlay(
        &self,
        shapes: &[ShapeDescriptor],
        scene_width: f64,
        scene_height: f64,
    ) -> Result<Overlay> {
        let route = self.plan(shapes, scene_width, scene_height)?;
        Ok(Overlay::new(shapes, &route))
    }
}
