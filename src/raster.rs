//! Maps scene shapes onto an [OccupancyGrid].
//!
//! Cell `(i, j)` is sampled at its lower corner, `(i * width / N, j * height / N)`, not at its
//! center. Wall and region tests are independent of each other, so a cell may end up both
//! blocked and inside a region.
use crate::error::{PlanError, Result};
use crate::occupancy_grid::{CellState, OccupancyGrid};
use crate::shape::{Region, RegionLabel, ScenePoint, Segment, ShapeDescriptor};
use grid_util::point::Point;
use log::debug;

/// Carries the scene extent and grid resolution used to convert between scene and grid
/// coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rasterizer {
    pub scene_width: f64,
    pub scene_height: f64,
    pub grid_size: usize,
}

impl Rasterizer {
    /// Checks that the extent is positive and finite and that the grid has at least one cell.
    pub fn new(scene_width: f64, scene_height: f64, grid_size: usize) -> Result<Rasterizer> {
        if grid_size == 0 {
            return Err(PlanError::InvalidGrid(grid_size));
        }
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(scene_width) || !valid(scene_height) {
            return Err(PlanError::InvalidScene {
                width: scene_width,
                height: scene_height,
            });
        }
        Ok(Rasterizer {
            scene_width,
            scene_height,
            grid_size,
        })
    }

    /// The scene point a cell is sampled at. Also used to map path cells back into the scene.
    pub fn cell_to_scene(&self, cell: &Point) -> ScenePoint {
        let n = self.grid_size as f64;
        ScenePoint::new(
            cell.x as f64 * (self.scene_width / n),
            cell.y as f64 * (self.scene_height / n),
        )
    }

    /// Nearest cell for a scene point, spreading `[0, extent]` over `[0, N - 1]`. Note that this
    /// is not the inverse of [cell_to_scene](Self::cell_to_scene), which uses a pitch of
    /// `extent / N`.
    pub fn scene_to_cell(&self, p: &ScenePoint) -> Point {
        let last = (self.grid_size - 1) as f64;
        let scale = |coord: f64, extent: f64| (coord / extent * last).round() as i32;
        Point::new(
            scale(p.x, self.scene_width),
            scale(p.y, self.scene_height),
        )
    }

    /// Rasterizes `shapes` onto a fresh grid. Missing start or goal regions are not an error here;
    /// they simply leave no cell flagged.
    pub fn rasterize(&self, shapes: &[ShapeDescriptor]) -> OccupancyGrid {
        let walls: Vec<&Segment> = shapes.iter().filter_map(|s| s.as_segment()).collect();
        let regions: Vec<&Region> = shapes.iter().filter_map(|s| s.as_region()).collect();
        debug!(
            "Rasterizing {} walls and {} regions onto a {2}x{2} grid",
            walls.len(),
            regions.len(),
            self.grid_size
        );
        let mut grid = OccupancyGrid::new(self.grid_size);
        let n = self.grid_size as i32;
        for i in 0..n {
            for j in 0..n {
                let cell = Point::new(i, j);
                let p = self.cell_to_scene(&cell);
                let state = CellState {
                    // First matching wall decides, further walls are not consulted
                    blocked: walls.iter().any(|w| w.blocks(&p)),
                    is_start: regions
                        .iter()
                        .any(|r| r.label == RegionLabel::Start && r.contains(&p)),
                    is_end: regions
                        .iter()
                        .any(|r| r.label == RegionLabel::Goal && r.contains(&p)),
                };
                if let Some(c) = grid.cell_mut(cell) {
                    *c = state;
                }
            }
        }
        grid.generate_components();
        grid
    }
}

/// Rasterizes `shapes` living in a `scene_width` x `scene_height` scene onto a
/// `grid_size` x `grid_size` grid.
pub fn rasterize(
    shapes: &[ShapeDescriptor],
    scene_width: f64,
    scene_height: f64,
    grid_size: usize,
) -> Result<OccupancyGrid> {
    Ok(Rasterizer::new(scene_width, scene_height, grid_size)?.rasterize(shapes))
}
