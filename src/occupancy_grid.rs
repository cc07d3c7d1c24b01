use crate::{CARDINAL_COST, DIAGONAL_COST, N_SMALLVEC_SIZE};
use core::fmt;
use grid_util::point::Point;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Offsets of the 8-neighbourhood. Cardinal moves come first, then diagonals.
const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Occupancy of a single cell. A cell may be blocked and part of a region at the same time;
/// being blocked is what counts for traversal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellState {
    pub blocked: bool,
    pub is_start: bool,
    pub is_end: bool,
}

/// [OccupancyGrid] is a square grid of [CellState] values addressed by `(i, j)` with `i` along
/// the scene's x axis. Cells are stored row-major with `i` as the outer index. Connected
/// components of free cells are kept in a [UnionFind] so that unreachable goals can be rejected
/// without flood-filling the grid.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    size: usize,
    cells: Vec<CellState>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for OccupancyGrid {
    fn default() -> OccupancyGrid {
        OccupancyGrid {
            size: 0,
            cells: Vec::new(),
            components: UnionFind::new(0),
            components_dirty: false,
        }
    }
}

impl OccupancyGrid {
    /// Creates a `size` x `size` grid of free cells.
    pub fn new(size: usize) -> OccupancyGrid {
        OccupancyGrid {
            size,
            cells: vec![CellState::default(); size * size],
            components: UnionFind::new(size * size),
            components_dirty: true,
        }
    }
    pub fn size(&self) -> usize {
        self.size
    }
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size
    }
    pub fn point_in_bounds(&self, p: Point) -> bool {
        self.in_bounds(p.x, p.y)
    }
    fn get_ix(&self, x: usize, y: usize) -> usize {
        x * self.size + y
    }
    pub fn get_ix_point(&self, p: &Point) -> usize {
        self.get_ix(p.x as usize, p.y as usize)
    }
    /// Returns [None] outside the grid.
    pub fn cell(&self, p: Point) -> Option<&CellState> {
        if self.point_in_bounds(p) {
            Some(&self.cells[self.get_ix_point(&p)])
        } else {
            None
        }
    }
    pub fn cell_mut(&mut self, p: Point) -> Option<&mut CellState> {
        if self.point_in_bounds(p) {
            let ix = self.get_ix_point(&p);
            Some(&mut self.cells[ix])
        } else {
            None
        }
    }
    pub fn is_blocked(&self, p: Point) -> bool {
        self.cell(p).map_or(false, |c| c.blocked)
    }
    /// Updates the blocked flag of a cell. Freeing a cell joins it with its free neighbours,
    /// blocking one may split a component, so the components are flagged as dirty.
    pub fn set_blocked(&mut self, p: Point, blocked: bool) {
        let Some(cell) = self.cell_mut(p) else {
            return;
        };
        let was_blocked = cell.blocked;
        cell.blocked = blocked;
        if blocked && !was_blocked {
            self.components_dirty = true;
        } else if !blocked && !self.components_dirty {
            let p_ix = self.get_ix_point(&p);
            for n in self.neighborhood_points(&p) {
                if self.can_move_to(n) {
                    let n_ix = self.get_ix_point(&n);
                    self.components.union(p_ix, n_ix);
                }
            }
        }
    }
    pub fn can_move_to(&self, pos: Point) -> bool {
        self.cell(pos).map_or(false, |c| !c.blocked)
    }
    pub fn neighborhood_points(&self, point: &Point) -> SmallVec<[Point; 8]> {
        MOORE_OFFSETS
            .iter()
            .map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .collect()
    }
    /// Traversable neighbours of `pos` paired with the cost of moving there.
    pub fn neighborhood_points_and_cost(
        &self,
        pos: &Point,
    ) -> SmallVec<[(Point, f64); N_SMALLVEC_SIZE]> {
        self.neighborhood_points(pos)
            .into_iter()
            .filter(|p| self.can_move_to(*p))
            .map(|p| (p, move_cost(pos, &p)))
            .collect()
    }

    /// Cells carrying the start flag, in scan order (`i` outer, `j` inner).
    pub fn start_cells(&self) -> impl Iterator<Item = (Point, &CellState)> + '_ {
        self.scan().filter(|(_, c)| c.is_start)
    }
    /// Cells carrying the goal flag, in scan order (`i` outer, `j` inner).
    pub fn end_cells(&self) -> impl Iterator<Item = (Point, &CellState)> + '_ {
        self.scan().filter(|(_, c)| c.is_end)
    }
    /// All cells in scan order.
    pub fn scan(&self) -> impl Iterator<Item = (Point, &CellState)> + '_ {
        let n = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(ix, c)| (Point::new((ix / n) as i32, (ix % n) as i32), c))
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.get_ix_point(point))
    }
    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }
    /// Checks if start and goal are not on the same component. Points outside the grid or on
    /// blocked cells are never reachable.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.can_move_to(*start) && self.can_move_to(*goal) {
            let start_ix = self.get_ix_point(start);
            let goal_ix = self.get_ix_point(goal);
            !self.components.equiv(start_ix, goal_ix)
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up free grid neighbours to the same
    /// components. Only the forward half of the neighbourhood is visited since union is
    /// symmetric.
    pub fn generate_components(&mut self) {
        debug!("Generating connected components for {0}x{0} grid", self.size);
        let n = self.size as i32;
        self.components = UnionFind::new(self.cells.len());
        self.components_dirty = false;
        for x in 0..n {
            for y in 0..n {
                let point = Point::new(x, y);
                if !self.can_move_to(point) {
                    continue;
                }
                let parent_ix = self.get_ix_point(&point);
                [
                    Point::new(x, y + 1),
                    Point::new(x + 1, y - 1),
                    Point::new(x + 1, y),
                    Point::new(x + 1, y + 1),
                ]
                .into_iter()
                .filter(|p| self.can_move_to(*p))
                .map(|p| self.get_ix_point(&p))
                .collect::<SmallVec<[usize; 4]>>()
                .into_iter()
                .for_each(|ix| {
                    self.components.union(parent_ix, ix);
                });
            }
        }
    }
}

/// Cost of a single move between two adjacent cells: 1 for cardinal moves and sqrt(2) for
/// diagonal ones.
pub fn move_cost(from: &Point, to: &Point) -> f64 {
    debug_assert!((from.x - to.x).abs() <= 1 && (from.y - to.y).abs() <= 1);
    if from.x != to.x && from.y != to.y {
        DIAGONAL_COST
    } else {
        CARDINAL_COST
    }
}

/// Rows are drawn along `j`, so the picture matches the scene with y pointing down.
impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.size {
            let row = (0..self.size)
                .map(|x| {
                    let c = &self.cells[self.get_ix(x, y)];
                    if c.blocked {
                        '#'
                    } else if c.is_start {
                        'S'
                    } else if c.is_end {
                        'G'
                    } else {
                        '.'
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // Corresponds to the following 3x3 grid:
        //  ___
        // | # |
        // | # |
        // | # |
        //  ___
        let mut grid = OccupancyGrid::new(3);
        for y in 0..3 {
            grid.set_blocked(Point::new(1, y), true);
        }
        grid.generate_components();
        let p1 = Point::new(0, 0);
        let p2 = Point::new(1, 1);
        let p3 = Point::new(0, 2);
        let p4 = Point::new(2, 0);
        assert!(grid.unreachable(&p1, &p2));
        assert!(grid.reachable(&p1, &p3));
        assert!(grid.unreachable(&p1, &p4));
        assert_ne!(grid.get_component(&p1), grid.get_component(&p4));
    }

    /// Diagonal moves may pass between two blocked cells.
    #[test]
    fn reachable_across_diagonal_gap() {
        //  __
        // |.#|
        // |#.|
        //  __
        let mut grid = OccupancyGrid::new(2);
        grid.set_blocked(Point::new(1, 0), true);
        grid.set_blocked(Point::new(0, 1), true);
        grid.generate_components();
        assert!(grid.reachable(&Point::new(0, 0), &Point::new(1, 1)));
    }

    #[test]
    fn freeing_a_cell_joins_components() {
        let mut grid = OccupancyGrid::new(3);
        for y in 0..3 {
            grid.set_blocked(Point::new(1, y), true);
        }
        grid.update();
        assert!(grid.unreachable(&Point::new(0, 1), &Point::new(2, 1)));
        grid.set_blocked(Point::new(1, 1), false);
        assert!(!grid.components_dirty);
        assert!(grid.reachable(&Point::new(0, 1), &Point::new(2, 1)));
    }

    #[test]
    fn neighbours_skip_blocked_and_out_of_bounds() {
        let mut grid = OccupancyGrid::new(3);
        grid.set_blocked(Point::new(1, 0), true);
        let succ = grid.neighborhood_points_and_cost(&Point::new(0, 0));
        assert_eq!(succ.len(), 2);
        assert!(succ.contains(&(Point::new(0, 1), CARDINAL_COST)));
        assert!(succ.contains(&(Point::new(1, 1), DIAGONAL_COST)));
    }

    #[test]
    fn scan_order_is_i_major() {
        let grid = OccupancyGrid::new(2);
        let order = grid.scan().map(|(p, _)| (p.x, p.y)).collect::<Vec<_>>();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn display_marks_cells() {
        let mut grid = OccupancyGrid::new(2);
        grid.set_blocked(Point::new(1, 0), true);
        grid.cell_mut(Point::new(0, 0)).unwrap().is_start = true;
        grid.cell_mut(Point::new(1, 1)).unwrap().is_end = true;
        assert_eq!(grid.to_string(), "S#\n.G\n");
    }
}
