use criterion::{criterion_group, criterion_main, Criterion};
use grid_util::point::Point;
use rand::{rngs::StdRng, Rng, SeedableRng};
use scene_pathfinding::{
    occupancy_grid::OccupancyGrid,
    rasterize,
    solver::{astar::AstarSolver, dijkstra::DijkstraSolver, GridSolver},
    Planner, Region, RegionLabel, Segment, ShapeDescriptor, DEFAULT_WALL_THICKNESS,
};
use std::hint::black_box;

const SCENE: f64 = 4000.0;

/// A comb of walls hanging alternately from the top and bottom of the scene, with the start
/// and goal on either side.
fn comb_scene(teeth: usize) -> Vec<ShapeDescriptor> {
    let mut shapes = Vec::new();
    let pitch = SCENE / (teeth + 1) as f64;
    for t in 1..=teeth {
        let x = t as f64 * pitch;
        let (y1, y2) = if t % 2 == 0 {
            (0.0, SCENE * 0.8)
        } else {
            (SCENE * 0.2, SCENE)
        };
        shapes.push(ShapeDescriptor::Segment(Segment::new(
            x,
            y1,
            x,
            y2,
            DEFAULT_WALL_THICKNESS,
        )));
    }
    shapes.push(ShapeDescriptor::Region(Region::circle(
        pitch / 2.0,
        SCENE / 2.0,
        50.0,
        RegionLabel::Start,
    )));
    shapes.push(ShapeDescriptor::Region(Region::circle(
        SCENE - pitch / 2.0,
        SCENE / 2.0,
        50.0,
        RegionLabel::Goal,
    )));
    shapes
}

fn random_walls(n: usize, rng: &mut StdRng) -> Vec<ShapeDescriptor> {
    (0..n)
        .map(|_| {
            let x = rng.gen_range(0.0..SCENE);
            let y = rng.gen_range(0.0..SCENE);
            let len = rng.gen_range(100.0..800.0);
            let (x2, y2) = if rng.gen_bool(0.5) {
                (x + len, y)
            } else {
                (x, y + len)
            };
            ShapeDescriptor::Segment(Segment::new(x, y, x2, y2, DEFAULT_WALL_THICKNESS))
        })
        .collect()
}

fn rasterize_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let shapes = random_walls(50, &mut rng);
    for grid_size in [100, 200, 400] {
        c.bench_function(format!("rasterize 50 walls, {grid_size}x{grid_size}").as_str(), |b| {
            b.iter(|| black_box(rasterize(&shapes, SCENE, SCENE, grid_size)))
        });
    }
}

fn solver_bench<S: GridSolver>(c: &mut Criterion, solver_name: &str, solver: S) {
    let shapes = comb_scene(7);
    let grid: OccupancyGrid = rasterize(&shapes, SCENE, SCENE, 200).unwrap();
    let planner = Planner::default();
    let (start, goal): (Point, Point) = planner.endpoints(&grid).unwrap();
    c.bench_function(format!("comb scene, {solver_name}").as_str(), |b| {
        b.iter(|| black_box(solver.find_path(&grid, start, goal)))
    });
}

fn pipeline_bench(c: &mut Criterion) {
    solver_bench(c, "A*", AstarSolver::new());
    solver_bench(c, "Dijkstra", DijkstraSolver);
    let shapes = comb_scene(7);
    let planner = Planner::default();
    c.bench_function("comb scene, full pipeline", |b| {
        b.iter(|| black_box(planner.plan(&shapes, SCENE, SCENE)))
    });
}

criterion_group!(benches, rasterize_bench, pipeline_bench);
criterion_main!(benches);
