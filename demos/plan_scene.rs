use scene_pathfinding::{
    Planner, PlannerConfig, Region, RegionLabel, Segment, ShapeDescriptor, DEFAULT_WALL_THICKNESS,
};

// In this example a route is planned through a 40x40 grid over a 4000x4000 scene with
// two walls
//  ________
// |   |    |
// | S |  | |
// |      |G|
// |________|
// where
// - S marks the start region
// - G marks the goal region
//
// The grid is printed, followed by the route's waypoints in scene coordinates.

fn main() {
    let wall = |x1, y1, x2, y2| {
        ShapeDescriptor::Segment(Segment::new(x1, y1, x2, y2, DEFAULT_WALL_THICKNESS))
    };
    let shapes = vec![
        wall(1500.0, 0.0, 1500.0, 2500.0),
        wall(2800.0, 1000.0, 2800.0, 4000.0),
        ShapeDescriptor::Region(Region::circle(700.0, 1500.0, 150.0, RegionLabel::Start)),
        ShapeDescriptor::Region(Region::ellipse(
            3400.0,
            3200.0,
            150.0,
            250.0,
            RegionLabel::Goal,
        )),
    ];
    let planner = Planner::new(PlannerConfig {
        grid_size: 40,
        ..Default::default()
    });
    let rasterizer = planner.rasterizer(4000.0, 4000.0).unwrap();
    let grid = rasterizer.rasterize(&shapes);
    println!("{}", grid);
    match planner.plan(&shapes, 4000.0, 4000.0) {
        Ok(route) => {
            println!("Route cost: {:.3} cells", route.cost);
            println!("Waypoints:");
            for p in route.waypoints() {
                println!("{}", rasterizer.cell_to_scene(&p));
            }
        }
        Err(e) => println!("Planning failed: {}", e),
    }
}
