use grid_util::point::Point;
use scene_pathfinding::{
    rasterize, Endpoint, PlanError, Planner, Region, RegionLabel, ScenePoint, Segment,
    ShapeDescriptor, DEFAULT_WALL_THICKNESS,
};

const SCENE: f64 = 4000.0;

fn wall(x1: f64, y1: f64, x2: f64, y2: f64) -> ShapeDescriptor {
    ShapeDescriptor::Segment(Segment::new(x1, y1, x2, y2, DEFAULT_WALL_THICKNESS))
}

fn start_and_goal() -> Vec<ShapeDescriptor> {
    vec![
        ShapeDescriptor::Region(Region::circle(500.0, 2000.0, 50.0, RegionLabel::Start)),
        ShapeDescriptor::Region(Region::circle(3500.0, 2000.0, 50.0, RegionLabel::Goal)),
    ]
}

/// A wall spanning the full height cuts the grid in two.
#[test]
fn full_height_wall_is_unreachable() {
    let mut shapes = vec![wall(2000.0, 0.0, 2000.0, SCENE)];
    shapes.extend(start_and_goal());
    let grid = rasterize(&shapes, SCENE, SCENE, 200).unwrap();
    // Cells 99, 100 and 101 sample x = 1980, 2000, 2020, all within the wall's half-width
    for i in 99..=101 {
        assert!((0..200).all(|j| grid.is_blocked(Point::new(i, j))));
    }
    assert!(!grid.is_blocked(Point::new(98, 0)));

    let err = Planner::default().plan(&shapes, SCENE, SCENE).unwrap_err();
    assert!(matches!(err, PlanError::Unreachable { .. }));
}

#[test]
fn route_goes_around_wall_end() {
    let mut shapes = vec![wall(2000.0, 0.0, 2000.0, 3000.0)];
    shapes.extend(start_and_goal());
    let planner = Planner::default();
    let route = planner.plan(&shapes, SCENE, SCENE).unwrap();

    let grid = rasterize(&shapes, SCENE, SCENE, 200).unwrap();
    assert!(route.cells.iter().all(|p| !grid.is_blocked(*p)));
    // Crossing x = 2000 is only possible below the wall's end at y = 3000 plus its half-width
    let crossing = route
        .points
        .iter()
        .find(|p| p.x == 2000.0)
        .expect("route crosses the wall line");
    assert!(crossing.y > 3000.0 + DEFAULT_WALL_THICKNESS);

    assert!(grid.cell(route.start).unwrap().is_start);
    assert!(grid.cell(route.goal).unwrap().is_end);
    assert_eq!(
        route.points.first(),
        Some(&ScenePoint::new(route.start.x as f64 * 20.0, route.start.y as f64 * 20.0))
    );

    let again = planner.plan(&shapes, SCENE, SCENE).unwrap();
    assert_eq!(again.cost, route.cost);
}

#[test]
fn open_scene_runs_straight() {
    let route = Planner::default()
        .plan(&start_and_goal(), SCENE, SCENE)
        .unwrap();
    // The last scanned cells of both discs lie on the same row
    assert_eq!(route.start.y, route.goal.y);
    assert_eq!(route.waypoints(), vec![route.start, route.goal]);
    assert_eq!(route.cost, (route.goal.x - route.start.x) as f64);
}

#[test]
fn missing_start_region() {
    let shapes = vec![
        wall(2000.0, 0.0, 2000.0, 3000.0),
        ShapeDescriptor::Region(Region::circle(3500.0, 2000.0, 50.0, RegionLabel::Goal)),
    ];
    let err = Planner::default().plan(&shapes, SCENE, SCENE).unwrap_err();
    assert_eq!(err, PlanError::MissingEndpoint(Endpoint::Start));
}

#[test]
fn elliptical_goal() {
    let shapes = vec![
        ShapeDescriptor::Region(Region::circle(500.0, 500.0, 50.0, RegionLabel::Start)),
        ShapeDescriptor::Region(Region::ellipse(
            3500.0,
            3500.0,
            20.0,
            100.0,
            RegionLabel::Goal,
        )),
    ];
    let planner = Planner::default();
    let grid = rasterize(&shapes, SCENE, SCENE, 200).unwrap();
    // Mean radius of 60 around (3500, 3500): only cells within three cells of (175, 175)
    assert!(grid
        .end_cells()
        .all(|(p, _)| (p.x - 175).pow(2) + (p.y - 175).pow(2) <= 9));
    let route = planner.plan(&shapes, SCENE, SCENE).unwrap();
    assert!(grid.cell(route.goal).unwrap().is_end);
}
