use garmentcad_designer::{find_closed_region_at, flatten_with, GeometryTolerance, Path, Point};

fn line(a: (f64, f64), b: (f64, f64)) -> Path {
    Path::from_points(&[Point::new(a.0, a.1), Point::new(b.0, b.1)], false).unwrap()
}

#[test]
fn test_crossing_lines_have_no_face() {
    let tol = GeometryTolerance::default();
    let x = vec![
        line((0.0, 0.0), (100.0, 100.0)),
        line((0.0, 100.0), (100.0, 0.0)),
    ];
    assert!(find_closed_region_at(&x, Point::new(50.0, 50.0), &tol)
        .unwrap()
        .is_none());
}

#[test]
fn test_drawn_triangle_is_found() {
    let tol = GeometryTolerance::default();
    let lines = vec![
        line((0.0, 0.0), (100.0, 0.0)),
        line((100.0, 0.0), (50.0, 80.0)),
        line((50.0, 80.0), (0.0, 0.0)),
    ];
    let face = find_closed_region_at(&lines, Point::new(50.0, 20.0), &tol)
        .unwrap()
        .unwrap();
    assert!(face.is_closed());
    assert_eq!(face.points().len(), 3);
    let polygon = flatten_with(&face, &tol).unwrap();
    assert!((polygon.area() - 4000.0).abs() < 1e-6);
    assert!(find_closed_region_at(&lines, Point::new(500.0, 20.0), &tol)
        .unwrap()
        .is_none());
}

#[test]
fn test_near_duplicate_edges_are_merged() {
    let tol = GeometryTolerance::default();
    let square = Path::from_points(
        &[
            Point::new(0.0, 0.0),
            Point::new(60.0, 0.0),
            Point::new(60.0, 60.0),
            Point::new(0.0, 60.0),
        ],
        true,
    )
    .unwrap();
    // redrawn bottom edge a hair off the original
    let retrace = line((0.0, 1e-8), (60.0, -1e-8));
    let face = find_closed_region_at(&[square, retrace], Point::new(30.0, 30.0), &tol)
        .unwrap()
        .unwrap();
    let polygon = flatten_with(&face, &tol).unwrap();
    assert!((polygon.area() - 3600.0).abs() < 1e-3);
}
