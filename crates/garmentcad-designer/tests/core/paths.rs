use garmentcad_designer::{flatten, path_length, GeometryError, Path, PathCommand, Point};
use proptest::prelude::*;

#[test]
fn test_svg_ingest_flatten_and_measure() {
    let path = Path::from_svg_data("M 0 0 H 100 V 50 Q 50 80 0 50 Z").unwrap();
    assert!(path.is_closed());
    assert!(matches!(path.commands()[3], PathCommand::QuadTo { .. }));

    let polygon = flatten(&path, 0.5).unwrap();
    assert_eq!(polygon.points.first(), polygon.points.last());
    // curved top is longer than its 100mm chord
    let length = path_length(&path, 0.1).unwrap();
    assert!(length > 300.0 && length < 320.0, "length {}", length);
}

#[test]
fn test_malformed_input_rejected_up_front() {
    assert!(matches!(
        Path::from_svg_data("M 0 0"),
        Err(GeometryError::TooFewPoints { .. })
    ));
    assert!(matches!(
        Path::from_points(&[Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)], false),
        Err(GeometryError::NonFiniteCoordinate { .. })
    ));
    assert!(Path::from_svg_data("M 0 0 L 1 1 A 5 5 0 0 1 10 10").is_err());
}

#[test]
fn test_transforms_keep_shape() {
    let path = Path::from_points(
        &[
            Point::new(0.0, 0.0),
            Point::new(40.0, 0.0),
            Point::new(40.0, 20.0),
            Point::new(0.0, 20.0),
        ],
        true,
    )
    .unwrap();
    let moved = path.translate(10.0, 5.0).rotate_about(Point::new(10.0, 5.0), 90.0);
    let a = flatten(&path, 0.5).unwrap().area();
    let b = flatten(&moved, 0.5).unwrap().area();
    assert!((a - b).abs() < 1e-9);
    assert!(moved
        .point_at(1)
        .unwrap()
        .approx_eq(&Point::new(10.0, 45.0), 1e-9));
}

fn closed_curvy_path() -> impl Strategy<Value = Path> {
    prop::collection::vec((-500.0f64..500.0, -500.0f64..500.0), 3..8).prop_map(|pts| {
        let mut commands = vec![PathCommand::move_to(Point::new(pts[0].0, pts[0].1))];
        for (i, w) in pts.windows(2).enumerate() {
            let (a, b) = (Point::new(w[0].0, w[0].1), Point::new(w[1].0, w[1].1));
            let cmd = match i % 3 {
                0 => PathCommand::line_to(b),
                1 => PathCommand::quad_to(a.lerp(b, 0.5) + Point::new(15.0, -10.0), b),
                _ => PathCommand::cubic_to(a.lerp(b, 0.3), a.lerp(b, 0.7) + Point::new(0.0, 25.0), b),
            };
            commands.push(cmd);
        }
        commands.push(PathCommand::Close);
        Path::new(commands).unwrap()
    })
}

proptest! {
    #[test]
    fn prop_flatten_closes_polygon(path in closed_curvy_path(), tol in 0.05f64..2.0) {
        let polygon = flatten(&path, tol).unwrap();
        let first = polygon.points.first().copied().unwrap();
        let last = polygon.points.last().copied().unwrap();
        prop_assert!(first.approx_eq(&last, f64::EPSILON));
        prop_assert!(polygon.closed);
    }
}
