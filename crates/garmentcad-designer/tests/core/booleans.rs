use garmentcad_designer::{
    flatten_with, subtract, union, union_multiple, GeometryError, GeometryTolerance, Path, Point,
};
use proptest::prelude::*;

fn rect(x: f64, y: f64, w: f64, h: f64) -> Path {
    Path::from_points(
        &[
            Point::new(x, y),
            Point::new(x + w, y),
            Point::new(x + w, y + h),
            Point::new(x, y + h),
        ],
        true,
    )
    .unwrap()
}

fn area(path: &Path) -> f64 {
    flatten_with(path, &GeometryTolerance::default()).unwrap().area()
}

#[test]
fn test_offset_squares_union_area() {
    let tol = GeometryTolerance::default();
    let merged = union(&rect(0.0, 0.0, 40.0, 40.0), &rect(20.0, 20.0, 40.0, 40.0), &tol)
        .unwrap()
        .expect("overlapping squares merge");
    assert!(merged.is_closed());
    assert!((area(&merged) - 2800.0).abs() < 1e-6);
}

#[test]
fn test_curved_inputs_union_as_lines() {
    let tol = GeometryTolerance::default();
    let lens = Path::from_svg_data("M 0 0 Q 50 60 100 0 Q 50 -60 0 0 Z").unwrap();
    let bar = rect(40.0, -10.0, 20.0, 100.0);
    let merged = union(&lens, &bar, &tol).unwrap().unwrap();
    assert!(merged.segments().iter().all(|(_, s)| s.is_line()));
    assert!(area(&merged) > area(&bar));
}

#[test]
fn test_subtract_notch_from_block() {
    let tol = GeometryTolerance::default();
    let cut = subtract(&rect(0.0, 0.0, 100.0, 50.0), &rect(90.0, 40.0, 20.0, 20.0), &tol)
        .unwrap()
        .unwrap();
    assert!((area(&cut) - 4900.0).abs() < 1e-6);
    assert_eq!(
        subtract(&rect(0.0, 0.0, 10.0, 10.0), &rect(-5.0, -5.0, 30.0, 30.0), &tol).unwrap_err(),
        GeometryError::ZeroArea
    );
}

#[test]
fn test_union_multiple_skips_stragglers() {
    let tol = GeometryTolerance::default();
    let cells = vec![
        rect(0.0, 0.0, 10.0, 10.0),
        rect(8.0, 0.0, 10.0, 10.0),
        rect(500.0, 500.0, 10.0, 10.0),
        rect(16.0, 0.0, 10.0, 10.0),
    ];
    let merged = union_multiple(&cells, &tol).unwrap().unwrap();
    assert!((area(&merged) - 260.0).abs() < 1e-6);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_union_with_self_is_identity(
        x in -200.0f64..200.0,
        y in -200.0f64..200.0,
        w in 1.0f64..300.0,
        h in 1.0f64..300.0,
    ) {
        let tol = GeometryTolerance::default();
        let a = rect(x, y, w, h);
        let merged = union(&a, &a, &tol).unwrap();
        prop_assert!(merged.is_some());
        let merged = merged.unwrap();
        prop_assert!((area(&merged) - w * h).abs() <= tol.flatten_tolerance_mm * 2.0 * (w + h));
    }
}
