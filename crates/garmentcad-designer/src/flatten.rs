//! Curve flattening by adaptive subdivision.
//!
//! A curve is split in half until every control point lies within the
//! tolerance of the chord. Since a Bezier curve stays inside the convex hull
//! of its control points, the flattened polyline is then never farther than
//! the tolerance from the true curve. Recursion stops at a depth cap; a span
//! that reaches it is emitted as a straight line and logged.

use garmentcad_core::constants::MAX_SUBDIVISION_DEPTH;
use garmentcad_core::{GeometryError, GeometryTolerance};
use lyon::geom::{point, CubicBezierSegment, QuadraticBezierSegment};
use tracing::warn;

use crate::model::{Path, Point, Segment};
use crate::polygon::{distance_to_segment, Polygon};

/// Flattens `path` with the default depth cap.
///
/// Closed paths produce a polygon whose last point equals its first.
pub fn flatten(path: &Path, tolerance: f64) -> Result<Polygon, GeometryError> {
    flatten_with_depth(path, tolerance, MAX_SUBDIVISION_DEPTH)
}

/// Flattens `path` using the tolerance and depth cap from `tolerance`.
pub fn flatten_with(path: &Path, tolerance: &GeometryTolerance) -> Result<Polygon, GeometryError> {
    flatten_with_depth(
        path,
        tolerance.flatten_tolerance_mm,
        tolerance.max_subdivision_depth,
    )
}

fn flatten_with_depth(
    path: &Path,
    tolerance: f64,
    max_depth: u32,
) -> Result<Polygon, GeometryError> {
    check_tolerance(tolerance)?;

    let mut points = vec![path.start()];
    for (index, segment) in path.segments() {
        if flatten_segment_into(&segment, tolerance, max_depth, &mut points) {
            warn!(
                command = index,
                tolerance, "curve reached the subdivision depth cap; treating remainder as straight"
            );
        }
    }

    let closed = path.is_closed();
    if closed {
        let start = path.start();
        if points.last() != Some(&start) {
            points.push(start);
        }
    }
    Ok(Polygon::new(points, closed))
}

/// Flattens one segment, start point included.
pub fn flatten_segment(segment: &Segment, tolerance: f64) -> Result<Vec<Point>, GeometryError> {
    check_tolerance(tolerance)?;
    let mut points = vec![segment.from()];
    if flatten_segment_into(segment, tolerance, MAX_SUBDIVISION_DEPTH, &mut points) {
        warn!(tolerance, "segment reached the subdivision depth cap");
    }
    Ok(points)
}

/// Arc length of one segment, accurate to the flattening tolerance.
pub fn segment_length(segment: &Segment, tolerance: f64) -> Result<f64, GeometryError> {
    if let Segment::Line { from, to } = segment {
        return Ok(from.distance_to(to));
    }
    let points = flatten_segment(segment, tolerance)?;
    Ok(points.windows(2).map(|w| w[0].distance_to(&w[1])).sum())
}

/// Total arc length of a path, closing segment included.
pub fn path_length(path: &Path, tolerance: f64) -> Result<f64, GeometryError> {
    path.segments()
        .iter()
        .map(|(_, s)| segment_length(s, tolerance))
        .sum()
}

fn check_tolerance(tolerance: f64) -> Result<(), GeometryError> {
    if tolerance.is_finite() && tolerance > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::invalid_parameter(
            "tolerance",
            "must be positive and finite",
        ))
    }
}

/// Appends the flattened segment (without its start) to `out`.
/// Returns true if the depth cap was hit anywhere.
fn flatten_segment_into(
    segment: &Segment,
    tolerance: f64,
    max_depth: u32,
    out: &mut Vec<Point>,
) -> bool {
    match *segment {
        Segment::Line { to, .. } => {
            push_point(out, to);
            false
        }
        Segment::Quad { from, ctrl, to } => {
            let curve = QuadraticBezierSegment {
                from: point(from.x, from.y),
                ctrl: point(ctrl.x, ctrl.y),
                to: point(to.x, to.y),
            };
            subdivide_quad(&curve, tolerance, 0, max_depth, out)
        }
        Segment::Cubic {
            from,
            ctrl1,
            ctrl2,
            to,
        } => {
            let curve = CubicBezierSegment {
                from: point(from.x, from.y),
                ctrl1: point(ctrl1.x, ctrl1.y),
                ctrl2: point(ctrl2.x, ctrl2.y),
                to: point(to.x, to.y),
            };
            subdivide_cubic(&curve, tolerance, 0, max_depth, out)
        }
    }
}

fn subdivide_quad(
    curve: &QuadraticBezierSegment<f64>,
    tolerance: f64,
    depth: u32,
    max_depth: u32,
    out: &mut Vec<Point>,
) -> bool {
    let from = to_point(curve.from);
    let to = to_point(curve.to);
    let deviation = distance_to_segment(to_point(curve.ctrl), from, to);
    if deviation <= tolerance {
        push_point(out, to);
        return false;
    }
    if depth >= max_depth {
        push_point(out, to);
        return true;
    }
    let (a, b) = curve.split(0.5);
    let capped_a = subdivide_quad(&a, tolerance, depth + 1, max_depth, out);
    let capped_b = subdivide_quad(&b, tolerance, depth + 1, max_depth, out);
    capped_a || capped_b
}

fn subdivide_cubic(
    curve: &CubicBezierSegment<f64>,
    tolerance: f64,
    depth: u32,
    max_depth: u32,
    out: &mut Vec<Point>,
) -> bool {
    let from = to_point(curve.from);
    let to = to_point(curve.to);
    let deviation = distance_to_segment(to_point(curve.ctrl1), from, to)
        .max(distance_to_segment(to_point(curve.ctrl2), from, to));
    if deviation <= tolerance {
        push_point(out, to);
        return false;
    }
    if depth >= max_depth {
        push_point(out, to);
        return true;
    }
    let (a, b) = curve.split(0.5);
    let capped_a = subdivide_cubic(&a, tolerance, depth + 1, max_depth, out);
    let capped_b = subdivide_cubic(&b, tolerance, depth + 1, max_depth, out);
    capped_a || capped_b
}

fn to_point(p: lyon::geom::Point<f64>) -> Point {
    Point::new(p.x, p.y)
}

fn push_point(out: &mut Vec<Point>, p: Point) {
    if out.last() != Some(&p) {
        out.push(p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PathCommand;

    fn arch() -> Path {
        Path::new(vec![
            PathCommand::move_to(Point::new(0.0, 0.0)),
            PathCommand::cubic_to(
                Point::new(0.0, 50.0),
                Point::new(100.0, 50.0),
                Point::new(100.0, 0.0),
            ),
            PathCommand::Close,
        ])
        .unwrap()
    }

    #[test]
    fn test_closed_path_repeats_first_point() {
        let polygon = flatten(&arch(), 0.5).unwrap();
        assert!(polygon.closed);
        assert_eq!(polygon.points.first(), polygon.points.last());
        assert!(polygon.points.len() > 4);
    }

    #[test]
    fn test_flattened_points_lie_on_curve_within_tolerance() {
        let segment = arch().segment(1).unwrap();
        let tolerance = 0.25;
        let points = flatten_segment(&segment, tolerance).unwrap();
        // every sampled curve point is near the polyline
        for i in 0..=200 {
            let p = segment.sample(i as f64 / 200.0);
            let d = points
                .windows(2)
                .map(|w| distance_to_segment(p, w[0], w[1]))
                .fold(f64::INFINITY, f64::min);
            assert!(d <= tolerance + 1e-9, "deviation {} at sample {}", d, i);
        }
    }

    #[test]
    fn test_quad_length_approaches_true_length() {
        // symmetric parabola from (0,0) to (20,0) peaking at (10,10)
        let segment = Segment::Quad {
            from: Point::new(0.0, 0.0),
            ctrl: Point::new(10.0, 20.0),
            to: Point::new(20.0, 0.0),
        };
        let coarse = segment_length(&segment, 1.0).unwrap();
        let fine = segment_length(&segment, 0.001).unwrap();
        assert!(fine > coarse - 1e-9);
        assert!((fine - 29.5789).abs() < 0.01, "length {}", fine);
    }

    #[test]
    fn test_rejects_bad_tolerance() {
        assert!(flatten(&arch(), 0.0).is_err());
        assert!(flatten(&arch(), f64::NAN).is_err());
    }

    #[test]
    fn test_depth_cap_terminates() {
        let tol = GeometryTolerance {
            flatten_tolerance_mm: 1e-12,
            max_subdivision_depth: 3,
            ..Default::default()
        };
        let polygon = flatten_with(&arch(), &tol).unwrap();
        // start, 2^3 curve pieces, closing point
        assert_eq!(polygon.points.len(), 10);
    }
}
