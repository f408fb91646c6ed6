//! Flattened polygon geometry.
//!
//! Numeric operations (areas, containment, overlap, intersection) work on
//! polygons produced by [`crate::flatten`]. Signed area is positive for
//! counter-clockwise rings.

use garmentcad_core::GeometryError;
use serde::{Deserialize, Serialize};

use crate::model::{rotate_point, Bounds, Path, Point};

/// Ordered point list; closed polygons repeat the first point at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Polygon {
    pub fn new(points: Vec<Point>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Closed polygon from a ring, appending the closing point if missing.
    pub fn from_ring(mut ring: Vec<Point>) -> Self {
        if let (Some(first), Some(last)) = (ring.first().copied(), ring.last().copied()) {
            if ring.len() > 1 && first != last {
                ring.push(first);
            }
        }
        Self {
            points: ring,
            closed: true,
        }
    }

    /// Points without the repeated closing point.
    pub fn ring(&self) -> &[Point] {
        let n = self.points.len();
        if self.closed && n > 1 && self.points[0] == self.points[n - 1] {
            &self.points[..n - 1]
        } else {
            &self.points
        }
    }

    /// Edges as point pairs, including the closing edge for closed polygons.
    pub fn edges(&self) -> Vec<(Point, Point)> {
        let ring = self.ring();
        let n = ring.len();
        if n < 2 {
            return Vec::new();
        }
        let count = if self.closed { n } else { n - 1 };
        (0..count).map(|i| (ring[i], ring[(i + 1) % n])).collect()
    }

    pub fn signed_area(&self) -> f64 {
        signed_area(self.ring())
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn length(&self) -> f64 {
        self.edges().iter().map(|(a, b)| a.distance_to(b)).sum()
    }

    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.points)
    }

    /// Area centroid, falling back to the vertex average for degenerate rings.
    pub fn centroid(&self) -> Point {
        let ring = self.ring();
        let n = ring.len();
        if n == 0 {
            return Point::default();
        }
        let mut a = 0.0;
        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..n {
            let p = ring[i];
            let q = ring[(i + 1) % n];
            let cross = p.cross(q);
            a += cross;
            cx += (p.x + q.x) * cross;
            cy += (p.y + q.y) * cross;
        }
        if a.abs() > f64::EPSILON {
            Point::new(cx / (3.0 * a), cy / (3.0 * a))
        } else {
            let sum = ring.iter().fold(Point::default(), |acc, p| acc + *p);
            sum * (1.0 / n as f64)
        }
    }

    /// Winding number of the ring around `p`.
    pub fn winding_number(&self, p: Point) -> i32 {
        let ring = self.ring();
        let n = ring.len();
        let mut winding = 0;
        for i in 0..n {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            if a.y <= p.y {
                if b.y > p.y && (b - a).cross(p - a) > 0.0 {
                    winding += 1;
                }
            } else if b.y <= p.y && (b - a).cross(p - a) < 0.0 {
                winding -= 1;
            }
        }
        winding
    }

    /// Non-zero containment test.
    pub fn contains(&self, p: Point) -> bool {
        self.closed && self.winding_number(p) != 0
    }

    /// True when `p` lies within `eps` of any edge.
    pub fn on_boundary(&self, p: Point, eps: f64) -> bool {
        self.edges()
            .iter()
            .any(|(a, b)| distance_to_segment(p, *a, *b) <= eps)
    }

    /// True when two non-adjacent edges cross or touch.
    pub fn is_self_intersecting(&self, eps: f64) -> bool {
        let edges = self.edges();
        let n = edges.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let adjacent = j == i + 1 || (self.closed && i == 0 && j == n - 1);
                if adjacent {
                    continue;
                }
                let (a0, a1) = edges[i];
                let (b0, b1) = edges[j];
                if !matches!(
                    segment_intersection(a0, a1, b0, b1, eps),
                    SegmentIntersection::None
                ) {
                    return true;
                }
            }
        }
        false
    }

    /// Drops repeated points and vertices where a closed outline doubles
    /// back on itself along a straight line. Such spikes enclose no area.
    pub fn without_spikes(&self, eps: f64) -> Polygon {
        if !self.closed {
            return self.clone();
        }
        let mut ring = self.ring().to_vec();
        loop {
            let before = ring.len();
            let mut i = 0;
            while ring.len() > 3 && i < ring.len() {
                let n = ring.len();
                let ab = ring[i] - ring[(i + n - 1) % n];
                let bc = ring[(i + 1) % n] - ring[i];
                let doubles_back = ab.dot(bc) < 0.0
                    && ab.cross(bc).abs() <= eps * ab.length().max(bc.length());
                if ab.length() <= eps || doubles_back {
                    ring.remove(i);
                } else {
                    i += 1;
                }
            }
            if ring.len() == before {
                break;
            }
        }
        Polygon::from_ring(ring)
    }

    /// True when the two closed polygons share interior area.
    ///
    /// Shared edges and touching corners do not count as overlap.
    pub fn overlaps(&self, other: &Polygon, eps: f64) -> bool {
        match (self.bounds(), other.bounds()) {
            (Some(a), Some(b)) if a.overlaps(&b, eps) => {}
            _ => return false,
        }

        for (a0, a1) in self.edges() {
            for (b0, b1) in other.edges() {
                if let SegmentIntersection::Point { ta, tb, .. } =
                    segment_intersection(a0, a1, b0, b1, eps)
                {
                    let interior = |t: f64| t > 1e-9 && t < 1.0 - 1e-9;
                    let crossing = (a1 - a0).cross(b1 - b0).abs() > eps;
                    if interior(ta) && interior(tb) && crossing {
                        return true;
                    }
                }
            }
        }

        let strictly_inside =
            |poly: &Polygon, p: Point| poly.contains(p) && !poly.on_boundary(p, eps);
        if self.ring().iter().any(|p| strictly_inside(other, *p))
            || other.ring().iter().any(|p| strictly_inside(self, *p))
        {
            return true;
        }

        // identical or edge-aligned shapes have no strict crossings
        let c = self.centroid();
        let d = other.centroid();
        (strictly_inside(self, c) && strictly_inside(other, c))
            || (strictly_inside(self, d) && strictly_inside(other, d))
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Polygon {
        self.map_points(|p| Point::new(p.x + dx, p.y + dy))
    }

    pub fn rotate_about(&self, center: Point, angle_deg: f64) -> Polygon {
        self.map_points(|p| rotate_point(p, center, angle_deg))
    }

    pub fn map_points<F>(&self, f: F) -> Polygon
    where
        F: Fn(Point) -> Point,
    {
        Polygon {
            points: self.points.iter().map(|p| f(*p)).collect(),
            closed: self.closed,
        }
    }

    /// Same ring traversed the other way.
    pub fn reversed(&self) -> Polygon {
        let mut ring = self.ring().to_vec();
        ring.reverse();
        if self.closed {
            Polygon::from_ring(ring)
        } else {
            Polygon::new(ring, false)
        }
    }

    /// Straight-line path through the polygon.
    pub fn to_path(&self) -> Result<Path, GeometryError> {
        Path::from_points(self.ring(), self.closed)
    }
}

/// Shoelace area of a ring (no repeated closing point required).
pub fn signed_area(ring: &[Point]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        sum += ring[i].cross(ring[(i + 1) % n]);
    }
    sum / 2.0
}

pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.dot(ab);
    if len_sq <= f64::EPSILON {
        return p.distance_to(&a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance_to(&(a + ab * t))
}

/// Result of intersecting two line segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection {
    None,
    /// Single point with its parameter on each segment.
    Point { at: Point, ta: f64, tb: f64 },
    /// Collinear overlap from `start` to `end`.
    Overlap { start: Point, end: Point },
}

/// Intersects segments `a0-a1` and `b0-b1` with tolerance `eps`.
pub fn segment_intersection(
    a0: Point,
    a1: Point,
    b0: Point,
    b1: Point,
    eps: f64,
) -> SegmentIntersection {
    let r = a1 - a0;
    let s = b1 - b0;
    let denom = r.cross(s);
    let qp = b0 - a0;
    let r_len = r.length();
    let s_len = s.length();

    if r_len <= eps || s_len <= eps {
        // degenerate segment acts as a point
        let (p, q0, q1) = if r_len <= eps { (a0, b0, b1) } else { (b0, a0, a1) };
        if distance_to_segment(p, q0, q1) <= eps {
            let t_other = project_param(p, q0, q1);
            let (ta, tb) = if r_len <= eps { (0.0, t_other) } else { (t_other, 0.0) };
            return SegmentIntersection::Point { at: p, ta, tb };
        }
        return SegmentIntersection::None;
    }

    if denom.abs() <= eps * r_len * s_len {
        // parallel: check collinearity via distance of b0 from line a
        if qp.cross(r).abs() / r_len > eps {
            return SegmentIntersection::None;
        }
        let rr = r.dot(r);
        let t0 = qp.dot(r) / rr;
        let t1 = t0 + s.dot(r) / rr;
        let (lo, hi) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
        let tol = eps / r_len;
        let start = lo.max(0.0);
        let end = hi.min(1.0);
        if end < start - tol {
            return SegmentIntersection::None;
        }
        if (end - start).abs() <= tol {
            let at = a0 + r * start.clamp(0.0, 1.0);
            return SegmentIntersection::Point {
                at,
                ta: start.clamp(0.0, 1.0),
                tb: project_param(at, b0, b1),
            };
        }
        return SegmentIntersection::Overlap {
            start: a0 + r * start,
            end: a0 + r * end,
        };
    }

    let ta = qp.cross(s) / denom;
    let tb = qp.cross(r) / denom;
    let tol_a = eps / r_len;
    let tol_b = eps / s_len;
    if ta < -tol_a || ta > 1.0 + tol_a || tb < -tol_b || tb > 1.0 + tol_b {
        return SegmentIntersection::None;
    }
    let ta = ta.clamp(0.0, 1.0);
    let tb = tb.clamp(0.0, 1.0);
    SegmentIntersection::Point {
        at: a0 + r * ta,
        ta,
        tb,
    }
}

/// Parameter of the projection of `p` onto `a-b`, clamped to `[0, 1]`.
pub fn project_param(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.dot(ab);
    if len_sq <= f64::EPSILON {
        0.0
    } else {
        ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Polygon {
        Polygon::from_ring(vec![
            Point::new(x, y),
            Point::new(x + w, y),
            Point::new(x + w, y + h),
            Point::new(x, y + h),
        ])
    }

    #[test]
    fn test_area_and_orientation() {
        let r = rect(0.0, 0.0, 40.0, 40.0);
        assert_eq!(r.signed_area(), 1600.0);
        assert!(r.is_ccw());
        assert_eq!(r.reversed().signed_area(), -1600.0);
        assert_eq!(r.length(), 160.0);
        assert_eq!(r.centroid(), Point::new(20.0, 20.0));
    }

    #[test]
    fn test_containment() {
        let r = rect(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(5.0, 5.0)));
        assert!(!r.contains(Point::new(15.0, 5.0)));
        assert!(r.reversed().contains(Point::new(5.0, 5.0)));
        assert!(r.on_boundary(Point::new(10.0, 3.0), 1e-9));
    }

    #[test]
    fn test_segment_intersection_kinds() {
        let hit = segment_intersection(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 0.0),
            1e-9,
        );
        match hit {
            SegmentIntersection::Point { at, ta, tb } => {
                assert!(at.approx_eq(&Point::new(5.0, 5.0), 1e-9));
                assert!((ta - 0.5).abs() < 1e-9 && (tb - 0.5).abs() < 1e-9);
            }
            other => panic!("expected point, got {:?}", other),
        }

        let overlap = segment_intersection(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(15.0, 0.0),
            1e-9,
        );
        assert_eq!(
            overlap,
            SegmentIntersection::Overlap {
                start: Point::new(5.0, 0.0),
                end: Point::new(10.0, 0.0)
            }
        );

        let miss = segment_intersection(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            1e-9,
        );
        assert_eq!(miss, SegmentIntersection::None);
    }

    #[test]
    fn test_self_intersection() {
        let bowtie = Polygon::from_ring(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        ]);
        assert!(bowtie.is_self_intersecting(1e-9));
        assert!(!rect(0.0, 0.0, 5.0, 5.0).is_self_intersecting(1e-9));
    }

    #[test]
    fn test_without_spikes() {
        let spiky = Polygon::from_ring(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(95.0, 0.0),
            Point::new(95.0, 100.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ]);
        assert!(spiky.is_self_intersecting(1e-6));
        let clean = spiky.without_spikes(1e-6);
        assert_eq!(clean.ring().len(), 4);
        assert!(!clean.is_self_intersecting(1e-6));
        assert!((clean.area() - 9500.0).abs() < 1e-9);

        // straight-through collinear points are kept
        let square = rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(square.without_spikes(1e-6), square);
    }

    #[test]
    fn test_overlap_ignores_shared_edges() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b, 1e-9));
        assert!(a.overlaps(&rect(5.0, 5.0, 10.0, 10.0), 1e-9));
        assert!(a.overlaps(&a.clone(), 1e-9));
        assert!(a.overlaps(&rect(2.0, 2.0, 2.0, 2.0), 1e-9));
    }
}
