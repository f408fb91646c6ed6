//! Closed-region discovery among crossing paths.
//!
//! Every candidate path is flattened into edges, edges are split at their
//! mutual intersections and merged into a planar graph, dangling edges are
//! pruned, and the faces of the graph are walked with half-edges. Bounded
//! faces come out clockwise, the unbounded face counter-clockwise.

use std::collections::HashSet;

use garmentcad_core::{GeometryError, GeometryTolerance};
use tracing::debug;

use crate::flatten::flatten_with;
use crate::model::{Path, Point};
use crate::polygon::{
    project_param, segment_intersection, signed_area, Polygon, SegmentIntersection,
};

#[derive(Debug)]
struct HalfEdge {
    origin: usize,
    twin: usize,
    next: Option<usize>,
    visited: bool,
}

/// Planar arrangement of flattened edges.
#[derive(Debug, Default)]
struct Arrangement {
    vertices: Vec<Point>,
    edges: HashSet<(usize, usize)>,
    eps: f64,
}

impl Arrangement {
    fn new(eps: f64) -> Self {
        Self {
            eps,
            ..Default::default()
        }
    }

    /// Index of the vertex at `p`, merging points closer than `eps`.
    fn vertex(&mut self, p: Point) -> usize {
        if let Some(i) = self.vertices.iter().position(|v| v.approx_eq(&p, self.eps)) {
            return i;
        }
        self.vertices.push(p);
        self.vertices.len() - 1
    }

    fn add_edge(&mut self, a: usize, b: usize) {
        if a != b {
            self.edges.insert((a.min(b), a.max(b)));
        }
    }

    /// Removes edges hanging off degree-one vertices until none remain.
    fn prune_filaments(&mut self) {
        loop {
            let mut degree = vec![0usize; self.vertices.len()];
            for &(a, b) in &self.edges {
                degree[a] += 1;
                degree[b] += 1;
            }
            let before = self.edges.len();
            self.edges.retain(|&(a, b)| degree[a] > 1 && degree[b] > 1);
            if self.edges.len() == before {
                break;
            }
        }
    }

    /// Walks every face and returns each one as a vertex ring.
    fn faces(&self) -> Vec<Vec<Point>> {
        let mut half_edges = Vec::with_capacity(self.edges.len() * 2);
        let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); self.vertices.len()];

        let mut sorted: Vec<(usize, usize)> = self.edges.iter().copied().collect();
        sorted.sort_unstable();
        for (a, b) in sorted {
            let i = half_edges.len();
            half_edges.push(HalfEdge {
                origin: a,
                twin: i + 1,
                next: None,
                visited: false,
            });
            half_edges.push(HalfEdge {
                origin: b,
                twin: i,
                next: None,
                visited: false,
            });
            outgoing[a].push(i);
            outgoing[b].push(i + 1);
        }

        for (v, out) in outgoing.iter_mut().enumerate() {
            let origin = self.vertices[v];
            let angle = |h: usize| {
                let to = self.vertices[half_edges[half_edges[h].twin].origin];
                (to.y - origin.y).atan2(to.x - origin.x)
            };
            out.sort_by(|&a, &b| angle(a).total_cmp(&angle(b)));
        }
        // an edge arriving at v continues along the next outgoing edge
        // counter-clockwise from its own reverse
        for out in &outgoing {
            for (i, &h) in out.iter().enumerate() {
                let incoming = half_edges[h].twin;
                half_edges[incoming].next = Some(out[(i + 1) % out.len()]);
            }
        }

        let mut faces = Vec::new();
        for start in 0..half_edges.len() {
            if half_edges[start].visited {
                continue;
            }
            let mut ring = Vec::new();
            let mut current = start;
            let mut closed = false;
            for _ in 0..half_edges.len() {
                half_edges[current].visited = true;
                ring.push(self.vertices[half_edges[current].origin]);
                match half_edges[current].next {
                    Some(next) if next == start => {
                        closed = true;
                        break;
                    }
                    Some(next) if !half_edges[next].visited => current = next,
                    _ => break,
                }
            }
            if closed {
                faces.push(ring);
            }
        }
        faces
    }
}

/// Returns the boundary of the smallest bounded face that contains `probe`.
///
/// Open and closed paths both contribute edges. Points closer than the
/// coincidence epsilon are merged, so overlapping edges collapse into one.
/// `None` means the probe lies in the unbounded exterior.
pub fn find_closed_region_at(
    candidates: &[Path],
    probe: Point,
    tolerance: &GeometryTolerance,
) -> Result<Option<Path>, GeometryError> {
    if !probe.is_finite() {
        return Err(GeometryError::invalid_parameter("probe", "must be finite"));
    }
    let eps = tolerance.coincidence_epsilon_mm;

    let mut segments: Vec<(Point, Point)> = Vec::new();
    for path in candidates {
        let polygon = flatten_with(path, tolerance)?;
        segments.extend(
            polygon
                .edges()
                .into_iter()
                .filter(|(a, b)| !a.approx_eq(b, eps)),
        );
    }

    let mut splits: Vec<Vec<f64>> = vec![vec![0.0, 1.0]; segments.len()];
    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            let (a0, a1) = segments[i];
            let (b0, b1) = segments[j];
            match segment_intersection(a0, a1, b0, b1, eps) {
                SegmentIntersection::None => {}
                SegmentIntersection::Point { ta, tb, .. } => {
                    splits[i].push(ta);
                    splits[j].push(tb);
                }
                SegmentIntersection::Overlap { start, end } => {
                    splits[i].push(project_param(start, a0, a1));
                    splits[i].push(project_param(end, a0, a1));
                    splits[j].push(project_param(start, b0, b1));
                    splits[j].push(project_param(end, b0, b1));
                }
            }
        }
    }

    let mut arrangement = Arrangement::new(eps);
    for ((a, b), mut params) in segments.iter().copied().zip(splits) {
        params.sort_by(|x, y| x.total_cmp(y));
        let mut previous = arrangement.vertex(a);
        for t in params.into_iter().skip(1) {
            let v = arrangement.vertex(a.lerp(b, t));
            arrangement.add_edge(previous, v);
            previous = v;
        }
    }
    arrangement.prune_filaments();
    debug!(
        vertices = arrangement.vertices.len(),
        edges = arrangement.edges.len(),
        "built region arrangement"
    );

    let best = arrangement
        .faces()
        .into_iter()
        .filter(|ring| signed_area(ring) < -eps)
        .map(|mut ring| {
            ring.reverse();
            Polygon::from_ring(ring)
        })
        .filter(|face| face.contains(probe))
        .min_by(|a, b| a.area().total_cmp(&b.area()));

    match best {
        Some(face) => Path::from_points(&drop_collinear(face.ring(), eps), true).map(Some),
        None => Ok(None),
    }
}

/// Removes vertices that sit on a straight run between their neighbours.
fn drop_collinear(ring: &[Point], eps: f64) -> Vec<Point> {
    let n = ring.len();
    if n <= 3 {
        return ring.to_vec();
    }
    let kept: Vec<Point> = (0..n)
        .filter(|&i| {
            let prev = ring[(i + n - 1) % n];
            let next = ring[(i + 1) % n];
            let d1 = ring[i] - prev;
            let d2 = next - ring[i];
            let straight = d1.cross(d2).abs() <= eps * d1.length() * d2.length().max(1.0)
                && d1.dot(d2) > 0.0;
            !straight
        })
        .map(|i| ring[i])
        .collect();
    if kept.len() >= 3 {
        kept
    } else {
        ring.to_vec()
    }
}
