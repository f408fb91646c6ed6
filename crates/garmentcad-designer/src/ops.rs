//! Boolean operations on closed paths.
//!
//! Inputs are flattened, oriented counter-clockwise and clipped with
//! `cavalier_contours`, which uses non-zero winding for the closed, simple
//! rings accepted here. Results come back as straight-line paths; curve
//! information does not survive a boolean operation.
//!
//! A boolean with nothing to do is `Ok(None)`. Malformed, self-intersecting
//! or zero-area inputs are rejected with a [`GeometryError`].

use cavalier_contours::polyline::{
    BooleanOp as PlineBooleanOp, PlineSource, PlineSourceMut, Polyline,
};
use garmentcad_core::{GeometryError, GeometryTolerance};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::flatten::flatten_with;
use crate::model::{Path, Point};
use crate::polygon::Polygon;

/// Boolean operation selector used by the command layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BooleanOp {
    Union,
    Subtract,
}

/// Runs `op` on two paths.
pub fn perform_boolean(
    a: &Path,
    b: &Path,
    op: BooleanOp,
    tolerance: &GeometryTolerance,
) -> Result<Option<Path>, GeometryError> {
    match op {
        BooleanOp::Union => union(a, b, tolerance),
        BooleanOp::Subtract => subtract(a, b, tolerance),
    }
}

/// Union of two closed paths, `None` when they do not touch or overlap.
pub fn union(
    a: &Path,
    b: &Path,
    tolerance: &GeometryTolerance,
) -> Result<Option<Path>, GeometryError> {
    let pa = region_polygon(a, tolerance)?;
    let pb = region_polygon(b, tolerance)?;

    let result = to_pline(&pa).boolean(&to_pline(&pb), PlineBooleanOp::Or);
    if !result.neg_plines.is_empty() {
        return Err(GeometryError::HoleNotRepresentable);
    }
    match result.pos_plines.len() {
        1 => from_pline(&result.pos_plines[0].pline).map(Some),
        n => {
            debug!(pieces = n, "union inputs are disjoint; nothing merged");
            Ok(None)
        }
    }
}

/// `a` minus `b`, `None` when `b` does not cut into `a`.
///
/// When `b` splits `a` into several pieces the largest piece is returned.
/// Removing all of `a` is reported as [`GeometryError::ZeroArea`].
pub fn subtract(
    a: &Path,
    b: &Path,
    tolerance: &GeometryTolerance,
) -> Result<Option<Path>, GeometryError> {
    let pa = region_polygon(a, tolerance)?;
    let pb = region_polygon(b, tolerance)?;

    if let (Some(ba), Some(bb)) = (pa.bounds(), pb.bounds()) {
        if !ba.overlaps(&bb, tolerance.coincidence_epsilon_mm) {
            debug!("subtrahend bounds do not overlap; nothing removed");
            return Ok(None);
        }
    }

    let result = to_pline(&pa).boolean(&to_pline(&pb), PlineBooleanOp::Not);
    if !result.neg_plines.is_empty() {
        return Err(GeometryError::HoleNotRepresentable);
    }
    if result.pos_plines.is_empty() {
        return Err(GeometryError::ZeroArea);
    }

    let original_area = pa.area();
    let remaining: f64 = result
        .pos_plines
        .iter()
        .map(|r| r.pline.area().abs())
        .sum();
    let area_eps = tolerance.flatten_tolerance_mm.max(tolerance.coincidence_epsilon_mm)
        * pa.length().max(1.0)
        * 1e-3;
    if result.pos_plines.len() == 1 && (original_area - remaining).abs() <= area_eps {
        debug!("subtrahend does not cut the region; nothing removed");
        return Ok(None);
    }

    if result.pos_plines.len() > 1 {
        warn!(
            pieces = result.pos_plines.len(),
            "subtraction split the region; keeping the largest piece"
        );
    }
    let largest = result
        .pos_plines
        .iter()
        .max_by(|x, y| x.pline.area().abs().total_cmp(&y.pline.area().abs()))
        .map(|r| &r.pline);
    match largest {
        Some(pline) => from_pline(pline).map(Some),
        None => Err(GeometryError::ZeroArea),
    }
}

/// Folds [`union`] over `paths` in order.
///
/// Returns `None` only when nothing could be merged at all. Once a merge
/// has happened, later paths that do not touch the accumulation are skipped.
pub fn union_multiple(
    paths: &[Path],
    tolerance: &GeometryTolerance,
) -> Result<Option<Path>, GeometryError> {
    let mut iter = paths.iter();
    let mut base = match iter.next() {
        Some(first) => first.clone(),
        None => return Ok(None),
    };
    let mut merged = false;

    for (offset, path) in iter.enumerate() {
        match union(&base, path, tolerance)? {
            Some(result) => {
                base = result;
                merged = true;
            }
            None if !merged => return Ok(None),
            None => {
                debug!(index = offset + 1, "skipping path that does not touch the merged region");
            }
        }
    }

    Ok(if merged { Some(base) } else { None })
}

/// Flattens a path and checks it is a usable region.
pub fn region_polygon(
    path: &Path,
    tolerance: &GeometryTolerance,
) -> Result<Polygon, GeometryError> {
    if !path.is_closed() {
        return Err(GeometryError::OpenPath);
    }
    let polygon =
        flatten_with(path, tolerance)?.without_spikes(tolerance.coincidence_epsilon_mm);
    let ring_len = polygon.ring().len();
    if ring_len < 3 {
        return Err(GeometryError::TooFewPoints {
            required: 3,
            found: ring_len,
        });
    }
    if polygon.area() <= tolerance.coincidence_epsilon_mm {
        return Err(GeometryError::ZeroArea);
    }
    if polygon.is_self_intersecting(tolerance.coincidence_epsilon_mm) {
        return Err(GeometryError::SelfIntersecting);
    }
    Ok(if polygon.is_ccw() {
        polygon
    } else {
        polygon.reversed()
    })
}

fn to_pline(polygon: &Polygon) -> Polyline<f64> {
    let mut pline = Polyline::new_closed();
    for p in polygon.ring() {
        pline.add(p.x, p.y, 0.0);
    }
    pline
}

fn from_pline(pline: &Polyline<f64>) -> Result<Path, GeometryError> {
    let points: Vec<Point> = pline
        .iter_vertexes()
        .map(|v| Point::new(v.x, v.y))
        .collect();
    let mut ring = Polygon::from_ring(points);
    if !ring.is_ccw() {
        ring = ring.reversed();
    }
    ring.to_path()
}
