//! Size grading from per-landmark displacement rules.
//!
//! Landmarks move by their rule for the target size. Every other point
//! moves by a blend of the two landmarks around it, weighted by arc length.
//! Control points follow the endpoints of their segment.

use std::collections::BTreeMap;
use std::fmt;

use garmentcad_core::constants::BASE_SIZE_LABEL;
use garmentcad_core::{EditError, GeometryError, GeometryTolerance};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::flatten::segment_length;
use crate::model::{Path, PathCommand, PatternPanel, Point};

/// Displacement of one point for one size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Displacement {
    pub dx: f64,
    pub dy: f64,
}

impl Displacement {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    fn as_point(&self) -> Point {
        Point::new(self.dx, self.dy)
    }
}

/// Displacements of one landmark, keyed by size label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRule {
    /// Command index of the landmark point.
    pub landmark: usize,
    pub sizes: BTreeMap<String, Displacement>,
}

impl GradeRule {
    pub fn new(landmark: usize) -> Self {
        Self {
            landmark,
            sizes: BTreeMap::new(),
        }
    }

    pub fn with_size(mut self, size: impl Into<String>, dx: f64, dy: f64) -> Self {
        self.sizes.insert(size.into(), Displacement::new(dx, dy));
        self
    }
}

/// A landmark had no displacement for the requested size and stayed put.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeRuleMissing {
    pub landmark: usize,
    pub label: String,
    pub size: String,
}

impl fmt::Display for GradeRuleMissing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no grade rule for landmark '{}' ({}) at size {}",
            self.label, self.landmark, self.size
        )
    }
}

/// Graded path plus the landmarks that fell back to zero displacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeOutcome {
    pub size: String,
    pub path: Path,
    pub warnings: Vec<GradeRuleMissing>,
}

/// Grades the panel's base path to `size`.
///
/// Rules must reference existing landmarks. The base path is not modified.
pub fn grade_panel(
    panel: &PatternPanel,
    size: &str,
    rules: &[GradeRule],
    tolerance: &GeometryTolerance,
) -> Result<GradeOutcome, EditError> {
    let landmarks = panel.landmarks();
    let mut by_landmark: BTreeMap<usize, &GradeRule> = BTreeMap::new();
    for rule in rules {
        if !landmarks.contains_key(&rule.landmark) {
            return Err(EditError::UnknownLandmark {
                index: rule.landmark,
            });
        }
        by_landmark.insert(rule.landmark, rule);
    }

    let mut warnings = Vec::new();
    let mut anchors: Vec<(usize, Point)> = Vec::with_capacity(landmarks.len());
    for (&index, label) in landmarks {
        let displacement = by_landmark
            .get(&index)
            .and_then(|rule| rule.sizes.get(size))
            .copied();
        match displacement {
            Some(d) => anchors.push((index, d.as_point())),
            None => {
                // the base size needs no rule
                if size != BASE_SIZE_LABEL {
                    warn!(landmark = index, label = %label, size, "grade rule missing; using zero displacement");
                    warnings.push(GradeRuleMissing {
                        landmark: index,
                        label: label.clone(),
                        size: size.to_string(),
                    });
                }
                anchors.push((index, Point::default()));
            }
        }
    }

    let path = displace_path(panel.base(), &anchors, tolerance)?;
    Ok(GradeOutcome {
        size: size.to_string(),
        path,
        warnings,
    })
}

/// Moves every point of `path` by the arc-length blend of `anchors`.
///
/// `anchors` holds (command index, displacement) pairs. With no anchors the
/// path is returned unchanged.
pub fn displace_path(
    path: &Path,
    anchors: &[(usize, Point)],
    tolerance: &GeometryTolerance,
) -> Result<Path, GeometryError> {
    if anchors.iter().all(|(_, d)| d.x == 0.0 && d.y == 0.0) {
        return Ok(path.clone());
    }

    // arc-length position of each command's on-curve point
    let commands = path.commands();
    let mut positions = vec![0.0; commands.len()];
    let mut total = 0.0;
    for index in 1..commands.len() {
        if let Some(segment) = path.segment(index) {
            total += segment_length(&segment, tolerance.flatten_tolerance_mm)?;
        }
        positions[index] = total;
    }

    let mut keyed: Vec<(f64, Point)> = anchors
        .iter()
        .filter(|(i, _)| *i < commands.len())
        .map(|(i, d)| (positions[*i], *d))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));

    let closed = path.is_closed();
    let displacement_at = |s: f64| blend(&keyed, s, total, closed);
    let offsets: Vec<Point> = positions.iter().map(|s| displacement_at(*s)).collect();

    let mut graded = Vec::with_capacity(commands.len());
    for (index, cmd) in commands.iter().enumerate() {
        let here = offsets[index];
        let before = if index > 0 { offsets[index - 1] } else { here };
        let moved = match *cmd {
            PathCommand::MoveTo { x, y } => PathCommand::move_to(Point::new(x, y) + here),
            PathCommand::LineTo { x, y } => PathCommand::line_to(Point::new(x, y) + here),
            PathCommand::QuadTo { cx, cy, x, y } => PathCommand::quad_to(
                Point::new(cx, cy) + before.lerp(here, 0.5),
                Point::new(x, y) + here,
            ),
            PathCommand::CubicTo {
                c1x,
                c1y,
                c2x,
                c2y,
                x,
                y,
            } => PathCommand::cubic_to(
                Point::new(c1x, c1y) + before,
                Point::new(c2x, c2y) + here,
                Point::new(x, y) + here,
            ),
            PathCommand::Close => PathCommand::Close,
        };
        graded.push(moved);
    }
    Path::new(graded)
}

/// Displacement at arc position `s` between the surrounding anchors.
fn blend(anchors: &[(f64, Point)], s: f64, total: f64, closed: bool) -> Point {
    let (first, last) = match (anchors.first(), anchors.last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return Point::default(),
    };

    let prev = anchors.iter().rev().find(|(p, _)| *p <= s).copied();
    let next = anchors.iter().find(|(p, _)| *p >= s).copied();
    let (prev, next) = match (prev, next) {
        (Some(p), Some(n)) => (p, n),
        (None, Some(n)) if closed => ((last.0 - total, last.1), n),
        (Some(p), None) if closed => (p, (first.0 + total, first.1)),
        (None, Some(n)) => (n, n),
        (Some(p), None) => (p, p),
        (None, None) => return Point::default(),
    };

    let span = next.0 - prev.0;
    if span <= f64::EPSILON {
        return prev.1;
    }
    prev.1.lerp(next.1, (s - prev.0) / span)
}
