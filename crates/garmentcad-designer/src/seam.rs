//! Seam length validation between mating segments.

use std::collections::HashSet;
use std::fmt;

use garmentcad_core::{EditError, GeometryError, GeometryTolerance, SeamTolerance};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::flatten::{flatten_segment, segment_length};
use crate::model::{rotate_point, PanelId, PatternPanel, Point, SeamEnd, SeamPair, Segment};
use crate::panel_store::PanelStore;

/// Float noise allowed when comparing against a threshold.
const THRESHOLD_SLACK_MM: f64 = 1e-9;

/// Samples per segment for the shape deviation metric.
const SHAPE_SAMPLES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeamStatus {
    Ok,
    Warn,
    Fail,
}

impl fmt::Display for SeamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SeamStatus::Ok => "ok",
            SeamStatus::Warn => "warn",
            SeamStatus::Fail => "fail",
        };
        write!(f, "{}", s)
    }
}

/// Classifies a length difference against `tolerance`.
pub fn classify(diff_mm: f64, tolerance: &SeamTolerance) -> SeamStatus {
    let diff = diff_mm.abs();
    if diff <= tolerance.ok_max_mm + THRESHOLD_SLACK_MM {
        SeamStatus::Ok
    } else if diff <= tolerance.warn_max_mm + THRESHOLD_SLACK_MM {
        SeamStatus::Warn
    } else {
        SeamStatus::Fail
    }
}

/// Where a seam segment lives once counterpart references are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeamSide {
    pub panel: PanelId,
    pub segment: usize,
}

/// Measured mismatch of one seam pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeamMetric {
    pub label: String,
    pub first: SeamSide,
    pub second: SeamSide,
    pub first_length_mm: f64,
    pub second_length_mm: f64,
    pub length_diff_mm: f64,
    /// Largest gap between the two curves after aligning their chords.
    /// Informational only.
    pub shape_deviation_mm: f64,
    pub status: SeamStatus,
}

/// Checks every seam designated on the panel or on its counterpart.
///
/// Counterpart seams are included when they point back at this panel. A
/// pair designated on both panels is reported once.
pub fn get_seam_status(
    store: &PanelStore,
    panel_id: PanelId,
    seam_tolerance: &SeamTolerance,
    tolerance: &GeometryTolerance,
) -> Result<Vec<SeamMetric>, EditError> {
    let panel = store.get(panel_id)?;
    let counterpart = match panel.counterpart {
        Some(id) => Some((id, store.get(id)?)),
        None => None,
    };

    let mut designated: Vec<(&SeamPair, PanelId, Option<PanelId>)> = panel
        .seams()
        .iter()
        .map(|seam| (seam, panel_id, panel.counterpart))
        .collect();
    if let Some((other_id, other)) = counterpart {
        designated.extend(
            other
                .seams()
                .iter()
                .filter(|seam| seam.uses_counterpart() && other.counterpart == Some(panel_id))
                .map(|seam| (seam, other_id, Some(panel_id))),
        );
    }

    let mut seen = HashSet::new();
    let mut metrics = Vec::with_capacity(designated.len());
    for (seam, owner, mate) in designated {
        let first = resolve(seam.first, owner, mate)?;
        let second = resolve(seam.second, owner, mate)?;
        let key = if (first.panel, first.segment) <= (second.panel, second.segment) {
            (first, second)
        } else {
            (second, first)
        };
        if !seen.insert(key) {
            debug!(seam = %seam.label, "seam designated on both panels; skipping duplicate");
            continue;
        }

        let a = segment_of(store.get(first.panel)?, first.segment)?;
        let b = segment_of(store.get(second.panel)?, second.segment)?;
        let metric = measure(&seam.label, first, a, second, b, seam_tolerance, tolerance)?;
        if metric.status == SeamStatus::Fail {
            warn!(
                seam = %metric.label,
                diff = metric.length_diff_mm,
                "seam length mismatch exceeds tolerance"
            );
        }
        metrics.push(metric);
    }
    Ok(metrics)
}

/// Measures a pair of segments directly.
pub fn measure(
    label: &str,
    first: SeamSide,
    a: Segment,
    second: SeamSide,
    b: Segment,
    seam_tolerance: &SeamTolerance,
    tolerance: &GeometryTolerance,
) -> Result<SeamMetric, GeometryError> {
    let first_length_mm = segment_length(&a, tolerance.flatten_tolerance_mm)?;
    let second_length_mm = segment_length(&b, tolerance.flatten_tolerance_mm)?;
    let length_diff_mm = (first_length_mm - second_length_mm).abs();
    let shape_deviation_mm = shape_deviation(&a, &b, tolerance)?;
    Ok(SeamMetric {
        label: label.to_string(),
        first,
        second,
        first_length_mm,
        second_length_mm,
        length_diff_mm,
        shape_deviation_mm,
        status: classify(length_diff_mm, seam_tolerance),
    })
}

/// Outcome of the pre-export seam check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum ExportGate {
    Pass,
    Blocked { failing: Vec<String> },
}

impl ExportGate {
    pub fn is_pass(&self) -> bool {
        matches!(self, ExportGate::Pass)
    }
}

/// Blocks export when any seam failed; warnings never block.
pub fn export_gate<'a, I>(metrics: I) -> ExportGate
where
    I: IntoIterator<Item = &'a SeamMetric>,
{
    let failing: Vec<String> = metrics
        .into_iter()
        .filter(|m| m.status == SeamStatus::Fail)
        .map(|m| m.label.clone())
        .collect();
    if failing.is_empty() {
        ExportGate::Pass
    } else {
        ExportGate::Blocked { failing }
    }
}

/// Runs [`get_seam_status`] on every panel in the store.
pub fn check_store(
    store: &PanelStore,
    seam_tolerance: &SeamTolerance,
    tolerance: &GeometryTolerance,
) -> Result<Vec<(PanelId, Vec<SeamMetric>)>, EditError> {
    store
        .ids()
        .into_iter()
        .map(|id| get_seam_status(store, id, seam_tolerance, tolerance).map(|m| (id, m)))
        .collect()
}

fn resolve(end: SeamEnd, owner: PanelId, mate: Option<PanelId>) -> Result<SeamSide, EditError> {
    match end {
        SeamEnd::Own(segment) => Ok(SeamSide {
            panel: owner,
            segment,
        }),
        SeamEnd::Counterpart(segment) => match mate {
            Some(panel) => Ok(SeamSide { panel, segment }),
            None => Err(GeometryError::invalid_parameter(
                "seam",
                format!("{} has no counterpart panel", owner),
            )
            .into()),
        },
    }
}

fn segment_of(panel: &PatternPanel, index: usize) -> Result<Segment, GeometryError> {
    panel
        .base()
        .segment(index)
        .ok_or(GeometryError::SegmentOutOfRange {
            index,
            count: panel.base().len(),
        })
}

/// Largest distance between matching arc-length samples of the two
/// segments once both start at the same point heading the same way. Both
/// sewing directions of `b` are tried and the better fit is kept.
fn shape_deviation(
    a: &Segment,
    b: &Segment,
    tolerance: &GeometryTolerance,
) -> Result<f64, GeometryError> {
    let sa = resample(&flatten_segment(a, tolerance.flatten_tolerance_mm)?);
    let forward = resample(&flatten_segment(b, tolerance.flatten_tolerance_mm)?);
    let backward = resample(&flatten_segment(&b.reversed(), tolerance.flatten_tolerance_mm)?);
    Ok(aligned_gap(&sa, &forward).min(aligned_gap(&sa, &backward)))
}

fn aligned_gap(a: &[Point], b: &[Point]) -> f64 {
    let (Some(&a0), Some(&a1), Some(&b0), Some(&b1)) = (a.first(), a.last(), b.first(), b.last())
    else {
        return 0.0;
    };
    let heading = |d: Point| d.y.atan2(d.x);
    let turn = (heading(a1 - a0) - heading(b1 - b0)).to_degrees();
    a.iter()
        .zip(b)
        .map(|(p, q)| {
            let moved = rotate_point(*q - b0 + a0, a0, turn);
            p.distance_to(&moved)
        })
        .fold(0.0, f64::max)
}

/// Resamples a polyline at evenly spaced arc-length positions.
fn resample(points: &[Point]) -> Vec<Point> {
    let total: f64 = points.windows(2).map(|w| w[0].distance_to(&w[1])).sum();
    if points.len() < 2 || total <= f64::EPSILON {
        return points.to_vec();
    }
    let mut out = Vec::with_capacity(SHAPE_SAMPLES + 1);
    let mut walked = 0.0;
    let mut i = 0;
    for k in 0..=SHAPE_SAMPLES {
        let target = total * k as f64 / SHAPE_SAMPLES as f64;
        while i + 1 < points.len() - 1 && walked + points[i].distance_to(&points[i + 1]) < target {
            walked += points[i].distance_to(&points[i + 1]);
            i += 1;
        }
        let span = points[i].distance_to(&points[i + 1]);
        let t = if span > 0.0 {
            ((target - walked) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        out.push(points[i].lerp(points[i + 1], t));
    }
    out
}
