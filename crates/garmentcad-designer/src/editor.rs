//! Pattern editor: segment offsets, notches, mirroring, grading and
//! numeric segment lengths for one panel.
//!
//! The editor holds only its own overlay state (edit handles and grading
//! previews). The panel itself lives in a [`PanelStore`] and is looked up
//! by id on every call. Mutations compute the complete result first and
//! only then write it back, so a failed call leaves the panel untouched.

use std::collections::BTreeMap;

use garmentcad_core::{EditError, GeometryError, GeometryTolerance};
use tracing::{debug, warn};

use crate::flatten::{flatten_with, segment_length};
use crate::grading::{grade_panel, GradeOutcome, GradeRule};
use crate::model::{EditMode, NotchMarker, PanelId, Path, PathCommand, PatternPanel, Point};
use crate::panel_store::PanelStore;

/// Editing session bound to one panel id.
#[derive(Debug, Clone)]
pub struct PatternEditor {
    panel: PanelId,
    tolerance: GeometryTolerance,
    handles: Vec<Point>,
    previews: BTreeMap<String, Path>,
    disposed: bool,
}

impl PatternEditor {
    pub fn new(panel: PanelId, tolerance: GeometryTolerance) -> Self {
        Self {
            panel,
            tolerance,
            handles: Vec::new(),
            previews: BTreeMap::new(),
            disposed: false,
        }
    }

    pub fn panel_id(&self) -> PanelId {
        self.panel
    }

    /// Vertex handles shown while the panel is in edit mode.
    pub fn handles(&self) -> &[Point] {
        &self.handles
    }

    /// Graded paths computed so far, keyed by size label.
    pub fn previews(&self) -> &BTreeMap<String, Path> {
        &self.previews
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Flips the panel between display and edit mode.
    pub fn toggle_edit_mode(&mut self, store: &mut PanelStore) -> Result<EditMode, EditError> {
        self.check_live()?;
        let panel = store.get_mut(self.panel)?;
        panel.mode = panel.mode.toggled();
        let mode = panel.mode;
        self.handles = match mode {
            EditMode::Edit => panel.base().points(),
            EditMode::Display => Vec::new(),
        };
        debug!(panel = %self.panel, ?mode, "edit mode toggled");
        Ok(mode)
    }

    /// Offsets segment `segment_index` by `distance` and splices it in.
    ///
    /// Positive distances move the segment away from the interior. If the
    /// result crosses itself or turns inside out the panel is flagged
    /// geometrically invalid but the edit still applies. Seams on the
    /// counterpart panel that refer to this panel are re-indexed too.
    pub fn make_parallel(
        &mut self,
        store: &mut PanelStore,
        segment_index: usize,
        distance: f64,
    ) -> Result<Path, EditError> {
        let counterpart = self.editable_panel(store)?.counterpart;
        if let Some(other) = counterpart {
            store.get(other)?;
        }

        let panel = self.editable_panel(store)?;
        let offset = offset_segment(panel.base(), segment_index, distance, &self.tolerance)?;
        let invalid = crosses_itself(panel.base(), &offset.path, &self.tolerance)?;
        if invalid {
            warn!(
                panel = %self.panel,
                segment = segment_index,
                distance,
                "parallel offset crosses the panel boundary"
            );
        }

        panel.replace_base_inserted(offset.path.clone(), &offset.inserted);
        panel.geometrically_invalid = invalid;
        self.refresh_overlays(panel);
        if let Some(other) = counterpart {
            store
                .get_mut(other)?
                .counterpart_commands_inserted(&offset.inserted);
        }
        Ok(offset.path)
    }

    /// Adds a notch bound to `command_index`.
    pub fn add_notch_at(
        &mut self,
        store: &mut PanelStore,
        command_index: usize,
    ) -> Result<NotchMarker, EditError> {
        let panel = self.editable_panel(store)?;
        panel.add_notch(command_index)
    }

    /// Mirror image of the panel path; the panel itself is unchanged.
    pub fn mirror(&self, store: &PanelStore) -> Result<Path, EditError> {
        self.check_live()?;
        let panel = store.get(self.panel)?;
        Ok(mirror_path(panel.base(), &self.tolerance)?)
    }

    /// Grades the panel to `size` and keeps the result as a preview.
    pub fn grade(
        &mut self,
        store: &PanelStore,
        size: &str,
        rules: &[GradeRule],
    ) -> Result<GradeOutcome, EditError> {
        self.check_live()?;
        let panel = store.get(self.panel)?;
        let outcome = grade_panel(panel, size, rules, &self.tolerance)?;
        self.previews.insert(outcome.size.clone(), outcome.path.clone());
        Ok(outcome)
    }

    /// Rescales the segment ending at `endpoint_index` to `new_length`.
    pub fn set_segment_length(
        &mut self,
        store: &mut PanelStore,
        endpoint_index: usize,
        new_length: f64,
    ) -> Result<Path, EditError> {
        let panel = self.editable_panel(store)?;
        let path = set_segment_length(panel.base(), endpoint_index, new_length, &self.tolerance)?;
        panel.replace_base(path.clone());
        self.refresh_overlays(panel);
        Ok(path)
    }

    /// Drops handles and previews. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.handles.clear();
        self.previews.clear();
        self.disposed = true;
        debug!(panel = %self.panel, "editor disposed");
    }

    fn check_live(&self) -> Result<(), EditError> {
        if self.disposed {
            Err(EditError::Disposed {
                panel: self.panel.0,
            })
        } else {
            Ok(())
        }
    }

    fn editable_panel<'a>(
        &self,
        store: &'a mut PanelStore,
    ) -> Result<&'a mut PatternPanel, EditError> {
        self.check_live()?;
        let panel = store.get_mut(self.panel)?;
        if !panel.is_editable() {
            return Err(EditError::OutOfEditMode {
                panel: self.panel.0,
            });
        }
        Ok(panel)
    }

    fn refresh_overlays(&mut self, panel: &PatternPanel) {
        self.handles = panel.base().points();
        // previews were graded from the old shape
        self.previews.clear();
    }
}

/// True when `edited` crosses itself or winds the other way round than
/// `original`. Connectors that run straight back along a neighbour are
/// ignored.
fn crosses_itself(
    original: &Path,
    edited: &Path,
    tolerance: &GeometryTolerance,
) -> Result<bool, GeometryError> {
    let eps = tolerance.coincidence_epsilon_mm;
    let outline = flatten_with(edited, tolerance)?.without_spikes(eps);
    if outline.is_self_intersecting(eps) {
        return Ok(true);
    }
    Ok(edited.is_closed() && outline.is_ccw() != flatten_with(original, tolerance)?.is_ccw())
}

/// A parallel offset together with the command positions it inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelOffset {
    pub path: Path,
    /// Insertion positions, applied in order, for re-indexing annotations.
    pub inserted: Vec<usize>,
}

/// Moves the segment ending at `index` by `distance` along its normal and
/// joins it back to the untouched remainder with two connecting lines.
///
/// On closed paths positive distances point away from the interior. On open
/// paths they point to the right of the direction of travel.
pub fn offset_segment(
    path: &Path,
    index: usize,
    distance: f64,
    tolerance: &GeometryTolerance,
) -> Result<ParallelOffset, GeometryError> {
    if !distance.is_finite() || distance == 0.0 {
        return Err(GeometryError::invalid_parameter(
            "distance",
            "must be finite and non-zero",
        ));
    }
    let segment = path.segment(index).ok_or(GeometryError::SegmentOutOfRange {
        index,
        count: path.len(),
    })?;

    // right-hand normals point outward on counter-clockwise rings
    let side = if path.is_closed() && !flatten_with(path, tolerance)?.is_ccw() {
        1.0
    } else {
        -1.0
    };
    let chord_normal = leg_normal(segment.from(), segment.to(), side).ok_or_else(|| {
        GeometryError::invalid_parameter("segment_index", "segment has zero length")
    })?;
    // zero-length control legs borrow the chord direction
    let normal = move |a: Point, b: Point| leg_normal(a, b, side).unwrap_or(chord_normal);

    let commands = path.commands();
    let cmd = commands[index];
    let mut spliced: Vec<PathCommand> = commands[..index].to_vec();

    let (offset_cmd, offset_start) = match cmd {
        PathCommand::LineTo { x, y } => {
            let shift = chord_normal * distance;
            (
                Some(PathCommand::line_to(Point::new(x, y) + shift)),
                segment.from() + shift,
            )
        }
        PathCommand::QuadTo { cx, cy, x, y } => {
            let (p0, p1, p2) = (segment.from(), Point::new(cx, cy), Point::new(x, y));
            let (n01, n12) = (normal(p0, p1), normal(p1, p2));
            let ctrl = offset_corner(p0, p1, p2, n01, n12, distance);
            (
                Some(PathCommand::quad_to(ctrl, p2 + n12 * distance)),
                p0 + n01 * distance,
            )
        }
        PathCommand::CubicTo {
            c1x,
            c1y,
            c2x,
            c2y,
            x,
            y,
        } => {
            let p0 = segment.from();
            let (p1, p2, p3) = (Point::new(c1x, c1y), Point::new(c2x, c2y), Point::new(x, y));
            let (n01, n12, n23) = (normal(p0, p1), normal(p1, p2), normal(p2, p3));
            let c1 = offset_corner(p0, p1, p2, n01, n12, distance);
            let c2 = offset_corner(p1, p2, p3, n12, n23, distance);
            (
                Some(PathCommand::cubic_to(c1, c2, p3 + n23 * distance)),
                p0 + n01 * distance,
            )
        }
        PathCommand::Close => (None, segment.from() + chord_normal * distance),
        PathCommand::MoveTo { .. } => {
            return Err(GeometryError::SegmentOutOfRange {
                index,
                count: path.len(),
            })
        }
    };

    spliced.push(PathCommand::line_to(offset_start));
    let inserted = match offset_cmd {
        Some(offset_cmd) => {
            spliced.push(offset_cmd);
            spliced.push(PathCommand::line_to(segment.to()));
            spliced.extend_from_slice(&commands[index + 1..]);
            vec![index, index + 2]
        }
        None => {
            // closing segment: the offset copy is a line, the new Close
            // becomes the trailing connector
            spliced.push(PathCommand::line_to(segment.to() + chord_normal * distance));
            spliced.push(PathCommand::Close);
            vec![index, index + 2]
        }
    };

    Ok(ParallelOffset {
        path: Path::new(spliced)?,
        inserted,
    })
}

/// Unit normal of leg `a -> b` on `side`, `None` for a zero leg.
fn leg_normal(a: Point, b: Point, side: f64) -> Option<Point> {
    (b - a).normalized().map(|dir| dir.perpendicular() * side)
}

/// Offset position of control point `p1` where the offset legs meet.
fn offset_corner(
    p0: Point,
    p1: Point,
    p2: Point,
    n01: Point,
    n12: Point,
    distance: f64,
) -> Point {
    let r = p1 - p0;
    let s = p2 - p1;
    let a = p0 + n01 * distance;
    let b = p1 + n12 * distance;
    let denom = r.cross(s);
    if denom.abs() <= 1e-9 * r.length() * s.length() {
        let avg = (n01 + n12) * 0.5;
        return p1 + avg * distance;
    }
    let t = (b - a).cross(s) / denom;
    a + r * t
}

/// Reflects `path` across the vertical midline of its flattened bounds.
pub fn mirror_path(path: &Path, tolerance: &GeometryTolerance) -> Result<Path, GeometryError> {
    let bounds = flatten_with(path, tolerance)?
        .bounds()
        .ok_or(GeometryError::TooFewPoints {
            required: 2,
            found: 0,
        })?;
    Ok(path.mirror_x(bounds.center().x))
}

/// Scales the segment ending at `endpoint_index` about its start point so
/// that its arc length becomes `new_length`.
pub fn set_segment_length(
    path: &Path,
    endpoint_index: usize,
    new_length: f64,
    tolerance: &GeometryTolerance,
) -> Result<Path, GeometryError> {
    if !new_length.is_finite() || new_length <= 0.0 {
        return Err(GeometryError::invalid_parameter(
            "new_length",
            "must be positive and finite",
        ));
    }
    let cmd = path
        .commands()
        .get(endpoint_index)
        .copied()
        .ok_or(GeometryError::SegmentOutOfRange {
            index: endpoint_index,
            count: path.len(),
        })?;
    if matches!(cmd, PathCommand::Close) {
        return Err(GeometryError::invalid_parameter(
            "endpoint_index",
            "the closing segment has no endpoint of its own",
        ));
    }
    let segment = path
        .segment(endpoint_index)
        .ok_or(GeometryError::SegmentOutOfRange {
            index: endpoint_index,
            count: path.len(),
        })?;

    let current = segment_length(&segment, tolerance.flatten_tolerance_mm)?;
    if current <= tolerance.coincidence_epsilon_mm {
        return Err(GeometryError::invalid_parameter(
            "endpoint_index",
            "segment has zero length",
        ));
    }
    let factor = new_length / current;
    let origin = segment.from();
    path.with_command(
        endpoint_index,
        cmd.map_points(|p| origin + (p - origin) * factor),
    )
}
