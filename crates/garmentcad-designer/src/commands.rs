//! Command layer over a [`DesignSession`].
//!
//! Each user action is a [`DesignerCommand`] value. Applying it runs the
//! matching engine operation against the session's panel store and returns
//! a [`CommandOutcome`] describing what changed.

use std::collections::BTreeMap;

use garmentcad_core::{Error, GeometryTolerance, NestingSettings};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::editor::PatternEditor;
use crate::grading::{grade_panel, GradeOutcome, GradeRule};
use crate::model::{EditMode, PanelId, Path, PathBuilder, PatternPanel, Point};
use crate::nesting::{pack, NestingLayout, NestingPiece, Rotations};
use crate::ops::{subtract, union_multiple, BooleanOp};
use crate::panel_store::PanelStore;
use crate::presets::PanelPreset;
use crate::regions::find_closed_region_at;

/// Panels plus the in-progress freehand draft and open editors.
#[derive(Debug, Default)]
pub struct DesignSession {
    pub store: PanelStore,
    pub tolerance: GeometryTolerance,
    pub nesting: NestingSettings,
    draft: Option<PathBuilder>,
    editors: BTreeMap<PanelId, PatternEditor>,
}

impl DesignSession {
    pub fn new(tolerance: GeometryTolerance, nesting: NestingSettings) -> Self {
        Self {
            tolerance,
            nesting,
            ..Default::default()
        }
    }

    pub fn draft(&self) -> Option<&PathBuilder> {
        self.draft.as_ref()
    }

    /// Editor for `panel`, opened on first use.
    pub fn editor(&mut self, panel: PanelId) -> &mut PatternEditor {
        let tolerance = self.tolerance;
        self.editors
            .entry(panel)
            .or_insert_with(|| PatternEditor::new(panel, tolerance))
    }

    pub fn apply(&mut self, command: DesignerCommand) -> Result<CommandOutcome, Error> {
        command.apply(self)
    }

    fn panel_paths(&self, ids: &[PanelId]) -> Result<Vec<Path>, Error> {
        if ids.is_empty() {
            return Ok(self.store.iter().map(|(_, p)| p.base().clone()).collect());
        }
        ids.iter()
            .map(|id| Ok(self.store.get(*id)?.base().clone()))
            .collect()
    }

    fn insert_path(&mut self, name: String, path: Path) -> CommandOutcome {
        let id = self.store.insert(PatternPanel::new(name, path));
        debug!(panel = %id, "panel created");
        CommandOutcome::PanelCreated(id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum DesignerCommand {
    DrawPoint(DrawPoint),
    ClosePath(ClosePath),
    ApplyPreset(ApplyPreset),
    DesignateRegion(DesignateRegion),
    CombineSelection(CombineSelection),
    MakeParallel(MakeParallel),
    SetSegmentLength(SetSegmentLength),
    AddNotch(AddNotch),
    Mirror(Mirror),
    Grade(Grade),
    Nest(Nest),
    ToggleEditMode(PanelRef),
    Dispose(PanelRef),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosePath {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyPreset {
    pub name: String,
    pub preset: PanelPreset,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignateRegion {
    pub name: String,
    pub x: f64,
    pub y: f64,
    /// Panels whose outlines bound the region; empty means all panels.
    #[serde(default)]
    pub candidates: Vec<PanelId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombineSelection {
    pub name: String,
    pub op: BooleanOp,
    /// For subtraction the first panel is cut by all the others.
    pub panels: Vec<PanelId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MakeParallel {
    pub panel: PanelId,
    pub segment: usize,
    pub distance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetSegmentLength {
    pub panel: PanelId,
    pub segment: usize,
    pub length: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddNotch {
    pub panel: PanelId,
    pub command_index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mirror {
    pub panel: PanelId,
    /// Name of the mirrored copy.
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grade {
    pub panel: PanelId,
    pub size: String,
    pub rules: Vec<GradeRule>,
}

/// One panel to nest, with its cut count and grade rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestPanel {
    pub panel: PanelId,
    #[serde(default = "one")]
    pub quantity: u32,
    #[serde(default)]
    pub rules: Vec<GradeRule>,
}

impl NestPanel {
    pub fn new(panel: PanelId) -> Self {
        Self {
            panel,
            quantity: 1,
            rules: Vec::new(),
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_rules(mut self, rules: Vec<GradeRule>) -> Self {
        self.rules = rules;
        self
    }
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nest {
    /// Panels to lay out; empty means every panel once.
    #[serde(default)]
    pub panels: Vec<NestPanel>,
    pub sheet_width: f64,
    #[serde(default)]
    pub rotations: Rotations,
    /// Size the panels are graded to first; the base shape when absent.
    #[serde(default)]
    pub size: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PanelRef {
    pub panel: PanelId,
}

/// What a command did.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    PointAdded { points: usize, closed: bool },
    PanelCreated(PanelId),
    PanelChanged { panel: PanelId, path: Path },
    NotchAdded { panel: PanelId, command_index: usize },
    Graded(GradeOutcome),
    Nested(NestingLayout),
    ModeChanged { panel: PanelId, mode: EditMode },
    Disposed(PanelId),
    /// The operation found nothing to do.
    Unchanged,
}

impl DesignerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            DesignerCommand::DrawPoint(_) => "Draw Point",
            DesignerCommand::ClosePath(_) => "Close Path",
            DesignerCommand::ApplyPreset(_) => "Apply Preset",
            DesignerCommand::DesignateRegion(_) => "Designate Region",
            DesignerCommand::CombineSelection(cmd) => match cmd.op {
                BooleanOp::Union => "Union",
                BooleanOp::Subtract => "Subtract",
            },
            DesignerCommand::MakeParallel(_) => "Make Parallel",
            DesignerCommand::SetSegmentLength(_) => "Set Segment Length",
            DesignerCommand::AddNotch(_) => "Add Notch",
            DesignerCommand::Mirror(_) => "Mirror",
            DesignerCommand::Grade(_) => "Grade",
            DesignerCommand::Nest(_) => "Nest",
            DesignerCommand::ToggleEditMode(_) => "Toggle Edit Mode",
            DesignerCommand::Dispose(_) => "Dispose",
        }
    }

    pub fn apply(self, session: &mut DesignSession) -> Result<CommandOutcome, Error> {
        match self {
            DesignerCommand::DrawPoint(cmd) => {
                let snap = session.tolerance.snap_radius_mm;
                let draft = session.draft.get_or_insert_with(|| PathBuilder::new(snap));
                let closed = draft.draw_point(Point::new(cmd.x, cmd.y));
                Ok(CommandOutcome::PointAdded {
                    points: draft.point_count(),
                    closed,
                })
            }
            DesignerCommand::ClosePath(cmd) => {
                let Some(draft) = session.draft.as_ref() else {
                    return Ok(CommandOutcome::Unchanged);
                };
                // a failed close leaves the draft open for more points
                let path = draft.clone().close().build()?;
                session.draft = None;
                Ok(session.insert_path(cmd.name, path))
            }
            DesignerCommand::ApplyPreset(cmd) => {
                let panel = cmd.preset.build(cmd.name)?;
                Ok(CommandOutcome::PanelCreated(session.store.insert(panel)))
            }
            DesignerCommand::DesignateRegion(cmd) => {
                let candidates = session.panel_paths(&cmd.candidates)?;
                let probe = Point::new(cmd.x, cmd.y);
                match find_closed_region_at(&candidates, probe, &session.tolerance)? {
                    Some(region) => Ok(session.insert_path(cmd.name, region)),
                    None => Ok(CommandOutcome::Unchanged),
                }
            }
            DesignerCommand::CombineSelection(cmd) => {
                let paths = session.panel_paths(&cmd.panels)?;
                let combined = match cmd.op {
                    BooleanOp::Union => union_multiple(&paths, &session.tolerance)?,
                    BooleanOp::Subtract => subtract_all(&paths, &session.tolerance)?,
                };
                match combined {
                    Some(path) => Ok(session.insert_path(cmd.name, path)),
                    None => Ok(CommandOutcome::Unchanged),
                }
            }
            DesignerCommand::MakeParallel(cmd) => {
                let store = &mut session.store;
                let path = session_editor(&mut session.editors, session.tolerance, cmd.panel)
                    .make_parallel(store, cmd.segment, cmd.distance)?;
                Ok(CommandOutcome::PanelChanged {
                    panel: cmd.panel,
                    path,
                })
            }
            DesignerCommand::SetSegmentLength(cmd) => {
                let store = &mut session.store;
                let path = session_editor(&mut session.editors, session.tolerance, cmd.panel)
                    .set_segment_length(store, cmd.segment, cmd.length)?;
                Ok(CommandOutcome::PanelChanged {
                    panel: cmd.panel,
                    path,
                })
            }
            DesignerCommand::AddNotch(cmd) => {
                let store = &mut session.store;
                let notch = session_editor(&mut session.editors, session.tolerance, cmd.panel)
                    .add_notch_at(store, cmd.command_index)?;
                Ok(CommandOutcome::NotchAdded {
                    panel: cmd.panel,
                    command_index: notch.command_index,
                })
            }
            DesignerCommand::Mirror(cmd) => {
                let mirrored = session_editor(&mut session.editors, session.tolerance, cmd.panel)
                    .mirror(&session.store)?;
                Ok(session.insert_path(cmd.name, mirrored))
            }
            DesignerCommand::Grade(cmd) => {
                let store = &mut session.store;
                let outcome = session_editor(&mut session.editors, session.tolerance, cmd.panel)
                    .grade(store, &cmd.size, &cmd.rules)?;
                Ok(CommandOutcome::Graded(outcome))
            }
            DesignerCommand::Nest(cmd) => {
                let entries = if cmd.panels.is_empty() {
                    session.store.ids().into_iter().map(NestPanel::new).collect()
                } else {
                    cmd.panels
                };
                let mut pieces = Vec::with_capacity(entries.len());
                for entry in entries {
                    let panel = session.store.get(entry.panel)?;
                    let outline = match &cmd.size {
                        Some(size) => {
                            grade_panel(panel, size, &entry.rules, &session.tolerance)?.path
                        }
                        None => panel.base().clone(),
                    };
                    let piece = NestingPiece::from_path(
                        entry.panel.to_string(),
                        &outline,
                        &session.tolerance,
                    )?
                    .with_rotations(cmd.rotations.clone())
                    .with_quantity(entry.quantity);
                    pieces.push(piece);
                }
                let layout = pack(&pieces, cmd.sheet_width, &session.nesting)?;
                Ok(CommandOutcome::Nested(layout))
            }
            DesignerCommand::ToggleEditMode(cmd) => {
                let store = &mut session.store;
                let mode = session_editor(&mut session.editors, session.tolerance, cmd.panel)
                    .toggle_edit_mode(store)?;
                Ok(CommandOutcome::ModeChanged {
                    panel: cmd.panel,
                    mode,
                })
            }
            DesignerCommand::Dispose(cmd) => match session.editors.remove(&cmd.panel) {
                Some(mut editor) => {
                    editor.dispose();
                    Ok(CommandOutcome::Disposed(cmd.panel))
                }
                None => Ok(CommandOutcome::Unchanged),
            },
        }
    }
}

fn session_editor(
    editors: &mut BTreeMap<PanelId, PatternEditor>,
    tolerance: GeometryTolerance,
    panel: PanelId,
) -> &mut PatternEditor {
    editors
        .entry(panel)
        .or_insert_with(|| PatternEditor::new(panel, tolerance))
}

/// Cuts every later path out of the first, skipping ones that miss it.
fn subtract_all(
    paths: &[Path],
    tolerance: &GeometryTolerance,
) -> Result<Option<Path>, Error> {
    let Some((first, rest)) = paths.split_first() else {
        return Ok(None);
    };
    let mut current = first.clone();
    let mut changed = false;
    for cutter in rest {
        if let Some(cut) = subtract(&current, cutter, tolerance)? {
            current = cut;
            changed = true;
        }
    }
    Ok(changed.then_some(current))
}
