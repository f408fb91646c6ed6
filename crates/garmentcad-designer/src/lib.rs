//! # GarmentCAD Designer
//!
//! Pattern geometry engine for garment panels. It combines path geometry,
//! panel editing, seam validation and nesting into one crate.
//!
//! ## Core Components
//!
//! ### Path Geometry
//! - **Paths**: move/line/quad/cubic/close command sequences with SVG I/O
//! - **Flattening**: adaptive curve subdivision to polygons
//! - **Booleans**: union, subtract and union of many closed paths
//! - **Regions**: the closed face under a point in a set of overlapping outlines
//!
//! ### Pattern Editing
//! - **Panels**: base path, landmarks, seams, notches and edit mode
//! - **Editor**: parallel offsets, notches, mirroring, grading and segment lengths
//! - **Presets**: parametric rectangle, skirt and sleeve blocks
//! - **Commands**: user actions applied to a [`DesignSession`]
//!
//! ### Manufacturing
//! - **Seams**: ok/warn/fail classification of mating seam lengths
//! - **Nesting**: shelf packing of panels onto a sheet
//!
//! ## Architecture
//!
//! ```text
//! DesignSession (commands)
//!   ├── PanelStore (PatternPanel by PanelId)
//!   │     └── Path (commands) ── flatten ──> Polygon
//!   ├── PatternEditor (per panel overlays)
//!   ├── ops / regions (cavalier_contours, half-edge faces)
//!   ├── seam (SeamMetric, export gate)
//!   └── nesting (NestingLayout)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use garmentcad_designer::{presets, seam, PanelStore};
//!
//! let mut store = PanelStore::new();
//! let front = store.insert(presets::skirt("front", 300.0, 500.0, 600.0)?);
//! let metrics = seam::get_seam_status(&store, front, &Default::default(), &Default::default())?;
//! ```

pub mod commands;
pub mod editor;
pub mod flatten;
pub mod grading;
pub mod model;
pub mod nesting;
pub mod ops;
pub mod panel_store;
pub mod polygon;
pub mod presets;
pub mod regions;
pub mod seam;

pub use commands::{CommandOutcome, DesignSession, DesignerCommand, NestPanel};
pub use editor::{mirror_path, offset_segment, set_segment_length, ParallelOffset, PatternEditor};
pub use flatten::{flatten, flatten_with, path_length, segment_length};
pub use grading::{grade_panel, Displacement, GradeOutcome, GradeRule, GradeRuleMissing};
pub use model::{
    rotate_point, Bounds, EditMode, NotchMarker, PanelId, Path, PathBuilder, PathCommand,
    PatternPanel, Point, SeamEnd, SeamPair, Segment,
};
pub use nesting::{
    find_overlaps, pack, NestingLayout, NestingPiece, Placement, Rotations, Unplaceable,
};
pub use ops::{perform_boolean, subtract, union, union_multiple, BooleanOp};
pub use panel_store::PanelStore;
pub use polygon::Polygon;
pub use presets::PanelPreset;
pub use regions::find_closed_region_at;
pub use seam::{
    check_store, export_gate, get_seam_status, ExportGate, SeamMetric, SeamSide, SeamStatus,
};

pub use garmentcad_core::{EditError, GeometryError, GeometryTolerance, NestingError, SeamTolerance};
