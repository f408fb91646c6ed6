//! # GarmentCAD
//!
//! A 2D pattern geometry engine for garment CAD:
//! - Path geometry: flattening, booleans and closed-region lookup
//! - Pattern editing: parallel offsets, notches, mirroring, grading
//! - Seam validation with per-style tolerance profiles
//! - Shelf nesting of panels onto a cutting sheet
//!
//! ## Architecture
//!
//! GarmentCAD is organized as a workspace with multiple crates:
//!
//! 1. **garmentcad-core** - Errors, tolerances, constants, units
//! 2. **garmentcad-settings** - Config files and seam profiles
//! 3. **garmentcad-designer** - The geometry engine itself
//! 4. **garmentcad** - Re-exports, logging setup and the batch CLI

pub mod jobs;

pub use garmentcad_designer as designer;
pub use garmentcad_settings as settings;

pub use garmentcad_core::{
    format_length, get_unit_label, parse_length, EditError, Error, GeometryError, GeometryTolerance,
    MeasurementSystem, NestingError, NestingSettings, Result, SeamTolerance,
};

pub use garmentcad_designer::{
    CommandOutcome, DesignSession, DesignerCommand, NestingLayout, NestingPiece, PanelId,
    PanelStore, Path, PathCommand, PatternEditor, PatternPanel, Point, SeamMetric, SeamStatus,
};

pub use garmentcad_settings::{Config, SettingsManager};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr so stdout stays clean for JSON reports
/// - RUST_LOG environment variable support, `info` when unset
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("logging already initialized: {e}"))?;

    Ok(())
}
