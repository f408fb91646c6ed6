//! # Parametric Panel Presets
//!
//! Generators for common starting blocks. Every preset is built
//! counter-clockwise from the bottom left with y pointing up, and comes
//! with landmarks on its corners so it can be graded straight away.

use garmentcad_core::GeometryError;
use serde::{Deserialize, Serialize};

use crate::model::{PathBuilder, PatternPanel, Point};

/// Control arm length of the sleeve cap curves, as a share of cap height.
const CAP_ARM: f64 = 0.55;

/// A parametric panel shape. All dimensions are millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelPreset {
    /// Straight block, e.g. a waistband or facing.
    Rectangle { width: f64, height: f64 },
    /// Flared skirt panel, hem centred under the waist.
    Skirt { waist: f64, hem: f64, length: f64 },
    /// Tapered sleeve with a curved cap.
    Sleeve {
        bicep: f64,
        wrist: f64,
        length: f64,
        cap_height: f64,
    },
}

impl PanelPreset {
    pub fn name(&self) -> &'static str {
        match self {
            PanelPreset::Rectangle { .. } => "rectangle",
            PanelPreset::Skirt { .. } => "skirt",
            PanelPreset::Sleeve { .. } => "sleeve",
        }
    }

    /// Builds a display-mode panel named `name`.
    pub fn build(&self, name: impl Into<String>) -> Result<PatternPanel, GeometryError> {
        match *self {
            PanelPreset::Rectangle { width, height } => rectangle(name, width, height),
            PanelPreset::Skirt { waist, hem, length } => skirt(name, waist, hem, length),
            PanelPreset::Sleeve {
                bicep,
                wrist,
                length,
                cap_height,
            } => sleeve(name, bicep, wrist, length, cap_height),
        }
    }
}

fn positive(name: &str, value: f64) -> Result<(), GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::invalid_parameter(name, "must be positive"))
    }
}

fn polygon_panel(
    name: impl Into<String>,
    corners: &[Point],
    labels: &[&str],
) -> Result<PatternPanel, GeometryError> {
    let mut builder = PathBuilder::new(0.0);
    for corner in corners {
        builder.draw_point(*corner);
    }
    builder.close();
    let mut panel = PatternPanel::new(name, builder.build()?);
    for (index, label) in labels.iter().enumerate() {
        panel.add_landmark(index, *label)?;
    }
    Ok(panel)
}

pub fn rectangle(
    name: impl Into<String>,
    width: f64,
    height: f64,
) -> Result<PatternPanel, GeometryError> {
    positive("width", width)?;
    positive("height", height)?;
    polygon_panel(
        name,
        &[
            Point::new(0.0, 0.0),
            Point::new(width, 0.0),
            Point::new(width, height),
            Point::new(0.0, height),
        ],
        &["hem left", "hem right", "top right", "top left"],
    )
}

pub fn skirt(
    name: impl Into<String>,
    waist: f64,
    hem: f64,
    length: f64,
) -> Result<PatternPanel, GeometryError> {
    positive("waist", waist)?;
    positive("hem", hem)?;
    positive("length", length)?;
    let centre = hem / 2.0;
    polygon_panel(
        name,
        &[
            Point::new(0.0, 0.0),
            Point::new(hem, 0.0),
            Point::new(centre + waist / 2.0, length),
            Point::new(centre - waist / 2.0, length),
        ],
        &["hem left", "hem right", "waist right", "waist left"],
    )
}

/// Sleeve from wrist (bottom) to cap top.
///
/// Commands: 0 wrist left, 1 wrist right, 2 underarm right, 3 cap top,
/// 4 underarm left; the closing segment is the left underarm seam.
pub fn sleeve(
    name: impl Into<String>,
    bicep: f64,
    wrist: f64,
    length: f64,
    cap_height: f64,
) -> Result<PatternPanel, GeometryError> {
    positive("bicep", bicep)?;
    positive("wrist", wrist)?;
    positive("length", length)?;
    positive("cap_height", cap_height)?;
    if wrist > bicep {
        return Err(GeometryError::invalid_parameter(
            "wrist",
            "must not exceed the bicep width",
        ));
    }
    if cap_height >= length {
        return Err(GeometryError::invalid_parameter(
            "cap_height",
            "must be less than the sleeve length",
        ));
    }

    let inset = (bicep - wrist) / 2.0;
    let underarm = length - cap_height;
    let arm = cap_height * CAP_ARM;
    let top = Point::new(bicep / 2.0, length);

    let mut builder = PathBuilder::new(0.0);
    builder.draw_point(Point::new(inset, 0.0));
    builder.draw_point(Point::new(bicep - inset, 0.0));
    builder.draw_point(Point::new(bicep, underarm));
    builder
        .cubic_to(
            Point::new(bicep * 0.85, underarm + arm),
            Point::new(bicep * 0.7, length),
            top,
        )
        .cubic_to(
            Point::new(bicep * 0.3, length),
            Point::new(bicep * 0.15, underarm + arm),
            Point::new(0.0, underarm),
        )
        .close();

    let mut panel = PatternPanel::new(name, builder.build()?);
    for (index, label) in [
        "wrist left",
        "wrist right",
        "underarm right",
        "cap top",
        "underarm left",
    ]
    .into_iter()
    .enumerate()
    {
        panel.add_landmark(index, label)?;
    }
    Ok(panel)
}
