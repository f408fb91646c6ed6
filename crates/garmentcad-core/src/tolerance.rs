//! Tolerance and tuning values consumed by the geometry engine.
//!
//! These are plain serializable values. The settings crate persists them;
//! the designer crate receives them as arguments and never reads globals.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::GeometryError;

/// Numeric tolerances for path geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryTolerance {
    /// Max deviation between a curve and its flattened polygon
    pub flatten_tolerance_mm: f64,
    /// Recursion cap for adaptive subdivision
    pub max_subdivision_depth: u32,
    /// Distance below which two points are coincident
    pub coincidence_epsilon_mm: f64,
    /// Snap radius for closing freehand paths
    pub snap_radius_mm: f64,
}

impl Default for GeometryTolerance {
    fn default() -> Self {
        Self {
            flatten_tolerance_mm: DEFAULT_FLATTEN_TOLERANCE_MM,
            max_subdivision_depth: MAX_SUBDIVISION_DEPTH,
            coincidence_epsilon_mm: COINCIDENCE_EPSILON_MM,
            snap_radius_mm: DEFAULT_SNAP_RADIUS_MM,
        }
    }
}

impl GeometryTolerance {
    /// Validate that every tolerance is positive and finite
    pub fn validate(&self) -> Result<(), GeometryError> {
        positive("flatten_tolerance_mm", self.flatten_tolerance_mm)?;
        positive("coincidence_epsilon_mm", self.coincidence_epsilon_mm)?;
        if !self.snap_radius_mm.is_finite() || self.snap_radius_mm < 0.0 {
            return Err(GeometryError::invalid_parameter(
                "snap_radius_mm",
                "must be finite and non-negative",
            ));
        }
        if self.max_subdivision_depth == 0 {
            return Err(GeometryError::invalid_parameter(
                "max_subdivision_depth",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Seam length-mismatch thresholds for one style or tolerance profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeamTolerance {
    /// Largest difference still classified as ok
    pub ok_max_mm: f64,
    /// Largest difference still classified as warn
    pub warn_max_mm: f64,
}

impl Default for SeamTolerance {
    fn default() -> Self {
        Self {
            ok_max_mm: SEAM_OK_MAX_MM,
            warn_max_mm: SEAM_WARN_MAX_MM,
        }
    }
}

impl SeamTolerance {
    /// Create a profile, validating threshold ordering
    pub fn new(ok_max_mm: f64, warn_max_mm: f64) -> Result<Self, GeometryError> {
        let tolerance = Self {
            ok_max_mm,
            warn_max_mm,
        };
        tolerance.validate()?;
        Ok(tolerance)
    }

    /// Thresholds must be finite with `0 <= ok_max <= warn_max`
    pub fn validate(&self) -> Result<(), GeometryError> {
        if !self.ok_max_mm.is_finite() || self.ok_max_mm < 0.0 {
            return Err(GeometryError::invalid_parameter(
                "ok_max_mm",
                "must be finite and non-negative",
            ));
        }
        if !self.warn_max_mm.is_finite() || self.warn_max_mm < self.ok_max_mm {
            return Err(GeometryError::invalid_parameter(
                "warn_max_mm",
                "must be finite and not below ok_max_mm",
            ));
        }
        Ok(())
    }
}

/// Tuning for the nesting packer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NestingSettings {
    /// Gap kept between neighbouring pieces and shelves
    pub piece_spacing_mm: f64,
    /// Sampling step used when a piece allows continuous rotation
    pub continuous_rotation_step_deg: f64,
}

impl Default for NestingSettings {
    fn default() -> Self {
        Self {
            piece_spacing_mm: 0.0,
            continuous_rotation_step_deg: DEFAULT_ROTATION_STEP_DEG,
        }
    }
}

impl NestingSettings {
    /// Spacing must be non-negative, rotation step in (0, 360]
    pub fn validate(&self) -> Result<(), GeometryError> {
        if !self.piece_spacing_mm.is_finite() || self.piece_spacing_mm < 0.0 {
            return Err(GeometryError::invalid_parameter(
                "piece_spacing_mm",
                "must be finite and non-negative",
            ));
        }
        let step = self.continuous_rotation_step_deg;
        if !step.is_finite() || step <= 0.0 || step > 360.0 {
            return Err(GeometryError::invalid_parameter(
                "continuous_rotation_step_deg",
                "must be in (0, 360]",
            ));
        }
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<(), GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::invalid_parameter(name, "must be positive and finite"))
    }
}
