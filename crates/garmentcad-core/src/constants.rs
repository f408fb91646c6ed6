//! Engine-wide defaults. All lengths are millimeters.

/// Maximum chord-to-curve deviation when flattening curves.
pub const DEFAULT_FLATTEN_TOLERANCE_MM: f64 = 0.5;

/// Recursion cap for adaptive curve subdivision.
pub const MAX_SUBDIVISION_DEPTH: u32 = 16;

/// Points closer than this are the same vertex when building arrangements.
pub const COINCIDENCE_EPSILON_MM: f64 = 1e-6;

/// Closing a freehand draw snaps to the start point within this radius.
pub const DEFAULT_SNAP_RADIUS_MM: f64 = 1.0;

/// Seams whose length difference is at most this are `ok`.
pub const SEAM_OK_MAX_MM: f64 = 2.0;

/// Seams whose length difference is at most this (and above ok) are `warn`.
pub const SEAM_WARN_MAX_MM: f64 = 3.0;

/// Sampling step for continuous rotation during nesting.
pub const DEFAULT_ROTATION_STEP_DEG: f64 = 15.0;

/// Size label of the base pattern every grade is derived from.
pub const BASE_SIZE_LABEL: &str = "M";
