//! Error handling for GarmentCAD
//!
//! Provides error types for every layer of the pattern engine:
//! - Geometry errors (malformed or degenerate path input)
//! - Edit errors (panel mutations that are not allowed right now)
//! - Nesting errors (invalid sheet or piece input)
//!
//! Routine outcomes are deliberately not errors: a boolean operation with
//! nothing to do returns `None`, an unplaceable nesting piece is reported in
//! the layout, and a missing grade rule is reported as a warning.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised when path data is malformed or degenerate. A panel whose raw path
/// fails here should not be processed further, but other panels are unaffected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Path does not have enough distinct points
    #[error("Path needs at least {required} points, found {found}")]
    TooFewPoints {
        /// Minimum number of points required.
        required: usize,
        /// Number of points present.
        found: usize,
    },

    /// A coordinate is NaN or infinite
    #[error("Non-finite coordinate in command {index}")]
    NonFiniteCoordinate {
        /// Index of the offending command.
        index: usize,
    },

    /// Path does not start with a MoveTo command
    #[error("Path must start with MoveTo")]
    MissingMoveTo,

    /// A Close command appears before the end of the path
    #[error("Close command at index {index} is not the last command")]
    CloseNotLast {
        /// Index of the misplaced Close command.
        index: usize,
    },

    /// A second MoveTo starts another subpath
    #[error("Path contains a second subpath starting at command {index}")]
    MultipleSubpaths {
        /// Index of the extra MoveTo command.
        index: usize,
    },

    /// Operation requires a closed region
    #[error("Path is not closed")]
    OpenPath,

    /// Closed path encloses no area
    #[error("Path encloses zero area")]
    ZeroArea,

    /// Closed path crosses itself
    #[error("Path is self-intersecting")]
    SelfIntersecting,

    /// Segment or command index is outside the path
    #[error("Segment index {index} out of range (path has {count} commands)")]
    SegmentOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of commands in the path.
        count: usize,
    },

    /// Boolean result would contain an interior hole
    #[error("Result contains an interior hole, which a single boundary cannot represent")]
    HoleNotRepresentable,

    /// SVG path data could not be parsed
    #[error("Invalid SVG path data: {reason}")]
    InvalidSvgData {
        /// What went wrong while parsing.
        reason: String,
    },

    /// A numeric parameter is out of range
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl GeometryError {
    /// Shorthand for [`GeometryError::InvalidParameter`].
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Edit error type
///
/// Represents panel mutations that were rejected. The panel stays in its
/// last valid state whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    /// Mutation attempted while the panel is locked in display mode
    #[error("Panel {panel} is not in edit mode")]
    OutOfEditMode {
        /// Id of the locked panel.
        panel: usize,
    },

    /// Landmark index does not name a point of the panel's path
    #[error("Landmark index {index} does not exist on the panel path")]
    UnknownLandmark {
        /// The landmark command index.
        index: usize,
    },

    /// Panel id does not resolve in the store
    #[error("Unknown panel id {id}")]
    UnknownPanel {
        /// The unresolved panel id.
        id: usize,
    },

    /// Editor has already been disposed
    #[error("Editor for panel {panel} has been disposed")]
    Disposed {
        /// Id of the panel the editor was bound to.
        panel: usize,
    },

    /// Underlying geometry failure
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Nesting error type
///
/// Only batch-level input problems are errors; a single piece that does not
/// fit is reported in the layout instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NestingError {
    /// Sheet width is not a positive finite number
    #[error("Sheet width must be positive and finite, got {width}")]
    InvalidSheetWidth {
        /// The rejected width.
        width: f64,
    },

    /// Piece outline has fewer than three points
    #[error("Nesting piece '{id}' has an empty outline")]
    EmptyPiece {
        /// Id of the piece.
        id: String,
    },

    /// Underlying geometry failure
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Main error type for GarmentCAD
///
/// A unified error type that can represent any error from the engine.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Edit error
    #[error(transparent)]
    Edit(#[from] EditError),

    /// Nesting error
    #[error(transparent)]
    Nesting(#[from] NestingError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error means the input geometry itself is unusable
    pub fn is_invalid_geometry(&self) -> bool {
        matches!(
            self,
            Error::Geometry(_)
                | Error::Edit(EditError::Geometry(_))
                | Error::Nesting(NestingError::Geometry(_))
        )
    }

    /// Check if this is an edit-mode violation
    pub fn is_out_of_edit_mode(&self) -> bool {
        matches!(self, Error::Edit(EditError::OutOfEditMode { .. }))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_error_display() {
        let err = GeometryError::TooFewPoints {
            required: 2,
            found: 1,
        };
        assert_eq!(err.to_string(), "Path needs at least 2 points, found 1");

        let err = GeometryError::invalid_parameter("distance", "must be finite");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'distance': must be finite"
        );
    }

    #[test]
    fn test_edit_error_wraps_geometry() {
        let err: EditError = GeometryError::OpenPath.into();
        assert_eq!(err.to_string(), "Path is not closed");
    }

    #[test]
    fn test_error_classification() {
        let err: Error = GeometryError::ZeroArea.into();
        assert!(err.is_invalid_geometry());
        assert!(!err.is_out_of_edit_mode());

        let err: Error = EditError::OutOfEditMode { panel: 3 }.into();
        assert!(err.is_out_of_edit_mode());
        assert!(!err.is_invalid_geometry());

        let err: Error = EditError::Geometry(GeometryError::MissingMoveTo).into();
        assert!(err.is_invalid_geometry());
    }
}
