//! # GarmentCAD Core
//!
//! Core types shared by the GarmentCAD crates: the error taxonomy,
//! tolerance values, engine constants and unit handling. Nothing in this
//! crate does geometry.

pub mod constants;
pub mod error;
pub mod tolerance;
pub mod units;

pub use error::{EditError, Error, GeometryError, NestingError, Result};
pub use tolerance::{GeometryTolerance, NestingSettings, SeamTolerance};
pub use units::{format_length, get_unit_label, parse_length, MeasurementSystem};
