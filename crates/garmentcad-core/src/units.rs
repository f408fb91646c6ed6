//! Unit conversion utilities
//!
//! All engine geometry is in millimeters. These helpers convert typed
//! measurements (including fractional inches such as `1 1/4`) to millimeters
//! and format millimeter values for display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    #[default]
    Metric,
    /// Imperial system (inches)
    Imperial,
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "mm" | "cm" => Ok(Self::Metric),
            "imperial" | "inch" | "in" => Ok(Self::Imperial),
            _ => Err(format!("Unknown measurement system: {}", s)),
        }
    }
}

/// Format a millimeter value for display in the given system
pub fn format_length(value_mm: f64, system: MeasurementSystem) -> String {
    match system {
        MeasurementSystem::Metric => format!("{:.1}", value_mm),
        MeasurementSystem::Imperial => format!("{:.3}", value_mm / MM_PER_INCH),
    }
}

/// Parse a typed length to millimeters
///
/// An explicit suffix (`mm`, `cm`, `m`, `in`, `"`) overrides `system`.
/// Imperial input accepts mixed fractions like `1 1/2`.
pub fn parse_length(input: &str, system: MeasurementSystem) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty length".to_string());
    }

    let lower = input.to_lowercase();
    let (number, scale) = if let Some(rest) = lower.strip_suffix("mm") {
        (rest.trim().to_string(), Some(1.0))
    } else if let Some(rest) = lower.strip_suffix("cm") {
        (rest.trim().to_string(), Some(10.0))
    } else if let Some(rest) = lower.strip_suffix("in") {
        (rest.trim().to_string(), Some(MM_PER_INCH))
    } else if let Some(rest) = lower.strip_suffix('"') {
        (rest.trim().to_string(), Some(MM_PER_INCH))
    } else if let Some(rest) = lower.strip_suffix('m') {
        (rest.trim().to_string(), Some(1000.0))
    } else {
        (lower.clone(), None)
    };

    let scale = scale.unwrap_or(match system {
        MeasurementSystem::Metric => 1.0,
        MeasurementSystem::Imperial => MM_PER_INCH,
    });

    let value = parse_mixed_number(&number)?;
    if !value.is_finite() {
        return Err(format!("Length is not finite: {}", input));
    }
    Ok(value * scale)
}

/// Parse `3`, `0.5`, `1/4`, `-1 1/2`
fn parse_mixed_number(input: &str) -> Result<f64, String> {
    let input = input.trim();
    let (negative, body) = match input.strip_prefix('-') {
        Some(rest) => (true, rest.trim()),
        None => (false, input),
    };

    let mut total = 0.0;
    let mut parts = 0;
    for part in body.split_whitespace() {
        parts += 1;
        if let Some((num, den)) = part.split_once('/') {
            let num = num
                .parse::<f64>()
                .map_err(|_| format!("Invalid numerator in '{}'", part))?;
            let den = den
                .parse::<f64>()
                .map_err(|_| format!("Invalid denominator in '{}'", part))?;
            if den == 0.0 {
                return Err("Division by zero".to_string());
            }
            total += num / den;
        } else {
            total += part
                .parse::<f64>()
                .map_err(|_| format!("Invalid number '{}'", part))?;
        }
    }

    if parts == 0 {
        return Err("Missing number".to_string());
    }
    Ok(if negative { -total } else { total })
}

/// Get the unit label for the given system ("mm" or "in")
pub fn get_unit_label(system: MeasurementSystem) -> &'static str {
    match system {
        MeasurementSystem::Metric => "mm",
        MeasurementSystem::Imperial => "in",
    }
}
