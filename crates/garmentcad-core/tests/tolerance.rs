use garmentcad_core::{GeometryTolerance, MeasurementSystem, NestingSettings, SeamTolerance};

#[test]
fn test_seam_tolerance_json_round_trip() {
    let tol = SeamTolerance::new(1.5, 2.5).unwrap();
    let json = serde_json::to_string(&tol).unwrap();
    let back: SeamTolerance = serde_json::from_str(&json).unwrap();
    assert_eq!(tol, back);
}

#[test]
fn test_geometry_tolerance_partial_json_uses_defaults() {
    let tol: GeometryTolerance = serde_json::from_str(r#"{"flatten_tolerance_mm": 0.1}"#).unwrap();
    assert_eq!(tol.flatten_tolerance_mm, 0.1);
    assert_eq!(tol.max_subdivision_depth, 16);
    assert_eq!(tol.coincidence_epsilon_mm, 1e-6);
}

#[test]
fn test_nesting_settings_default_json() {
    let settings: NestingSettings = serde_json::from_str("{}").unwrap();
    assert_eq!(settings, NestingSettings::default());
}

#[test]
fn test_measurement_system_serializes_lowercase() {
    let json = serde_json::to_string(&MeasurementSystem::Imperial).unwrap();
    assert_eq!(json, "\"imperial\"");
}
