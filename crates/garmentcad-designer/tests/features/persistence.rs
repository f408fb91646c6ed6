use garmentcad_core::NestingSettings;
use garmentcad_designer::{
    pack, presets, NestingLayout, NestingPiece, PanelStore, Path, PatternPanel, Point,
};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_store_survives_file_round_trip() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("pattern.json");

    let mut store = PanelStore::new();
    let skirt = store.insert(presets::skirt("skirt", 300.0, 500.0, 600.0).unwrap());
    let scrap = store.insert(presets::rectangle("scrap", 10.0, 10.0).unwrap());
    store.get_mut(skirt).unwrap().add_notch(2).unwrap();
    store.remove(scrap);
    fs::write(&file, store.to_json().unwrap()).unwrap();

    let restored = PanelStore::from_json(&fs::read_to_string(&file).unwrap()).unwrap();
    assert!(!restored.contains(scrap));
    let panel = restored.get(skirt).unwrap();
    assert_eq!(panel.landmarks().len(), 4);
    assert_eq!(panel.notches()[0].command_index, 2);
    assert_eq!(panel.base(), store.get(skirt).unwrap().base());
}

#[test]
fn test_invalid_path_json_rejected() {
    let json = r#"{"name":"bad","base":[{"cmd":"line_to","x":0.0,"y":0.0}]}"#;
    assert!(serde_json::from_str::<PatternPanel>(json).is_err());
}

#[test]
fn test_layout_is_plain_data() {
    let outline = Path::from_points(
        &[Point::new(0.0, 0.0), Point::new(30.0, 0.0), Point::new(0.0, 40.0)],
        true,
    )
    .unwrap();
    let piece = NestingPiece::from_path("gusset", &outline, &Default::default()).unwrap();
    let layout = pack(&[piece], 100.0, &NestingSettings::default()).unwrap();
    let json = serde_json::to_string(&layout).unwrap();
    let back: NestingLayout = serde_json::from_str(&json).unwrap();
    assert_eq!(back, layout);
}
