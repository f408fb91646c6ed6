use garmentcad_core::constants::BASE_SIZE_LABEL;
use garmentcad_designer::{
    grade_panel, presets, GeometryTolerance, GradeRule, PanelStore, PatternEditor, Point,
};
use proptest::prelude::*;

fn sleeve_rules() -> Vec<GradeRule> {
    vec![
        GradeRule::new(0).with_size("L", -3.0, 0.0).with_size("S", 3.0, 0.0),
        GradeRule::new(1).with_size("L", 3.0, 0.0).with_size("S", -3.0, 0.0),
        GradeRule::new(2).with_size("L", 8.0, 0.0).with_size("S", -8.0, 0.0),
        GradeRule::new(3).with_size("L", 0.0, 10.0).with_size("S", 0.0, -10.0),
        GradeRule::new(4).with_size("L", -8.0, 0.0).with_size("S", 8.0, 0.0),
    ]
}

#[test]
fn test_sleeve_grades_up_and_down() {
    let tol = GeometryTolerance::default();
    let mut store = PanelStore::new();
    let id = store.insert(presets::sleeve("sleeve", 320.0, 220.0, 600.0, 150.0).unwrap());
    let mut editor = PatternEditor::new(id, tol);

    let large = editor.grade(&store, "L", &sleeve_rules()).unwrap();
    let small = editor.grade(&store, "S", &sleeve_rules()).unwrap();
    assert!(large.warnings.is_empty());
    assert_eq!(large.path.point_at(3), Some(Point::new(160.0, 610.0)));
    assert_eq!(small.path.point_at(2), Some(Point::new(312.0, 450.0)));
    assert_eq!(editor.previews().len(), 2);
    // base stays put
    assert_eq!(
        store.get(id).unwrap().landmark_point("cap top"),
        Some(Point::new(160.0, 600.0))
    );
}

#[test]
fn test_ungraded_size_still_renders() {
    let tol = GeometryTolerance::default();
    let panel = presets::sleeve("sleeve", 320.0, 220.0, 600.0, 150.0).unwrap();
    let outcome = grade_panel(&panel, "XXL", &sleeve_rules(), &tol).unwrap();
    assert_eq!(&outcome.path, panel.base());
    assert_eq!(outcome.warnings.len(), 5);
}

proptest! {
    #[test]
    fn prop_base_size_is_identity(
        dx in prop::collection::vec(-20.0f64..20.0, 4),
        dy in prop::collection::vec(-20.0f64..20.0, 4),
        waist in 100.0f64..400.0,
        length in 200.0f64..900.0,
    ) {
        let panel = presets::skirt("skirt", waist, 500.0, length).unwrap();
        let rules: Vec<GradeRule> = (0..4)
            .map(|i| {
                GradeRule::new(i)
                    .with_size("S", -dx[i], -dy[i])
                    .with_size("L", dx[i], dy[i])
            })
            .collect();
        let outcome = grade_panel(&panel, BASE_SIZE_LABEL, &rules, &GeometryTolerance::default())
            .unwrap();
        prop_assert_eq!(&outcome.path, panel.base());
        prop_assert!(outcome.warnings.is_empty());
    }
}
