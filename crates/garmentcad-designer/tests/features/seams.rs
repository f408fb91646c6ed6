use garmentcad_designer::{
    check_store, export_gate, get_seam_status, presets, ExportGate, GeometryTolerance, PanelId,
    PanelStore, SeamEnd, SeamPair, SeamStatus, SeamTolerance,
};

/// Front and back skirt joined along their right side seams.
fn skirt_pair(back_length: f64) -> (PanelStore, PanelId, PanelId) {
    let mut store = PanelStore::new();
    let front = store.insert(presets::skirt("front", 300.0, 500.0, 600.0).unwrap());
    let back = store.insert(presets::skirt("back", 300.0, 500.0, back_length).unwrap());
    store.link_counterparts(front, back).unwrap();
    store
        .get_mut(front)
        .unwrap()
        .add_seam(SeamPair::new("side seam", SeamEnd::Own(2), SeamEnd::Counterpart(2)))
        .unwrap();
    (store, front, back)
}

fn status(back_length: f64) -> SeamStatus {
    let (store, front, _) = skirt_pair(back_length);
    let metrics = get_seam_status(
        &store,
        front,
        &SeamTolerance::default(),
        &GeometryTolerance::default(),
    )
    .unwrap();
    assert_eq!(metrics.len(), 1);
    metrics[0].status
}

#[test]
fn test_side_seam_classification() {
    // side seam lengths: sqrt(100^2 + length^2)
    assert_eq!(status(602.0), SeamStatus::Ok);
    assert_eq!(status(603.0), SeamStatus::Warn);
    assert_eq!(status(605.0), SeamStatus::Fail);
}

#[test]
fn test_counterpart_sees_the_seam() {
    let (store, _, back) = skirt_pair(603.0);
    let metrics = get_seam_status(
        &store,
        back,
        &SeamTolerance::default(),
        &GeometryTolerance::default(),
    )
    .unwrap();
    assert_eq!(metrics.len(), 1);
    assert_eq!(metrics[0].label, "side seam");
    // straight seams: the only mismatch is the extra length at the end
    assert!((metrics[0].shape_deviation_mm - metrics[0].length_diff_mm).abs() < 1e-6);
}

#[test]
fn test_export_gate_over_store() {
    let tol = GeometryTolerance::default();
    let (store, _, _) = skirt_pair(603.0);
    let report = check_store(&store, &SeamTolerance::default(), &tol).unwrap();
    assert!(export_gate(report.iter().flat_map(|(_, m)| m)).is_pass());

    let (store, _, _) = skirt_pair(605.0);
    let report = check_store(&store, &SeamTolerance::default(), &tol).unwrap();
    assert!(matches!(
        export_gate(report.iter().flat_map(|(_, m)| m)),
        ExportGate::Blocked { .. }
    ));

    // a looser style profile lets the same pattern through
    let loose = SeamTolerance::new(3.0, 5.0).unwrap();
    let report = check_store(&store, &loose, &tol).unwrap();
    assert!(export_gate(report.iter().flat_map(|(_, m)| m)).is_pass());
}
