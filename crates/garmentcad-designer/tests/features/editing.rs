use garmentcad_designer::{
    flatten_with, get_seam_status, presets, EditError, EditMode, GeometryTolerance, PanelStore,
    PatternEditor, Point, SeamEnd, SeamPair, SeamStatus, SeamTolerance,
};

#[test]
fn test_hem_extension_keeps_annotations_attached() {
    let tol = GeometryTolerance::default();
    let mut store = PanelStore::new();
    let id = store.insert(presets::skirt("front skirt", 300.0, 500.0, 600.0).unwrap());
    let mut editor = PatternEditor::new(id, tol);

    assert!(matches!(
        editor.make_parallel(&mut store, 1, 10.0),
        Err(EditError::OutOfEditMode { .. })
    ));
    assert_eq!(editor.toggle_edit_mode(&mut store).unwrap(), EditMode::Edit);
    assert_eq!(editor.handles().len(), 4);

    editor.add_notch_at(&mut store, 3).unwrap();
    let path = editor.make_parallel(&mut store, 1, 10.0).unwrap();
    assert!(path.is_closed());

    let panel = store.get(id).unwrap();
    assert!(!panel.geometrically_invalid);
    assert_eq!(panel.notches()[0].command_index, 5);
    assert_eq!(panel.landmark_point("hem right"), Some(Point::new(500.0, -10.0)));
    assert_eq!(panel.landmark_point("waist right"), Some(Point::new(400.0, 600.0)));
    let area = flatten_with(panel.base(), &tol).unwrap().area();
    assert!((area - 245000.0).abs() < 1e-6);
}

#[test]
fn test_failed_edit_leaves_panel_untouched() {
    let tol = GeometryTolerance::default();
    let mut store = PanelStore::new();
    let id = store.insert(presets::rectangle("facing", 200.0, 50.0).unwrap());
    let before = store.get(id).unwrap().base().clone();
    let mut editor = PatternEditor::new(id, tol);
    editor.toggle_edit_mode(&mut store).unwrap();

    assert!(editor.make_parallel(&mut store, 9, 5.0).is_err());
    assert!(editor.set_segment_length(&mut store, 1, -4.0).is_err());
    assert_eq!(store.get(id).unwrap().base(), &before);
}

#[test]
fn test_numeric_length_then_mirror() {
    let tol = GeometryTolerance::default();
    let mut store = PanelStore::new();
    let id = store.insert(presets::rectangle("yoke", 100.0, 40.0).unwrap());
    let mut editor = PatternEditor::new(id, tol);
    editor.toggle_edit_mode(&mut store).unwrap();

    let path = editor.set_segment_length(&mut store, 1, 120.0).unwrap();
    assert!(path.point_at(1).unwrap().approx_eq(&Point::new(120.0, 0.0), 1e-9));

    let mirrored = editor.mirror(&store).unwrap();
    // bounds run 0..120, so the stretched corner lands on the axis origin
    assert!(mirrored.point_at(1).unwrap().approx_eq(&Point::new(0.0, 0.0), 1e-9));
    assert_eq!(store.get(id).unwrap().base(), &path);

    editor.dispose();
    editor.dispose();
    assert!(matches!(
        editor.mirror(&store),
        Err(EditError::Disposed { .. })
    ));
}

#[test]
fn test_closing_edge_offset_keeps_its_seam() {
    let tol = GeometryTolerance::default();
    let mut store = PanelStore::new();
    let id = store.insert(presets::rectangle("cuff", 100.0, 50.0).unwrap());
    {
        let panel = store.get_mut(id).unwrap();
        panel
            .add_seam(SeamPair::new("cuff ends", SeamEnd::Own(4), SeamEnd::Own(2)))
            .unwrap();
        panel.add_notch(4).unwrap();
    }
    let mut editor = PatternEditor::new(id, tol);
    editor.toggle_edit_mode(&mut store).unwrap();
    editor.make_parallel(&mut store, 4, 5.0).unwrap();

    let panel = store.get(id).unwrap();
    assert_eq!(panel.seams()[0].first, SeamEnd::Own(5));
    assert_eq!(panel.seams()[0].second, SeamEnd::Own(2));
    assert_eq!(panel.notches()[0].command_index, 5);
    assert_eq!(panel.landmark_point("top left"), Some(Point::new(0.0, 50.0)));
    let moved = panel.base().segment(5).unwrap();
    assert_eq!(moved.from(), Point::new(-5.0, 50.0));
    assert_eq!(moved.to(), Point::new(-5.0, 0.0));

    let metrics = get_seam_status(&store, id, &SeamTolerance::default(), &tol).unwrap();
    assert_eq!(metrics.len(), 1);
    assert!((metrics[0].first_length_mm - 50.0).abs() < 1e-9);
    assert_eq!(metrics[0].status, SeamStatus::Ok);
}

#[test]
fn test_hem_offset_on_back_keeps_front_seam_matched() {
    let tol = GeometryTolerance::default();
    let mut store = PanelStore::new();
    let front = store.insert(presets::skirt("front", 300.0, 500.0, 600.0).unwrap());
    let back = store.insert(presets::skirt("back", 300.0, 500.0, 600.0).unwrap());
    store.link_counterparts(front, back).unwrap();
    store
        .get_mut(front)
        .unwrap()
        .add_seam(SeamPair::new("side seam", SeamEnd::Own(2), SeamEnd::Counterpart(2)))
        .unwrap();
    store.get_mut(back).unwrap().add_notch(3).unwrap();

    let mut editor = PatternEditor::new(back, tol);
    editor.toggle_edit_mode(&mut store).unwrap();
    editor.make_parallel(&mut store, 1, 10.0).unwrap();

    assert_eq!(
        store.get(front).unwrap().seams()[0].second,
        SeamEnd::Counterpart(4)
    );
    let back_panel = store.get(back).unwrap();
    assert_eq!(back_panel.notches()[0].command_index, 5);
    assert_eq!(back_panel.landmark_point("waist left"), Some(Point::new(100.0, 600.0)));
    assert_eq!(back_panel.landmark_point("hem right"), Some(Point::new(500.0, -10.0)));

    let metrics = get_seam_status(&store, front, &SeamTolerance::default(), &tol).unwrap();
    assert_eq!(metrics.len(), 1);
    assert!(metrics[0].length_diff_mm.abs() < 1e-9);
    assert_eq!(metrics[0].status, SeamStatus::Ok);
}
