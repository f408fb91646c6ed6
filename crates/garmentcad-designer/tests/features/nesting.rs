use garmentcad_core::NestingSettings;
use garmentcad_designer::{
    find_overlaps, pack, presets, GeometryTolerance, NestingPiece, Point, Rotations,
};
use proptest::prelude::*;

fn rect(id: &str, w: f64, h: f64) -> NestingPiece {
    NestingPiece::new(
        id,
        vec![
            Point::new(0.0, 0.0),
            Point::new(w, 0.0),
            Point::new(w, h),
            Point::new(0.0, h),
        ],
    )
}

#[test]
fn test_five_pieces_two_per_shelf() {
    let pieces = vec![rect("panel", 110.0, 100.0)
        .with_rotations(Rotations::none())
        .with_quantity(5)];
    let layout = pack(&pieces, 220.0, &NestingSettings::default()).unwrap();
    assert_eq!(layout.shelf_count, 3);
    assert!(layout.length >= 300.0);
    for shelf in 0..3 {
        let count = layout.placements.iter().filter(|p| p.shelf == shelf).count();
        assert_eq!(count, if shelf < 2 { 2 } else { 1 });
    }
}

#[test]
fn test_five_narrow_rectangles() {
    let pieces = vec![rect("strip", 50.0, 100.0)
        .with_rotations(Rotations::none())
        .with_quantity(5)];
    let layout = pack(&pieces, 220.0, &NestingSettings::default()).unwrap();
    assert_eq!(layout.shelf_count, 2);
    assert_eq!(layout.length, 200.0);
}

#[test]
fn test_deterministic_output() {
    let pieces = vec![
        rect("a", 70.0, 30.0).with_quantity(3),
        rect("b", 45.0, 90.0).with_quantity(2),
        rect("c", 120.0, 60.0),
    ];
    let settings = NestingSettings::default();
    assert_eq!(
        pack(&pieces, 200.0, &settings).unwrap(),
        pack(&pieces, 200.0, &settings).unwrap()
    );
}

#[test]
fn test_preset_panels_nest_with_partial_result() {
    let tol = GeometryTolerance::default();
    let sleeve = presets::sleeve("sleeve", 320.0, 220.0, 600.0, 150.0).unwrap();
    let band = presets::rectangle("waistband", 900.0, 40.0).unwrap();
    let pieces = vec![
        NestingPiece::from_path("sleeve", sleeve.base(), &tol)
            .unwrap()
            .with_quantity(2),
        NestingPiece::from_path("waistband", band.base(), &tol).unwrap(),
    ];
    let layout = pack(&pieces, 700.0, &NestingSettings::default()).unwrap();
    // the waistband only fits turned a quarter
    assert_eq!(layout.placements.len(), 3);
    assert!(layout.unplaceable.is_empty());
    let band_turn = layout
        .placements
        .iter()
        .find(|p| p.piece_id == "waistband")
        .map(|p| p.rotation_deg);
    assert!(matches!(band_turn, Some(r) if r == 90.0 || r == 270.0));
    assert!(find_overlaps(&layout, &pieces, 1e-6).is_empty());

    let layout = pack(&pieces, 30.0, &NestingSettings::default()).unwrap();
    assert!(layout.placements.is_empty());
    assert_eq!(layout.unplaceable.len(), 3);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_layout_never_overlaps(
        sizes in prop::collection::vec((10.0f64..150.0, 10.0f64..150.0, 1u32..3), 1..12),
        spacing in 0.0f64..5.0,
        rotate in any::<bool>(),
    ) {
        let rotations = if rotate { Rotations::quarter_turns() } else { Rotations::none() };
        let pieces: Vec<NestingPiece> = sizes
            .iter()
            .enumerate()
            .map(|(i, (w, h, q))| {
                rect(&format!("p{i}"), *w, *h)
                    .with_rotations(rotations.clone())
                    .with_quantity(*q)
            })
            .collect();
        let settings = NestingSettings { piece_spacing_mm: spacing, ..Default::default() };
        let layout = pack(&pieces, 300.0, &settings).unwrap();
        prop_assert!(layout.unplaceable.is_empty());
        prop_assert!(find_overlaps(&layout, &pieces, 1e-6).is_empty());
        for placement in &layout.placements {
            let piece = pieces.iter().find(|p| p.id == placement.piece_id).unwrap();
            let bounds = placement.apply(piece).bounds().unwrap();
            prop_assert!(bounds.min_x >= -1e-6 && bounds.max_x <= 300.0 + 1e-6);
            prop_assert!(bounds.min_y >= -1e-6 && bounds.max_y <= layout.length + 1e-6);
        }
    }
}
