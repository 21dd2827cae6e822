use super::*;

#[test]
fn builtin_table_is_valid_and_ordered() {
    BUILTIN_STYLE.validate().unwrap();
    for kind in GuideKind::ALL {
        assert_eq!(BUILTIN_STYLE.spec(kind).kind, kind);
    }
}

#[test]
fn builtin_widths_and_colors() {
    let s = StyleTable::default();
    assert_eq!(s.spec(GuideKind::GoldenRatio).stroke_width, 2.0);
    assert_eq!(s.spec(GuideKind::Thirds).stroke_width, 2.0);
    assert_eq!(s.spec(GuideKind::Center).stroke_width, 1.0);
    assert_eq!(s.spec(GuideKind::Spiral).stroke_width, 3.0);
    assert_eq!(
        s.spec(GuideKind::GoldenRatio).color,
        Rgba8::new(255, 215, 0, 180)
    );
    assert_eq!(s.legend.background, Rgba8::new(0, 0, 0, 180));
}

#[test]
fn labels_follow_z_order() {
    let labels: Vec<_> = GuideKind::ALL.iter().map(|k| k.label()).collect();
    assert_eq!(
        labels,
        ["Golden Ratio", "Rule of Thirds", "Center", "Golden Spiral"]
    );
}

#[test]
fn json_roundtrip_keeps_table() {
    let json = serde_json::to_string(&BUILTIN_STYLE).unwrap();
    let back = StyleTable::from_json_str(&json).unwrap();
    assert_eq!(back, BUILTIN_STYLE);
}

#[test]
fn json_rejects_misordered_slots() {
    let mut table = BUILTIN_STYLE;
    table.guides.swap(0, 1);
    let json = serde_json::to_string(&table).unwrap();
    let err = StyleTable::from_json_str(&json).unwrap_err();
    assert!(err.to_string().contains("validation error"));
}

#[test]
fn json_rejects_bad_widths_and_syntax() {
    let mut table = BUILTIN_STYLE;
    table.guides[3].stroke_width = 0.0;
    let json = serde_json::to_string(&table).unwrap();
    assert!(StyleTable::from_json_str(&json).is_err());

    let err = StyleTable::from_json_str("{not json").unwrap_err();
    assert!(err.to_string().contains("serialization error"));
}
