use super::*;

const SIZES: &[(f64, f64)] = &[
    (1.0, 1.0),
    (1.0, 1000.0),
    (1000.0, 1.0),
    (2.0, 3.0),
    (10.0, 10.0),
    (640.0, 480.0),
    (1920.0, 1080.0),
    (1080.0, 1920.0),
    (1597.0, 987.0),
    (65535.0, 7.0),
];

fn approx(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn golden_lines_are_strictly_inside_and_ordered() {
    for &(w, h) in SIZES {
        let g = golden_ratio_lines(w, h);
        assert!(0.0 < g.vx1 && g.vx1 < g.vx2 && g.vx2 < w, "{w}x{h}: {g:?}");
        assert!(0.0 < g.hy1 && g.hy1 < g.hy2 && g.hy2 < h, "{w}x{h}: {g:?}");
        assert!(approx(g.vx2, w / PHI, 1e-9));
        assert!(approx(g.vx1 + g.vx2, w, 1e-9));
    }
}

#[test]
fn thirds_split_each_axis_evenly() {
    for &(w, h) in SIZES {
        let t = thirds_lines(w, h);
        assert_eq!(t.xs, [w / 3.0, 2.0 * w / 3.0]);
        assert_eq!(t.ys, [h / 3.0, 2.0 * h / 3.0]);
        assert!(approx(t.xs[0], t.xs[1] - t.xs[0], 1e-9));
        assert!(approx(t.xs[1] - t.xs[0], w - t.xs[1], 1e-9));
    }
}

#[test]
fn full_hd_scenario() {
    let g = golden_ratio_lines(1920.0, 1080.0);
    assert!(approx(g.vx1, 733.5, 0.5));
    assert!(approx(g.vx2, 1186.5, 0.5));
    assert!(approx(g.hy1, 412.5, 0.5));
    assert!(approx(g.hy2, 667.5, 0.5));

    let t = thirds_lines(1920.0, 1080.0);
    assert_eq!(t.xs, [640.0, 1280.0]);
    assert_eq!(t.ys, [360.0, 720.0]);

    let c = center_lines(1920.0, 1080.0);
    assert_eq!((c.x, c.y), (960.0, 540.0));

    let legend = legend_box(1920.0, 1080.0, 4);
    assert_eq!(legend, Rect::new(1762.0, 982.0, 1910.0, 1070.0));
    assert!(approx(legend.x0, 1920.0 - 148.0, 10.0));
    assert!(approx(legend.y0, 1080.0 - 90.0, 10.0));
}

#[test]
fn spiral_never_exceeds_cap_and_terminates() {
    for &(w, h) in SIZES {
        let arcs = spiral_arcs(w, h);
        assert!(arcs.len() <= MAX_SPIRAL_ARCS, "{w}x{h}");
        assert!(!arcs.is_empty(), "{w}x{h}");
    }
    assert!(spiral_arcs(0.5, 100.0).is_empty());
    assert!(spiral_arcs(f64::NAN, 100.0).is_empty());
}

#[test]
fn spiral_on_golden_rectangle_uses_all_twelve_arcs() {
    let arcs = spiral_arcs(1597.0, 987.0);
    assert_eq!(arcs.len(), MAX_SPIRAL_ARCS);
}

#[test]
fn spiral_small_square_stops_early() {
    let arcs = spiral_arcs(10.0, 10.0);
    assert_eq!(arcs.len(), 1);
    assert_eq!(arcs[0].bounding_box, Rect::new(0.0, 0.0, 20.0, 20.0));
    assert_eq!((arcs[0].start_angle, arcs[0].end_angle), (180.0, 270.0));
}

#[test]
fn spiral_phases_follow_fixed_angle_table() {
    let arcs = spiral_arcs(1597.0, 987.0);
    let expected = [(180.0, 270.0), (270.0, 360.0), (0.0, 90.0), (90.0, 180.0)];
    for (i, a) in arcs.iter().enumerate() {
        assert_eq!((a.start_angle, a.end_angle), expected[i % 4], "arc {i}");
        assert!(approx(a.bounding_box.width(), a.bounding_box.height(), 1e-9));
    }
}

#[test]
fn spiral_full_hd_boxes() {
    let arcs = spiral_arcs(1920.0, 1080.0);
    let boxes: Vec<_> = arcs.iter().map(|a| a.bounding_box).collect();
    assert_eq!(
        boxes,
        vec![
            Rect::new(0.0, 0.0, 2160.0, 2160.0),
            Rect::new(240.0, 0.0, 1920.0, 1680.0),
            Rect::new(1440.0, 600.0, 1920.0, 1080.0),
            Rect::new(1080.0, 600.0, 1560.0, 1080.0),
        ]
    );
}

#[test]
fn phases_two_and_three_keep_origin() {
    let arcs = spiral_arcs(1597.0, 987.0);
    assert_eq!(arcs[2].bounding_box, Rect::new(843.0, 233.0, 1597.0, 987.0));
    assert_eq!(arcs[3].bounding_box, Rect::new(987.0, 521.0, 1453.0, 987.0));
}

#[test]
fn arc_converts_to_quarter_circle() {
    let seg = ArcSegment {
        bounding_box: Rect::new(0.0, 0.0, 20.0, 20.0),
        start_angle: 180.0,
        end_angle: 270.0,
    };
    let arc = seg.to_arc();
    assert_eq!(arc.center, Point::new(10.0, 10.0));
    assert_eq!(arc.radii, kurbo::Vec2::new(10.0, 10.0));
    assert!(approx(arc.sweep_angle, std::f64::consts::FRAC_PI_2, 1e-12));
}

#[test]
fn legend_box_is_contained_when_it_fits() {
    for &(w, h) in SIZES {
        let (bw, bh) = LegendMetrics::DEFAULT.box_size(4);
        let b = legend_box(w, h, 4);
        assert!(b.x0 >= 0.0 && b.y0 >= 0.0, "{w}x{h}");
        if w >= bw + 10.0 && h >= bh + 10.0 {
            assert!(b.x1 <= w && b.y1 <= h, "{w}x{h}");
            assert_eq!(b.x1, w - 10.0);
            assert_eq!(b.y1, h - 10.0);
        }
    }
}

#[test]
fn legend_box_clamps_for_tiny_images() {
    let b = legend_box(10.0, 10.0, 4);
    assert_eq!((b.x0, b.y0), (0.0, 0.0));
    assert_eq!((b.width(), b.height()), (148.0, 88.0));
}

#[test]
fn legend_rows_stack_at_fixed_height() {
    let m = LegendMetrics::DEFAULT;
    let b = legend_box(1920.0, 1080.0, 4);
    let rows = m.rows(b, 4);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].swatch, Line::new((1770.0, 997.0), (1790.0, 997.0)));
    assert_eq!(rows[0].label_origin, Point::new(1796.0, 989.0));
    for pair in rows.windows(2) {
        assert_eq!(pair[1].label_origin.y - pair[0].label_origin.y, 18.0);
    }
    assert!(rows[3].swatch.p0.y < b.y1);
    assert_eq!(legend_rows(b, 4), rows);
}

#[test]
fn guide_lines_span_the_image() {
    let g = GuideGeometry::compute(ImageSize::new(1920, 1080).unwrap());
    let golden = g.guide_lines(GuideKind::GoldenRatio);
    assert_eq!(golden.len(), 4);
    assert_eq!(golden[0].p0.y, 0.0);
    assert_eq!(golden[0].p1.y, 1080.0);
    assert_eq!(golden[2].p0.x, 0.0);
    assert_eq!(golden[2].p1.x, 1920.0);

    assert_eq!(g.guide_lines(GuideKind::Thirds).len(), 4);
    assert_eq!(g.guide_lines(GuideKind::Center).len(), 2);
    assert!(g.guide_lines(GuideKind::Spiral).is_empty());
}

#[test]
fn degenerate_axes_draw_fewer_lines() {
    let g = GuideGeometry::compute(ImageSize::new(1, 1000).unwrap());
    let lines = g.guide_lines(GuideKind::GoldenRatio);
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|l| l.p0.y == l.p1.y));

    let g = GuideGeometry::compute(ImageSize::new(1, 1).unwrap());
    assert!(g.guide_lines(GuideKind::Center).is_empty());
}
