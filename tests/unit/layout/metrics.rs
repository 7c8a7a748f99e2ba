use super::*;

const EPS: f64 = 1e-6;

// Monospace-ish estimate: 0.6 em per glyph.
fn time_advance(width: u32, glyphs: usize) -> f64 {
    f64::from(width) * 0.09 * 0.6 * glyphs as f64
}

fn canvas(width: u32, height: u32) -> Canvas {
    Canvas { width, height }
}

#[test]
fn reference_capture_geometry() {
    let ratios = LayoutRatios::default();
    let adv = time_advance(1920, 5);
    let m = LayoutMetrics::compute(canvas(1920, 1080), adv, 2, &ratios).unwrap();

    assert!((m.time_size - 172.8).abs() < EPS);
    assert!((m.date_size - 67.2).abs() < EPS);
    assert!((m.location_size - 57.6).abs() < EPS);
    assert!((m.info_box.x0 - 76.8).abs() < EPS);
    assert!((m.box_pad_x - 51.84).abs() < EPS);
    assert!((m.box_pad_y - 25.92).abs() < EPS);

    let box_w = 51.84 * 3.0 + adv + 172.8 * 0.8;
    assert!((m.info_box.width() - box_w).abs() < EPS);
    assert!((m.info_box.height() - (172.8 + 2.0 * 25.92)).abs() < EPS);

    let reserved = 67.2 * 1.5 + 2.0 * 57.6 * 1.4;
    let anchor = 1080.0 - 96.0 - reserved - 0.5 * (172.8 + 51.84);
    assert!((m.anchor_y - anchor).abs() < EPS);
    assert!((m.info_box.y0 - (anchor - 172.8 + 25.92)).abs() < EPS);
    assert!((m.time_origin.y - (anchor + 12.96)).abs() < EPS);

    assert!((m.bar.width() - 15.36).abs() < EPS);
    assert!((m.bar.y0 - (anchor + 51.84)).abs() < EPS);
    assert!((m.text_x - (76.8 + 15.36 + 38.4)).abs() < EPS);
    assert!((m.box_corner - 15.0).abs() < EPS);
    assert!((m.icon_corner - 8.0).abs() < EPS);
}

#[test]
fn icon_sits_after_measured_time_and_is_vertically_centered() {
    let ratios = LayoutRatios::default();
    let adv = 321.0;
    let m = LayoutMetrics::compute(canvas(1920, 1080), adv, 1, &ratios).unwrap();

    assert!((m.icon.x0 - (m.info_box.x0 + 2.0 * m.box_pad_x + adv)).abs() < EPS);
    assert!((m.icon.x1 + m.box_pad_x - m.info_box.x1).abs() < EPS);
    let top_gap = m.icon.y0 - m.info_box.y0;
    let bottom_gap = m.info_box.y1 - m.icon.y1;
    assert!((top_gap - bottom_gap).abs() < EPS);
    assert!((m.check_stroke_width - 0.1 * m.icon.width()).abs() < EPS);

    let c = m.icon.center();
    let arm = m.icon.width() * 0.25;
    assert!((m.check_points[0].x - (c.x - arm)).abs() < EPS);
    assert!((m.check_points[1].y - (c.y + 0.8 * arm)).abs() < EPS);
    assert!((m.check_points[2].x - (c.x + 1.2 * arm)).abs() < EPS);
    for p in m.check_points {
        assert!(m.icon.contains(p));
    }
}

#[test]
fn icon_size_ignores_time_advance() {
    let ratios = LayoutRatios::default();
    let short = LayoutMetrics::compute(canvas(1280, 720), 92.7, 0, &ratios).unwrap();
    let long = LayoutMetrics::compute(canvas(1280, 720), 331.3, 0, &ratios).unwrap();
    assert!(long.icon.x0 > short.icon.x0);
    // Edges are placed from different origins, so widths only agree to rounding.
    assert!((long.icon.width() - short.icon.width()).abs() < EPS);
    assert!((long.icon.width() - 0.8 * long.time_size).abs() < EPS);
    assert!((long.icon.height() - long.icon.width()).abs() < EPS);
}

#[test]
fn text_block_height_follows_line_count() {
    let ratios = LayoutRatios::default();
    for n in 0..=2usize {
        let m = LayoutMetrics::compute(canvas(1920, 1080), 500.0, n, &ratios).unwrap();
        let expected = 1.5 * m.date_size + n as f64 * 1.3 * m.location_size;
        assert!((m.text_block_height() - expected).abs() < EPS, "n={n}");
        let reserved = 1.5 * m.date_size + n as f64 * 1.4 * m.location_size;
        assert!((m.reserved_block_height - reserved).abs() < EPS, "n={n}");
        for i in 0..n {
            let y = m.date_y + 1.5 * m.date_size + i as f64 * 1.3 * m.location_size;
            assert!((m.location_y(i) - y).abs() < EPS);
        }
    }
}

#[test]
fn no_location_reserves_only_the_date_line() {
    let ratios = LayoutRatios::default();
    let with = LayoutMetrics::compute(canvas(1920, 1080), 500.0, 2, &ratios).unwrap();
    let without = LayoutMetrics::compute(canvas(1920, 1080), 500.0, 0, &ratios).unwrap();

    assert!((without.text_block_height() - 1.5 * without.date_size).abs() < EPS);
    let shift = 2.0 * 1.4 * with.location_size;
    assert!((without.anchor_y - with.anchor_y - shift).abs() < EPS);
    assert_eq!(without.info_box.width(), with.info_box.width());
}

#[test]
fn layout_is_bit_identical_across_calls() {
    let ratios = LayoutRatios::default();
    let a = LayoutMetrics::compute(canvas(1280, 720), 287.5, 2, &ratios).unwrap();
    let b = LayoutMetrics::compute(canvas(1280, 720), 287.5, 2, &ratios).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.anchor_y.to_bits(), b.anchor_y.to_bits());
    assert_eq!(a.info_box.x1.to_bits(), b.info_box.x1.to_bits());
}

#[test]
fn watermark_stays_inside_reference_aspect_ratios() {
    let ratios = LayoutRatios::default();
    let shapes = [(16u32, 9u32), (4, 3), (1, 1), (3, 4), (9, 16)];
    for width in [1u32, 7, 64, 320, 641, 1080, 1920, 3840] {
        for (aw, ah) in shapes {
            let height = ((u64::from(width) * u64::from(ah)) / u64::from(aw)).max(1) as u32;
            for n in 0..=2usize {
                let m =
                    LayoutMetrics::compute(canvas(width, height), time_advance(width, 5), n, &ratios)
                        .unwrap();
                let (w, h) = (f64::from(width), f64::from(height));
                let tag = format!("{width}x{height} n={n}");
                for r in [m.info_box, m.icon, m.bar] {
                    assert!(r.x0 >= 0.0 && r.y0 >= 0.0, "{tag}: {r:?}");
                    assert!(r.x1 <= w && r.y1 <= h, "{tag}: {r:?}");
                }
                assert!(m.text_x >= 0.0 && m.text_x <= w, "{tag}");
                assert!(m.anchor_y >= 0.0 && m.time_origin.y <= h, "{tag}");
                assert!(m.location_y(n) <= h, "{tag}");
            }
        }
    }
}

#[test]
fn zero_width_is_invalid_frame() {
    let err = LayoutMetrics::compute(canvas(0, 1080), 10.0, 0, &LayoutRatios::default());
    assert!(matches!(err, Err(StampError::InvalidFrame(_))));
}

#[test]
fn bad_measurement_is_rejected() {
    let err = LayoutMetrics::compute(canvas(100, 100), f64::NAN, 0, &LayoutRatios::default());
    assert!(matches!(err, Err(StampError::Measurement(_))));
}
