use super::*;

fn cfg(scroll_start: f64, scroll_end: f64, bounds: Bounds) -> PlayerConfig {
    PlayerConfig {
        scroll_start,
        scroll_end,
        bounds,
        ..PlayerConfig::default()
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn band_lines_measure_up_from_bottom() {
    let band = AnimationBand::new(1000.0, 0.25, 0.75);
    assert!(approx(band.start_line, 750.0));
    assert!(approx(band.end_line, 250.0));
    assert!(approx(band.distance(), 500.0));
}

#[test]
fn outside_starts_when_top_enters_and_ends_when_bottom_leaves() {
    let c = cfg(0.0, 1.0, Bounds::Outside);

    let below = scroll_progress(&Geometry::vertical(1000.0, 1500.0, 1000.0), &c);
    assert!(approx(below, 0.0));

    let gone = scroll_progress(&Geometry::vertical(-500.0, 0.0, 1000.0), &c);
    assert!(approx(gone, 1.0));

    let at_top = scroll_progress(&Geometry::vertical(0.0, 500.0, 1000.0), &c);
    assert!(approx(at_top, 2.0 / 3.0));
}

#[test]
fn outside_progress_grows_as_element_scrolls_up() {
    let c = cfg(0.0, 1.0, Bounds::Outside);
    let mut prev = f64::NEG_INFINITY;
    for step in 0..=20 {
        let top = 1000.0 - f64::from(step) * 50.0;
        let p = scroll_progress(&Geometry::vertical(top, top + 500.0, 1000.0), &c);
        assert!(p > prev, "progress must increase monotonically (top={top})");
        assert!((0.0..1.0).contains(&p) || approx(p, 0.0));
        prev = p;
    }
    assert!(prev > 0.6 && prev < 1.0);
}

#[test]
fn outside_is_unclamped_near_band() {
    let c = cfg(0.0, 1.0, Bounds::Outside);
    let p = scroll_progress(&Geometry::vertical(1100.0, 1600.0, 1000.0), &c);
    assert!(p < 0.0);
}

#[test]
fn inside_completes_while_element_spans_band() {
    let c = cfg(0.0, 1.0, Bounds::Inside);
    // 200px element in a 1000px band: 0 when its bottom sits on the start line.
    let start = scroll_progress(&Geometry::vertical(800.0, 1000.0, 1000.0), &c);
    assert!(approx(start, 0.0));
    // 1 when its top sits on the end line.
    let end = scroll_progress(&Geometry::vertical(0.0, 200.0, 1000.0), &c);
    assert!(approx(end, 1.0));
    let mid = scroll_progress(&Geometry::vertical(400.0, 600.0, 1000.0), &c);
    assert!(approx(mid, 0.5));
}

#[test]
fn center_tracks_midpoint() {
    let c = cfg(0.0, 1.0, Bounds::Center);
    let start = scroll_progress(&Geometry::vertical(900.0, 1100.0, 1000.0), &c);
    assert!(approx(start, 0.0));
    let half = scroll_progress(&Geometry::vertical(400.0, 600.0, 1000.0), &c);
    assert!(approx(half, 0.5));
    let end = scroll_progress(&Geometry::vertical(-100.0, 100.0, 1000.0), &c);
    assert!(approx(end, 1.0));
}

#[test]
fn narrowed_band_shifts_lines() {
    let c = cfg(0.5, 1.0, Bounds::Center);
    // Start line at 500, end line at 0.
    let start = scroll_progress(&Geometry::vertical(450.0, 550.0, 1000.0), &c);
    assert!(approx(start, 0.0));
    let half = scroll_progress(&Geometry::vertical(200.0, 300.0, 1000.0), &c);
    assert!(approx(half, 0.5));
}

#[test]
fn reversed_band_runs_backwards() {
    let forward = cfg(0.0, 1.0, Bounds::Center);
    let reversed = cfg(1.0, 0.0, Bounds::Center);
    let g = Geometry::vertical(150.0, 250.0, 1000.0);
    let f = scroll_progress(&g, &forward);
    let r = scroll_progress(&g, &reversed);
    assert!(approx(f + r, 1.0));
}

#[test]
fn bounds_serialize_lowercase() {
    assert_eq!(serde_json::to_string(&Bounds::Inside).unwrap(), "\"inside\"");
    let b: Bounds = serde_json::from_str("\"center\"").unwrap();
    assert_eq!(b, Bounds::Center);
}
