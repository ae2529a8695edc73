use squishy_toggle::replay::TapScript;
use squishy_toggle::utils::{Position, Rectangle};
use squishy_toggle::{SquishyToggle, ToggleError, ToggleStyle, TrackProgress};

fn container() -> Rectangle {
    Rectangle::new(0.0, 0.0, 400.0, 300.0)
}

fn all(p: TrackProgress, v: f32) -> bool {
    p.frame == v && p.labels == v && p.knob == v
}

#[test]
fn starts_at_rest() {
    let on = SquishyToggle::default();
    assert!(on.is_on());
    assert!(all(on.progress(), 1.0));
    assert!(!on.is_animating());

    let off = SquishyToggle::new(false, ToggleStyle::default());
    assert!(all(off.progress(), 0.0));
}

#[test]
fn tap_flips_state_and_completes_within_duration() {
    let mut t = SquishyToggle::new(false, ToggleStyle::default());
    assert!(t.tap());
    assert!(t.is_on());
    assert!(t.is_animating());
    assert!(all(t.progress(), 0.0));

    t.update(0.3);
    let mid = t.progress();
    assert!(mid.knob > 0.0 && mid.knob < 1.0);
    // linear frame track is exactly half way
    assert!((mid.frame - 0.5).abs() < 1e-4);

    t.update(0.3);
    assert!(all(t.progress(), 1.0));
    assert!(!t.is_animating());

    assert!(!t.tap());
    t.update(t.style().duration);
    assert!(all(t.progress(), 0.0));
}

#[test]
fn frame_by_frame_settles_exactly() {
    let mut t = SquishyToggle::new(true, ToggleStyle::default());
    t.tap();
    for _ in 0..40 {
        t.update(1.0 / 60.0);
    }
    assert!(all(t.progress(), 0.0));
}

#[test]
fn retap_mid_flight_has_no_jump() {
    let c = container();
    let mut t = SquishyToggle::new(false, ToggleStyle::default());
    t.tap();
    t.update(0.25);
    let before = t.snapshot(c);

    t.tap();
    assert!(!t.is_on());
    let after = t.snapshot(c);
    assert_eq!(before.progress, after.progress);
    assert_eq!(before.knob.center, after.knob.center);

    t.update(1.0 / 60.0);
    let next = t.snapshot(c);
    assert!(next.knob.center.x <= after.knob.center.x);
    assert!(after.knob.center.x - next.knob.center.x < 5.0);

    t.update(t.style().duration);
    assert!(all(t.progress(), 0.0));
}

#[test]
fn taps_only_land_inside_the_capsule() {
    let c = container();
    let mut t = SquishyToggle::new(false, ToggleStyle::default());
    let rect = t.frame_rect(c);
    assert_eq!(rect.width, 400.0);
    assert_eq!(rect.height, 200.0);
    assert_eq!(rect.y, 50.0);

    // above the capsule
    assert!(!t.tap_at(c, Position::new(200.0, 20.0)));
    // rounded corner of the bounding box
    assert!(!t.tap_at(c, Position::new(3.0, 53.0)));
    assert!(!t.is_on());

    assert!(t.tap_at(c, Position::new(200.0, 150.0)));
    assert!(t.is_on());
    assert!(t.tap_at(c, Position::new(10.0, 150.0)));
    assert!(!t.is_on());
}

#[test]
fn snapshot_places_labels_and_knob() {
    let c = container();
    let style = ToggleStyle::default();
    let on = SquishyToggle::new(true, style.clone()).snapshot(c);
    let center = on.frame_rect.center();

    let [on_label, off_label] = &on.labels;
    assert_eq!(on_label.text, "ON");
    assert_eq!(on_label.center, center.x_offset(-100.0));
    assert_eq!(on_label.opacity, 1.0);
    assert_eq!(off_label.text, "OFF");
    assert_eq!(off_label.center, center.x_offset(100.0));
    assert_eq!(off_label.opacity, 0.0);
    assert_eq!(off_label.scale, 0.0);
    assert!((on_label.font_size - 60.0).abs() < 1e-3);

    assert_eq!(on.knob.center, center.x_offset(100.0));
    assert!((on.knob.diameter - 180.0).abs() < 1e-3);
    assert_eq!(on.icon_rect.center(), on.knob.center);
    assert!((on.icon_rect.width - 100.0).abs() < 1e-3);
    assert!((on.shadow_radius - 6.0).abs() < 1e-3);
    assert!((on.shadow_offset.x - 4.0).abs() < 1e-3);
    assert!((on.icon_line_width - 16.0).abs() < 1e-3);
    assert_eq!(on.frame_color, style.on_color);

    let off = SquishyToggle::new(false, style.clone()).snapshot(c);
    assert_eq!(off.knob.center, center.x_offset(-100.0));
    assert_eq!(off.labels[1].opacity, 1.0);
    assert_eq!(off.frame_color, style.off_color);
}

#[test]
fn debug_mode_centres_the_knob() {
    let style = ToggleStyle {
        debug: true,
        ..ToggleStyle::default()
    };
    let c = container();
    let s = SquishyToggle::new(false, style).snapshot(c);
    assert!(s.debug);
    assert_eq!(s.knob.center, s.frame_rect.center());
}

#[test]
fn icon_colour_is_brightened_state_colour() {
    let s = SquishyToggle::new(true, ToggleStyle::default()).snapshot(container());
    let expected = ToggleStyle::default().on_color.scaled(1.5);
    assert_eq!(s.icon_color, expected);
}

#[test]
fn replayed_taps_follow_the_script() {
    let c = container();
    let mut t = SquishyToggle::new(false, ToggleStyle::default());
    let script = TapScript::new(vec![0.0], 1.0);
    let frames = script.run(&mut t, c).expect("valid script");

    assert_eq!(frames.len(), 61);
    assert!(frames[0].is_on);
    assert_eq!(frames[0].time, 0.0);
    assert!(frames.windows(2).all(|w| w[1].knob_x >= w[0].knob_x));
    let last = frames.last().expect("frames");
    assert!(all(last.progress, 1.0));
    assert_eq!(last.knob_x, 300.0);
}

#[test]
fn double_tap_returns_to_rest() {
    let mut t = SquishyToggle::new(true, ToggleStyle::default());
    let script = TapScript::new(vec![0.1, 0.3], 1.2);
    let frames = script.run(&mut t, container()).expect("valid script");
    assert!(frames.iter().any(|f| !f.is_on));
    let last = frames.last().expect("frames");
    assert!(last.is_on);
    assert!(all(last.progress, 1.0));
}

#[test]
fn script_json_round_trip_uses_default_fps() {
    let script = TapScript::from_json(r#"{ "taps": [0.5], "length": 2.0 }"#).expect("parse");
    assert_eq!(script.fps, 60.0);
    let again = TapScript::from_json(&script.to_json().expect("json")).expect("reparse");
    assert_eq!(again, script);
}

#[test]
fn out_of_range_scripts_are_rejected() {
    for json in [
        r#"{ "taps": [], "length": 1e30 }"#,
        r#"{ "taps": [], "length": -1.0 }"#,
        r#"{ "taps": [], "length": 1.0, "fps": 0.0 }"#,
        r#"{ "taps": [], "length": 1.0, "fps": 1e9 }"#,
    ] {
        let err = TapScript::from_json(json).unwrap_err();
        assert!(matches!(err, ToggleError::InvalidScript(_)), "{json}: {err}");
    }
}

#[test]
fn run_rejects_unbounded_script_without_stepping() {
    let mut t = SquishyToggle::new(false, ToggleStyle::default());
    let mut script = TapScript::new(vec![0.0], f32::INFINITY);
    let err = script.run(&mut t, container()).unwrap_err();
    assert!(matches!(err, ToggleError::InvalidScript(_)));
    assert!(!t.is_on());

    script.length = 1e30;
    assert!(script.run(&mut t, container()).is_err());
    script.length = 1.0;
    script.fps = f32::NAN;
    assert!(script.run(&mut t, container()).is_err());
    assert!(!t.is_on());
}
