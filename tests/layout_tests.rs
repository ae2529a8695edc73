use squishy_toggle::layout::{
    center_in, fit_toggle_size, layout_node, Anchors, GuideConfig, HAnchor, LayoutParams,
    Margins, PolarGuide, VAnchor,
};
use squishy_toggle::shapes::frame::frame_guide;
use squishy_toggle::shapes::icon::icon_guide;
use squishy_toggle::utils::{Position, Rectangle, Size};

fn close(a: Position, b: Position) -> bool {
    a.distance(b) < 1e-3
}

#[test]
fn toggle_size_is_two_to_one() {
    let containers = [
        (400.0, 200.0),
        (300.0, 400.0),
        (1000.0, 100.0),
        (37.0, 91.0),
        (800.0, 600.0),
        (1.0, 1.0),
    ];
    for (w, h) in containers {
        let s = fit_toggle_size(Size::new(w, h));
        assert_eq!(s.width, s.height * 2.0, "{w}x{h}");
        assert!(s.width <= w + 1e-4 && s.height <= h + 1e-4, "{w}x{h}");
        // one of the sides fills the container
        assert!((s.width - w).abs() < 1e-4 || (s.height - h).abs() < 1e-4);
    }
}

#[test]
fn toggle_is_centered() {
    let container = Rectangle::new(10.0, 20.0, 300.0, 400.0);
    let rect = center_in(container, fit_toggle_size(container.size()));
    assert_eq!(rect.width, 300.0);
    assert_eq!(rect.height, 150.0);
    assert!(close(rect.center(), container.center()));
}

#[test]
fn anchors_and_margins() {
    let container = Rectangle::new(0.0, 0.0, 100.0, 50.0);
    let params = LayoutParams {
        anchors: Anchors {
            h: HAnchor::Right,
            v: VAnchor::Bottom,
        },
        margins: Margins {
            left: 0.0,
            right: 5.0,
            top: 0.0,
            bottom: 2.0,
        },
    };
    let out = layout_node(container, Size::new(20.0, 10.0), params);
    assert_eq!(out.position.x, 75.0);
    assert_eq!(out.position.y, 38.0);
    assert_eq!(out.size.width, 20.0);
}

#[test]
fn frame_guide_points() {
    let rect = Rectangle::new(0.0, 0.0, 200.0, 100.0);
    let g = frame_guide(rect);
    assert_eq!(g.column_count(), 4);
    assert_eq!(g.row_count(), 3);
    assert!(close(g[(0, 0)], Position::new(50.0, 0.0)));
    assert!(close(g[(1, 0)], Position::new(80.0, 0.0)));
    assert!(close(g[(2, 1)], Position::new(120.0, 50.0)));
    assert!(close(g[(3, 2)], Position::new(150.0, 100.0)));
    assert!(g.at(4, 0).is_none());
}

#[test]
fn icon_guide_rotates_only_when_off() {
    let rect = Rectangle::new(0.0, 0.0, 50.0, 50.0);
    let on = icon_guide(rect, 1.0);
    assert_eq!(on.rotation(), 0.0);
    assert!(close(on.top(), Position::new(25.0, 0.0)));
    assert!(close(on.center(), Position::new(25.0, 25.0)));

    let off = icon_guide(rect, 0.0);
    assert!((off.rotation() + 2.0 / 0.9).abs() < 1e-5);
    // rotation keeps every point on its circle around the centre
    assert!((off.top().distance(off.center()) - 25.0).abs() < 1e-3);
    assert!(close(off.center(), on.center()));
}

#[test]
fn custom_grid_layout() {
    let cfg = GuideConfig::grid(&[0.0, 1.0], &[0.0, 0.25, 1.0]);
    let g = cfg.layout(Rectangle::new(0.0, 0.0, 10.0, 40.0));
    assert!(close(g[(1, 1)], Position::new(10.0, 10.0)));
    assert_eq!(g.points().len(), 6);
}

#[test]
fn polar_guide_top_and_bottom() {
    let polar = PolarGuide::new(Rectangle::new(0.0, 0.0, 20.0, 20.0), 1, 4);
    assert!(close(polar.top(), Position::new(10.0, 0.0)));
    assert!(close(polar.bottom(), Position::new(10.0, 20.0)));
}
