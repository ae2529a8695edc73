use squishy_toggle::effects::stack_blur;
use squishy_toggle::{save_png, Renderer, SquishyToggle, ToggleError, ToggleStyle};
use tiny_skia::Pixmap;

fn rgba(p: &Pixmap, x: u32, y: u32) -> [u8; 4] {
    let c = p.pixel(x, y).expect("pixel in range").demultiply();
    [c.red(), c.green(), c.blue(), c.alpha()]
}

#[test]
fn on_frame_is_green_inside() {
    let renderer = Renderer::new();
    let t = SquishyToggle::new(true, ToggleStyle::default());
    let p = renderer.render(&t, 400, 200).expect("render");
    let [r, g, b, a] = rgba(&p, 190, 100);
    assert_eq!(a, 255);
    assert!(g > 200 && r < 40 && b < 40, "got {r} {g} {b}");
}

#[test]
fn off_frame_is_red_inside() {
    let renderer = Renderer::new();
    let t = SquishyToggle::new(false, ToggleStyle::default());
    let p = renderer.render(&t, 400, 200).expect("render");
    let [r, g, b, _] = rgba(&p, 210, 100);
    assert!(r > 200 && g < 40 && b < 40, "got {r} {g} {b}");
}

#[test]
fn corners_show_the_grey_background() {
    let renderer = Renderer::new();
    let p = renderer
        .render(&SquishyToggle::default(), 400, 200)
        .expect("render");
    let [r, g, b, a] = rgba(&p, 2, 2);
    assert_eq!(a, 255);
    assert!(r > 200 && r.abs_diff(g) <= 1 && g.abs_diff(b) <= 1);
    // the gradient darkens towards the bottom right
    let [r2, ..] = rgba(&p, 397, 197);
    assert!(r2 < r);
}

#[test]
fn mid_transition_changes_pixels() {
    let renderer = Renderer::new();
    let mut t = SquishyToggle::new(false, ToggleStyle::default());
    let start = renderer.render(&t, 200, 100).expect("render");
    t.tap();
    t.update(0.3);
    let mid = renderer.render(&t, 200, 100).expect("render");
    assert_ne!(start.data(), mid.data());
}

#[test]
fn debug_render_draws_black_outlines() {
    let style = ToggleStyle {
        debug: true,
        ..ToggleStyle::default()
    };
    let renderer = Renderer::new();
    let p = renderer
        .render(&SquishyToggle::new(true, style), 400, 200)
        .expect("render");
    // left end of the frame outline
    let [r, g, b, _] = rgba(&p, 0, 100);
    assert!(r < 80 && g < 80 && b < 80, "got {r} {g} {b}");
}

#[test]
fn empty_canvas_is_rejected() {
    let renderer = Renderer::new();
    let err = renderer
        .render(&SquishyToggle::default(), 0, 100)
        .unwrap_err();
    assert!(matches!(
        err,
        ToggleError::InvalidCanvas {
            width: 0,
            height: 100
        }
    ));
}

#[test]
fn png_is_written() {
    let renderer = Renderer::new();
    let p = renderer
        .render(&SquishyToggle::default(), 120, 60)
        .expect("render");
    let path = std::env::temp_dir().join(format!("squishy_toggle_{}.png", std::process::id()));
    save_png(&p, &path).expect("save");
    let img = image::open(&path).expect("decode").to_rgba8();
    assert_eq!(img.dimensions(), (120, 60));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn blur_of_solid_pixmap_is_unchanged() {
    let mut p = Pixmap::new(16, 16).expect("pixmap");
    p.fill(tiny_skia::Color::from_rgba8(10, 200, 30, 255));
    let before = p.data().to_vec();
    stack_blur(&mut p, 3);
    assert_eq!(p.data(), &before[..]);
}
