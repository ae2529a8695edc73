//! The pill-shaped outline of the toggle.
//!
//! Top and bottom edges are pairs of cubics whose inner control points dip
//! towards the centre by the bulge offset; the ends are half circles.

use crate::layout::{GuideConfig, LayoutGuide, PolarGuide};
use crate::path::ShapePath;
use crate::utils::Rectangle;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Deepest dip of the top and bottom edges, as a fraction of the frame height.
pub const MAX_CURVE_Y_OFFSET_RATIO: f32 = 0.18;

pub fn frame_guide_config() -> GuideConfig {
    GuideConfig::grid_n(&[0.25, 0.4, 0.6, 0.75], 2)
}

pub fn frame_guide(rect: Rectangle) -> LayoutGuide {
    frame_guide_config().layout(rect)
}

/// Vertical offset of the edge control points at `progress`.
///
/// Taken from the bottom anchor of a one-point polar guide over a
/// `0.18 * height` square, turned a full revolution as progress runs 0 → 1.
/// It is largest at both ends and zero half way.
pub fn bulge_offset(rect: Rectangle, progress: f32) -> f32 {
    let max = rect.height * MAX_CURVE_Y_OFFSET_RATIO;
    let square = Rectangle::new_square(0.0, 0.0, max);
    PolarGuide::new(square, 1, 1)
        .rotated(TAU, progress.clamp(0.0, 1.0))
        .bottom()
        .y
}

pub fn frame_path(rect: Rectangle, progress: f32) -> ShapePath {
    let c = bulge_offset(rect, progress);
    let g = frame_guide(rect);
    let radius = rect.height * 0.5;

    let mut path = ShapePath::new();
    path.move_to(g[(0, 0)]);
    path.cubic_to(rect.top().y_offset(c), g[(1, 0)], g[(1, 0)].y_offset(c));
    path.cubic_to(g[(3, 0)], g[(2, 0)].y_offset(c), g[(2, 0)]);
    path.arc(g[(3, 1)], radius, -FRAC_PI_2, PI);
    path.cubic_to(rect.bottom().y_offset(-c), g[(2, 2)], g[(2, 2)].y_offset(-c));
    path.cubic_to(g[(0, 2)], g[(1, 2)].y_offset(-c), g[(1, 2)]);
    path.arc(g[(0, 1)], radius, FRAC_PI_2, PI);
    path.close();
    path
}
