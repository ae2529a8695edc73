//! The state icon drawn on the knob.
//!
//! Four cubics join the guide's top, trailing, bottom and leading anchors. At
//! progress 0 the control points sit on the 0.552 circle offsets and the
//! outline is a ring, turned by the off rotation. At progress 1 the leading
//! and trailing anchors collapse onto the centre and the outline becomes a
//! vertical bar. Every point in between is a straight interpolation.

use crate::layout::{GuideConfig, LayoutGuide};
use crate::path::ShapePath;
use crate::utils::Rectangle;

/// Control-point offset that makes four cubics approximate a circle.
pub const CIRCLE_CONTROL_RATIO: f32 = 0.552;

/// Knob diameter relative to the frame height.
pub const BUTTON_DIAMETER_RATIO: f32 = 0.9;

/// Rotation of the icon guide while fully off, in radians.
pub fn rotation_if_off() -> f32 {
    -(2.0 / BUTTON_DIAMETER_RATIO)
}

pub fn icon_guide_config() -> GuideConfig {
    let k = CIRCLE_CONTROL_RATIO * 0.5;
    let lines = [0.0, 0.5 - k, 0.5, 0.5 + k, 1.0];
    GuideConfig::grid(&lines, &lines)
}

/// Icon guide over `rect`, turned by the off rotation weighted by `1 - progress`.
pub fn icon_guide(rect: Rectangle, progress: f32) -> LayoutGuide {
    icon_guide_config()
        .layout(rect)
        .rotated(rotation_if_off(), 1.0 - progress)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconPose {
    /// Ring, progress 0.
    Off,
    /// Bar, progress 1.
    On,
}

impl IconPose {
    pub fn progress(self) -> f32 {
        match self {
            IconPose::Off => 0.0,
            IconPose::On => 1.0,
        }
    }
}

pub fn icon_path_for(rect: Rectangle, pose: IconPose) -> ShapePath {
    icon_path(rect, pose.progress())
}

pub fn icon_path(rect: Rectangle, progress: f32) -> ShapePath {
    let p = progress.clamp(0.0, 1.0);
    let g = icon_guide(rect, p);
    let center = g.center();
    let top = g.top();
    let bottom = g.bottom();
    let start = g.leading().lerp(center, p);

    let mut path = ShapePath::new();
    path.move_to(start);
    path.cubic_to(
        top,
        g[(0, 1)].lerp(g[(2, 1)], p),
        g[(1, 0)].lerp(top.y_offset(1.0), p),
    );
    path.cubic_to(
        g.trailing().lerp(center, p),
        g[(3, 0)].lerp(top.y_offset(1.0), p),
        g[(4, 1)].lerp(g[(2, 1)], p),
    );
    path.cubic_to(
        bottom,
        g[(4, 3)].lerp(g[(2, 3)], p),
        g[(3, 4)].lerp(bottom.y_offset(-1.0), p),
    );
    path.cubic_to(
        start,
        g[(1, 4)].lerp(bottom.y_offset(-1.0), p),
        g[(0, 3)].lerp(g[(2, 3)], p),
    );
    path.close();
    path
}
