use crate::anim::Animated;
use crate::layout::{center_in, fit_toggle_size};
use crate::path::ShapePath;
use crate::shapes::{frame::frame_path, icon::icon_path};
use crate::style::{RgbaColor, ToggleStyle};
use crate::utils::{lerp, Position, Rectangle, Size};

/// Sampled progress of the three animated tracks, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackProgress {
    /// Frame bulge and frame colour.
    pub frame: f32,
    /// ON/OFF label fade and scale.
    pub labels: f32,
    /// Knob slide, icon morph and icon colour.
    pub knob: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelVisual {
    pub text: String,
    pub center: Position,
    pub font_size: f32,
    pub opacity: f32,
    pub scale: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobVisual {
    pub center: Position,
    pub diameter: f32,
}

impl KnobVisual {
    pub fn rect(&self) -> Rectangle {
        Rectangle::centered_at(self.center, Size::new(self.diameter, self.diameter))
    }
}

/// Every visual property of one frame, derived from the state and the track progress.
#[derive(Debug, Clone)]
pub struct ToggleSnapshot {
    pub progress: TrackProgress,
    pub frame_rect: Rectangle,
    pub frame_path: ShapePath,
    pub frame_color: RgbaColor,
    pub labels: [LabelVisual; 2],
    pub knob: KnobVisual,
    pub icon_rect: Rectangle,
    pub icon_path: ShapePath,
    pub icon_color: RgbaColor,
    pub icon_line_width: f32,
    pub shadow_radius: f32,
    pub shadow_offset: Position,
    pub shadow_opacity: f32,
    pub debug: bool,
}

/// The toggle widget: one boolean plus the animations that follow it.
#[derive(Debug, Clone)]
pub struct SquishyToggle {
    is_on: bool,
    style: ToggleStyle,
    frame: Animated,
    labels: Animated,
    knob: Animated,
}

impl Default for SquishyToggle {
    fn default() -> Self {
        Self::new(true, ToggleStyle::default())
    }
}

impl SquishyToggle {
    /// Starts at rest in the given state.
    pub fn new(is_on: bool, style: ToggleStyle) -> Self {
        let v = target_for(is_on);
        Self {
            is_on,
            style,
            frame: Animated::new(v),
            labels: Animated::new(v),
            knob: Animated::new(v),
        }
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    pub fn style(&self) -> &ToggleStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut ToggleStyle {
        &mut self.style
    }

    /// Flips the state and starts the transition. Returns the new state.
    pub fn tap(&mut self) -> bool {
        self.set_on(!self.is_on);
        self.is_on
    }

    pub fn set_on(&mut self, on: bool) {
        if on == self.is_on {
            return;
        }
        self.is_on = on;
        let target = target_for(on);
        let d = self.style.duration;
        self.frame.set_target(target, d, self.style.frame_ease);
        self.labels.set_target(target, d, self.style.label_ease);
        self.knob.set_target(target, d, self.style.knob_ease);
        log::debug!("toggle -> {}", if on { "on" } else { "off" });
    }

    /// Taps only when `point` lands inside the capsule laid out in `container`.
    pub fn tap_at(&mut self, container: Rectangle, point: Position) -> bool {
        if self.hit_test(container, point) {
            self.tap();
            true
        } else {
            false
        }
    }

    pub fn hit_test(&self, container: Rectangle, point: Position) -> bool {
        self.frame_rect(container).capsule_contains(point)
    }

    /// Advances every track by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.frame.step(dt);
        self.labels.step(dt);
        self.knob.step(dt);
    }

    pub fn is_animating(&self) -> bool {
        self.frame.is_animating() || self.labels.is_animating() || self.knob.is_animating()
    }

    pub fn progress(&self) -> TrackProgress {
        TrackProgress {
            frame: self.frame.value().clamp(0.0, 1.0),
            labels: self.labels.value().clamp(0.0, 1.0),
            knob: self.knob.value().clamp(0.0, 1.0),
        }
    }

    /// 2:1 rectangle fitted and centred in `container`.
    pub fn frame_rect(&self, container: Rectangle) -> Rectangle {
        center_in(container, fit_toggle_size(container.size()))
    }

    pub fn snapshot(&self, container: Rectangle) -> ToggleSnapshot {
        let style = &self.style;
        let progress = self.progress();
        let frame_rect = self.frame_rect(container);
        let size = frame_rect.size();
        let center = frame_rect.center();
        let half_height = size.half_height();

        let shadow_radius = size.width_scaled(style.shadow_radius_ratio);
        let shadow_offset = size.width_scaled(style.shadow_offset_ratio);
        let font_size = size.width_scaled(style.label_text_ratio);

        let labels = [
            LabelVisual {
                text: style.on_label.clone(),
                center: center.x_offset(-half_height),
                font_size,
                opacity: progress.labels,
                scale: progress.labels,
            },
            LabelVisual {
                text: style.off_label.clone(),
                center: center.x_offset(half_height),
                font_size,
                opacity: 1.0 - progress.labels,
                scale: 1.0 - progress.labels,
            },
        ];

        let knob_dx = if style.debug {
            0.0
        } else {
            lerp(-half_height, half_height, progress.knob)
        };
        let knob = KnobVisual {
            center: center.x_offset(knob_dx),
            diameter: size.height_scaled(style.knob_diameter_ratio),
        };
        let icon_rect = Rectangle::centered_at(knob.center, Size::new(half_height, half_height));

        ToggleSnapshot {
            progress,
            frame_rect,
            frame_path: frame_path(frame_rect, progress.frame),
            frame_color: style.state_color(progress.frame),
            labels,
            knob,
            icon_rect,
            icon_path: icon_path(icon_rect, progress.knob),
            icon_color: style
                .state_color(progress.knob)
                .scaled(style.icon_color_scale),
            icon_line_width: size.width_scaled(style.icon_line_width_ratio),
            shadow_radius,
            shadow_offset: Position::new(shadow_offset, shadow_offset),
            shadow_opacity: style.shadow_opacity,
            debug: style.debug,
        }
    }
}

fn target_for(on: bool) -> f32 {
    if on {
        1.0
    } else {
        0.0
    }
}
